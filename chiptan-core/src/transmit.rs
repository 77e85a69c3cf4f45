//! Flicker transmission loop
//!
//! Emits one frame per tick until the cancellation future resolves. The
//! tick boundary is the only suspension point: each iteration waits up to
//! one period for cancellation and, on timeout, performs exactly one
//! state machine transition.

use core::future::Future;
use core::pin::pin;

use embassy_time::{with_timeout, Duration};

use chiptan_protocol::FlickerCode;

use crate::traits::FrameSink;

/// Summary of a finished transmission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransmitStats {
    /// Frames handed to the sink
    pub frames: u64,
    /// Complete passes over start sequence and HHDuc
    pub cycles: u64,
}

/// Drive `code` into `sink` every `period` until `cancel` resolves
///
/// `cancel` is polled once per tick and never again after it resolves; no
/// frame is emitted after that. A sink error stops the loop and is
/// returned as is.
pub async fn transmit<S, C>(
    code: &mut FlickerCode<'_>,
    sink: &mut S,
    cancel: C,
    period: Duration,
) -> Result<TransmitStats, S::Error>
where
    S: FrameSink,
    C: Future<Output = ()>,
{
    let mut cancel = pin!(cancel);
    let mut stats = TransmitStats::default();

    loop {
        if with_timeout(period, cancel.as_mut()).await.is_ok() {
            return Ok(stats);
        }

        let frame = code.tick();
        sink.show(frame)?;

        stats.frames += 1;
        if code.at_cycle_start() {
            stats.cycles += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chiptan_protocol::FlickerFrame;
    use core::future;
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use embassy_sync::signal::Signal;
    use embassy_time::Instant;

    const PERIOD: Duration = Duration::from_millis(1);

    /// Records frames and raises `cancel` after `limit` of them
    struct CancellingSink<'s> {
        frames: Vec<FlickerFrame>,
        limit: usize,
        cancel: &'s Signal<NoopRawMutex, ()>,
    }

    impl FrameSink for CancellingSink<'_> {
        type Error = ();

        fn show(&mut self, frame: FlickerFrame) -> Result<(), ()> {
            assert!(self.frames.len() < self.limit, "frame emitted after cancel");
            self.frames.push(frame);
            if self.frames.len() == self.limit {
                self.cancel.signal(());
            }
            Ok(())
        }
    }

    struct FailingSink {
        shown: usize,
        fail_at: usize,
    }

    impl FrameSink for FailingSink {
        type Error = &'static str;

        fn show(&mut self, _frame: FlickerFrame) -> Result<(), &'static str> {
            self.shown += 1;
            if self.shown == self.fail_at {
                return Err("display gone");
            }
            Ok(())
        }
    }

    fn run_until(data: &[u8], limit: usize) -> (Vec<FlickerFrame>, TransmitStats) {
        let cancel = Signal::<NoopRawMutex, ()>::new();
        let mut sink = CancellingSink {
            frames: Vec::new(),
            limit,
            cancel: &cancel,
        };
        let mut code = FlickerCode::new(data);
        let stats = block_on(transmit(&mut code, &mut sink, cancel.wait(), PERIOD)).unwrap();
        (sink.frames, stats)
    }

    #[test]
    fn test_cancel_before_first_tick() {
        let data = [0x04, 0xC1, 0x01, 0x31, 0x3A];
        let mut code = FlickerCode::new(&data);
        let mut sink = FailingSink {
            shown: 0,
            fail_at: 1,
        };
        let stats = block_on(transmit(&mut code, &mut sink, future::ready(()), PERIOD)).unwrap();

        assert_eq!(stats, TransmitStats::default());
        assert_eq!(sink.shown, 0);
        assert!(code.at_cycle_start());
    }

    #[test]
    fn test_cancel_mid_cycle() {
        let data = [0x04, 0xC1, 0x01, 0x31, 0x3A];
        let (frames, stats) = run_until(&data, 7);

        assert_eq!(frames.len(), 7);
        assert_eq!(stats.frames, 7);
        assert_eq!(stats.cycles, 0);

        let expected: Vec<FlickerFrame> = FlickerCode::new(&data).take(7).collect();
        assert_eq!(frames, expected);
    }

    #[test]
    fn test_clock_alternates() {
        let (frames, _) = run_until(&[0xAB, 0xCD], 30);
        for (i, frame) in frames.iter().enumerate() {
            assert_eq!(frame.clock, i % 2 == 0);
        }
    }

    #[test]
    fn test_counts_full_cycles() {
        // One data byte: 4 * (2 + 1) = 12 frames per cycle
        let (frames, stats) = run_until(&[0x3A], 25);
        assert_eq!(frames.len(), 25);
        assert_eq!(stats.cycles, 2);
        assert_eq!(&frames[..12], &frames[12..24]);
    }

    #[test]
    fn test_sink_error_stops_loop() {
        let data = [0x3A];
        let mut code = FlickerCode::new(&data);
        let mut sink = FailingSink {
            shown: 0,
            fail_at: 3,
        };
        let result = block_on(transmit(&mut code, &mut sink, future::pending(), PERIOD));

        assert_eq!(result, Err("display gone"));
        assert_eq!(sink.shown, 3);
    }

    #[test]
    fn test_ticks_are_paced() {
        let period = Duration::from_millis(5);
        let cancel = Signal::<NoopRawMutex, ()>::new();
        let mut sink = CancellingSink {
            frames: Vec::new(),
            limit: 4,
            cancel: &cancel,
        };
        let data = [0x3A];
        let mut code = FlickerCode::new(&data);

        let start = Instant::now();
        block_on(transmit(&mut code, &mut sink, cancel.wait(), period)).unwrap();
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // Every case sleeps one period per frame
            #![proptest_config(ProptestConfig::with_cases(24))]

            #[test]
            fn emits_exactly_limit_frames(
                data in proptest::collection::vec(any::<u8>(), 0..16),
                limit in 1usize..48,
            ) {
                let (frames, stats) = run_until(&data, limit);
                prop_assert_eq!(frames.len(), limit);
                prop_assert_eq!(stats.frames, limit as u64);

                let expected: Vec<FlickerFrame> = FlickerCode::new(&data).take(limit).collect();
                prop_assert_eq!(frames, expected);

                let cycle = 4 * (2 + data.len());
                prop_assert_eq!(stats.cycles, (limit / cycle) as u64);
            }
        }
    }
}
