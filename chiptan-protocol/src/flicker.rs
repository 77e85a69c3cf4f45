//! Flicker code state machine
//!
//! Walks the start sequence followed by the HHDuc bytes and produces one
//! [`FlickerFrame`] per tick. Every nibble is held for a full clock cycle
//! (clock high, then clock low), low nibble first. After the last HHDuc byte
//! the cycle restarts with the start sequence.

/// Sync marker that opens every transmission cycle
pub const START_SEQUENCE: [u8; 2] = [0x0F, 0xFF];

/// Frames per transmitted byte (2 nibbles x 2 clock phases)
pub const FRAMES_PER_BYTE: usize = 4;

/// One optical signal frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlickerFrame {
    /// Clock field
    pub clock: bool,
    /// Data nibble (0..=15)
    pub nibble: u8,
}

impl FlickerFrame {
    /// Data bit `bit` (0 = least significant)
    pub fn data_bit(&self, bit: u8) -> bool {
        (self.nibble >> bit) & 1 != 0
    }

    /// The five optical fields: clock, then data bits LSB first
    pub fn fields(&self) -> [bool; 5] {
        [
            self.clock,
            self.data_bit(0),
            self.data_bit(1),
            self.data_bit(2),
            self.data_bit(3),
        ]
    }
}

/// Transmission cursor over the start sequence and an HHDuc buffer
#[derive(Debug, Clone)]
pub struct FlickerCode<'a> {
    data: &'a [u8],
    byte_index: usize,
    low_half_pending: bool,
    clock_high: bool,
}

impl<'a> FlickerCode<'a> {
    /// Create a cursor at the start of a cycle
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            byte_index: 0,
            low_half_pending: true,
            clock_high: true,
        }
    }

    /// Return to the start of the cycle
    pub fn reset(&mut self) {
        self.byte_index = 0;
        self.low_half_pending = true;
        self.clock_high = true;
    }

    /// Index into the logical stream (start sequence, then data)
    pub fn byte_index(&self) -> usize {
        self.byte_index
    }

    /// Whether the cursor sits at the very start of a cycle
    pub fn at_cycle_start(&self) -> bool {
        self.byte_index == 0 && self.low_half_pending && self.clock_high
    }

    /// Frames emitted per full cycle
    pub fn cycle_len(&self) -> usize {
        FRAMES_PER_BYTE * self.stream_len()
    }

    /// Frames emitted since the start of the current cycle
    pub fn position(&self) -> usize {
        FRAMES_PER_BYTE * self.byte_index
            + if self.low_half_pending { 0 } else { 2 }
            + if self.clock_high { 0 } else { 1 }
    }

    fn stream_len(&self) -> usize {
        START_SEQUENCE.len() + self.data.len()
    }

    fn current_byte(&self) -> u8 {
        if self.byte_index < START_SEQUENCE.len() {
            START_SEQUENCE[self.byte_index]
        } else {
            self.data[self.byte_index - START_SEQUENCE.len()]
        }
    }

    /// Emit the frame for the current state and advance by one tick
    pub fn tick(&mut self) -> FlickerFrame {
        let byte = self.current_byte();
        let frame = FlickerFrame {
            clock: self.clock_high,
            nibble: if self.low_half_pending {
                byte & 0x0F
            } else {
                byte >> 4
            },
        };

        if self.clock_high {
            // Hold the nibble through the falling edge
            self.clock_high = false;
            return frame;
        }

        self.clock_high = true;
        if self.low_half_pending {
            self.low_half_pending = false;
        } else {
            self.low_half_pending = true;
            self.byte_index += 1;
            if self.byte_index >= self.stream_len() {
                self.byte_index = 0;
            }
        }

        frame
    }
}

/// Endless frame stream
impl Iterator for FlickerCode<'_> {
    type Item = FlickerFrame;

    fn next(&mut self) -> Option<FlickerFrame> {
        Some(self.tick())
    }
}
