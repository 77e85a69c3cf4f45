//! BQR matrix generation

use qrcode::{Color, EcLevel, QrCode};
use thiserror::Error;

use chiptan_display::QrMatrix;

#[derive(Debug, Error)]
#[error("cannot encode BQR as QR code: {0}")]
pub struct QrError(qrcode::types::QrError);

/// QR code holding the raw BQR bytes
pub struct BqrCode {
    code: QrCode,
}

impl BqrCode {
    /// Encode `bqr` in byte mode with low error correction
    pub fn new(bqr: &[u8]) -> Result<Self, QrError> {
        let code = QrCode::with_error_correction_level(bqr, EcLevel::L).map_err(QrError)?;
        Ok(Self { code })
    }
}

impl QrMatrix for BqrCode {
    fn width(&self) -> usize {
        self.code.width()
    }

    fn is_dark(&self, x: usize, y: usize) -> bool {
        self.code[(x, y)] == Color::Dark
    }
}
