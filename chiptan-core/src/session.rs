//! Transaction session
//!
//! Encodes the transaction fields once and keeps both payloads read-only
//! for the rest of the run.

use chiptan_protocol::{
    encode_bqr, encode_hhduc, BqrPayload, EncodeError, FlickerCode, HhducPayload,
    TransactionFields,
};

/// Both encoded payloads for one transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    hhduc: HhducPayload,
    bqr: BqrPayload,
}

impl Session {
    /// Encode `fields` into HHDuc and BQR
    ///
    /// Fails before anything is displayed if a field is invalid or a
    /// payload would overflow its length prefix.
    pub fn prepare(fields: &TransactionFields<'_>) -> Result<Self, EncodeError> {
        let hhduc = encode_hhduc(fields)?;
        let bqr = encode_bqr(&hhduc)?;
        Ok(Self { hhduc, bqr })
    }

    pub fn hhduc(&self) -> &HhducPayload {
        &self.hhduc
    }

    pub fn bqr(&self) -> &BqrPayload {
        &self.bqr
    }

    /// A fresh flicker cursor over this session's HHDuc
    pub fn flicker_code(&self) -> FlickerCode<'_> {
        FlickerCode::new(&self.hhduc)
    }
}
