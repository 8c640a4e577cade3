use psw_core::errors::{ErrorInfo, SweepError};
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Computes a stable hexadecimal hash for the provided serializable payload.
///
/// Parameter maps are insertion-ordered, so their JSON encoding is already a
/// deterministic function of the specification that produced them.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, SweepError> {
    let bytes = serde_json::to_vec(value)
        .map_err(|err| SweepError::Serde(ErrorInfo::new("hash-encode", err.to_string())))?;
    let digest = Sha256::digest(bytes);
    Ok(format!("{:x}", digest))
}
