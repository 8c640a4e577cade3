use std::fs;
use std::path::PathBuf;

use psw_core::errors::{ErrorInfo, SweepError};
use psw_core::value::ParamMap;
use serde::{Deserialize, Serialize};

use crate::codec::Codec;
use crate::manifest::PARAMETERS_BASENAME;

/// One concrete parameter combination and its storage location.
///
/// Records start life unplaced: expansion produces values only, and the
/// manifest assigns the directory during `build`. After placement a record
/// is immutable apart from explicit re-saves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamRecord {
    /// Resolved axis name to chosen value mapping.
    pub values: ParamMap,
    /// Absolute directory the record is stored under, once placed.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl ParamRecord {
    /// Creates an unplaced record from resolved values.
    pub fn new(values: ParamMap) -> Self {
        Self { values, path: None }
    }

    /// Writes `parameters.<ext>` into the record's assigned directory.
    pub fn save(&self, codec: &Codec) -> Result<(), SweepError> {
        let dir = self.path.as_ref().ok_or_else(|| {
            SweepError::Config(ErrorInfo::new(
                "record-unplaced",
                "record has no assigned directory; build a manifest first",
            ))
        })?;
        let bytes = codec.to_bytes(&self.values)?;
        let target = dir.join(format!("{}.{}", PARAMETERS_BASENAME, codec.extension()));
        fs::write(&target, bytes).map_err(|err| {
            SweepError::Serde(
                ErrorInfo::new("record-write", err.to_string())
                    .with_context("path", target.display().to_string()),
            )
        })
    }
}
