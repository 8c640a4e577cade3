//! Parameter sweep orchestration: expansion, identity assignment, and
//! durable manifest persistence.

mod alloc;
mod codec;
mod expand;
mod hash;
mod manifest;
mod record;

pub use alloc::{IdAllocator, JobId, DEFAULT_ID_WIDTH, DEFAULT_MAX_RETRIES};
pub use codec::Codec;
pub use expand::{expand, Axis, ExpansionPolicy, SweepSpec};
pub use hash::stable_hash_string;
pub use manifest::{ManifestEntry, SweepManifest, MANIFEST_BASENAME, PARAMETERS_BASENAME};
pub use record::ParamRecord;
