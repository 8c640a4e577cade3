#![deny(missing_docs)]
#![doc = "Core error, value, and randomness types shared by the parameter sweep engine."]

pub mod errors;
pub mod rng;
pub mod schema;
pub mod value;

pub use errors::{ErrorInfo, SweepError};
pub use rng::{derive_substream_seed, RngHandle};
pub use schema::SchemaVersion;
pub use value::{ParamMap, ParamValue, Scalar};
