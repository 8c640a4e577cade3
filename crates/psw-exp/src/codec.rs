use psw_core::errors::{ErrorInfo, SweepError};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Persistence format for parameter files and the master index.
///
/// YAML is the default and the format the on-disk layout is documented
/// around; JSON is kept for tooling that prefers it. Both round-trip the
/// closed value model without loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    Yaml,
    Json,
}

impl Codec {
    /// Probe order used when reloading a sweep root.
    pub(crate) const ALL: [Codec; 2] = [Codec::Yaml, Codec::Json];

    /// Resolves a codec from a format tag, accepting a leading dot.
    ///
    /// Unknown tags fail before any file is written, naming the offending
    /// value.
    pub fn from_tag(tag: &str) -> Result<Self, SweepError> {
        match tag.trim_start_matches('.') {
            "yml" | "yaml" => Ok(Codec::Yaml),
            "json" => Ok(Codec::Json),
            other => Err(SweepError::Format(
                ErrorInfo::new("format-unknown", "unsupported parameter format")
                    .with_context("format", other)
                    .with_hint("supported formats: yml, yaml, json"),
            )),
        }
    }

    /// File extension written for this codec (without the dot).
    pub const fn extension(&self) -> &'static str {
        match self {
            Codec::Yaml => "yml",
            Codec::Json => "json",
        }
    }

    /// Serializes a value to the codec's textual representation.
    pub fn to_bytes<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, SweepError> {
        match self {
            Codec::Yaml => serde_yaml::to_string(value)
                .map(String::into_bytes)
                .map_err(|err| wrap("codec-encode-yaml", err.to_string())),
            Codec::Json => serde_json::to_vec_pretty(value)
                .map_err(|err| wrap("codec-encode-json", err.to_string())),
        }
    }

    /// Deserializes a value from the codec's textual representation.
    pub fn from_slice<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, SweepError> {
        match self {
            Codec::Yaml => serde_yaml::from_slice(bytes)
                .map_err(|err| wrap("codec-decode-yaml", err.to_string())),
            Codec::Json => serde_json::from_slice(bytes)
                .map_err(|err| wrap("codec-decode-json", err.to_string())),
        }
    }
}

impl Default for Codec {
    fn default() -> Self {
        Codec::Yaml
    }
}

fn wrap(code: &str, message: String) -> SweepError {
    SweepError::Serde(ErrorInfo::new(code, message))
}
