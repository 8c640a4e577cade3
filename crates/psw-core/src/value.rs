//! Closed variant model for parameter values.
//!
//! Parameter files are authored by humans and read back by analysis tools,
//! so the value model is deliberately closed: a scalar is a boolean, an
//! integer, a float, or a string, and a value is either one scalar or an
//! ordered list of scalars. Everything in this module serializes untagged so
//! parameter files read as plain YAML or JSON.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// A single scalar parameter value.
///
/// Variant order matters for untagged deserialization: booleans before
/// integers, integers before floats, so `true` and `12345` keep their
/// natural types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Boolean flag.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Double precision float.
    Float(f64),
    /// UTF-8 string.
    Text(String),
}

impl Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(v) => write!(f, "{v}"),
            Scalar::Int(v) => write!(f, "{v}"),
            Scalar::Float(v) => write!(f, "{v}"),
            Scalar::Text(v) => write!(f, "{v}"),
        }
    }
}

/// One parameter value: a scalar, or an ordered list of scalars when the
/// "single" parameter passed to a run is itself a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// A single scalar.
    Scalar(Scalar),
    /// An ordered sequence of scalars.
    List(Vec<Scalar>),
}

/// One resolved parameter combination, in axis insertion order.
pub type ParamMap = IndexMap<String, ParamValue>;

impl From<Scalar> for ParamValue {
    fn from(scalar: Scalar) -> Self {
        ParamValue::Scalar(scalar)
    }
}

impl From<Vec<Scalar>> for ParamValue {
    fn from(list: Vec<Scalar>) -> Self {
        ParamValue::List(list)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Text(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Text(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Scalar(Scalar::Bool(v))
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Scalar(Scalar::Int(v))
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Scalar(Scalar::Float(v))
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Scalar(Scalar::Text(v.to_string()))
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Scalar(Scalar::Text(v))
    }
}
