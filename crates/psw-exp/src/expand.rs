use std::collections::BTreeSet;

use psw_core::errors::{ErrorInfo, SweepError};
use psw_core::value::{ParamMap, ParamValue};
use serde::{Deserialize, Serialize};

use crate::record::ParamRecord;

/// One named parameter dimension with its ordered candidate values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub name: String,
    pub values: Vec<ParamValue>,
}

impl Axis {
    /// Builds an axis from a name and anything convertible to parameter values.
    pub fn new(name: impl Into<String>, values: impl IntoIterator<Item = ParamValue>) -> Self {
        Self {
            name: name.into(),
            values: values.into_iter().collect(),
        }
    }
}

/// Multi-axis parameter specification. Axis order drives expansion order:
/// the first axis varies slowest under [`ExpansionPolicy::AllPermutations`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepSpec {
    pub axes: Vec<Axis>,
}

impl SweepSpec {
    /// Builds a specification from an ordered collection of axes.
    pub fn new(axes: impl IntoIterator<Item = Axis>) -> Self {
        Self {
            axes: axes.into_iter().collect(),
        }
    }

    fn validate(&self) -> Result<(), SweepError> {
        if self.axes.is_empty() {
            return Err(SweepError::Config(ErrorInfo::new(
                "sweep-empty-spec",
                "specification has no axes",
            )));
        }
        let mut names = BTreeSet::new();
        for axis in &self.axes {
            if !names.insert(axis.name.as_str()) {
                return Err(SweepError::Config(
                    ErrorInfo::new("sweep-duplicate-axis", "axis name appears more than once")
                        .with_context("axis", axis.name.clone()),
                ));
            }
            if axis.values.is_empty() {
                return Err(SweepError::Config(
                    ErrorInfo::new("sweep-empty-axis", "axis has no candidate values")
                        .with_context("axis", axis.name.clone()),
                ));
            }
        }
        Ok(())
    }
}

/// Rule for combining axis values into concrete combinations.
///
/// Bounded subsampling of the permutation space is a planned third policy;
/// any such policy must keep the deterministic-ordering and
/// no-duplicate-tuple contracts of the existing two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum ExpansionPolicy {
    /// Full cross-product across all axes.
    AllPermutations,
    /// Pairs the i-th value of every axis; all axes must have equal length.
    OneToOne,
}

impl ExpansionPolicy {
    /// Resolves a policy from its configuration name.
    pub fn from_name(name: &str) -> Result<Self, SweepError> {
        match name {
            "all_permutations" => Ok(ExpansionPolicy::AllPermutations),
            "one_to_one" => Ok(ExpansionPolicy::OneToOne),
            other => Err(SweepError::Config(
                ErrorInfo::new("sweep-unknown-policy", "unknown expansion policy")
                    .with_context("policy", other)
                    .with_hint("supported policies: all_permutations, one_to_one"),
            )),
        }
    }
}

/// Expands a specification into an ordered sequence of parameter records.
///
/// The returned order is deterministic for a given spec and policy: re-running
/// expansion against an unchanged spec reproduces the same sequence, which
/// idempotent persistence relies on. Records come back with their storage
/// path unset; placement happens when a manifest is built.
pub fn expand(spec: &SweepSpec, policy: &ExpansionPolicy) -> Result<Vec<ParamRecord>, SweepError> {
    spec.validate()?;
    let maps = match policy {
        ExpansionPolicy::AllPermutations => {
            let mut outputs = Vec::new();
            expand_grid(&spec.axes, 0, ParamMap::new(), &mut outputs);
            outputs
        }
        ExpansionPolicy::OneToOne => expand_paired(&spec.axes)?,
    };
    Ok(maps.into_iter().map(ParamRecord::new).collect())
}

fn expand_grid(axes: &[Axis], idx: usize, current: ParamMap, outputs: &mut Vec<ParamMap>) {
    if idx == axes.len() {
        outputs.push(current);
        return;
    }
    let axis = &axes[idx];
    for value in &axis.values {
        let mut next = current.clone();
        next.insert(axis.name.clone(), value.clone());
        expand_grid(axes, idx + 1, next, outputs);
    }
}

fn expand_paired(axes: &[Axis]) -> Result<Vec<ParamMap>, SweepError> {
    let len = axes[0].values.len();
    for axis in axes {
        if axis.values.len() != len {
            return Err(SweepError::Config(
                ErrorInfo::new(
                    "sweep-axis-length-mismatch",
                    "one_to_one requires equal axis lengths",
                )
                .with_context("axis", axis.name.clone())
                .with_context("expected", len.to_string())
                .with_context("actual", axis.values.len().to_string()),
            ));
        }
    }
    let mut outputs = Vec::with_capacity(len);
    for i in 0..len {
        let mut map = ParamMap::new();
        for axis in axes {
            map.insert(axis.name.clone(), axis.values[i].clone());
        }
        outputs.push(map);
    }
    Ok(outputs)
}
