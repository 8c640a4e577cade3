use std::collections::BTreeSet;
use std::fmt::{self, Display};

use psw_core::errors::{ErrorInfo, SweepError};
use psw_core::rng::{derive_substream_seed, RngHandle};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Default identifier width in random bytes (16 hex characters, 64 bits of
/// entropy).
pub const DEFAULT_ID_WIDTH: usize = 8;

/// Default number of redraw rounds before a collision is reported as fatal.
pub const DEFAULT_MAX_RETRIES: usize = 5;

/// Fixed-width lowercase-hex token naming one job within a sweep.
///
/// The token contains only `[0-9a-f]`, so it is safe as a directory name on
/// every target platform.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Allocates batches of unique job identifiers from an explicit RNG stream.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    rng: RngHandle,
    width: usize,
    max_retries: usize,
}

impl IdAllocator {
    /// Creates an allocator drawing from the provided RNG handle.
    pub fn new(rng: RngHandle) -> Self {
        Self {
            rng,
            width: DEFAULT_ID_WIDTH,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Creates an allocator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(RngHandle::from_entropy())
    }

    /// Creates an allocator on the deterministic substream derived from a
    /// master seed.
    pub fn for_substream(master_seed: u64, substream: u64) -> Self {
        Self::new(RngHandle::from_seed(derive_substream_seed(
            master_seed,
            substream,
        )))
    }

    /// Overrides the identifier width in bytes.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Overrides the collision retry budget.
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn draw(&mut self) -> JobId {
        let mut bytes = vec![0u8; self.width];
        self.rng.fill_bytes(&mut bytes);
        JobId(hex::encode(bytes))
    }

    /// Allocates `n` pairwise-distinct identifiers.
    ///
    /// Candidates are drawn up front; when duplicates appear, only the
    /// colliding entries are redrawn, for at most the configured number of
    /// rounds. Exhausting the budget is a hard failure because a tolerated
    /// collision would corrupt the identifier to record mapping.
    pub fn allocate(&mut self, n: usize) -> Result<Vec<JobId>, SweepError> {
        let mut ids: Vec<JobId> = (0..n).map(|_| self.draw()).collect();
        let mut rounds = 0;
        loop {
            let mut seen = BTreeSet::new();
            let colliding: Vec<usize> = ids
                .iter()
                .enumerate()
                .filter(|(_, id)| !seen.insert((*id).clone()))
                .map(|(idx, _)| idx)
                .collect();
            if colliding.is_empty() {
                return Ok(ids);
            }
            if rounds == self.max_retries {
                return Err(SweepError::Allocation(
                    ErrorInfo::new(
                        "id-collision-retries",
                        "identifier collision exhausted retries",
                    )
                    .with_context("requested", n.to_string())
                    .with_context("colliding", colliding.len().to_string())
                    .with_context("width_bytes", self.width.to_string())
                    .with_context("retries", self.max_retries.to_string()),
                ));
            }
            rounds += 1;
            for idx in colliding {
                ids[idx] = self.draw();
            }
        }
    }
}
