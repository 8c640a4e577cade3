use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use psw_core::errors::{ErrorInfo, SweepError};
use psw_core::schema::SchemaVersion;
use psw_core::value::ParamMap;
use serde::{Deserialize, Serialize};

use crate::alloc::{IdAllocator, JobId};
use crate::codec::Codec;
use crate::hash::stable_hash_string;
use crate::record::ParamRecord;

/// Basename of the master index at the sweep root.
pub const MANIFEST_BASENAME: &str = "manifest";

/// Basename of the per-job parameter file.
pub const PARAMETERS_BASENAME: &str = "parameters";

/// One identifier bound to its placed parameter record.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestEntry {
    pub id: JobId,
    pub record: ParamRecord,
}

/// Master record binding identifiers to parameters and directories for one
/// sweep invocation.
///
/// The manifest exclusively owns its entries; identifiers never repeat and
/// every identifier maps to exactly one directory under the root.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepManifest {
    pub root: PathBuf,
    pub created_at: String,
    pub params_hash: String,
    pub entries: Vec<ManifestEntry>,
}

/// Serialized form of the master index.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ManifestIndex {
    schema_version: SchemaVersion,
    created_at: String,
    params_hash: String,
    entries: Vec<IndexEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct IndexEntry {
    id: JobId,
    path: String,
    parameters: ParamMap,
}

/// Removes directories created during one build unless the build commits.
///
/// Dropping the guard on any early return rolls the batch back, so a failed
/// build leaves no orphaned, unregistered directories behind.
struct CreatedDirs {
    paths: Vec<PathBuf>,
    committed: bool,
}

impl CreatedDirs {
    fn new() -> Self {
        Self {
            paths: Vec::new(),
            committed: false,
        }
    }

    fn track(&mut self, path: PathBuf) {
        self.paths.push(path);
    }

    fn commit(mut self) {
        self.committed = true;
    }
}

impl Drop for CreatedDirs {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        for path in self.paths.iter().rev() {
            let _ = fs::remove_dir_all(path);
        }
    }
}

impl SweepManifest {
    /// Assigns identifiers to the expanded records, creates one directory
    /// per identifier under `root`, and returns the populated manifest.
    ///
    /// Directory creation is all-or-nothing: a conflict or I/O failure rolls
    /// back every directory this build created before the error propagates.
    /// A pre-existing empty directory is adopted rather than rejected; a
    /// populated one is a conflict.
    pub fn build(
        records: Vec<ParamRecord>,
        root: &Path,
        alloc: &mut IdAllocator,
    ) -> Result<Self, SweepError> {
        let ids = alloc.allocate(records.len())?;
        fs::create_dir_all(root).map_err(|err| {
            SweepError::Directory(
                ErrorInfo::new("root-create", err.to_string())
                    .with_context("path", root.display().to_string()),
            )
        })?;

        let mut guard = CreatedDirs::new();
        let mut entries = Vec::with_capacity(records.len());
        for (id, mut record) in ids.into_iter().zip(records) {
            let dir = root.join(id.as_str());
            if dir.exists() {
                if dir_is_populated(&dir)? {
                    return Err(SweepError::Directory(
                        ErrorInfo::new("dir-conflict", "target directory already populated")
                            .with_context("path", dir.display().to_string())
                            .with_context("id", id.to_string())
                            .with_hint("remove the directory or choose a fresh sweep root"),
                    ));
                }
            } else {
                fs::create_dir(&dir).map_err(|err| {
                    SweepError::Directory(
                        ErrorInfo::new("dir-create", err.to_string())
                            .with_context("path", dir.display().to_string()),
                    )
                })?;
                guard.track(dir.clone());
            }
            record.path = Some(dir);
            entries.push(ManifestEntry { id, record });
        }
        let params_hash = entries_hash(&entries)?;
        guard.commit();

        Ok(Self {
            root: root.to_path_buf(),
            created_at: Utc::now().to_rfc3339(),
            params_hash,
            entries,
        })
    }

    /// Persists every record's parameter file and the master index.
    pub fn save(&self, codec: &Codec) -> Result<(), SweepError> {
        for entry in &self.entries {
            entry.record.save(codec)?;
        }
        let index = ManifestIndex {
            schema_version: SchemaVersion::default(),
            created_at: self.created_at.clone(),
            params_hash: self.params_hash.clone(),
            entries: self
                .entries
                .iter()
                .map(|entry| IndexEntry {
                    id: entry.id.clone(),
                    path: entry.id.as_str().to_string(),
                    parameters: entry.record.values.clone(),
                })
                .collect(),
        };
        let bytes = codec.to_bytes(&index)?;
        let target = self.index_path(codec);
        fs::write(&target, bytes).map_err(|err| {
            SweepError::Serde(
                ErrorInfo::new("manifest-write", err.to_string())
                    .with_context("path", target.display().to_string()),
            )
        })
    }

    /// Reconstructs a manifest from the on-disk master index and per-job
    /// parameter files, without re-running expansion.
    ///
    /// Verifies identifier uniqueness, agreement between the index and each
    /// job's parameter file, and the stored parameter hash.
    pub fn load(root: &Path) -> Result<Self, SweepError> {
        let (codec, index_path) = Codec::ALL
            .iter()
            .map(|codec| {
                (
                    *codec,
                    root.join(format!("{}.{}", MANIFEST_BASENAME, codec.extension())),
                )
            })
            .find(|(_, path)| path.is_file())
            .ok_or_else(|| {
                SweepError::Manifest(
                    ErrorInfo::new("manifest-missing", "sweep root has no master index")
                        .with_context("path", root.display().to_string()),
                )
            })?;
        let bytes = fs::read(&index_path).map_err(|err| {
            SweepError::Serde(
                ErrorInfo::new("manifest-read", err.to_string())
                    .with_context("path", index_path.display().to_string()),
            )
        })?;
        let index: ManifestIndex = codec.from_slice(&bytes)?;

        let mut seen = BTreeSet::new();
        let mut entries = Vec::with_capacity(index.entries.len());
        for indexed in index.entries {
            if !seen.insert(indexed.id.clone()) {
                return Err(SweepError::Manifest(
                    ErrorInfo::new("manifest-duplicate-id", "identifier appears twice in index")
                        .with_context("id", indexed.id.to_string()),
                ));
            }
            let dir = root.join(&indexed.path);
            let params_path = dir.join(format!("{}.{}", PARAMETERS_BASENAME, codec.extension()));
            let raw = fs::read(&params_path).map_err(|err| {
                SweepError::Serde(
                    ErrorInfo::new("parameters-read", err.to_string())
                        .with_context("path", params_path.display().to_string())
                        .with_context("id", indexed.id.to_string()),
                )
            })?;
            let values: ParamMap = codec.from_slice(&raw)?;
            if values != indexed.parameters {
                return Err(SweepError::Manifest(
                    ErrorInfo::new(
                        "parameters-mismatch",
                        "job parameter file disagrees with the master index",
                    )
                    .with_context("id", indexed.id.to_string())
                    .with_context("path", params_path.display().to_string()),
                ));
            }
            entries.push(ManifestEntry {
                id: indexed.id,
                record: ParamRecord {
                    values,
                    path: Some(dir),
                },
            });
        }

        let recomputed = entries_hash(&entries)?;
        if recomputed != index.params_hash {
            return Err(SweepError::Manifest(
                ErrorInfo::new("manifest-hash-mismatch", "stored parameter hash does not match")
                    .with_context("stored", index.params_hash)
                    .with_context("recomputed", recomputed),
            ));
        }

        Ok(Self {
            root: root.to_path_buf(),
            created_at: index.created_at,
            params_hash: index.params_hash,
            entries,
        })
    }

    /// Returns the identifiers in manifest order.
    pub fn ids(&self) -> impl Iterator<Item = &JobId> {
        self.entries.iter().map(|entry| &entry.id)
    }

    /// Looks up the record for an identifier.
    pub fn record(&self, id: &JobId) -> Option<&ParamRecord> {
        self.entries
            .iter()
            .find(|entry| &entry.id == id)
            .map(|entry| &entry.record)
    }

    fn index_path(&self, codec: &Codec) -> PathBuf {
        self.root
            .join(format!("{}.{}", MANIFEST_BASENAME, codec.extension()))
    }
}

fn dir_is_populated(dir: &Path) -> Result<bool, SweepError> {
    let mut reader = fs::read_dir(dir).map_err(|err| {
        SweepError::Directory(
            ErrorInfo::new("dir-inspect", err.to_string())
                .with_context("path", dir.display().to_string()),
        )
    })?;
    Ok(reader.next().is_some())
}

fn entries_hash(entries: &[ManifestEntry]) -> Result<String, SweepError> {
    let params: Vec<&ParamMap> = entries.iter().map(|entry| &entry.record.values).collect();
    stable_hash_string(&params)
}
