//! Search reports: the canonical, hashable record of one run.
//!
//! # Directory layout
//!
//! ```text
//! <dir>/
//!   search_report.json   canonical JSON of SearchReportV1
//!   report_digest.txt    "sha256:<hex>" over the report bytes
//! ```
//!
//! Reading is fail-closed: a missing file, non-canonical report bytes, or a
//! stored digest that does not match the recomputed one is an error.
//!
//! Costs are `f64`, which canonical JSON does not admit, so they are stored as
//! strings rendered by [`canonical_cost`].

use std::path::Path;

use waypoint_kernel::proof::canon::{canonical_cost, canonical_json_bytes, CanonError};
use waypoint_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use waypoint_search::engine::SearchStats;
use waypoint_search::node::NodeId;

use crate::policy::RunPolicy;
use crate::runner::{SearchOutcome, TerminationReason};

const REPORT_FILENAME: &str = "search_report.json";
const DIGEST_FILENAME: &str = "report_digest.txt";

/// Schema tag carried in every report.
pub const REPORT_SCHEMA_VERSION: &str = "search_report.v1";

/// Outcome plus the policy it ran under.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReportV1 {
    pub world_id: String,
    pub start: NodeId,
    pub goal: NodeId,
    pub termination: TerminationReason,
    pub path: Option<Vec<NodeId>>,
    pub path_cost: Option<f64>,
    pub explored: Vec<NodeId>,
    pub expansion_order: Vec<NodeId>,
    pub stats: SearchStats,
    pub policy: RunPolicy,
}

impl SearchReportV1 {
    #[must_use]
    pub fn from_outcome(outcome: &SearchOutcome, policy: &RunPolicy) -> Self {
        Self {
            world_id: outcome.world_id.clone(),
            start: outcome.start,
            goal: outcome.goal,
            termination: outcome.termination.clone(),
            path: outcome.path.clone(),
            path_cost: outcome.path_cost,
            explored: outcome.explored.clone(),
            expansion_order: outcome.expansion_order.clone(),
            stats: outcome.stats,
            policy: *policy,
        }
    }

    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let termination = match &self.termination {
            TerminationReason::ProviderPanicked { node } => serde_json::json!({
                "type": self.termination.as_str(),
                "node": node,
            }),
            TerminationReason::ProviderContractViolation { node, reason } => serde_json::json!({
                "type": self.termination.as_str(),
                "node": node,
                "detail": reason.to_string(),
            }),
            _ => serde_json::json!({ "type": self.termination.as_str() }),
        };
        serde_json::json!({
            "schema_version": REPORT_SCHEMA_VERSION,
            "world_id": self.world_id,
            "start": self.start,
            "goal": self.goal,
            "termination": termination,
            "path": self.path,
            "path_cost": self.path_cost.map(canonical_cost),
            "explored": self.explored,
            "expansion_order": self.expansion_order,
            "stats": {
                "expansions": self.stats.expansions,
                "stale_pops": self.stats.stale_pops,
                "relaxations": self.stats.relaxations,
                "frontier_pushes": self.stats.frontier_pushes,
                "frontier_high_water": self.stats.frontier_high_water,
            },
            "policy": self.policy.to_json_value(),
        })
    }

    /// Canonical JSON bytes of the report.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if canonicalization fails.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Content digest of [`canonical_bytes`](Self::canonical_bytes).
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if canonicalization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        Ok(canonical_hash(
            HashDomain::SearchReport,
            &self.canonical_bytes()?,
        ))
    }
}

/// Error writing or reading a report directory.
#[derive(Debug)]
pub enum ReportDirError {
    /// I/O error.
    Io { detail: String },
    /// Canonical JSON serialization failed.
    Canon(CanonError),
    /// A required file is absent.
    MissingFile { filename: &'static str },
    /// `search_report.json` is not valid JSON or not in canonical form.
    NonCanonicalReport { detail: String },
    /// `report_digest.txt` is not an `"algorithm:hex"` string.
    MalformedDigest { found: String },
    /// The stored digest differs from the one recomputed over the report.
    DigestMismatch { stored: String, recomputed: String },
}

impl std::fmt::Display for ReportDirError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
            Self::Canon(e) => write!(f, "canonical JSON error: {e}"),
            Self::MissingFile { filename } => write!(f, "missing {filename}"),
            Self::NonCanonicalReport { detail } => {
                write!(f, "{REPORT_FILENAME} is not canonical: {detail}")
            }
            Self::MalformedDigest { found } => write!(f, "malformed digest: {found:?}"),
            Self::DigestMismatch { stored, recomputed } => {
                write!(f, "digest mismatch: stored {stored}, recomputed {recomputed}")
            }
        }
    }
}

impl std::error::Error for ReportDirError {}

impl From<CanonError> for ReportDirError {
    fn from(e: CanonError) -> Self {
        Self::Canon(e)
    }
}

/// Write `report` into `dir`, creating the directory if needed.
///
/// Returns the digest written to `report_digest.txt`.
///
/// # Errors
///
/// Returns [`ReportDirError`] on I/O or canonicalization failure.
pub fn write_report_dir(dir: &Path, report: &SearchReportV1) -> Result<ContentHash, ReportDirError> {
    let bytes = report.canonical_bytes()?;
    let digest = canonical_hash(HashDomain::SearchReport, &bytes);

    std::fs::create_dir_all(dir).map_err(|e| ReportDirError::Io {
        detail: format!("create {}: {e}", dir.display()),
    })?;
    write_file(dir, REPORT_FILENAME, &bytes)?;
    write_file(dir, DIGEST_FILENAME, digest.as_str().as_bytes())?;
    Ok(digest)
}

/// Read `dir` back and verify the stored digest against the report bytes.
///
/// # Errors
///
/// Returns [`ReportDirError`] if a file is missing, the report is not
/// canonical JSON, or the digests disagree.
pub fn read_report_digest(dir: &Path) -> Result<ContentHash, ReportDirError> {
    let bytes = read_file(dir, REPORT_FILENAME)?;
    let stored_raw = read_file(dir, DIGEST_FILENAME)?;

    let value: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(|e| ReportDirError::NonCanonicalReport {
            detail: e.to_string(),
        })?;
    if canonical_json_bytes(&value)? != bytes {
        return Err(ReportDirError::NonCanonicalReport {
            detail: "bytes differ from canonical form".into(),
        });
    }

    let stored_text = String::from_utf8_lossy(&stored_raw);
    let stored_text = stored_text.trim();
    let stored = ContentHash::parse(stored_text).ok_or_else(|| ReportDirError::MalformedDigest {
        found: stored_text.to_string(),
    })?;

    let recomputed = canonical_hash(HashDomain::SearchReport, &bytes);
    if stored != recomputed {
        return Err(ReportDirError::DigestMismatch {
            stored: stored.as_str().to_string(),
            recomputed: recomputed.as_str().to_string(),
        });
    }
    Ok(recomputed)
}

fn write_file(dir: &Path, filename: &str, bytes: &[u8]) -> Result<(), ReportDirError> {
    let path = dir.join(filename);
    std::fs::write(&path, bytes).map_err(|e| ReportDirError::Io {
        detail: format!("write {}: {e}", path.display()),
    })
}

fn read_file(dir: &Path, filename: &'static str) -> Result<Vec<u8>, ReportDirError> {
    let path = dir.join(filename);
    match std::fs::read(&path) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ReportDirError::MissingFile { filename })
        }
        Err(e) => Err(ReportDirError::Io {
            detail: format!("read {}: {e}", path.display()),
        }),
    }
}
