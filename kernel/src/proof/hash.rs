//! Domain-separated SHA-256 content hashing.
//!
//! Every digest is `sha256(domain_prefix || data)` where the prefix comes from
//! [`HashDomain`]. Two artifacts of different kinds can never share a digest
//! even when their bytes coincide.

use sha2::{Digest, Sha256};

/// A content-addressed hash with algorithm identifier.
///
/// Format: `"algorithm:hex_digest"` (e.g. `"sha256:ab12..."`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash {
    full: String,
    colon: usize,
}

impl ContentHash {
    /// Parse from `"algorithm:hex"` format.
    ///
    /// Returns `None` when the colon is missing or either side is empty.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let colon = s.find(':')?;
        if colon == 0 || colon + 1 == s.len() {
            return None;
        }
        Some(Self {
            full: s.to_string(),
            colon,
        })
    }

    /// The algorithm portion (e.g. `"sha256"`).
    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.full[..self.colon]
    }

    /// The hex digest portion.
    #[must_use]
    pub fn hex_digest(&self) -> &str {
        &self.full[self.colon + 1..]
    }

    /// The full `"algorithm:hex_digest"` string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.full
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full)
    }
}

/// Typed domain separator for [`canonical_hash`].
///
/// Each variant maps to a unique null-terminated prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashDomain {
    /// Canonical bytes of a `SearchReportV1`.
    SearchReport,
    /// Canonical bytes of a run policy (budget + tie-break).
    RunPolicy,
    /// Canonical description of a grid world.
    WorldFixture,
}

impl HashDomain {
    /// All domains in declaration order.
    pub const ALL: &'static [HashDomain] = &[Self::SearchReport, Self::RunPolicy, Self::WorldFixture];

    /// The raw prefix bytes (null-terminated).
    #[must_use]
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            Self::SearchReport => b"WAYPOINT::SEARCH_REPORT::V1\0",
            Self::RunPolicy => b"WAYPOINT::RUN_POLICY::V1\0",
            Self::WorldFixture => b"WAYPOINT::WORLD_FIXTURE::V1\0",
        }
    }
}

impl std::fmt::Display for HashDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::SearchReport => "SearchReport",
            Self::RunPolicy => "RunPolicy",
            Self::WorldFixture => "WorldFixture",
        };
        f.write_str(name)
    }
}

/// Compute the canonical hash of `data` under `domain`.
///
/// Result format: `"sha256:<64 lowercase hex chars>"`.
#[must_use]
pub fn canonical_hash(domain: HashDomain, data: &[u8]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update(domain.as_bytes());
    hasher.update(data);
    let digest = hasher.finalize();
    ContentHash {
        full: format!("sha256:{}", hex::encode(digest)),
        colon: "sha256".len(),
    }
}
