//! Proof module: canonical serialization and domain-separated hashing.

pub mod canon;
pub mod hash;
