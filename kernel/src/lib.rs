//! Waypoint Kernel: canonical bytes and content hashing.
//!
//! Everything that needs a stable digest (search reports, run policies,
//! world fixtures) goes through this crate. It knows nothing about search.
//!
//! # API Surface
//!
//! - [`proof::canon::canonical_json_bytes`] -- the one JSON canonicalizer
//! - [`proof::hash::canonical_hash`] -- SHA-256 with a typed domain prefix

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod proof;
