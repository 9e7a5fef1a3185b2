//! Data model and command-interface contract shared by all fnmdeck crates.
//!
//! Everything here is independent of how fnm output is obtained: the version
//! record, the ordering and filtering primitives that operate on it, the
//! `FnmBridge` trait the stores consume, and the bridge error taxonomy.

mod bridge;
mod compare;
mod error;
mod filter;
mod types;

pub use bridge::FnmBridge;
pub use compare::compare_versions;
pub use error::BridgeError;
pub use filter::filter_versions;
pub use types::{FnmEnv, NodeVersion, VersionFileStrategy, VersionFilter};
