//! Everything that knows about fnm specifically: output parsers for its
//! listing commands, the process-spawning bridge implementation, binary and
//! data-directory detection, and OS directory-open integration.
//!
//! The parsers are pure text-to-record functions with no I/O; they degrade
//! best-effort on malformed input and never error.

mod cli;
mod detection;
mod env;
mod paths;
mod process;
mod version;

pub use cli::FnmCli;
pub use detection::{FnmDetection, detect_fnm};
pub use env::parse_fnm_env;
pub use paths::{default_fnm_dir, fnm_dir_candidates, resolve_fnm_dir, version_directory};
pub use process::HideWindow;
pub use version::{
    group_versions_by_major, latest_by_major, parse_installed_versions, parse_remote_versions,
};
