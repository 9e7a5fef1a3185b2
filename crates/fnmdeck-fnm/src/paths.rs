use std::path::{Path, PathBuf};

/// Platform default for the fnm data directory, used when `fnm env` does not
/// report one: `~/Library/Application Support/fnm` on macOS,
/// `%LOCALAPPDATA%\fnm` on Windows, `~/.local/share/fnm` on Linux.
#[must_use]
pub fn default_fnm_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("fnm"))
}

/// Candidate locations for an existing fnm data directory, most specific
/// first.
#[must_use]
pub fn fnm_dir_candidates() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(xdg_data) = std::env::var("XDG_DATA_HOME") {
        paths.push(PathBuf::from(xdg_data).join("fnm"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".local").join("share").join("fnm"));
        paths.push(home.join(".fnm"));
    }

    if let Some(data_dir) = dirs::data_local_dir() {
        paths.push(data_dir.join("fnm"));
    }

    paths
}

/// Resolves the fnm data directory: an existing `FNM_DIR` wins, then the
/// first candidate that already holds installed versions, then any existing
/// candidate.
#[must_use]
pub fn resolve_fnm_dir() -> Option<PathBuf> {
    let env_dir = std::env::var("FNM_DIR").ok().map(PathBuf::from);
    select_fnm_dir(env_dir, fnm_dir_candidates())
}

fn select_fnm_dir(env_dir: Option<PathBuf>, candidates: Vec<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = env_dir.filter(|path| path.exists()) {
        return Some(path);
    }

    candidates
        .iter()
        .find(|candidate| candidate.exists() && candidate.join("node-versions").exists())
        .cloned()
        .or_else(|| candidates.into_iter().find(|candidate| candidate.exists()))
}

/// Installation directory of one managed version inside the fnm data dir.
#[must_use]
pub fn version_directory(fnm_dir: &Path, version: &str) -> PathBuf {
    fnm_dir
        .join("node-versions")
        .join(version)
        .join("installation")
}
