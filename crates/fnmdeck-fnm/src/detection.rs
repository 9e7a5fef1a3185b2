use std::path::{Path, PathBuf};
use tokio::process::Command;
use which::which;

use crate::paths::resolve_fnm_dir;
use crate::process::HideWindow;

#[derive(Debug, Clone)]
pub struct FnmDetection {
    pub found: bool,
    pub path: Option<PathBuf>,
    pub version: Option<String>,
    pub in_path: bool,
    pub fnm_dir: Option<PathBuf>,
}

/// Locates the fnm executable: `PATH` lookup first, then the usual install
/// locations. The reported fnm version is captured opportunistically.
pub async fn detect_fnm() -> FnmDetection {
    let fnm_dir = resolve_fnm_dir();

    if let Ok(path) = which("fnm") {
        let version = fnm_version(&path).await;
        return FnmDetection {
            found: true,
            path: Some(path),
            version,
            in_path: true,
            fnm_dir,
        };
    }

    for path in common_fnm_paths() {
        if path.exists() {
            let version = fnm_version(&path).await;
            return FnmDetection {
                found: true,
                path: Some(path),
                version,
                in_path: false,
                fnm_dir,
            };
        }
    }

    FnmDetection {
        found: false,
        path: None,
        version: None,
        in_path: false,
        fnm_dir,
    }
}

fn common_fnm_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".fnm").join("fnm"));
        paths.push(home.join(".local").join("bin").join("fnm"));
        paths.push(home.join(".cargo").join("bin").join("fnm"));
    }

    #[cfg(target_os = "macos")]
    {
        paths.push(PathBuf::from("/opt/homebrew/bin/fnm"));
    }

    #[cfg(unix)]
    {
        paths.push(PathBuf::from("/usr/local/bin/fnm"));
        paths.push(PathBuf::from("/usr/bin/fnm"));
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(local_app_data) = dirs::data_local_dir() {
            paths.push(local_app_data.join("fnm").join("fnm.exe"));
        }
    }

    paths
}

async fn fnm_version(path: &Path) -> Option<String> {
    let output = Command::new(path)
        .arg("--version")
        .hide_window()
        .output()
        .await
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let version = stdout
        .trim()
        .strip_prefix("fnm ")
        .unwrap_or(stdout.trim())
        .to_string();

    Some(version)
}
