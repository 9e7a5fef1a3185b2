use async_trait::async_trait;
use log::{debug, error, info, trace};
use std::path::PathBuf;
use tokio::process::Command;

use fnmdeck_backend::{BridgeError, FnmBridge, FnmEnv};

use crate::env::parse_fnm_env;
use crate::paths::{default_fnm_dir, version_directory};
use crate::process::HideWindow;

/// Process-spawning implementation of the command interface: every method
/// runs the fnm executable and reports its raw output.
#[derive(Debug, Clone)]
pub struct FnmCli {
    path: PathBuf,
    fnm_dir: Option<PathBuf>,
    node_dist_mirror: Option<String>,
}

impl FnmCli {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            fnm_dir: None,
            node_dist_mirror: None,
        }
    }

    #[must_use]
    pub fn with_fnm_dir(mut self, dir: PathBuf) -> Self {
        self.fnm_dir = Some(dir);
        self
    }

    #[must_use]
    pub fn with_node_dist_mirror(mut self, mirror: String) -> Self {
        self.node_dist_mirror = Some(mirror);
        self
    }

    fn build_command(&self, args: &[&str]) -> Command {
        debug!(
            "Building fnm command: {} {}",
            self.path.display(),
            args.join(" ")
        );

        let mut cmd = Command::new(&self.path);
        cmd.args(args);

        if let Some(dir) = &self.fnm_dir {
            debug!("Setting FNM_DIR={}", dir.display());
            cmd.env("FNM_DIR", dir);
        }

        if let Some(mirror) = &self.node_dist_mirror {
            debug!("Setting FNM_NODE_DIST_MIRROR={mirror}");
            cmd.env("FNM_NODE_DIST_MIRROR", mirror);
        }

        cmd.hide_window();
        cmd
    }

    async fn execute(&self, args: &[&str]) -> Result<String, BridgeError> {
        info!("Executing fnm command: {}", args.join(" "));

        let output = self.build_command(args).output().await?;

        debug!("fnm command exit status: {:?}", output.status);
        trace!("fnm stdout: {}", String::from_utf8_lossy(&output.stdout));

        if !output.stderr.is_empty() {
            trace!("fnm stderr: {}", String::from_utf8_lossy(&output.stderr));
        }

        if output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout).to_string();
            debug!("fnm command succeeded, output: {} bytes", stdout.len());
            Ok(stdout)
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            error!("fnm command failed: args={args:?}, stderr='{stderr}'");
            Err(BridgeError::CommandFailed { stderr })
        }
    }

    async fn resolved_fnm_dir(&self) -> Result<PathBuf, BridgeError> {
        if let Some(dir) = &self.fnm_dir {
            return Ok(dir.clone());
        }

        // A failing `fnm env` is not fatal here; the platform default is an
        // acceptable answer for display and directory opening.
        if let Ok(output) = self.execute(&["env"]).await {
            let dir = parse_fnm_env(&output).fnm_dir;
            if !dir.is_empty() {
                return Ok(PathBuf::from(dir));
            }
        }

        default_fnm_dir().ok_or(BridgeError::DataDirNotFound)
    }
}

#[async_trait]
impl FnmBridge for FnmCli {
    async fn list_installed_versions(&self) -> Result<String, BridgeError> {
        self.execute(&["list"]).await
    }

    async fn get_current_version(&self) -> Result<String, BridgeError> {
        self.execute(&["current"]).await
    }

    async fn list_remote_versions(&self, lts_only: bool) -> Result<String, BridgeError> {
        if lts_only {
            self.execute(&["list-remote", "--lts"]).await
        } else {
            self.execute(&["list-remote"]).await
        }
    }

    async fn install_version(&self, version: &str) -> Result<(), BridgeError> {
        self.execute(&["install", version]).await?;
        Ok(())
    }

    async fn uninstall_version(&self, version: &str) -> Result<(), BridgeError> {
        self.execute(&["uninstall", version]).await?;
        Ok(())
    }

    async fn use_version(&self, version: &str) -> Result<(), BridgeError> {
        self.execute(&["use", version]).await?;
        Ok(())
    }

    async fn set_default_version(&self, version: &str) -> Result<(), BridgeError> {
        self.execute(&["default", version]).await?;
        Ok(())
    }

    async fn open_version_directory(&self, version: &str) -> Result<(), BridgeError> {
        let fnm_dir = self.resolved_fnm_dir().await?;
        let dir = version_directory(&fnm_dir, version);
        info!("Opening version directory {}", dir.display());
        open::that_detached(dir)?;
        Ok(())
    }

    async fn get_fnm_env(&self) -> Result<FnmEnv, BridgeError> {
        let output = self.execute(&["env"]).await?;
        Ok(parse_fnm_env(&output))
    }

    async fn get_fnm_dir(&self) -> Result<String, BridgeError> {
        let dir = self.resolved_fnm_dir().await?;
        Ok(dir.to_string_lossy().into_owned())
    }

    async fn open_fnm_directory(&self) -> Result<(), BridgeError> {
        let dir = self.resolved_fnm_dir().await?;
        info!("Opening fnm directory {}", dir.display());
        open::that_detached(dir)?;
        Ok(())
    }
}
