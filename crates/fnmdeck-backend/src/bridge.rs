use async_trait::async_trait;

use crate::error::BridgeError;
use crate::types::FnmEnv;

/// The external command interface the stores consume, one method per fnm
/// command. Listing commands return the raw tool output; interpretation is
/// the caller's job (the parsers in `fnmdeck-fnm`).
///
/// `get_current_version` returns the output untrimmed; callers that compare
/// it against parsed names must trim it first.
#[async_trait]
pub trait FnmBridge: Send + Sync {
    async fn list_installed_versions(&self) -> Result<String, BridgeError>;

    async fn get_current_version(&self) -> Result<String, BridgeError>;

    async fn list_remote_versions(&self, lts_only: bool) -> Result<String, BridgeError>;

    async fn install_version(&self, version: &str) -> Result<(), BridgeError>;

    async fn uninstall_version(&self, version: &str) -> Result<(), BridgeError>;

    async fn use_version(&self, version: &str) -> Result<(), BridgeError>;

    async fn set_default_version(&self, version: &str) -> Result<(), BridgeError>;

    async fn open_version_directory(&self, version: &str) -> Result<(), BridgeError>;

    async fn get_fnm_env(&self) -> Result<FnmEnv, BridgeError>;

    async fn get_fnm_dir(&self) -> Result<String, BridgeError>;

    async fn open_fnm_directory(&self) -> Result<(), BridgeError>;
}
