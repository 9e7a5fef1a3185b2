use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use crossbeam_channel::Receiver;
use log::error;

use fnmdeck_backend::{
    BridgeError, FnmBridge, NodeVersion, VersionFilter, compare_versions, filter_versions,
};
use fnmdeck_fnm::{parse_installed_versions, parse_remote_versions};

use crate::events::{StoreEvent, Subscribers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSource {
    Installed,
    Remote,
}

/// Owns the authoritative installed/remote lists and the current/default
/// pointers, and keeps them consistent with the external tool.
///
/// Synchronization contract: install/uninstall force a full installed-list
/// re-fetch (the tool may shift defaults or the current pointer as a side
/// effect of an inventory change), while use/set-default only patch the
/// matching flags locally — switching cannot change the inventory, only
/// pointers. Any failed call leaves both lists exactly as they were.
pub struct VersionStore {
    bridge: Arc<dyn FnmBridge>,
    installed: Vec<NodeVersion>,
    remote: Vec<NodeVersion>,
    current_version: String,
    loading: bool,
    remote_loading: bool,
    remote_fetched_at: Option<DateTime<Utc>>,
    error: Option<String>,
    subscribers: Subscribers,
}

impl std::fmt::Debug for VersionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VersionStore")
            .field("installed", &self.installed.len())
            .field("remote", &self.remote.len())
            .field("current_version", &self.current_version)
            .field("loading", &self.loading)
            .field("remote_loading", &self.remote_loading)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl VersionStore {
    #[must_use]
    pub fn new(bridge: Arc<dyn FnmBridge>) -> Self {
        Self {
            bridge,
            installed: Vec::new(),
            remote: Vec::new(),
            current_version: String::new(),
            loading: false,
            remote_loading: false,
            remote_fetched_at: None,
            error: None,
            subscribers: Subscribers::default(),
        }
    }

    pub fn subscribe(&mut self) -> Receiver<StoreEvent> {
        self.subscribers.subscribe()
    }

    #[must_use]
    pub fn installed(&self) -> &[NodeVersion] {
        &self.installed
    }

    #[must_use]
    pub fn remote(&self) -> &[NodeVersion] {
        &self.remote
    }

    #[must_use]
    pub fn current_version(&self) -> &str {
        &self.current_version
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn remote_loading(&self) -> bool {
        self.remote_loading
    }

    #[must_use]
    pub fn remote_fetched_at(&self) -> Option<DateTime<Utc>> {
        self.remote_fetched_at
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replaces the installed list from two concurrent bridge calls. The
    /// raw current-version output is trimmed before it becomes the
    /// `is_current` join key. On failure the previous list survives.
    pub async fn fetch_installed(&mut self) {
        self.loading = true;
        self.error = None;
        self.subscribers.emit(StoreEvent::StatusChanged);

        let result = tokio::try_join!(
            self.bridge.list_installed_versions(),
            self.bridge.get_current_version(),
        );

        self.loading = false;
        match result {
            Ok((listing, current)) => {
                self.current_version = current.trim().to_string();
                self.installed = parse_installed_versions(&listing, &self.current_version);
                self.subscribers.emit(StoreEvent::InstalledChanged);
            }
            Err(error) => self.fail("fetch installed versions", &error),
        }
        self.subscribers.emit(StoreEvent::StatusChanged);
    }

    /// Replaces the remote list, joining `is_installed` against the current
    /// installed-name set. The installed list is not touched.
    pub async fn fetch_remote(&mut self, lts_only: bool) {
        self.remote_loading = true;
        self.error = None;
        self.subscribers.emit(StoreEvent::StatusChanged);

        match self.bridge.list_remote_versions(lts_only).await {
            Ok(listing) => {
                let installed_names = self.installed_name_set();
                self.remote = parse_remote_versions(&listing, &installed_names);
                self.remote_fetched_at = Some(Utc::now());
                self.subscribers.emit(StoreEvent::RemoteChanged);
            }
            Err(error) => self.fail("fetch remote versions", &error),
        }

        self.remote_loading = false;
        self.subscribers.emit(StoreEvent::StatusChanged);
    }

    pub async fn install(&mut self, version: &str) -> bool {
        self.loading = true;
        self.error = None;
        self.subscribers.emit(StoreEvent::StatusChanged);

        match self.bridge.install_version(version).await {
            Ok(()) => {
                self.reconcile_after_inventory_change().await;
                true
            }
            Err(error) => {
                self.loading = false;
                self.fail("install version", &error);
                self.subscribers.emit(StoreEvent::StatusChanged);
                false
            }
        }
    }

    pub async fn uninstall(&mut self, version: &str) -> bool {
        self.loading = true;
        self.error = None;
        self.subscribers.emit(StoreEvent::StatusChanged);

        match self.bridge.uninstall_version(version).await {
            Ok(()) => {
                self.reconcile_after_inventory_change().await;
                true
            }
            Err(error) => {
                self.loading = false;
                self.fail("uninstall version", &error);
                self.subscribers.emit(StoreEvent::StatusChanged);
                false
            }
        }
    }

    /// Switches the active version. Success is trusted: the current pointer
    /// and `is_current` flags are patched locally, no re-fetch issued.
    pub async fn use_version(&mut self, version: &str) -> bool {
        self.error = None;

        match self.bridge.use_version(version).await {
            Ok(()) => {
                self.current_version = version.to_string();
                for entry in &mut self.installed {
                    entry.is_current = entry.name == version;
                }
                self.subscribers.emit(StoreEvent::InstalledChanged);
                true
            }
            Err(error) => {
                self.fail("switch version", &error);
                self.subscribers.emit(StoreEvent::StatusChanged);
                false
            }
        }
    }

    /// Sets the system-wide default. Same optimistic local patch as
    /// [`Self::use_version`].
    pub async fn set_default(&mut self, version: &str) -> bool {
        self.error = None;

        match self.bridge.set_default_version(version).await {
            Ok(()) => {
                for entry in &mut self.installed {
                    entry.is_default = entry.name == version;
                }
                self.subscribers.emit(StoreEvent::InstalledChanged);
                true
            }
            Err(error) => {
                self.fail("set default version", &error);
                self.subscribers.emit(StoreEvent::StatusChanged);
                false
            }
        }
    }

    /// Fire-and-forget; no local state depends on the outcome.
    pub async fn open_version_directory(&mut self, version: &str) -> bool {
        self.error = None;

        match self.bridge.open_version_directory(version).await {
            Ok(()) => true,
            Err(error) => {
                self.fail("open version directory", &error);
                self.subscribers.emit(StoreEvent::StatusChanged);
                false
            }
        }
    }

    #[must_use]
    pub fn sorted_installed(&self) -> Vec<NodeVersion> {
        let mut versions = self.installed.clone();
        versions.sort_by(|a, b| compare_versions(&a.name, &b.name));
        versions
    }

    #[must_use]
    pub fn sorted_remote(&self) -> Vec<NodeVersion> {
        let mut versions = self.remote.clone();
        versions.sort_by(|a, b| compare_versions(&a.name, &b.name));
        versions
    }

    #[must_use]
    pub fn default_version(&self) -> Option<&NodeVersion> {
        self.installed.iter().find(|version| version.is_default)
    }

    /// Sorted, filtered view of one list. The installed source implies the
    /// installed-only constraint.
    #[must_use]
    pub fn filtered(
        &self,
        source: VersionSource,
        lts_only: bool,
        keyword: Option<&str>,
    ) -> Vec<NodeVersion> {
        let versions = match source {
            VersionSource::Installed => self.sorted_installed(),
            VersionSource::Remote => self.sorted_remote(),
        };

        filter_versions(
            &versions,
            &VersionFilter {
                lts_only,
                installed_only: source == VersionSource::Installed,
                keyword: keyword.map(str::to_string),
            },
        )
    }

    // Full reconciliation: refresh the inventory from the tool, then re-test
    // the remote list's membership against the refreshed name set.
    async fn reconcile_after_inventory_change(&mut self) {
        self.fetch_installed().await;

        let installed_names = self.installed_name_set();
        for version in &mut self.remote {
            version.is_installed = installed_names.contains(&version.name);
        }
        self.subscribers.emit(StoreEvent::RemoteChanged);
    }

    fn installed_name_set(&self) -> HashSet<String> {
        self.installed
            .iter()
            .map(|version| version.name.clone())
            .collect()
    }

    fn fail(&mut self, operation: &str, error: &BridgeError) {
        error!("Failed to {operation}: {error}");
        self.error = Some(error.to_string());
    }
}
