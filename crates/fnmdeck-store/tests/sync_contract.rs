//! Exercises the store synchronization contract against a scripted bridge:
//! what gets re-fetched, what gets patched locally, and what survives a
//! failed call.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fnmdeck_backend::{BridgeError, FnmBridge, FnmEnv};
use fnmdeck_store::{SettingsStore, StoreEvent, VersionSource, VersionStore};

#[derive(Default)]
struct Script {
    installed_listing: String,
    current_output: String,
    remote_listing: String,
    env: FnmEnv,
    fnm_dir: String,
    failing: HashSet<&'static str>,
}

#[derive(Default)]
struct ScriptedBridge {
    script: Mutex<Script>,
    calls: Mutex<Vec<&'static str>>,
}

impl ScriptedBridge {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn set_installed(&self, listing: &str, current: &str) {
        let mut script = self.script.lock().unwrap();
        script.installed_listing = listing.to_string();
        script.current_output = current.to_string();
    }

    fn set_remote(&self, listing: &str) {
        self.script.lock().unwrap().remote_listing = listing.to_string();
    }

    fn set_env(&self, env: FnmEnv) {
        self.script.lock().unwrap().env = env;
    }

    fn set_fnm_dir(&self, dir: &str) {
        self.script.lock().unwrap().fnm_dir = dir.to_string();
    }

    fn fail_on(&self, method: &'static str) {
        self.script.lock().unwrap().failing.insert(method);
    }

    fn count(&self, method: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|name| **name == method)
            .count()
    }

    fn record(&self, method: &'static str) -> Result<(), BridgeError> {
        self.calls.lock().unwrap().push(method);
        if self.script.lock().unwrap().failing.contains(method) {
            return Err(BridgeError::command_failed(format!("{method} failed")));
        }
        Ok(())
    }
}

#[async_trait]
impl FnmBridge for ScriptedBridge {
    async fn list_installed_versions(&self) -> Result<String, BridgeError> {
        self.record("list_installed_versions")?;
        Ok(self.script.lock().unwrap().installed_listing.clone())
    }

    async fn get_current_version(&self) -> Result<String, BridgeError> {
        self.record("get_current_version")?;
        Ok(self.script.lock().unwrap().current_output.clone())
    }

    async fn list_remote_versions(&self, _lts_only: bool) -> Result<String, BridgeError> {
        self.record("list_remote_versions")?;
        Ok(self.script.lock().unwrap().remote_listing.clone())
    }

    async fn install_version(&self, _version: &str) -> Result<(), BridgeError> {
        self.record("install_version")
    }

    async fn uninstall_version(&self, _version: &str) -> Result<(), BridgeError> {
        self.record("uninstall_version")
    }

    async fn use_version(&self, _version: &str) -> Result<(), BridgeError> {
        self.record("use_version")
    }

    async fn set_default_version(&self, _version: &str) -> Result<(), BridgeError> {
        self.record("set_default_version")
    }

    async fn open_version_directory(&self, _version: &str) -> Result<(), BridgeError> {
        self.record("open_version_directory")
    }

    async fn get_fnm_env(&self) -> Result<FnmEnv, BridgeError> {
        self.record("get_fnm_env")?;
        Ok(self.script.lock().unwrap().env.clone())
    }

    async fn get_fnm_dir(&self) -> Result<String, BridgeError> {
        self.record("get_fnm_dir")?;
        Ok(self.script.lock().unwrap().fnm_dir.clone())
    }

    async fn open_fnm_directory(&self) -> Result<(), BridgeError> {
        self.record("open_fnm_directory")
    }
}

fn version_store(bridge: &Arc<ScriptedBridge>) -> VersionStore {
    VersionStore::new(bridge.clone() as Arc<dyn FnmBridge>)
}

fn settings_store(bridge: &Arc<ScriptedBridge>) -> SettingsStore {
    SettingsStore::new(bridge.clone() as Arc<dyn FnmBridge>)
}

#[tokio::test]
async fn fetch_installed_replaces_list_and_trims_current() {
    let bridge = ScriptedBridge::new();
    bridge.set_installed("* v22.1.0 default\n  v20.12.2 lts-iron\n", "v22.1.0\n");
    let mut store = version_store(&bridge);

    store.fetch_installed().await;

    assert_eq!(store.current_version(), "v22.1.0");
    assert_eq!(store.installed().len(), 2);
    assert!(store.installed()[0].is_current);
    assert!(store.installed()[0].is_default);
    assert!(!store.installed()[1].is_current);
    assert!(store.error().is_none());
    assert!(!store.loading());
}

#[tokio::test]
async fn fetch_installed_failure_leaves_prior_state_untouched() {
    let bridge = ScriptedBridge::new();
    bridge.set_installed("v20.12.2\n", "v20.12.2\n");
    let mut store = version_store(&bridge);
    store.fetch_installed().await;
    let before = store.installed().to_vec();

    bridge.fail_on("list_installed_versions");
    store.fetch_installed().await;

    assert_eq!(store.installed(), before.as_slice());
    assert_eq!(store.current_version(), "v20.12.2");
    assert!(
        store
            .error()
            .is_some_and(|error| error.contains("list_installed_versions failed"))
    );
}

#[tokio::test]
async fn fetch_remote_joins_against_installed_names() {
    let bridge = ScriptedBridge::new();
    bridge.set_installed("v20.12.2\n", "v20.12.2\n");
    bridge.set_remote("v22.1.0\nv20.12.2 (Iron)\n");
    let mut store = version_store(&bridge);
    store.fetch_installed().await;

    store.fetch_remote(false).await;

    assert_eq!(store.remote().len(), 2);
    assert!(!store.remote()[0].is_installed);
    assert!(store.remote()[1].is_installed);
    assert!(store.remote_fetched_at().is_some());
}

#[tokio::test]
async fn fetch_remote_does_not_touch_installed_list() {
    let bridge = ScriptedBridge::new();
    bridge.set_installed("v20.12.2\n", "v20.12.2\n");
    bridge.set_remote("v22.1.0\n");
    let mut store = version_store(&bridge);
    store.fetch_installed().await;
    let before = store.installed().to_vec();

    store.fetch_remote(true).await;

    assert_eq!(store.installed(), before.as_slice());
}

#[tokio::test]
async fn install_refetches_inventory_and_repatches_remote() {
    let bridge = ScriptedBridge::new();
    bridge.set_installed("v20.12.2\n", "v20.12.2\n");
    bridge.set_remote("v22.1.0\nv20.12.2 (Iron)\n");
    let mut store = version_store(&bridge);
    store.fetch_installed().await;
    store.fetch_remote(false).await;

    // The tool is the source of truth: script its post-install inventory.
    bridge.set_installed("* v22.1.0 default\n  v20.12.2\n", "v22.1.0\n");
    let ok = store.install("v22.1.0").await;

    assert!(ok);
    assert!(
        store
            .installed()
            .iter()
            .any(|version| version.name == "v22.1.0")
    );
    assert!(
        store
            .remote()
            .iter()
            .find(|version| version.name == "v22.1.0")
            .expect("remote entry should still exist")
            .is_installed
    );
    assert_eq!(bridge.count("install_version"), 1);
    assert_eq!(bridge.count("list_installed_versions"), 2);
    assert_eq!(bridge.count("get_current_version"), 2);
    assert_eq!(bridge.count("list_remote_versions"), 1);
}

#[tokio::test]
async fn uninstall_clears_remote_installed_flag() {
    let bridge = ScriptedBridge::new();
    bridge.set_installed("v20.12.2\nv22.1.0\n", "v22.1.0\n");
    bridge.set_remote("v22.1.0\nv20.12.2 (Iron)\n");
    let mut store = version_store(&bridge);
    store.fetch_installed().await;
    store.fetch_remote(false).await;

    bridge.set_installed("v22.1.0\n", "v22.1.0\n");
    let ok = store.uninstall("v20.12.2").await;

    assert!(ok);
    assert_eq!(store.installed().len(), 1);
    assert!(
        !store
            .remote()
            .iter()
            .find(|version| version.name == "v20.12.2")
            .expect("remote entry should still exist")
            .is_installed
    );
}

#[tokio::test]
async fn failed_mutating_call_leaves_both_lists_identical() {
    let bridge = ScriptedBridge::new();
    bridge.set_installed("v20.12.2\n", "v20.12.2\n");
    bridge.set_remote("v22.1.0\nv20.12.2 (Iron)\n");
    let mut store = version_store(&bridge);
    store.fetch_installed().await;
    store.fetch_remote(false).await;
    let installed_before = store.installed().to_vec();
    let remote_before = store.remote().to_vec();

    bridge.fail_on("install_version");
    let ok = store.install("v22.1.0").await;

    assert!(!ok);
    assert_eq!(store.installed(), installed_before.as_slice());
    assert_eq!(store.remote(), remote_before.as_slice());
    assert!(
        store
            .error()
            .is_some_and(|error| error.contains("install_version failed"))
    );
    assert_eq!(bridge.count("list_installed_versions"), 1);
}

#[tokio::test]
async fn use_version_patches_current_locally_without_refetch() {
    let bridge = ScriptedBridge::new();
    bridge.set_installed("* v20.12.2 default\n  v22.1.0\n", "v20.12.2\n");
    let mut store = version_store(&bridge);
    store.fetch_installed().await;

    let ok = store.use_version("v22.1.0").await;

    assert!(ok);
    assert_eq!(store.current_version(), "v22.1.0");
    let current: Vec<_> = store
        .installed()
        .iter()
        .filter(|version| version.is_current)
        .collect();
    assert_eq!(current.len(), 1);
    assert_eq!(current[0].name, "v22.1.0");
    // Optimistic patch only: no inventory refresh was issued.
    assert_eq!(bridge.count("list_installed_versions"), 1);
    assert_eq!(bridge.count("get_current_version"), 1);
}

#[tokio::test]
async fn set_default_patches_single_default_without_refetch() {
    let bridge = ScriptedBridge::new();
    bridge.set_installed("* v20.12.2 default\n  v22.1.0\n", "v20.12.2\n");
    let mut store = version_store(&bridge);
    store.fetch_installed().await;

    let ok = store.set_default("v22.1.0").await;

    assert!(ok);
    let defaults: Vec<_> = store
        .installed()
        .iter()
        .filter(|version| version.is_default)
        .collect();
    assert_eq!(defaults.len(), 1);
    assert_eq!(defaults[0].name, "v22.1.0");
    assert_eq!(bridge.count("list_installed_versions"), 1);
}

#[tokio::test]
async fn failed_use_version_keeps_previous_current() {
    let bridge = ScriptedBridge::new();
    bridge.set_installed("* v20.12.2\n  v22.1.0\n", "v20.12.2\n");
    let mut store = version_store(&bridge);
    store.fetch_installed().await;

    bridge.fail_on("use_version");
    let ok = store.use_version("v22.1.0").await;

    assert!(!ok);
    assert_eq!(store.current_version(), "v20.12.2");
    assert!(store.installed()[0].is_current);
    assert!(!store.installed()[1].is_current);
}

#[tokio::test]
async fn open_version_directory_reports_boolean_outcome() {
    let bridge = ScriptedBridge::new();
    let mut store = version_store(&bridge);

    assert!(store.open_version_directory("v20.12.2").await);

    bridge.fail_on("open_version_directory");
    assert!(!store.open_version_directory("v20.12.2").await);
    assert!(store.error().is_some());
}

#[tokio::test]
async fn successful_fetch_emits_installed_and_status_events() {
    let bridge = ScriptedBridge::new();
    bridge.set_installed("v20.12.2\n", "v20.12.2\n");
    let mut store = version_store(&bridge);
    let events = store.subscribe();

    store.fetch_installed().await;

    let received: Vec<_> = events.try_iter().collect();
    assert!(received.contains(&StoreEvent::InstalledChanged));
    assert!(received.contains(&StoreEvent::StatusChanged));
}

#[tokio::test]
async fn failed_mutation_emits_status_but_no_list_events() {
    let bridge = ScriptedBridge::new();
    bridge.fail_on("install_version");
    let mut store = version_store(&bridge);
    let events = store.subscribe();

    let ok = store.install("v22.1.0").await;

    assert!(!ok);
    let received: Vec<_> = events.try_iter().collect();
    assert!(received.contains(&StoreEvent::StatusChanged));
    assert!(!received.contains(&StoreEvent::InstalledChanged));
    assert!(!received.contains(&StoreEvent::RemoteChanged));
}

#[tokio::test]
async fn filtered_view_applies_source_and_keyword() {
    let bridge = ScriptedBridge::new();
    bridge.set_installed("v20.12.2 lts-iron\nv22.1.0\n", "v22.1.0\n");
    bridge.set_remote("v23.0.0\nv22.1.0\nv20.12.2 (Iron)\n");
    let mut store = version_store(&bridge);
    store.fetch_installed().await;
    store.fetch_remote(false).await;

    let installed_lts = store.filtered(VersionSource::Installed, true, None);
    assert_eq!(installed_lts.len(), 1);
    assert_eq!(installed_lts[0].name, "v20.12.2");

    let by_codename = store.filtered(VersionSource::Remote, false, Some("iron"));
    assert_eq!(by_codename.len(), 1);
    assert_eq!(by_codename[0].name, "v20.12.2");

    // Derived views sort newest-first and never mutate the backing list.
    let sorted = store.filtered(VersionSource::Remote, false, None);
    assert_eq!(sorted[0].name, "v23.0.0");
    assert_eq!(store.remote()[0].name, "v23.0.0");
}

#[tokio::test]
async fn settings_load_replaces_snapshot() {
    let bridge = ScriptedBridge::new();
    let env = FnmEnv {
        fnm_dir: "/data/fnm".to_string(),
        node_dist_mirror: "https://npmmirror.com/mirrors/node".to_string(),
        ..FnmEnv::default()
    };
    bridge.set_env(env.clone());
    let mut store = settings_store(&bridge);

    store.load().await;

    assert_eq!(store.env(), &env);
    assert!(store.error().is_none());
}

#[tokio::test]
async fn settings_load_failure_keeps_previous_snapshot() {
    let bridge = ScriptedBridge::new();
    let env = FnmEnv {
        fnm_dir: "/data/fnm".to_string(),
        ..FnmEnv::default()
    };
    bridge.set_env(env.clone());
    let mut store = settings_store(&bridge);
    store.load().await;

    bridge.fail_on("get_fnm_env");
    store.load().await;

    assert_eq!(store.env(), &env);
    assert!(store.error().is_some());
}

#[tokio::test]
async fn fnm_dir_failure_is_swallowed_and_error_slot_untouched() {
    let bridge = ScriptedBridge::new();
    bridge.set_fnm_dir("/data/fnm");
    let mut store = settings_store(&bridge);

    assert_eq!(store.fnm_dir().await, "/data/fnm");

    bridge.fail_on("get_fnm_dir");
    assert_eq!(store.fnm_dir().await, "");
    assert!(
        store.error().is_none(),
        "best-effort lookup must not surface an error"
    );

    // The surfacing operations still populate the slot.
    bridge.fail_on("open_fnm_directory");
    assert!(!store.open_fnm_directory().await);
    assert!(store.error().is_some());
}
