use std::sync::Arc;

use crossbeam_channel::Receiver;
use log::error;

use fnmdeck_backend::{BridgeError, FnmBridge, FnmEnv};

use crate::events::{StoreEvent, Subscribers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MirrorPreset {
    pub label: &'static str,
    pub url: &'static str,
}

/// Well-known Node distribution mirrors offered alongside the configured
/// one.
pub const MIRROR_PRESETS: &[MirrorPreset] = &[
    MirrorPreset {
        label: "Official",
        url: "https://nodejs.org/dist",
    },
    MirrorPreset {
        label: "npmmirror",
        url: "https://npmmirror.com/mirrors/node",
    },
    MirrorPreset {
        label: "Tencent Cloud",
        url: "https://mirrors.cloud.tencent.com/nodejs-release",
    },
    MirrorPreset {
        label: "Huawei Cloud",
        url: "https://mirrors.huaweicloud.com/nodejs",
    },
];

/// Owns the fnm environment snapshot. The snapshot is only ever replaced
/// wholesale by [`Self::load`]; there is no partial-field mutation.
pub struct SettingsStore {
    bridge: Arc<dyn FnmBridge>,
    env: FnmEnv,
    loading: bool,
    error: Option<String>,
    subscribers: Subscribers,
}

impl std::fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsStore")
            .field("env", &self.env)
            .field("loading", &self.loading)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl SettingsStore {
    #[must_use]
    pub fn new(bridge: Arc<dyn FnmBridge>) -> Self {
        Self {
            bridge,
            env: FnmEnv::default(),
            loading: false,
            error: None,
            subscribers: Subscribers::default(),
        }
    }

    pub fn subscribe(&mut self) -> Receiver<StoreEvent> {
        self.subscribers.subscribe()
    }

    #[must_use]
    pub fn env(&self) -> &FnmEnv {
        &self.env
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replaces the settings snapshot from the tool. On failure the previous
    /// snapshot survives and the error is surfaced.
    pub async fn load(&mut self) {
        self.loading = true;
        self.error = None;
        self.subscribers.emit(StoreEvent::StatusChanged);

        match self.bridge.get_fnm_env().await {
            Ok(env) => {
                self.env = env;
                self.subscribers.emit(StoreEvent::SettingsChanged);
            }
            Err(error) => self.fail("load settings", &error),
        }

        self.loading = false;
        self.subscribers.emit(StoreEvent::StatusChanged);
    }

    /// Best-effort lookup of the fnm data directory for passive display.
    ///
    /// This is the one deliberately error-suppressing operation in the
    /// settings store: a failure is logged and an empty string returned,
    /// and the shared error slot is left untouched.
    pub async fn fnm_dir(&self) -> String {
        match self.bridge.get_fnm_dir().await {
            Ok(dir) => dir,
            Err(error) => {
                error!("Failed to get fnm dir: {error}");
                String::new()
            }
        }
    }

    pub async fn open_fnm_directory(&mut self) -> bool {
        self.error = None;

        match self.bridge.open_fnm_directory().await {
            Ok(()) => true,
            Err(error) => {
                self.fail("open fnm directory", &error);
                self.subscribers.emit(StoreEvent::StatusChanged);
                false
            }
        }
    }

    fn fail(&mut self, operation: &str, error: &BridgeError) {
        error!("Failed to {operation}: {error}");
        self.error = Some(error.to_string());
    }
}
