//! Client-side state mirroring the external fnm inventory and settings.
//!
//! The stores own the authoritative in-memory lists and the busy/error
//! slots around every bridge call. Derived views (sorted, filtered) are
//! recomputed on demand so no stale derivation can be observed, and every
//! state transition emits a [`StoreEvent`] for whatever layer renders the
//! data.
//!
//! Store methods take `&mut self`: under a single owner two mutating
//! operations on the same store cannot interleave, which serializes the
//! install/uninstall/use/default paths per store without any extra locking.

mod events;
mod settings;
mod version;

pub use events::StoreEvent;
pub use settings::{MIRROR_PRESETS, MirrorPreset, SettingsStore};
pub use version::{VersionSource, VersionStore};
