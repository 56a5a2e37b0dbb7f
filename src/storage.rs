//! Key-value session persistence.
//!
//! The session is stored as one file per key under a namespaced directory,
//! the way a browser would keep one `localStorage` entry per key. Document
//! content is stored as a plain string; preference values are JSON-encoded.
//! Storage is best-effort: every error is swallowed (and logged at warn
//! level) and the in-memory value stays authoritative for the session.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

/// File name for the raw document content (stored as a plain string).
const CONTENT_KEY: &str = "content";

/// The closed set of persisted preference keys.
///
/// Preferences are a fixed, enumerated schema with explicit value types;
/// values that fail to parse fall back to the application default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefKey {
    /// Whether scroll positions of the two panes are coupled.
    SyncScroll,
    /// Whether the dark theme is active.
    Theme,
    /// Whether the toolbar header is expanded.
    NavbarExpanded,
}

impl PrefKey {
    /// The storage file name for this key.
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::SyncScroll => "syncScroll",
            Self::Theme => "theme",
            Self::NavbarExpanded => "navbarExpanded",
        }
    }
}

/// A namespaced on-disk key-value store.
pub struct Store {
    dir: PathBuf,
    available: bool,
}

impl Store {
    /// Open (creating if needed) the store at the given directory.
    ///
    /// A store whose directory cannot be created is still usable: reads
    /// return `None` and writes are dropped.
    pub fn open(dir: PathBuf) -> Self {
        let available = match fs::create_dir_all(&dir) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(dir = %dir.display(), %err, "session storage unavailable");
                false
            }
        };
        Self { dir, available }
    }

    /// A store that never reads or writes anything.
    pub const fn disabled() -> Self {
        Self {
            dir: PathBuf::new(),
            available: false,
        }
    }

    /// The platform default storage directory.
    pub fn default_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(appdata) = std::env::var_os("APPDATA") {
                return PathBuf::from(appdata).join("mdlive");
            }
        }

        #[cfg(target_os = "macos")]
        {
            if let Some(home) = std::env::var_os("HOME") {
                return PathBuf::from(home)
                    .join("Library")
                    .join("Application Support")
                    .join("mdlive");
            }
        }

        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        {
            if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
                return PathBuf::from(xdg).join("mdlive");
            }
            if let Some(home) = std::env::var_os("HOME") {
                return PathBuf::from(home).join(".config").join("mdlive");
            }
        }

        PathBuf::from(".mdlive")
    }

    fn key_path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Read the stored document content, if any.
    pub fn read_content(&self) -> Option<String> {
        if !self.available {
            return None;
        }
        fs::read_to_string(self.key_path(CONTENT_KEY)).ok()
    }

    /// Persist the document content as a plain string.
    pub fn write_content(&self, text: &str) {
        if !self.available {
            return;
        }
        if let Err(err) = fs::write(self.key_path(CONTENT_KEY), text) {
            tracing::warn!(%err, "failed to persist document content");
        }
    }

    /// Read and decode a JSON preference value.
    ///
    /// Returns `None` when the key is absent, unreadable, or fails to parse
    /// as the expected type; the caller supplies the default.
    pub fn read_json<T: DeserializeOwned>(&self, key: PrefKey) -> Option<T> {
        if !self.available {
            return None;
        }
        let raw = fs::read_to_string(self.key_path(key.file_name())).ok()?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(key = key.file_name(), %err, "ignoring malformed preference");
                None
            }
        }
    }

    /// Encode and persist a JSON preference value.
    pub fn write_json<T: Serialize>(&self, key: PrefKey, value: &T) {
        if !self.available {
            return;
        }
        let encoded = match serde_json::to_string(value) {
            Ok(s) => s,
            Err(err) => {
                tracing::warn!(key = key.file_name(), %err, "failed to encode preference");
                return;
            }
        };
        if let Err(err) = fs::write(self.key_path(key.file_name()), encoded) {
            tracing::warn!(key = key.file_name(), %err, "failed to persist preference");
        }
    }

    /// Remove every stored key, leaving the directory in place.
    pub fn clear(&self) {
        if !self.available {
            return;
        }
        let keys = [
            CONTENT_KEY,
            PrefKey::SyncScroll.file_name(),
            PrefKey::Theme.file_name(),
            PrefKey::NavbarExpanded.file_name(),
        ];
        for name in keys {
            let path = self.key_path(name);
            if path.exists()
                && let Err(err) = fs::remove_file(&path)
            {
                tracing::warn!(path = %path.display(), %err, "failed to clear stored key");
            }
        }
    }

    /// The directory backing this store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("dir", &self.dir)
            .field("available", &self.available)
            .finish()
    }
}

/// In-memory preference values, hydrated once from the store at startup.
///
/// No preference write happens before its initial read: [`Preferences::load`]
/// performs the hydration, and only the setters write back. A default value
/// therefore never clobbers a previously persisted one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    /// Scroll sync between editor and preview.
    pub sync_scroll: bool,
    /// Dark theme enabled.
    pub dark: bool,
    /// Toolbar header expanded.
    pub navbar_expanded: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            sync_scroll: false,
            dark: false,
            navbar_expanded: true,
        }
    }
}

impl Preferences {
    /// Hydrate preferences from the store, falling back to defaults for
    /// absent or malformed values.
    pub fn load(store: &Store) -> Self {
        let defaults = Self::default();
        Self {
            sync_scroll: store
                .read_json(PrefKey::SyncScroll)
                .unwrap_or(defaults.sync_scroll),
            dark: store.read_json(PrefKey::Theme).unwrap_or(defaults.dark),
            navbar_expanded: store
                .read_json(PrefKey::NavbarExpanded)
                .unwrap_or(defaults.navbar_expanded),
        }
    }

    /// Flip the sync-scroll flag and write it through.
    pub fn toggle_sync_scroll(&mut self, store: &Store) {
        self.sync_scroll = !self.sync_scroll;
        store.write_json(PrefKey::SyncScroll, &self.sync_scroll);
    }

    /// Flip the dark-theme flag and write it through.
    pub fn toggle_dark(&mut self, store: &Store) {
        self.dark = !self.dark;
        store.write_json(PrefKey::Theme, &self.dark);
    }

    /// Flip the navbar flag and write it through.
    pub fn toggle_navbar(&mut self, store: &Store) {
        self.navbar_expanded = !self.navbar_expanded;
        store.write_json(PrefKey::NavbarExpanded, &self.navbar_expanded);
    }
}
