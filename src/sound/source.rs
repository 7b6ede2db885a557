//! Alert sound resolution.
//!
//! The timer plays a single fixed alert. It is resolved at startup: a
//! bundled asset file if one ships next to the binary (or in the working
//! directory), otherwise the embedded buzzer.

use std::path::{Path, PathBuf};

// ============================================================================
// SoundSource
// ============================================================================

/// Represents the source of the alert to be played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSource {
    /// A bundled asset file on disk.
    Asset {
        /// The name of the asset (e.g., "buzzer").
        name: String,
        /// The full path to the sound file.
        path: PathBuf,
    },
    /// The buzzer compiled into the binary.
    Embedded {
        /// The name of the embedded sound.
        name: String,
    },
}

impl SoundSource {
    /// Creates a new asset sound source.
    #[must_use]
    pub fn asset(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Asset {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Creates a new embedded sound source.
    #[must_use]
    pub fn embedded(name: impl Into<String>) -> Self {
        Self::Embedded { name: name.into() }
    }

    /// Returns the name of the sound source.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Asset { name, .. } | Self::Embedded { name } => name,
        }
    }

    /// Returns true if this is a bundled asset file.
    #[must_use]
    pub fn is_asset(&self) -> bool {
        matches!(self, Self::Asset { .. })
    }

    /// Returns true if this is the embedded sound.
    #[must_use]
    pub fn is_embedded(&self) -> bool {
        matches!(self, Self::Embedded { .. })
    }

    /// Returns the file path if this is an asset.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Asset { path, .. } => Some(path),
            Self::Embedded { .. } => None,
        }
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Asset file names probed for the alert, in order of preference.
const ASSET_CANDIDATES: &[&str] = &["buzzer.wav", "buzzer.mp3"];

/// Directory holding bundled assets, relative to the probe roots.
const ASSET_DIR: &str = "assets";

/// Resolves the alert sound for this process.
///
/// Probes the working directory and the executable's directory for a
/// bundled asset, falling back to the embedded buzzer when none exists.
#[must_use]
pub fn resolve_alert() -> SoundSource {
    let mut roots: Vec<PathBuf> = vec![PathBuf::from(".")];
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            roots.push(dir.to_path_buf());
        }
    }

    for root in &roots {
        if let Some(source) = find_asset_in(root) {
            return source;
        }
    }

    SoundSource::embedded("buzzer")
}

/// Probes one root directory for an alert asset.
fn find_asset_in(root: &Path) -> Option<SoundSource> {
    for candidate in ASSET_CANDIDATES {
        let path = root.join(ASSET_DIR).join(candidate);
        if path.is_file() {
            let name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| (*candidate).to_string());
            return Some(SoundSource::Asset { name, path });
        }
    }
    None
}
