// ── Launcher settings ─────────────────────────────────────────────────────────
//
// Reads `<program dir>/bootshim.json`, the optional file that tells the
// driver what to do on first run.  Absent or unreadable settings are not an
// error: the driver falls back to `LauncherSettings::default()`.
// No `unsafe`: pure safe Rust + serde_json.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;

// ── File identity ─────────────────────────────────────────────────────────────

pub const SETTINGS_FILE_NAME: &str = "bootshim.json";

const SETTINGS_VERSION: u32 = 1;

// ── On-disk type ──────────────────────────────────────────────────────────────

/// Root of the JSON settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherSettings {
    pub version: u32,
    /// Default config, relative to the program dir.
    pub config_source: PathBuf,
    /// Per-user folder to copy the default config into.  `None` disables the
    /// first-run copy.  A leading `~` means the home directory.
    pub config_destination: Option<PathBuf>,
    /// Whether the launcher will show a splash screen (activates the UI at
    /// startup rather than on the first alert).
    pub show_splash: bool,
    /// Runtime library or bundle to probe at startup.
    pub runtime_library: Option<PathBuf>,
    /// Symbol that must be exported by `runtime_library`.
    pub runtime_entry_point: String,
}

impl Default for LauncherSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            config_source: PathBuf::from("../Resources/config.ini"),
            config_destination: None,
            show_splash: true,
            runtime_library: None,
            runtime_entry_point: "JNI_CreateJavaVM".to_owned(),
        }
    }
}

// ── Load ──────────────────────────────────────────────────────────────────────

/// Parse settings from JSON text, rejecting unknown versions.
pub fn parse(json: &str) -> Result<Option<LauncherSettings>> {
    let settings: LauncherSettings = serde_json::from_str(json)?;
    if settings.version != SETTINGS_VERSION {
        return Ok(None);
    }
    Ok(Some(settings))
}

/// Read `bootshim.json` from `program_dir`.
///
/// Returns `None` when the file is missing, malformed, or carries an
/// unrecognised version number.
pub fn load(program_dir: &Path) -> Option<LauncherSettings> {
    let path = program_dir.join(SETTINGS_FILE_NAME);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "no settings file");
            return None;
        }
    };
    match parse(&text) {
        Ok(Some(settings)) => Some(settings),
        Ok(None) => {
            warn!(path = %path.display(), "unsupported settings version; using defaults");
            None
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring settings file");
            None
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
