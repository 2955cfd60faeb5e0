//! Persisted view-mode preference. Storage failures are tolerated silently:
//! an unreadable file just means the default view, an unwritable one means
//! the choice resets next run.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::cli::ViewMode;

pub const DEFAULT_VIEW: ViewMode = ViewMode::List;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct SavedSettings {
    view: ViewMode,
}

/// Read the saved view mode, if persistence is enabled and a config dir is
/// resolvable. Also returns the path subsequent saves should use.
#[must_use]
pub fn load_view(enable_disk: bool) -> (ViewMode, Option<PathBuf>) {
    if !enable_disk {
        return (DEFAULT_VIEW, None);
    }

    let Some(path) = settings_path() else {
        return (DEFAULT_VIEW, None);
    };

    let view = fs::read_to_string(&path)
        .ok()
        .and_then(|content| serde_json::from_str::<SavedSettings>(&content).ok())
        .map_or(DEFAULT_VIEW, |saved| saved.view);

    (view, Some(path))
}

pub fn save_view(path: &Path, view: ViewMode) {
    if let Some(parent) = path.parent()
        && fs::create_dir_all(parent).is_err()
    {
        return;
    }
    if let Ok(payload) = serde_json::to_string_pretty(&SavedSettings { view }) {
        let _ = fs::write(path, payload);
    }
}

fn settings_path() -> Option<PathBuf> {
    if let Some(base) = std::env::var_os("TEMPCAL_CONFIG_DIR") {
        return Some(PathBuf::from(base).join("settings.json"));
    }

    let home = std::env::var_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("tempcal")
            .join("settings.json"),
    )
}
