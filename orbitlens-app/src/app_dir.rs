//! Directory where the executable lives. The backdrop cache, exports, and
//! preferences are stored next to the app.

use std::path::{Path, PathBuf};

/// Directory containing the running executable. Falls back to current directory if unavailable.
pub fn exe_directory() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(PathBuf::from))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Exported trace images.
pub fn images_directory() -> PathBuf {
    exe_directory().join("images")
}

/// Cached render of the period backdrop.
pub fn backdrop_cache_path() -> PathBuf {
    exe_directory().join("backdrop.png")
}

/// First `trace-<n>.png` in `dir` that does not exist yet, counting from 1.
pub fn next_export_path(dir: &Path) -> PathBuf {
    (1u32..)
        .map(|n| dir.join(format!("trace-{n}.png")))
        .find(|p| !p.exists())
        .unwrap_or_else(|| dir.join("trace.png"))
}
