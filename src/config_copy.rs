// ── First-run config copy ─────────────────────────────────────────────────────
//
// Copies the default config shipped inside the app (for example
// `MyApp.app/Contents/Resources/config.ini`) into a per-user folder (for
// example `~/myapp_workspace`), replacing any copy already there.
//
// Each step prints an operator-facing line to stdout, the same channel the
// native launcher uses for its console diagnostics, and also emits a
// `tracing` event.  Nothing is rolled back: a directory created before a
// later failure stays.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{error, info};

use crate::{
    error::{Result, ShimError},
    paths::{expand_tilde, standardize},
};

/// Copy `program_dir/rel_path` into `dest_dir`.
///
/// * `program_dir`: where the launcher runs (`MyApp.app/Contents/MacOS`).
/// * `rel_path`: the default config relative to it (`../Resources/config.ini`).
/// * `dest_dir`: destination folder; a leading `~` means the home directory.
///
/// Returns the full path of the copied file.
pub fn try_copy_config_file(program_dir: &Path, rel_path: &Path, dest_dir: &Path) -> Result<PathBuf> {
    let source = standardize(&program_dir.join(rel_path));
    let dest_dir = expand_tilde(dest_dir);

    println!("programdir =  {}", program_dir.display());
    println!("sourcePath =  {}", source.display());

    if dest_dir.exists() {
        println!("OK: exists {}", dest_dir.display());
    } else {
        if let Err(e) = fs::create_dir_all(&dest_dir) {
            println!("Error createDirectoryAtPath {}", dest_dir.display());
            error!(dir = %dest_dir.display(), error = %e, "could not create config folder");
            return Err(e.into());
        }
        println!("OK: createDirectoryAtPath {}", dest_dir.display());
    }

    let file_name = source
        .file_name()
        .ok_or_else(|| ShimError::InvalidPath(source.clone()))?;
    let dest = dest_dir.join(file_name);

    // lstat: a dangling link at the destination is still an entry to remove,
    // otherwise the copy would write through it.
    if fs::symlink_metadata(&dest).is_ok() {
        println!("deleting old {}", file_name.to_string_lossy());
        if let Err(e) = fs::remove_file(&dest) {
            println!("Error Could not remove old file {}", dest.display());
            error!(file = %dest.display(), error = %e, "could not remove stale config");
            return Err(e.into());
        }
    }

    if let Err(e) = fs::copy(&source, &dest) {
        println!(
            "Could not copy file at path {} to path {}. error: {e}",
            source.display(),
            dest.display()
        );
        error!(from = %source.display(), to = %dest.display(), error = %e, "config copy failed");
        return Err(e.into());
    }

    info!(to = %dest.display(), "default config installed");
    Ok(dest)
}

/// [`try_copy_config_file`] with the launcher's boolean contract: `true` on
/// success, `false` after the failing step has been reported.
pub fn copy_config_file(program_dir: &Path, rel_path: &Path, dest_dir: &Path) -> bool {
    try_copy_config_file(program_dir, rel_path, dest_dir).is_ok()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
