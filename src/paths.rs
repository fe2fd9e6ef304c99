// ── Path helpers ──────────────────────────────────────────────────────────────
//
// Symlink / Finder-alias resolution plus the small path manipulations the
// first-run config copy needs.  Every function returns an owned `PathBuf`:
// callers never have to work out whether they got their input back or a new
// allocation.
// No `unsafe`; the alias lookup lives in `platform`.

use std::{
    ffi::OsString,
    path::{Component, Path, PathBuf},
};

use tracing::debug;

use crate::platform;

// ── Symlinks and aliases ──────────────────────────────────────────────────────

/// Resolve `path` if it is a symbolic link or a Finder alias.
///
/// * `None` in, `None` out.
/// * A link or alias yields the canonical target path.
/// * Anything else, including a path that does not exist or whose link
///   target is gone, yields an unchanged copy of `path`.
pub fn resolve_symlinks<P: AsRef<Path>>(path: Option<P>) -> Option<PathBuf> {
    let path = path?;
    let path = path.as_ref();
    Some(resolve_link(path).unwrap_or_else(|| path.to_path_buf()))
}

fn resolve_link(path: &Path) -> Option<PathBuf> {
    let meta = std::fs::symlink_metadata(path).ok()?;

    if meta.file_type().is_symlink() {
        return match std::fs::canonicalize(path) {
            Ok(target) => Some(target),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "dangling symlink left unresolved");
                None
            }
        };
    }

    match platform::resolve_alias(path) {
        Ok(target) => target,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "alias left unresolved");
            None
        }
    }
}

// ── Install directory ─────────────────────────────────────────────────────────

/// Directory containing the running executable, with links resolved.
///
/// For an app bundle this is `MyApp.app/Contents/MacOS`.  Returns `None` if
/// the OS cannot report the executable path.
pub fn program_dir() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let exe = resolve_symlinks(Some(&exe))?;
    exe.parent().map(Path::to_path_buf)
}

// ── Lexical helpers ───────────────────────────────────────────────────────────

/// Expand a leading `~` or `~/` to `$HOME`.
///
/// `~user` forms and paths without a leading tilde are returned unchanged, as
/// is everything when `HOME` is unset.
pub fn expand_tilde(path: &Path) -> PathBuf {
    expand_tilde_with(path, std::env::var_os("HOME"))
}

fn expand_tilde_with(path: &Path, home: Option<OsString>) -> PathBuf {
    let Some(home) = home else {
        return path.to_path_buf();
    };
    match path.strip_prefix("~") {
        Ok(rest) if rest.as_os_str().is_empty() => PathBuf::from(home),
        Ok(rest) => PathBuf::from(home).join(rest),
        Err(_) => path.to_path_buf(),
    }
}

/// Remove `.` components and fold `..` into its parent, without touching
/// the file system.
///
/// `..` at the root stays at the root; leading `..` in a relative path are
/// kept.
pub fn standardize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                Some(Component::ParentDir) | Some(Component::CurDir) | None => {
                    out.push("..");
                }
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
