// ── Non-macOS fallback ────────────────────────────────────────────────────────
//
// Keeps the crate building and testable on other Unix hosts.  There is no
// native alert toolkit here and no bundle format, so:
//   • alerts are written to stderr,
//   • bundle loading reports `Unsupported`,
//   • no file is ever a Finder alias (plain symlinks are still resolved by
//     `paths::resolve_symlinks`).
// No `unsafe`.

use std::{
    ffi::c_void,
    io::Write,
    path::{Path, PathBuf},
    ptr::NonNull,
};

use crate::{
    error::{Result, ShimError},
    message::AlertText,
    window::WindowBackend,
};

/// `WindowBackend` that prints alerts to the console.
#[derive(Debug, Default)]
pub struct ConsoleBackend;

impl WindowBackend for ConsoleBackend {
    fn activate(&mut self) -> Result<()> {
        // A console process is already as "foreground" as it gets.
        Ok(())
    }

    fn run_alert(&mut self, title: &str, text: &AlertText) -> Result<()> {
        let mut err = std::io::stderr().lock();
        writeln!(err, "{title}: {}", text.primary)?;
        if let Some(informative) = &text.secondary {
            writeln!(err, "{informative}")?;
        }
        Ok(())
    }
}

/// Runtime bundles do not exist off macOS; this type has no values.
#[derive(Debug)]
pub enum RuntimeBundle {}

impl RuntimeBundle {
    pub fn load(_path: &Path) -> Result<Self> {
        Err(ShimError::Unsupported("loading a runtime bundle"))
    }

    pub fn path(&self) -> &Path {
        match *self {}
    }

    pub fn function_pointer(&self, _name: &str) -> Option<NonNull<c_void>> {
        match *self {}
    }
}

pub fn resolve_alias(_path: &Path) -> Result<Option<PathBuf>> {
    Ok(None)
}
