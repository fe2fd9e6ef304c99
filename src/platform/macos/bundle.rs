// ── Runtime bundles ───────────────────────────────────────────────────────────
//
// A Java runtime on macOS ships as a bundle directory (`….jdk/Contents/…`).
// CoreFoundation loads the bundle's executable lazily, on the first function
// pointer lookup.
//
// Ownership: `RuntimeBundle` owns exactly one CFBundle reference obtained from
// `CFBundleCreate`.  `CFBundle`'s own `Drop` performs the `CFRelease`, which is
// how the launcher's unload step releases a bundle.

use std::{
    ffi::c_void,
    path::{Path, PathBuf},
    ptr::NonNull,
};

use core_foundation::{bundle::CFBundle, string::CFString, url::CFURL};

use crate::error::{Result, ShimError};

/// An owned, loaded runtime bundle.
pub struct RuntimeBundle {
    bundle: CFBundle,
    path: PathBuf,
}

impl std::fmt::Debug for RuntimeBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeBundle").field("path", &self.path).finish_non_exhaustive()
    }
}

impl RuntimeBundle {
    /// Create a bundle reference for the directory at `path`.
    ///
    /// Fails when the path cannot be expressed as a file URL or when
    /// CoreFoundation does not recognise the directory as a bundle.
    pub fn load(path: &Path) -> Result<Self> {
        let url =
            CFURL::from_path(path, true).ok_or_else(|| ShimError::InvalidPath(path.to_path_buf()))?;
        CFBundle::new(url)
            .map(|bundle| Self {
                bundle,
                path: path.to_path_buf(),
            })
            .ok_or_else(|| ShimError::BundleUnavailable(path.to_path_buf()))
    }

    /// The bundle directory this reference was created from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up an exported function by name.
    ///
    /// Bundle symbol names are ASCII; anything else cannot match and returns
    /// `None` without asking CoreFoundation.
    pub fn function_pointer(&self, name: &str) -> Option<NonNull<c_void>> {
        if !name.is_ascii() {
            return None;
        }
        let ptr = self.bundle.function_pointer_for_name(CFString::new(name));
        NonNull::new(ptr.cast_mut())
    }
}
