// ── Runtime library loading ───────────────────────────────────────────────────
//
// The launcher hands us whatever its VM search produced: a plain shared
// object (`libjvm.dylib`), a shared object buried inside a JDK bundle
// (`….jdk/Contents/Home/lib/server/libjvm.dylib`), or a bundle directory.
//
// ── Ownership model ───────────────────────────────────────────────────────────
//
// `LibraryHandle` owns either a `RuntimeBundle` or a `libloading::Library`.
// The variant *is* the tag: lookup and unload match on it, so a handle can
// never be released or searched with the wrong mechanism.  `unload_library`
// consumes the handle; `Drop` covers every other exit path.
//
// Symbol pointers returned by `find_symbol` are raw addresses and are only
// valid while the handle that produced them is alive.
//
// `unsafe` is permitted in this module (dlopen/dlsym are inherently unsafe);
// every block carries a `// SAFETY:` comment.

#![allow(unsafe_code)]

use std::{
    ffi::{c_void, OsStr},
    os::unix::ffi::OsStrExt,
    path::{Path, PathBuf},
    ptr::NonNull,
};

use libloading::Library;
use tracing::{debug, error, warn};

use crate::{
    error::{Result, ShimError},
    platform::RuntimeBundle,
};

// ── Classification ────────────────────────────────────────────────────────────

/// File suffixes (after the last `.`) that name a loadable shared object.
/// Compared ASCII case-insensitively.
const SHARED_LIBRARY_EXTENSIONS: [&str; 3] = ["so", "jnilib", "dylib"];

/// A shared-object path must mention this to be considered a bundled VM.
const RUNTIME_LIBRARY_STEM: &[u8] = b"libjvm";

/// Everything from this segment on is the inside of a JDK bundle.
const EMBEDDED_RUNTIME_MARKER: &[u8] = b"/Contents/Home/";

/// Whether `path` ends in one of the shared-object suffixes.
///
/// The suffix is whatever follows the last `.` in the whole path, so a dot
/// in a directory name never produces a match.
pub fn is_shared_library(path: &Path) -> bool {
    let bytes = path.as_os_str().as_bytes();
    let Some(dot) = bytes.iter().rposition(|&b| b == b'.') else {
        return false;
    };
    let ext = &bytes[dot + 1..];
    SHARED_LIBRARY_EXTENSIONS
        .iter()
        .any(|known| ext.eq_ignore_ascii_case(known.as_bytes()))
}

/// How a path will be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPlan {
    /// A bundle directory.
    Bundle(PathBuf),
    /// A VM shared object inside a JDK bundle: try the enclosing bundle
    /// first, fall back to `dlopen` of the full path.
    EmbeddedRuntime { bundle: PathBuf, library: PathBuf },
    /// A plain shared object.
    Dynamic(PathBuf),
}

/// Decide how `path` should be loaded without touching the file system.
pub fn plan_load(path: &Path) -> LoadPlan {
    if !is_shared_library(path) {
        return LoadPlan::Bundle(path.to_path_buf());
    }

    let bytes = path.as_os_str().as_bytes();
    if find(bytes, RUNTIME_LIBRARY_STEM).is_some() {
        if let Some(at) = find(bytes, EMBEDDED_RUNTIME_MARKER) {
            return LoadPlan::EmbeddedRuntime {
                bundle: PathBuf::from(OsStr::from_bytes(&bytes[..at])),
                library: path.to_path_buf(),
            };
        }
    }

    LoadPlan::Dynamic(path.to_path_buf())
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

// ── LibraryHandle ─────────────────────────────────────────────────────────────

/// A loaded runtime, tagged by how it was loaded.
#[derive(Debug)]
pub enum LibraryHandle {
    Bundle(RuntimeBundle),
    Dynamic(Library),
}

impl LibraryHandle {
    /// Execute `plan`.
    pub fn open(plan: &LoadPlan) -> Result<Self> {
        match plan {
            LoadPlan::Bundle(path) => RuntimeBundle::load(path).map(Self::Bundle),
            LoadPlan::EmbeddedRuntime { bundle, library } => match RuntimeBundle::load(bundle) {
                Ok(b) => Ok(Self::Bundle(b)),
                Err(e) => {
                    debug!(bundle = %bundle.display(), error = %e, "enclosing bundle unavailable; using dlopen");
                    open_dynamic(library).map(Self::Dynamic)
                }
            },
            LoadPlan::Dynamic(path) => open_dynamic(path).map(Self::Dynamic),
        }
    }

    pub fn is_bundle(&self) -> bool {
        matches!(self, Self::Bundle(_))
    }

    /// The bundle directory, for a bundle-backed handle.
    pub fn bundle_path(&self) -> Option<&Path> {
        match self {
            Self::Bundle(bundle) => Some(bundle.path()),
            Self::Dynamic(_) => None,
        }
    }

    /// Address of the exported symbol `name`, or `None` if it is absent.
    pub fn find_symbol(&self, name: &str) -> Option<NonNull<c_void>> {
        match self {
            Self::Bundle(bundle) => bundle.function_pointer(name),
            Self::Dynamic(lib) => {
                // SAFETY: the symbol is read as an untyped address and never
                // called or dereferenced here; the caller must cast it to the
                // correct function type and keep `self` alive while using it.
                let sym = unsafe { lib.get::<*mut c_void>(name.as_bytes()) }.ok()?;
                NonNull::new(*sym)
            }
        }
    }

    /// Release the library with the mechanism matching how it was loaded.
    pub fn close(self) -> Result<()> {
        match self {
            // CFRelease happens in CFBundle's Drop.
            Self::Bundle(bundle) => {
                drop(bundle);
                Ok(())
            }
            Self::Dynamic(lib) => lib.close().map_err(|e| ShimError::Unload(e.to_string())),
        }
    }
}

/// `dlopen(path, RTLD_NOW)`.
fn open_dynamic(path: &Path) -> Result<Library> {
    // SAFETY: loading a library runs its initialisers.  The launcher only
    // passes paths produced by its own VM search; running that code is the
    // purpose of the call.
    let lib = unsafe {
        libloading::os::unix::Library::open(Some(path), libloading::os::unix::RTLD_NOW)
    };
    lib.map(Library::from).map_err(|e| ShimError::Load {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

// ── Launcher-facing API ───────────────────────────────────────────────────────

/// Load the library or bundle at `path`, reporting failure as an error.
pub fn try_load_library(path: &Path) -> Result<LibraryHandle> {
    LibraryHandle::open(&plan_load(path))
}

/// Load the library or bundle at `path`.
///
/// On failure the loader's message is printed to stdout (where the launcher's
/// console diagnostics go) and `None` is returned.
pub fn load_library(path: &Path) -> Option<LibraryHandle> {
    match try_load_library(path) {
        Ok(handle) => Some(handle),
        Err(e) => {
            if let Some(message) = console_message(&e) {
                println!("{message}");
            }
            error!(path = %path.display(), error = %e, "could not load runtime library");
            None
        }
    }
}

/// The line printed to stdout for a failed load: the loader's own text for a
/// `dlopen` failure, nothing otherwise.
fn console_message(e: &ShimError) -> Option<&str> {
    match e {
        ShimError::Load { message, .. } => Some(message.as_str()),
        _ => None,
    }
}

/// Unload a handle produced by [`load_library`].  Failures are logged.
pub fn unload_library(handle: LibraryHandle) {
    if let Err(e) = handle.close() {
        warn!(error = %e, "unload failed");
    }
}

/// Address of `symbol` in `handle`, or `None`.
pub fn find_symbol(handle: &LibraryHandle, symbol: &str) -> Option<NonNull<c_void>> {
    handle.find_symbol(symbol)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_object_suffixes_are_recognised_in_any_case() {
        for p in [
            "/usr/lib/libz.so",
            "/Library/Java/libjli.jnilib",
            "/opt/jdk/lib/server/libjvm.dylib",
            "/opt/LIBJVM.DYLIB",
            "/opt/libfoo.So",
        ] {
            assert!(is_shared_library(Path::new(p)), "{p}");
        }
    }

    #[test]
    fn other_paths_are_not_shared_objects() {
        for p in [
            "/Library/Java/JavaVirtualMachines/jdk-17.jdk",
            "/usr/lib/libz.so.1",
            "/opt/runtime",
            "/opt/my.so/runtime",
            "/opt/libfoo.dll",
            "",
        ] {
            assert!(!is_shared_library(Path::new(p)), "{p}");
        }
    }

    #[test]
    fn non_library_plans_bundle() {
        let p = Path::new("/Library/Java/JavaVirtualMachines/jdk-17.jdk");
        assert_eq!(plan_load(p), LoadPlan::Bundle(p.to_path_buf()));
    }

    #[test]
    fn plain_library_plans_dlopen() {
        let p = Path::new("/opt/app/lib/libswt.dylib");
        assert_eq!(plan_load(p), LoadPlan::Dynamic(p.to_path_buf()));
    }

    #[test]
    fn jvm_inside_bundle_is_truncated_at_marker() {
        let p = Path::new(
            "/Library/Java/JavaVirtualMachines/jdk-17.jdk/Contents/Home/lib/server/libjvm.dylib",
        );
        assert_eq!(
            plan_load(p),
            LoadPlan::EmbeddedRuntime {
                bundle: PathBuf::from("/Library/Java/JavaVirtualMachines/jdk-17.jdk"),
                library: p.to_path_buf(),
            }
        );
    }

    #[test]
    fn marker_without_jvm_stem_plans_dlopen() {
        let p = Path::new("/opt/x.jdk/Contents/Home/lib/libjava.dylib");
        assert_eq!(plan_load(p), LoadPlan::Dynamic(p.to_path_buf()));
    }

    #[test]
    fn jvm_without_marker_plans_dlopen() {
        let p = Path::new("/usr/lib/jvm/java-17/lib/server/libjvm.so");
        assert_eq!(plan_load(p), LoadPlan::Dynamic(p.to_path_buf()));
    }

    /// A shared object guaranteed to be loadable on this host, named with a
    /// recognised suffix so it takes the dlopen path.
    #[cfg(target_os = "macos")]
    fn system_library(_dir: &Path) -> PathBuf {
        PathBuf::from("/usr/lib/libSystem.B.dylib")
    }

    /// The C library this test process already maps, linked under a `.so`
    /// name (the real file is usually `libc.so.6`, which is not a recognised
    /// suffix).
    #[cfg(target_os = "linux")]
    fn system_library(dir: &Path) -> PathBuf {
        let maps = std::fs::read_to_string("/proc/self/maps").expect("read maps");
        let libc = maps
            .lines()
            .filter_map(|line| line.split_whitespace().nth(5))
            .find(|p| {
                let name = p.rsplit('/').next().unwrap_or(p);
                name.starts_with("libc.so") || name.starts_with("libc-")
            })
            .expect("libc mapped");
        let link = dir.join("libsystemc.so");
        std::os::unix::fs::symlink(libc, &link).expect("symlink");
        link
    }

    #[cfg(any(target_os = "macos", target_os = "linux"))]
    #[test]
    fn dynamic_handle_resolves_symbols_and_closes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = system_library(dir.path());
        assert_eq!(plan_load(&path), LoadPlan::Dynamic(path.clone()));

        let handle = load_library(&path).expect("system library loads");
        assert!(!handle.is_bundle());
        assert_eq!(handle.bundle_path(), None);
        assert!(handle.find_symbol("malloc").is_some());
        assert!(find_symbol(&handle, "malloc").is_some());
        assert!(handle.find_symbol("bootshim_no_such_symbol").is_none());
        assert!(handle.find_symbol("mal\0loc").is_none());
        assert!(handle.close().is_ok());

        // The sentinel form goes through the same variant dispatch.
        let again = load_library(&path).expect("reload");
        unload_library(again);
    }

    #[test]
    fn only_loader_errors_reach_the_console() {
        let load = ShimError::Load {
            path: PathBuf::from("/opt/libfoo.dylib"),
            message: "image not found".to_owned(),
        };
        assert_eq!(console_message(&load), Some("image not found"));
        assert_eq!(
            console_message(&ShimError::BundleUnavailable(PathBuf::from("/opt/x.jdk"))),
            None
        );
        assert_eq!(console_message(&ShimError::Unsupported("loading a runtime bundle")), None);
    }

    #[test]
    fn missing_library_yields_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let p = dir.path().join("libmissing.dylib");
        assert!(load_library(&p).is_none());
        match try_load_library(&p) {
            Err(ShimError::Load { path, message }) => {
                assert_eq!(path, p);
                assert!(!message.is_empty());
            }
            other => panic!("expected Load error, got {other:?}"),
        }
    }

    #[test]
    fn missing_embedded_runtime_falls_back_to_dlopen_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let p = dir
            .path()
            .join("jdk.jdk/Contents/Home/lib/server/libjvm.dylib");
        // Neither the bundle nor the library exists: the error reported is
        // the dlopen one, proving the fallback ran.
        assert!(matches!(try_load_library(&p), Err(ShimError::Load { .. })));
    }
}
