// ── Central error type ────────────────────────────────────────────────────────
//
// Every fallible operation in the shim returns `error::Result<T>`.  The public
// launcher-facing functions (`load_library`, `copy_config_file`, …) keep the
// native launcher's sentinel contract (`None` / `false`) and only log these
// errors; the `try_*` variants hand them to callers that want to escalate.

use std::path::PathBuf;

/// Every error that the shim can produce.
#[derive(Debug)]
pub enum ShimError {
    /// A standard I/O error (chdir, create_dir_all, remove, copy, …).
    Io(std::io::Error),

    /// A native framework call reported failure.
    Os {
        /// The name of the failing function, for display purposes.
        function: &'static str,
        /// The raw status code, or 0 when the API only returns a boolean.
        code: i32,
    },

    /// The dynamic loader refused the library.  `message` is the loader's
    /// own text (`dlerror()`).
    Load { path: PathBuf, message: String },

    /// `CFBundleCreate` returned NULL for the given directory.
    BundleUnavailable(PathBuf),

    /// `dlclose` failed.
    Unload(String),

    /// The path cannot be handed to the OS (interior NUL, not UTF-8, …).
    InvalidPath(PathBuf),

    /// `bootshim.json` could not be parsed.
    Settings(serde_json::Error),

    /// AppKit was touched from a thread other than the main thread.
    NotMainThread,

    /// The operation has no implementation on this platform.
    Unsupported(&'static str),
}

impl std::fmt::Display for ShimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Os { function, code } => write!(f, "{function} failed (status {code})"),
            Self::Load { message, .. } => f.write_str(message),
            Self::BundleUnavailable(path) => {
                write!(f, "could not create bundle from {}", path.display())
            }
            Self::Unload(message) => write!(f, "could not unload library: {message}"),
            Self::InvalidPath(path) => write!(f, "invalid path: {}", path.display()),
            Self::Settings(e) => write!(f, "invalid settings file: {e}"),
            Self::NotMainThread => f.write_str("AppKit must be used from the main thread"),
            Self::Unsupported(what) => write!(f, "{what} is not supported on this platform"),
        }
    }
}

impl std::error::Error for ShimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Settings(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ShimError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ShimError {
    fn from(e: serde_json::Error) -> Self {
        Self::Settings(e)
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ShimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_displays_loader_text_verbatim() {
        let e = ShimError::Load {
            path: PathBuf::from("/opt/libfoo.dylib"),
            message: "dlopen(/opt/libfoo.dylib, 2): image not found".to_owned(),
        };
        assert_eq!(e.to_string(), "dlopen(/opt/libfoo.dylib, 2): image not found");
    }

    #[test]
    fn io_error_keeps_its_source() {
        let e = ShimError::from(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert!(std::error::Error::source(&e).is_some());
        assert!(e.to_string().starts_with("I/O error"));
    }
}
