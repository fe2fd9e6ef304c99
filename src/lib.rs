// ── Safety policy ────────────────────────────────────────────────────────────
// Unsafe code is forbidden everywhere except:
//   • `platform::macos`: AppKit / CoreFoundation FFI
//   • `library`        : dlopen / dlsym through libloading
// Each unsafe block in those modules MUST carry a `// SAFETY:` comment.
#![deny(unsafe_code)]

//! Bootstrap primitives for a native application launcher on macOS.
//!
//! Each entry point is a leaf the launcher driver calls once during startup:
//!
//! | Step                     | Entry point                                   |
//! |--------------------------|-----------------------------------------------|
//! | bring up the UI layer    | [`WindowSystem::init_window_system`]          |
//! | show a fatal error       | [`WindowSystem::display_message`]             |
//! | load the VM              | [`load_library`]                              |
//! | find `JNI_CreateJavaVM`  | [`find_symbol`]                               |
//! | release the VM           | [`unload_library`]                            |
//! | follow links             | [`resolve_symlinks`]                          |
//! | first-run config         | [`copy_config_file`]                          |
//!
//! The launcher-facing functions keep sentinel results (`None`, `false`) and
//! report failures as diagnostics; the `try_*` forms return [`ShimError`].

pub mod config_copy;
pub mod error;
pub mod library;
pub mod logging;
pub mod message;
pub mod paths;
pub mod platform;
pub mod settings;
pub mod window;

pub use config_copy::{copy_config_file, try_copy_config_file};
pub use error::{Result, ShimError};
pub use library::{
    find_symbol, load_library, plan_load, try_load_library, unload_library, LibraryHandle,
    LoadPlan,
};
pub use message::{split_message, AlertText};
pub use paths::{program_dir, resolve_symlinks};
pub use window::{WindowBackend, WindowSystem};
