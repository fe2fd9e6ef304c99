// ── Platform abstraction layer ────────────────────────────────────────────────
//
// This module selects the OS backend that the rest of the crate talks to.  No
// `unsafe` lives here; all framework FFI is confined to the `macos` sub-module
// and never leaks outward.  Other hosts get the `fallback` backend so the
// launcher driver and the test suite build everywhere.
//
// Both backends export the same three items:
//   • `NativeBackend` : a `window::WindowBackend` implementation
//   • `RuntimeBundle` : an owned, loaded runtime bundle
//   • `resolve_alias` : Finder-alias resolution

#[cfg(target_os = "macos")]
pub mod macos;
#[cfg(target_os = "macos")]
pub use macos::{resolve_alias, CocoaBackend as NativeBackend, RuntimeBundle};

#[cfg(not(target_os = "macos"))]
pub mod fallback;
#[cfg(not(target_os = "macos"))]
pub use fallback::{resolve_alias, ConsoleBackend as NativeBackend, RuntimeBundle};
