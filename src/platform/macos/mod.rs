// ── macOS platform implementation ─────────────────────────────────────────────
//
// This is the only module in the crate where `unsafe` code is permitted.
// Every `unsafe` block MUST carry a `// SAFETY:` comment that states:
//   • which invariant makes the operation sound, and
//   • what the caller is responsible for maintaining.
//
// Some objc2-app-kit setters are `unsafe fn` in one release and safe in the
// next; the blocks stay in place either way.

#![allow(unsafe_code)]
#![allow(unused_unsafe)]

// ── Sub-modules ───────────────────────────────────────────────────────────────

pub mod alias; // Finder alias → target path via bookmark data
pub mod app; // NSApplication activation + NSAlert
pub mod bundle; // CFBundle-backed runtime bundles

pub use alias::resolve_alias;
pub use app::CocoaBackend;
pub use bundle::RuntimeBundle;
