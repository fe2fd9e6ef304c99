// ── Window system bootstrap ───────────────────────────────────────────────────
//
// `WindowSystem` replaces the native launcher's process-wide "initialized"
// global: the driver owns one value and passes it by `&mut`, so the one-time
// activation cannot be repeated or raced without the caller noticing.
//
// The OS side sits behind `WindowBackend` so the sequencing rules below can be
// exercised with a recording double.  Every backend call returns a `Result`;
// the launcher-facing methods log and discard failures (best-effort startup),
// `try_activate` hands them back.

use std::path::Path;

use tracing::{debug, warn};

use crate::{
    error::Result,
    message::{split_message, AlertText},
    platform::NativeBackend,
};

// ── Backend seam ──────────────────────────────────────────────────────────────

/// The OS calls needed to bring up a UI-capable process and show an alert.
pub trait WindowBackend {
    /// Promote the process to a foreground application and make sure the
    /// application object exists.
    fn activate(&mut self) -> Result<()>;

    /// Present a critical, application-modal alert and block until the user
    /// dismisses it.
    fn run_alert(&mut self, title: &str, text: &AlertText) -> Result<()>;
}

// ── WindowSystem ──────────────────────────────────────────────────────────────

/// Initialization state for the launcher's UI layer.
pub struct WindowSystem<B: WindowBackend = NativeBackend> {
    backend: B,
    initialized: bool,
}

impl WindowSystem<NativeBackend> {
    /// A window system backed by the host's native UI toolkit.
    pub fn native() -> Self {
        Self::with_backend(NativeBackend::default())
    }
}

impl Default for WindowSystem<NativeBackend> {
    fn default() -> Self {
        Self::native()
    }
}

impl<B: WindowBackend> WindowSystem<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            initialized: false,
        }
    }

    /// Whether the one-time activation has already run.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Move into the launcher's install directory and, when a splash screen
    /// will be shown, activate the process as a UI application.
    ///
    /// Never fails: a bad `program_dir` or a refused activation is logged and
    /// startup carries on.
    pub fn init_window_system(&mut self, show_splash: bool, program_dir: Option<&Path>) {
        if let Some(dir) = program_dir {
            debug!(dir = %dir.display(), "install dir");
            if let Err(e) = std::env::set_current_dir(dir) {
                debug!(dir = %dir.display(), error = %e, "could not change to install dir");
            }
        }

        if show_splash {
            self.ensure_initialized();
        }
    }

    /// Run the one-time activation and report what the OS said.
    ///
    /// The flag is set before the backend is called, so a failed activation
    /// is not retried on the next request.  Returns `Ok(())` without touching
    /// the backend when already initialized.
    pub fn try_activate(&mut self) -> Result<()> {
        if self.initialized {
            return Ok(());
        }
        self.initialized = true;
        self.backend.activate()
    }

    /// Show `message` in a blocking critical alert titled `title`.
    ///
    /// The message is split at its first `". "` into a headline and an
    /// informative line (see [`split_message`]).  Activates the window system
    /// first if nobody has yet.
    pub fn display_message(&mut self, title: &str, message: &str) {
        let text = split_message(message);
        self.ensure_initialized();
        if let Err(e) = self.backend.run_alert(title, &text) {
            warn!(error = %e, "could not present alert");
        }
    }

    fn ensure_initialized(&mut self) {
        if let Err(e) = self.try_activate() {
            debug!(error = %e, "window system activation failed; continuing");
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
