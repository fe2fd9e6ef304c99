// ── Cocoa application bootstrap ───────────────────────────────────────────────
//
// Responsibilities in this file (unsafe confined here):
//   • Create the shared NSApplication and promote the process to a regular,
//     foreground application (the launcher starts as a plain Unix process).
//   • Present a critical NSAlert and run it modally.
//
// AppKit is main-thread only.  Both entry points check for a
// `MainThreadMarker` and report `ShimError::NotMainThread` instead of
// touching AppKit from the wrong thread.

#![allow(unsafe_code)]

use objc2::rc::autoreleasepool;
use objc2_app_kit::{NSAlert, NSAlertStyle, NSApplication, NSApplicationActivationPolicy};
use objc2_foundation::{MainThreadMarker, NSString};

use crate::{
    error::{Result, ShimError},
    message::AlertText,
    window::WindowBackend,
};

/// `WindowBackend` backed by AppKit.
#[derive(Debug, Default)]
pub struct CocoaBackend;

fn main_thread() -> Result<MainThreadMarker> {
    MainThreadMarker::new().ok_or(ShimError::NotMainThread)
}

impl WindowBackend for CocoaBackend {
    fn activate(&mut self) -> Result<()> {
        let mtm = main_thread()?;
        let app = NSApplication::sharedApplication(mtm);

        // SAFETY: `app` is the live shared application and we are on the
        // main thread (proved by `mtm`).  Regular is a valid policy for a
        // process with a bundle or a plain executable.
        let promoted = unsafe { app.setActivationPolicy(NSApplicationActivationPolicy::Regular) };

        // SAFETY: same receiver and thread as above; bringing the process to
        // the front has no preconditions beyond that.
        #[allow(deprecated)]
        unsafe {
            app.activateIgnoringOtherApps(true);
        }

        if promoted {
            Ok(())
        } else {
            Err(ShimError::Os {
                function: "NSApplication.setActivationPolicy",
                code: 0,
            })
        }
    }

    fn run_alert(&mut self, title: &str, text: &AlertText) -> Result<()> {
        let mtm = main_thread()?;

        autoreleasepool(|_| {
            // SAFETY: on the main thread (`mtm`).  Every NSString passed in is
            // a freshly created, retained object that outlives the call it is
            // passed to; NSAlert copies its text properties.
            unsafe {
                let alert = NSAlert::new(mtm);
                alert.setMessageText(&NSString::from_str(&text.primary));
                if let Some(informative) = &text.secondary {
                    alert.setInformativeText(&NSString::from_str(informative));
                }
                alert.window().setTitle(&NSString::from_str(title));
                alert.setAlertStyle(NSAlertStyle::Critical);
                // The modal response (which button) is irrelevant for an
                // error alert with a single OK button.
                let _ = alert.runModal();
            }
        });

        Ok(())
    }
}
