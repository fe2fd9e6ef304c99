// Reference launcher driver: runs the shim's startup steps in the order a
// native launcher does and reports a fatal failure through the alert path.

use std::path::PathBuf;

use bootshim::{
    copy_config_file, load_library, logging, paths, settings, unload_library, WindowSystem,
};
use tracing::info;

const ALERT_TITLE: &str = "Launcher";

fn main() {
    logging::init();

    let program_dir = paths::program_dir();
    let settings = program_dir
        .as_deref()
        .and_then(settings::load)
        .unwrap_or_default();

    let mut window = WindowSystem::native();
    window.init_window_system(settings.show_splash, program_dir.as_deref());

    if let Err(message) = run(program_dir, &settings) {
        // Startup failed: the alert is the only output a GUI user sees.
        window.display_message(ALERT_TITLE, &message);
        std::process::exit(1);
    }
}

fn run(program_dir: Option<PathBuf>, settings: &settings::LauncherSettings) -> Result<(), String> {
    let program_dir = program_dir
        .ok_or_else(|| "Cannot determine the install directory.".to_owned())?;

    if let Some(dest) = &settings.config_destination {
        if !copy_config_file(&program_dir, &settings.config_source, dest) {
            return Err(format!(
                "Could not install the default configuration. See the console output for {}.",
                dest.display()
            ));
        }
    }

    if let Some(runtime) = &settings.runtime_library {
        let runtime = paths::resolve_symlinks(Some(runtime.as_path())).unwrap_or_else(|| runtime.clone());
        let handle = load_library(&runtime).ok_or_else(|| {
            format!("Failed to load the runtime library. Tried {}.", runtime.display())
        })?;
        let found = handle.find_symbol(&settings.runtime_entry_point).is_some();
        info!(
            runtime = %runtime.display(),
            bundle = ?handle.bundle_path(),
            symbol = %settings.runtime_entry_point,
            found,
            "runtime probed"
        );
        unload_library(handle);
        if !found {
            return Err(format!(
                "The runtime library does not export {}. Check your Java installation.",
                settings.runtime_entry_point
            ));
        }
    }

    Ok(())
}
