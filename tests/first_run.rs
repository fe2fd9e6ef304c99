// End-to-end startup sequences through the public API, the way a launcher
// driver strings the shim's primitives together.

use std::{
    fs,
    path::{Path, PathBuf},
};

use bootshim::{
    copy_config_file, plan_load, resolve_symlinks, settings, AlertText, LoadPlan, Result,
    WindowBackend, WindowSystem,
};

/// Counts activations and keeps every alert it is asked to show.
#[derive(Default)]
struct Headless {
    activations: usize,
    alerts: Vec<(String, AlertText)>,
}

impl WindowBackend for Headless {
    fn activate(&mut self) -> Result<()> {
        self.activations += 1;
        Ok(())
    }

    fn run_alert(&mut self, title: &str, text: &AlertText) -> Result<()> {
        self.alerts.push((title.to_owned(), text.clone()));
        Ok(())
    }
}

/// `<root>/Apps/MyApp.app` with a launcher binary, a bundled config and a
/// settings file; returns the MacOS dir.
fn install_app(root: &Path, settings_json: &str) -> PathBuf {
    let macos = root.join("Apps/MyApp.app/Contents/MacOS");
    let resources = root.join("Apps/MyApp.app/Contents/Resources");
    fs::create_dir_all(&macos).expect("mkdir MacOS");
    fs::create_dir_all(&resources).expect("mkdir Resources");
    fs::write(macos.join("launcher"), "#!/bin/sh\n").expect("write launcher");
    fs::write(resources.join("config.ini"), "osgi.bundles=core@start\n").expect("write config");
    fs::write(macos.join(settings::SETTINGS_FILE_NAME), settings_json).expect("write settings");
    macos
}

#[test]
fn launcher_started_through_symlink_installs_config() {
    let root = tempfile::tempdir().expect("tempdir");
    let dest_dir = root.path().join("home/app_workspace");
    let macos = install_app(
        root.path(),
        &serde_json::json!({
            "version": 1,
            "config_destination": dest_dir,
            "show_splash": false,
        })
        .to_string(),
    );

    // The user launches through a link on their desktop.
    let link = root.path().join("Desktop-launcher");
    std::os::unix::fs::symlink(macos.join("launcher"), &link).expect("symlink");

    let exe = resolve_symlinks(Some(&link)).expect("resolved");
    let program_dir = exe.parent().expect("parent").to_path_buf();
    assert_eq!(program_dir, fs::canonicalize(&macos).expect("canonicalize"));

    let s = settings::load(&program_dir).expect("settings");
    assert!(!s.show_splash);
    let dest = s.config_destination.as_deref().expect("destination");

    assert!(copy_config_file(&program_dir, &s.config_source, dest));
    assert_eq!(
        fs::read_to_string(dest_dir.join("config.ini")).expect("read"),
        "osgi.bundles=core@start\n"
    );

    // Second run overwrites rather than failing on the existing file.
    fs::write(dest_dir.join("config.ini"), "user edits\n").expect("edit");
    assert!(copy_config_file(&program_dir, &s.config_source, dest));
    assert_eq!(
        fs::read_to_string(dest_dir.join("config.ini")).expect("read"),
        "osgi.bundles=core@start\n"
    );
}

#[test]
fn fatal_error_path_activates_once_and_splits_message() {
    let mut window = WindowSystem::with_backend(Headless::default());

    window.init_window_system(true, None);
    assert!(window.is_initialized());

    window.display_message("Launcher", "Failed to start JVM. Check your Java installation.");
    window.display_message("Launcher", "Second failure");

    let backend = window.backend();
    assert_eq!(backend.activations, 1);
    assert_eq!(backend.alerts.len(), 2);
    assert_eq!(backend.alerts[0].1.primary, "Failed to start JVM.");
    assert_eq!(
        backend.alerts[0].1.secondary.as_deref(),
        Some("Check your Java installation.")
    );
    assert_eq!(backend.alerts[1].1.primary, "Second failure");
    assert_eq!(backend.alerts[1].1.secondary, None);
}

#[test]
fn vm_search_results_map_to_load_plans() {
    let jdk = "/Library/Java/JavaVirtualMachines/temurin-21.jdk";

    assert_eq!(plan_load(Path::new(jdk)), LoadPlan::Bundle(PathBuf::from(jdk)));

    let embedded = format!("{jdk}/Contents/Home/lib/server/libjvm.dylib");
    assert_eq!(
        plan_load(Path::new(&embedded)),
        LoadPlan::EmbeddedRuntime {
            bundle: PathBuf::from(jdk),
            library: PathBuf::from(&embedded),
        }
    );

    let jli = format!("{jdk}/Contents/Home/lib/libjli.dylib");
    assert_eq!(plan_load(Path::new(&jli)), LoadPlan::Dynamic(PathBuf::from(&jli)));
}
