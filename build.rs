/// bootshim build script.
///
/// Validates the target.  The shim's real backend is macOS; other Unix hosts
/// build the console fallback so the driver and tests stay portable.
fn main() {
    // Hard gate: dlopen and the unix path APIs are required.  Fail loudly on
    // any other target rather than silently producing a broken binary.
    let target_family = std::env::var("CARGO_CFG_TARGET_FAMILY").unwrap_or_default();
    if !target_family.split(',').any(|f| f == "unix") {
        panic!(
            "bootshim only builds for Unix targets \
             (CARGO_CFG_TARGET_FAMILY = {target_family:?})"
        );
    }

    // Only re-run the build script when it changes.
    println!("cargo:rerun-if-changed=build.rs");
}
