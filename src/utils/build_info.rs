//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// One-line version string for `--version`. Non-release builds carry their profile.
pub fn version_line() -> String {
    let base = format!(
        "code-runner {} {} ({})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    );
    if BUILD_PROFILE == "release" {
        base
    } else {
        format!("{} [{}]", base, BUILD_PROFILE)
    }
}
