//! Embeds the commit, build date and cargo profile shown by `code-runner --version`.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

/// Short hash of HEAD, or `None` outside a git checkout.
fn git_short_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?;
    Some(hash.trim().to_string())
}

/// Keeps the first seven hex digits, anything else becomes "unknown".
fn normalize_commit(raw: Option<String>) -> String {
    match raw {
        Some(hash) if hash.len() >= 7 && hash.chars().all(|c| c.is_ascii_hexdigit()) => {
            hash[..7].to_ascii_lowercase()
        }
        _ => "unknown".to_string(),
    }
}

fn build_date() -> String {
    env::var("BUILD_DATE")
        .ok()
        .filter(|date| chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok())
        .unwrap_or_else(|| chrono::Utc::now().date_naive().to_string())
}

fn main() {
    let commit = normalize_commit(env::var("BUILD_COMMIT").ok().or_else(git_short_hash));
    let date = build_date();
    let profile = env::var("PROFILE").unwrap_or_else(|_| "debug".to_string());

    let Some(out_dir) = env::var_os("OUT_DIR") else {
        panic!("OUT_DIR is not set; build.rs must run under cargo");
    };
    let generated = format!(
        "pub const BUILD_COMMIT: &str = {commit:?};\n\
         pub const BUILD_DATE: &str = {date:?};\n\
         pub const BUILD_PROFILE: &str = {profile:?};\n"
    );
    if let Err(err) = fs::write(PathBuf::from(out_dir).join("build_info.rs"), generated) {
        panic!("failed to write build_info.rs: {err}");
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=BUILD_COMMIT");
    println!("cargo:rerun-if-env-changed=BUILD_DATE");
}
