use std::env;
use std::process::Command;

/// Embed build metadata shown by `breeze version`
fn main() {
    let built_at = chrono::Utc::now().format("%Y-%m-%d").to_string();
    println!("cargo:rustc-env=BREEZE_BUILD_DATE={}", built_at);

    let target = env::var("TARGET").unwrap_or_else(|_| "unknown".to_string());
    println!("cargo:rustc-env=BREEZE_BUILD_TARGET={}", target);

    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let rustc_version = Command::new(rustc)
        .arg("--version")
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=BREEZE_RUSTC_VERSION={}", rustc_version);

    println!("cargo:rerun-if-changed=build.rs");
}
