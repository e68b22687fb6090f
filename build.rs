use std::process::Command;

/// Run a git command, falling back to "unknown" outside a checkout.
fn git(args: &[&str]) -> String {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn main() {
    // Embed the build's git revision for the startup banner
    println!("cargo:rustc-env=GIT_HASH={}", git(&["rev-parse", "--short", "HEAD"]));
    println!("cargo:rustc-env=GIT_DATE={}", git(&["log", "-1", "--format=%ci"]));
    println!("cargo:rerun-if-changed=.git/HEAD");
}
