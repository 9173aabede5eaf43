use std::process::Command;

/// Short hash of the checked-out commit, if this is a git checkout.
fn git_short_hash() -> Option<String> {
    let out = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    out.status
        .success()
        .then(|| String::from_utf8_lossy(&out.stdout).trim().to_string())
        .filter(|hash| !hash.is_empty())
}

fn main() {
    let version = std::env::var("FOLIO_VERSION")
        .or_else(|_| std::env::var("CARGO_PKG_VERSION"))
        .unwrap_or_default();
    let commit = std::env::var("FOLIO_COMMIT")
        .ok()
        .or_else(git_short_hash)
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=FOLIO_VERSION={version}");
    println!("cargo:rustc-env=FOLIO_COMMIT={commit}");
    for var in ["FOLIO_VERSION", "FOLIO_COMMIT"] {
        println!("cargo:rerun-if-env-changed={var}");
    }
    println!("cargo:rerun-if-changed=.git/HEAD");
}
