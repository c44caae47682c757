use std::{path::Path, process::Command};

/// `git describe` of the checkout, e.g. `3f2a9c1d` or `3f2a9c1d-dirty`.
fn describe(repo: &Path) -> Option<String> {
    let out = Command::new("git")
        .arg("-C")
        .arg(repo)
        .args(["describe", "--always", "--dirty", "--abbrev=8", "--exclude=*"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let version = String::from_utf8(out.stdout).ok()?;
    let version = version.trim();
    (!version.is_empty()).then(|| version.to_string())
}

fn main() {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let repo = Path::new(&manifest_dir).join("..");

    let version = describe(&repo).unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=TRILEMMA_BUILD_SHA={}", version);

    for watched in [".git/HEAD", ".git/index"] {
        let path = repo.join(watched);
        if path.exists() {
            println!("cargo:rerun-if-changed={}", path.display());
        }
    }
}
