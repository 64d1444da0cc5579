use std::env;
use std::path::Path;
use std::process::Command;

const BUILD_ID: &str = "FATURA_BUILD_SHA";

/// `git describe` of the workspace, e.g. `3f2a9c1-dirty`.
fn describe(workspace: &Path) -> Option<String> {
    let out = Command::new("git")
        .arg("-C")
        .arg(workspace)
        .args(["describe", "--always", "--dirty", "--abbrev=8"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let id = String::from_utf8(out.stdout).ok()?.trim().to_owned();
    (!id.is_empty()).then_some(id)
}

fn main() {
    println!("cargo:rerun-if-env-changed={BUILD_ID}");

    let manifest = env::var_os("CARGO_MANIFEST_DIR").unwrap_or_default();
    let workspace = Path::new(&manifest).join("..");
    let head = workspace.join(".git").join("HEAD");
    if head.exists() {
        println!("cargo:rerun-if-changed={}", head.display());
    }

    // Tarball builds have no .git; packagers pass the id in instead.
    let id = env::var(BUILD_ID)
        .ok()
        .filter(|v| !v.is_empty())
        .or_else(|| describe(&workspace))
        .unwrap_or_else(|| "unknown".to_owned());

    println!("cargo:rustc-env={BUILD_ID}={id}");
}
