use std::path::Path;
use std::process::Command;

/// Stamps `PIKA_BUILD_SHA` for `pika --version`: an explicit `PIKA_BUILD_SHA`
/// from the environment (release tarballs have no `.git`), else the short
/// commit of the workspace, suffixed `-dirty` when the tree has local edits.
fn main() {
    let stamp = std::env::var("PIKA_BUILD_SHA")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .or_else(git_stamp)
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=PIKA_BUILD_SHA={stamp}");
}

fn git_stamp() -> Option<String> {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").ok()?;
    let workspace = Path::new(&manifest_dir).parent()?;

    let sha = git(workspace, &["rev-parse", "--short", "HEAD"]).filter(|s| !s.is_empty())?;
    let dirty = git(workspace, &["status", "--porcelain", "--untracked-files=no"])
        .is_some_and(|out| !out.is_empty());

    Some(if dirty { format!("{sha}-dirty") } else { sha })
}

/// Trimmed stdout of a successful git call.
fn git(dir: &Path, args: &[&str]) -> Option<String> {
    let out = Command::new("git").arg("-C").arg(dir).args(args).output().ok()?;
    if !out.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&out.stdout).trim().to_string())
}
