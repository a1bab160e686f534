//! Repositories for exercising git timeouts

use nix::sys::stat::Mode;
use nix::unistd::mkfifo;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

/// A repository whose `HEAD` is a FIFO with no writer, so git blocks as soon
/// as it tries to read it.
pub fn blocking_repo() -> TempDir {
    let temp = TempDir::new().unwrap();
    let status = Command::new("git")
        .args(["init", "--quiet"])
        .current_dir(temp.path())
        .status()
        .unwrap();
    assert!(status.success());

    let head = temp.path().join(".git").join("HEAD");
    fs::remove_file(&head).unwrap();
    mkfifo(&head, Mode::S_IRWXU).unwrap();
    temp
}
