//! Process liveness probing
//!
//! Liveness is a platform capability, so callers depend on [`ProcessProbe`]
//! rather than on a specific syscall. [`SignalProbe`] is the Unix
//! implementation.

use nix::errno::Errno;
use nix::sys::signal::kill;
use nix::unistd::Pid;

/// Capability: "is there a process with this pid right now?"
pub trait ProcessProbe: Sync {
    fn is_alive(&self, pid: u32) -> bool;
}

/// Zero-signal existence probe (`kill(pid, 0)`); nothing is delivered.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalProbe;

impl ProcessProbe for SignalProbe {
    fn is_alive(&self, pid: u32) -> bool {
        is_process_alive(pid)
    }
}

/// Check if a process with the given PID is alive
///
/// `EPERM` means the process exists but belongs to someone else, so it counts
/// as alive. `ESRCH` and any other error count as dead. Pids above `i32::MAX`
/// cannot name a process and are reported dead.
pub fn is_process_alive(pid: u32) -> bool {
    let Ok(raw) = i32::try_from(pid) else {
        return false;
    };

    match kill(Pid::from_raw(raw), None) {
        Ok(()) => true,
        Err(Errno::EPERM) => true,
        Err(Errno::ESRCH) => false,
        Err(_) => false,
    }
}
