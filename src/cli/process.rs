use std::{env, path::Path};

use anyhow::Result;
use sysinfo::{get_current_pid, Signal, System};

use super::daemon_path::to_daemon_path;

pub fn kill_previous_servers(name: &Path) {
    let system = System::new_all();
    let current_id = get_current_pid().unwrap();
    for (pid, process) in system.processes().iter() {
        if *pid == current_id {
            continue;
        }
        if matches!(process.parent(), Some(p) if p == current_id) {
            continue;
        }

        if process
            .exe()
            .filter(|v| v.exists())
            .filter(|v| name == *v)
            .is_some()
        {
            // This will forcefully terminate the process on Windows. Anything better will require a
            // lot more work.
            if process.kill_with(Signal::Term).is_none() {
                process.kill();
            }
            process.wait();
        }
    }
}

/// Shuts down any previous reminder daemon and launches a fresh one. The
/// daemon binary detaches itself, so waiting on it only covers the short
/// parent side of the fork.
pub fn restart_server() -> Result<()> {
    // The daemon binary is expected to sit next to the cli executable. It's
    // not the best option but it will do the job in most cases.
    let daemon_path = to_daemon_path(env::current_exe()?);
    kill_previous_servers(&daemon_path);

    let status = std::process::Command::new(&daemon_path).status()?;
    if !status.success() {
        anyhow::bail!("Daemon launcher exited with {status}");
    }
    Ok(())
}
