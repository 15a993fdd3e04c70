use anyhow::Context;
use std::process::Command;

/// Command re-executing the current program image with the current
/// argument vector.
pub fn relaunch_command() -> anyhow::Result<Command> {
    let exe = std::env::current_exe().context("locating current executable")?;
    let mut cmd = Command::new(exe);
    cmd.args(std::env::args_os().skip(1));
    Ok(cmd)
}

/// Spawn a fresh copy of this process. The caller is expected to exit
/// afterwards.
pub fn relaunch() -> anyhow::Result<()> {
    let child = relaunch_command()?
        .spawn()
        .context("spawning replacement process")?;
    tracing::info!(pid = child.id(), "relaunched overlay");
    Ok(())
}
