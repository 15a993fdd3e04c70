use super::{SensorError, UNAVAILABLE};
use std::process::{Command, Stdio};
use std::time::Duration;

/// Round-trip probe to a host. `Ok(None)` means the host did not answer
/// within the timeout.
pub trait Pinger: Send {
    fn ping(&self, host: &str, timeout: Duration) -> Result<Option<Duration>, SensorError>;
}

/// Format a round-trip time as whole milliseconds, truncating.
/// A missing or zero round-trip is shown as `N/A`.
pub fn format_ping(rtt: Option<Duration>) -> String {
    match rtt {
        Some(d) if !d.is_zero() => format!("{} ms", d.as_millis()),
        _ => UNAVAILABLE.to_string(),
    }
}

/// Pings through the platform `ping` executable, one echo request per call.
pub struct CommandPinger;

impl CommandPinger {
    fn command(host: &str, timeout: Duration) -> Command {
        let mut cmd = Command::new("ping");
        #[cfg(target_os = "windows")]
        {
            use std::os::windows::process::CommandExt;
            const CREATE_NO_WINDOW: u32 = 0x0800_0000;
            let wait = timeout.as_millis().max(1).to_string();
            cmd.args(["-n", "1", "-w", wait.as_str(), host]);
            cmd.creation_flags(CREATE_NO_WINDOW);
        }
        #[cfg(target_os = "macos")]
        {
            let secs = timeout.as_secs().max(1).to_string();
            cmd.args(["-c", "1", "-t", secs.as_str(), host]);
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        {
            let secs = timeout.as_secs().max(1).to_string();
            cmd.args(["-n", "-c", "1", "-W", secs.as_str(), host]);
        }
        cmd.stdin(Stdio::null()).stderr(Stdio::null());
        cmd
    }
}

impl Pinger for CommandPinger {
    fn ping(&self, host: &str, timeout: Duration) -> Result<Option<Duration>, SensorError> {
        let output = Self::command(host, timeout).output()?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(reply_time(output.status.success(), &stdout))
    }
}

/// Round-trip reported by one `ping` run. Only an explicit reply time
/// counts; `ping` exits successfully on "Destination host unreachable".
fn reply_time(success: bool, stdout: &str) -> Option<Duration> {
    if !success {
        return None;
    }
    let rtt = parse_ping_output(stdout);
    if rtt.is_none() {
        tracing::debug!("no reply time in ping output");
    }
    rtt
}

/// Extract the round-trip time from `ping` output, e.g. `time=12.3 ms`,
/// `time<1ms`, `tiempo=8ms` or `Zeit=23ms`.
pub fn parse_ping_output(output: &str) -> Option<Duration> {
    for line in output.lines() {
        let line = line.to_ascii_lowercase();
        let Some(idx) = ["time", "tiempo", "zeit"].iter().find_map(|k| line.find(k)) else {
            continue;
        };
        let rest = &line[idx..];
        let Some(sep) = rest.find(['=', '<']) else {
            continue;
        };
        let below = rest[sep..].starts_with('<');
        let value: String = rest[sep + 1..]
            .trim_start()
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
            .map(|c| if c == ',' { '.' } else { c })
            .collect();
        let Ok(ms) = value.parse::<f64>() else {
            continue;
        };
        if !rest[sep + 1..].contains("ms") {
            continue;
        }
        let ms = if below { ms / 2.0 } else { ms };
        return Some(Duration::from_micros((ms * 1000.0).round() as u64));
    }
    None
}
