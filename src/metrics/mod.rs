//! Best-effort system metrics for the overlay.
//!
//! Every field of a [`MetricsSnapshot`] comes from its own source and degrades
//! to a sentinel on failure; one failing source never affects the others.

pub mod now_playing;
pub mod ping;
pub mod system;
pub mod temperature;

use std::time::Duration;
use thiserror::Error;

pub use now_playing::{pick_now_playing, AudioSession, NowPlayingSource, SystemAudioSessions};
pub use ping::{format_ping, CommandPinger, Pinger};
pub use system::{SysinfoSensors, SysinfoUsage, UsageSource};
pub use temperature::{format_temperature, SensorReading, TemperatureSource, TemperatureTable};

/// Placeholder shown for any metric that could not be read.
pub const UNAVAILABLE: &str = "N/A";
/// Placeholder shown when no audio session qualifies as "now playing".
pub const NOTHING_PLAYING: &str = "None";

#[derive(Debug, Error)]
pub enum SensorError {
    #[error("{0} is unavailable")]
    Unavailable(&'static str),
    #[error("{0} is not supported on this platform")]
    Unsupported(&'static str),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse {what}: {detail}")]
    Parse { what: &'static str, detail: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSnapshot {
    pub cpu_percent: f32,
    pub ram_percent: f32,
    pub cpu_temp: String,
    pub gpu_temp: String,
    pub ping: String,
    /// `None` when now-playing display is disabled.
    pub now_playing: Option<String>,
}

/// Where ping probes go and how long to wait for a reply.
#[derive(Debug, Clone)]
pub struct PingTarget {
    pub host: String,
    pub timeout: Duration,
}

impl Default for PingTarget {
    fn default() -> Self {
        Self {
            host: "8.8.8.8".into(),
            timeout: Duration::from_secs(1),
        }
    }
}

/// Combines the individual metric sources into snapshots.
pub struct MetricsProvider {
    usage: Box<dyn UsageSource>,
    sensors: Box<dyn TemperatureSource>,
    pinger: Box<dyn Pinger>,
    now_playing: Option<Box<dyn NowPlayingSource>>,
    target: PingTarget,
}

impl MetricsProvider {
    pub fn new(
        usage: Box<dyn UsageSource>,
        sensors: Box<dyn TemperatureSource>,
        pinger: Box<dyn Pinger>,
        target: PingTarget,
    ) -> Self {
        Self {
            usage,
            sensors,
            pinger,
            now_playing: None,
            target,
        }
    }

    pub fn with_now_playing(mut self, source: Box<dyn NowPlayingSource>) -> Self {
        self.now_playing = Some(source);
        self
    }

    /// Provider backed by the real OS sources.
    pub fn system(target: PingTarget, show_now_playing: bool) -> Self {
        let provider = Self::new(
            Box::new(SysinfoUsage::new()),
            Box::new(SysinfoSensors),
            Box::new(CommandPinger),
            target,
        );
        if show_now_playing {
            provider.with_now_playing(Box::new(SystemAudioSessions))
        } else {
            provider
        }
    }

    /// Query every source once. Never fails; unreadable fields hold their
    /// sentinel.
    pub fn sample(&mut self) -> MetricsSnapshot {
        let cpu_percent = self.usage.cpu_percent().unwrap_or_else(|e| {
            tracing::debug!("cpu usage: {e}");
            0.0
        });
        let ram_percent = self.usage.ram_percent().unwrap_or_else(|e| {
            tracing::debug!("ram usage: {e}");
            0.0
        });

        let (cpu_temp, gpu_temp) = match self.sensors.readings() {
            Ok(readings) => {
                let table = TemperatureTable::new(readings);
                (
                    format_temperature(table.cpu()),
                    format_temperature(table.gpu()),
                )
            }
            Err(e) => {
                tracing::debug!("temperature sensors: {e}");
                (UNAVAILABLE.to_string(), UNAVAILABLE.to_string())
            }
        };

        let ping = match self.pinger.ping(&self.target.host, self.target.timeout) {
            Ok(rtt) => format_ping(rtt),
            Err(e) => {
                tracing::debug!(host = %self.target.host, "ping: {e}");
                UNAVAILABLE.to_string()
            }
        };

        let now_playing = self.now_playing.as_ref().map(|source| match source.sessions() {
            Ok(sessions) => pick_now_playing(&sessions).unwrap_or_else(|| NOTHING_PLAYING.into()),
            Err(e) => {
                tracing::debug!("audio sessions: {e}");
                NOTHING_PLAYING.to_string()
            }
        });

        MetricsSnapshot {
            cpu_percent,
            ram_percent,
            cpu_temp,
            gpu_temp,
            ping,
            now_playing,
        }
    }
}
