//! The 1 Hz sample-and-render cycle.
//!
//! [`RepeatingTask`] is a cooperative, non-reentrant timer that the UI loop
//! polls; it re-arms only after a tick finishes, so the cadence drifts by the
//! time spent inside each tick.

use crate::hotkey::Hotkey;
use crate::metrics::{MetricsProvider, MetricsSnapshot};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// Waiting for the deadline.
    Scheduled { due: Instant },
    /// A tick is executing.
    Running,
}

#[derive(Debug, Clone)]
pub struct RepeatingTask {
    interval: Duration,
    state: TaskState,
}

impl RepeatingTask {
    /// A task whose first tick is due immediately.
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            state: TaskState::Scheduled { due: now },
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    pub fn is_due(&self, now: Instant) -> bool {
        matches!(self.state, TaskState::Scheduled { due } if now >= due)
    }

    /// Time left until the next tick; zero when due or running.
    pub fn time_until_due(&self, now: Instant) -> Duration {
        match self.state {
            TaskState::Scheduled { due } => due.saturating_duration_since(now),
            TaskState::Running => Duration::ZERO,
        }
    }

    /// Enter the running state. Returns `false` when the tick is not yet due
    /// or one is already running.
    pub fn begin(&mut self, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.state = TaskState::Running;
        true
    }

    /// Leave the running state and arm the next tick `interval` after `now`.
    pub fn finish(&mut self, now: Instant) {
        self.state = TaskState::Scheduled {
            due: now + self.interval,
        };
    }

    /// Run `tick` if due. Returns its output when it ran.
    pub fn run_if_due<T>(&mut self, clock: impl Fn() -> Instant, tick: impl FnOnce() -> T) -> Option<T> {
        if !self.begin(clock()) {
            return None;
        }
        let out = tick();
        self.finish(clock());
        Some(out)
    }
}

/// Render a snapshot into the fixed multi-line overlay text.
pub fn format_label(snapshot: &MetricsSnapshot, hotkey: &Hotkey) -> String {
    let mut text = format!(
        "⚡ CPU: {:.1}% ({})\n🎮 GPU: {}\n💾 RAM: {:.1}%\n🌐 Ping: {}\n",
        snapshot.cpu_percent, snapshot.cpu_temp, snapshot.gpu_temp, snapshot.ram_percent, snapshot.ping
    );
    if let Some(song) = &snapshot.now_playing {
        text.push_str(&format!("🎵 Music: {song}\n"));
    }
    text.push_str(&format!("[{hotkey} Hide/Show]"));
    text
}

/// Samples metrics once per interval and keeps the latest label text.
pub struct UpdateLoop {
    task: RepeatingTask,
    provider: MetricsProvider,
    hotkey: Hotkey,
    label: String,
    ticks: u64,
}

impl UpdateLoop {
    pub fn new(provider: MetricsProvider, hotkey: Hotkey, interval: Duration) -> Self {
        Self {
            task: RepeatingTask::new(interval, Instant::now()),
            provider,
            hotkey,
            label: String::new(),
            ticks: 0,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn time_until_due(&self) -> Duration {
        self.task.time_until_due(Instant::now())
    }

    /// Run a tick if one is due. Sampling is synchronous and runs to
    /// completion. Returns `true` when the label was rewritten.
    pub fn poll(&mut self) -> bool {
        let provider = &mut self.provider;
        let hotkey = &self.hotkey;
        match self
            .task
            .run_if_due(Instant::now, || format_label(&provider.sample(), hotkey))
        {
            Some(label) => {
                self.label = label;
                self.ticks += 1;
                true
            }
            None => false,
        }
    }
}
