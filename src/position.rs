use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-left screen coordinate of the overlay. Coordinates may be negative on
/// multi-monitor setups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowPosition {
    pub x: i32,
    pub y: i32,
}

impl WindowPosition {
    pub const DEFAULT: WindowPosition = WindowPosition { x: 20, y: 40 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl Default for WindowPosition {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<(i32, i32)> for WindowPosition {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Read a position from a JSON object with integer `x` and `y` members.
/// Arrays, floats and strings are rejected.
fn parse_position(content: &str) -> anyhow::Result<WindowPosition> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    let obj = value
        .as_object()
        .ok_or_else(|| anyhow::anyhow!("expected a JSON object"))?;
    let coord = |name: &str| -> anyhow::Result<i32> {
        let v = obj
            .get(name)
            .and_then(serde_json::Value::as_i64)
            .ok_or_else(|| anyhow::anyhow!("missing integer `{name}`"))?;
        Ok(i32::try_from(v)?)
    };
    Ok(WindowPosition::new(coord("x")?, coord("y")?))
}

/// Persists the overlay position as `{"x": <int>, "y": <int>}`.
#[derive(Debug, Clone)]
pub struct PositionStore {
    path: PathBuf,
}

impl PositionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the persisted position, or [`WindowPosition::DEFAULT`] when the
    /// file is missing or does not hold integer `x`/`y` fields.
    pub fn load(&self) -> WindowPosition {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %self.path.display(), "failed to read position: {e}");
                }
                return WindowPosition::DEFAULT;
            }
        };
        match parse_position(&content) {
            Ok(pos) => {
                tracing::debug!(x = pos.x, y = pos.y, "restored window position");
                pos
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "invalid position file: {e:#}");
                WindowPosition::DEFAULT
            }
        }
    }

    /// Overwrite the backing file with a single synchronous write.
    pub fn save(&self, x: i32, y: i32) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string(&WindowPosition { x, y })?;
        std::fs::write(&self.path, json)?;
        tracing::debug!(x, y, "saved window position");
        Ok(())
    }
}
