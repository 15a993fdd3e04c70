use super::{SensorError, UNAVAILABLE};

/// Sensor groups consulted for each metric, most preferred first.
pub const CPU_GROUPS: &[&str] = &["cpu_thermal", "coretemp"];
pub const GPU_GROUPS: &[&str] = &["gpu", "amdgpu"];

/// One temperature sensor, grouped by the driver that exposes it
/// (`coretemp`, `amdgpu`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    pub group: String,
    pub label: String,
    pub celsius: f32,
}

impl SensorReading {
    /// Build a reading from a combined label such as `"coretemp Package id 0"`,
    /// whose first word names the driver.
    pub fn from_label(label: &str, celsius: f32) -> Self {
        let label = label.trim();
        let (group, rest) = label.split_once(' ').unwrap_or((label, ""));
        Self {
            group: group.to_ascii_lowercase(),
            label: rest.trim().to_string(),
            celsius,
        }
    }
}

pub trait TemperatureSource: Send {
    fn readings(&self) -> Result<Vec<SensorReading>, SensorError>;
}

/// Sensor readings of one sample, queried by group priority.
#[derive(Debug, Default)]
pub struct TemperatureTable {
    readings: Vec<SensorReading>,
}

impl TemperatureTable {
    pub fn new(readings: Vec<SensorReading>) -> Self {
        Self { readings }
    }

    /// First valid reading of the first group in `groups` that has one.
    pub fn lookup(&self, groups: &[&str]) -> Option<f32> {
        groups.iter().find_map(|group| {
            self.readings
                .iter()
                .find(|r| r.group.eq_ignore_ascii_case(group) && r.celsius.is_finite())
                .map(|r| r.celsius)
        })
    }

    pub fn cpu(&self) -> Option<f32> {
        self.lookup(CPU_GROUPS)
    }

    pub fn gpu(&self) -> Option<f32> {
        self.lookup(GPU_GROUPS)
    }
}

/// Whole degrees, halves rounded to even.
pub fn format_temperature(celsius: Option<f32>) -> String {
    match celsius {
        Some(c) if c.is_finite() => format!("{}°C", c.round_ties_even() as i32),
        _ => UNAVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(group: &str, celsius: f32) -> SensorReading {
        SensorReading {
            group: group.into(),
            label: String::new(),
            celsius,
        }
    }

    #[test]
    fn preferred_group_wins() {
        let table = TemperatureTable::new(vec![
            reading("coretemp", 55.0),
            reading("cpu_thermal", 48.2),
            reading("amdgpu", 61.0),
        ]);
        assert_eq!(format_temperature(table.cpu()), "48°C");
        assert_eq!(format_temperature(table.gpu()), "61°C");
    }

    #[test]
    fn first_reading_of_group_is_used() {
        let table = TemperatureTable::new(vec![
            reading("coretemp", 41.6),
            reading("coretemp", 70.0),
        ]);
        assert_eq!(format_temperature(table.cpu()), "42°C");
    }

    #[test]
    fn unknown_groups_are_unavailable() {
        let table = TemperatureTable::new(vec![reading("nvme", 39.0), reading("acpitz", 27.8)]);
        assert_eq!(format_temperature(table.cpu()), "N/A");
        assert_eq!(format_temperature(table.gpu()), "N/A");
    }

    #[test]
    fn label_splits_into_group() {
        let r = SensorReading::from_label("coretemp Package id 0", 50.0);
        assert_eq!(r.group, "coretemp");
        assert_eq!(r.label, "Package id 0");
        let bare = SensorReading::from_label("cpu_thermal", 45.0);
        assert_eq!(bare.group, "cpu_thermal");
        assert!(bare.label.is_empty());
    }

    #[test]
    fn halves_round_to_even() {
        assert_eq!(format_temperature(Some(42.5)), "42°C");
        assert_eq!(format_temperature(Some(43.5)), "44°C");
        assert_eq!(format_temperature(Some(42.51)), "43°C");
        assert_eq!(format_temperature(Some(-0.5)), "0°C");
    }
}
