use super::{SensorError, SensorReading, TemperatureSource};
use sysinfo::{Components, System};

/// CPU and memory utilisation in percent.
pub trait UsageSource: Send {
    fn cpu_percent(&mut self) -> Result<f32, SensorError>;
    fn ram_percent(&mut self) -> Result<f32, SensorError>;
}

/// Usage figures from `sysinfo`.
///
/// CPU usage is the delta between two counter reads, so the handle keeps the
/// previous read; the first call reports `0.0`.
pub struct SysinfoUsage {
    system: System,
}

impl SysinfoUsage {
    pub fn new() -> Self {
        Self {
            system: System::new(),
        }
    }
}

impl Default for SysinfoUsage {
    fn default() -> Self {
        Self::new()
    }
}

impl UsageSource for SysinfoUsage {
    fn cpu_percent(&mut self) -> Result<f32, SensorError> {
        self.system.refresh_cpu_usage();
        let usage = self.system.global_cpu_usage();
        if usage.is_finite() {
            Ok(usage)
        } else {
            Err(SensorError::Unavailable("cpu usage"))
        }
    }

    fn ram_percent(&mut self) -> Result<f32, SensorError> {
        self.system.refresh_memory();
        let total = self.system.total_memory();
        if total == 0 {
            return Err(SensorError::Unavailable("memory usage"));
        }
        let used = self.system.used_memory();
        Ok((used as f64 / total as f64 * 100.0) as f32)
    }
}

/// Temperature sensors enumerated through `sysinfo` components, queried
/// afresh on every call.
pub struct SysinfoSensors;

impl TemperatureSource for SysinfoSensors {
    fn readings(&self) -> Result<Vec<SensorReading>, SensorError> {
        let components = Components::new_with_refreshed_list();
        let readings: Vec<SensorReading> = components
            .list()
            .iter()
            .filter_map(|c| {
                c.temperature()
                    .map(|t| SensorReading::from_label(c.label(), t))
            })
            .collect();
        if readings.is_empty() {
            return Err(SensorError::Unavailable("temperature sensors"));
        }
        Ok(readings)
    }
}
