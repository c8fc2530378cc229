use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::{GearError, GearResult};

/// Timing of the simulated upload sequence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulatorConfig {
    pub tick_interval_ms: u64,
    pub progress_step: u8,
    pub progress_cap: u8,
    pub upload_delay_ms: u64,
    pub analysis_delay_ms: u64,
}

impl SimulatorConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn upload_delay(&self) -> Duration {
        Duration::from_millis(self.upload_delay_ms)
    }

    pub fn analysis_delay(&self) -> Duration {
        Duration::from_millis(self.analysis_delay_ms)
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 200,
            progress_step: 10,
            progress_cap: 90,
            upload_delay_ms: 3000,
            analysis_delay_ms: 2000,
        }
    }
}

/// Constants used to fabricate the analysis verdict.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    pub healthy_percent: u32,
    pub sensor_channels: u8,
    pub healthy_avg_vibration: f64,
    pub healthy_status: String,
    pub faulty_avg_vibration: f64,
    pub faulty_status: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            healthy_percent: 60,
            sensor_channels: 4,
            healthy_avg_vibration: 2.1,
            healthy_status: "Normal Operation".to_string(),
            faulty_avg_vibration: 5.8,
            faulty_status: "Broken Tooth Detected".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatasetConfig {
    pub accepted_extensions: Vec<String>,
    pub sample_url: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            accepted_extensions: vec!["csv".to_string(), "xlsx".to_string(), "json".to_string()],
            sample_url:
                "https://drive.google.com/file/d/1nNNnjMPntlo5X0t_cif7cmlJhikCyWyP/view?usp=sharing"
                    .to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub log_file: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_file: "gear-dash.log".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    pub refresh_ms: u64,
    pub notification_secs: u64,
    pub maintenance_horizon_days: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_ms: 100,
            notification_secs: 5,
            maintenance_horizon_days: 180,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    pub simulator: SimulatorConfig,
    pub analysis: AnalysisConfig,
    pub dataset: DatasetConfig,
    pub observability: ObservabilityConfig,
    pub ui: UiConfig,
}

impl DashboardConfig {
    /// Reject settings the dashboard cannot run with. The healthy share is
    /// left alone; an out-of-range value fails the analysis instead.
    pub fn validate(&self) -> GearResult<()> {
        if self.simulator.progress_cap > 100 {
            return Err(GearError::ConfigError(format!(
                "simulator.progress_cap must be at most 100, got {}",
                self.simulator.progress_cap
            )));
        }
        if self.ui.refresh_ms == 0 {
            return Err(GearError::ConfigError("ui.refresh_ms must be positive".to_string()));
        }
        if self.dataset.accepted_extensions.is_empty() {
            return Err(GearError::ConfigError(
                "dataset.accepted_extensions must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "simulator:\n  upload_delay_ms: 500\nanalysis:\n  healthy_percent: 75\n";
        let config: DashboardConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.simulator.upload_delay(), Duration::from_millis(500));
        assert_eq!(config.simulator.tick_interval(), Duration::from_millis(200));
        assert_eq!(config.analysis.healthy_percent, 75);
        assert_eq!(config.analysis.faulty_status, "Broken Tooth Detected");
        assert_eq!(config.ui, UiConfig::default());
    }

    #[test]
    fn test_validate() {
        assert!(DashboardConfig::default().validate().is_ok());

        let mut config = DashboardConfig::default();
        config.simulator.progress_cap = 120;
        assert!(matches!(config.validate(), Err(GearError::ConfigError(_))));

        let mut config = DashboardConfig::default();
        config.ui.refresh_ms = 0;
        assert!(config.validate().is_err());

        // Out-of-range healthy share is a runtime analysis failure, not a config error.
        let mut config = DashboardConfig::default();
        config.analysis.healthy_percent = 150;
        assert!(config.validate().is_ok());
    }
}
