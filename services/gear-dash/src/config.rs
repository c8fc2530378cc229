use anyhow::Result;
use config::{Config, Environment, File};
use gearkit::config::DashboardConfig;

const ENV_PREFIX: &str = "GEAR_DASH";

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Load the dashboard configuration. A missing file falls back to defaults;
/// `GEAR_DASH__SECTION__KEY` environment variables override either.
pub fn load_config(path: &str) -> Result<DashboardConfig> {
    load_config_from(path, environment())
}

pub fn load_config_from(path: &str, env: Environment) -> Result<DashboardConfig> {
    let config = Config::builder()
        .add_source(File::with_name(path).required(false))
        .add_source(env)
        .build()?;

    let dashboard: DashboardConfig = config.try_deserialize()?;
    dashboard.validate()?;
    Ok(dashboard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::Map;
    use std::fs;

    fn env_with(vars: &[(&str, &str)]) -> Environment {
        let map: Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        environment().source(Some(map))
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        let config = load_config(path.to_str().unwrap()).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_yaml_file_overrides_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gear-dash.yaml");
        fs::write(
            &path,
            "simulator:\n  tick_interval_ms: 50\n  upload_delay_ms: 1000\nui:\n  notification_secs: 9\n",
        )
        .unwrap();

        let config = load_config(path.to_str().unwrap()).unwrap();
        assert_eq!(config.simulator.tick_interval_ms, 50);
        assert_eq!(config.simulator.upload_delay_ms, 1000);
        assert_eq!(config.simulator.analysis_delay_ms, 2000);
        assert_eq!(config.ui.notification_secs, 9);
        assert_eq!(config.analysis.healthy_percent, 60);
    }

    #[test]
    fn test_env_overrides_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gear-dash.yaml");
        fs::write(&path, "simulator:\n  upload_delay_ms: 1000\n").unwrap();

        let env = env_with(&[
            ("GEAR_DASH__SIMULATOR__UPLOAD_DELAY_MS", "1234"),
            ("GEAR_DASH__UI__NOTIFICATION_SECS", "7"),
            ("OTHER_APP__UI__REFRESH_MS", "1"),
        ]);
        let config = load_config_from(path.to_str().unwrap(), env).unwrap();

        assert_eq!(config.simulator.upload_delay_ms, 1234);
        assert_eq!(config.ui.notification_secs, 7);
        assert_eq!(config.ui.refresh_ms, 100);
        assert_eq!(config.simulator.tick_interval_ms, 200);
    }

    #[test]
    fn test_env_override_is_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");

        let env = env_with(&[("GEAR_DASH__UI__REFRESH_MS", "0")]);
        let err = load_config_from(path.to_str().unwrap(), env).unwrap_err();
        assert!(err.to_string().contains("refresh_ms"));
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gear-dash.yaml");
        fs::write(&path, "simulator:\n  progress_cap: 150\n").unwrap();

        let err = load_config(path.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("progress_cap"));
    }
}
