use rocket::figment::Figment;
use serde::Deserialize;

use std::path::PathBuf;

use crate::internal_error::InternalResult;

/// Application settings read from `Rocket.toml` and `ROCKET_*` variables
/// alongside Rocket's own configuration.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub static_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> AppConfig {
        AppConfig {
            database_path: PathBuf::from("schedo.db"),
            static_dir: PathBuf::from("web"),
        }
    }
}

impl AppConfig {
    pub fn from_figment(figment: &Figment) -> InternalResult<AppConfig> {
        Ok(figment.extract::<AppConfig>()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = AppConfig::from_figment(&Figment::new()).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn database_path_can_be_overridden() {
        let figment = Figment::new().merge(("database_path", "/tmp/other.db"));
        let config = AppConfig::from_figment(&figment).unwrap();

        assert_eq!(config.database_path, PathBuf::from("/tmp/other.db"));
        assert_eq!(config.static_dir, PathBuf::from("web"));
    }
}
