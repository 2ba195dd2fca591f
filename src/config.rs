use crate::storage::StorageType;
use crate::utils::constants::{
    DEFAULT_PORT, DEFAULT_STORAGE_TIMEOUT_SECS, REQUEST_TIMEOUT_MARGIN_SECS,
};
use crate::utils::get_env::{get_optional_env_var, parse_or};
use std::time::Duration;

// process-wide settings, read once at startup and passed down by value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub storage_type: StorageType,
    pub storage_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            get_optional_env_var("PORT"),
            get_optional_env_var("STORAGE_TYPE"),
            get_optional_env_var("STORAGE_TIMEOUT_SECS"),
        )
    }

    pub fn from_values(
        port: Option<String>,
        storage_type: Option<String>,
        storage_timeout_secs: Option<String>,
    ) -> Self {
        let storage_type = match storage_type.as_deref() {
            Some(raw) => StorageType::parse_or_default(raw),
            None => StorageType::default(),
        };

        Self {
            port: parse_or(port, DEFAULT_PORT),
            storage_type,
            storage_timeout: Duration::from_secs(parse_or(
                storage_timeout_secs,
                DEFAULT_STORAGE_TIMEOUT_SECS,
            )),
        }
    }
}

impl AppConfig {
    // outer http timeout, always longer than the storage call it wraps
    pub fn request_timeout(&self) -> Duration {
        self.storage_timeout + Duration::from_secs(REQUEST_TIMEOUT_MARGIN_SECS)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::AppConfig;
    use crate::storage::StorageType;
    use std::time::Duration;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.storage_type, StorageType::Blob);
        assert_eq!(config.storage_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_from_values() {
        let config = AppConfig::from_values(
            Some("8080".to_string()),
            Some("object-store".to_string()),
            Some("5".to_string()),
        );
        assert_eq!(config.port, 8080);
        assert_eq!(config.storage_type, StorageType::ObjectStore);
        assert_eq!(config.storage_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_request_timeout_exceeds_storage_timeout() {
        for secs in ["1", "60", "300", "3600"] {
            let config = AppConfig::from_values(None, None, Some(secs.to_string()));
            assert!(config.request_timeout() > config.storage_timeout, "{secs}");
        }
    }

    #[test]
    fn test_unknown_storage_type_falls_back_to_blob() {
        let config = AppConfig::from_values(None, Some("ftp".to_string()), None);
        assert_eq!(config.storage_type, StorageType::Blob);
    }
}
