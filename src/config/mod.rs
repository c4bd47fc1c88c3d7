use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub google: GoogleConfig,
    pub directory: DirectoryConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// Identity provider settings. The client id is the fixed audience every
/// incoming ID token must carry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleConfig {
    pub client_id: String,
    pub jwks_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Published CSV export of the authorization spreadsheet.
    pub csv_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Secure cookie flag; disabled only for local development over http.
    pub cookie_secure: bool,
    pub max_age_secs: u64,
}

const GOOGLE_JWKS_URL: &str = "https://www.googleapis.com/oauth2/v3/certs";
const SESSION_MAX_AGE_SECS: u64 = 60 * 60 * 24; // 24 hours

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("GOOGLE_CLIENT_ID") {
            self.google.client_id = v;
        }
        if let Ok(v) = env::var("GOOGLE_JWKS_URL") {
            self.google.jwks_url = v;
        }
        if let Ok(v) = env::var("DIRECTORY_CSV_URL") {
            self.directory.csv_url = v;
        }
        if let Ok(v) = env::var("SESSION_COOKIE_SECURE") {
            self.session.cookie_secure = v.parse().unwrap_or(self.session.cookie_secure);
        }
        if let Ok(v) = env::var("SESSION_MAX_AGE_SECS") {
            self.session.max_age_secs = v.parse().unwrap_or(self.session.max_age_secs);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            google: GoogleConfig {
                client_id: String::new(),
                jwks_url: GOOGLE_JWKS_URL.to_string(),
            },
            directory: DirectoryConfig {
                csv_url: String::new(),
            },
            session: SessionConfig {
                cookie_secure: false,
                max_age_secs: SESSION_MAX_AGE_SECS,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            session: SessionConfig {
                cookie_secure: true,
                max_age_secs: SESSION_MAX_AGE_SECS,
            },
            ..Self::development()
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            session: SessionConfig {
                cookie_secure: true,
                max_age_secs: SESSION_MAX_AGE_SECS,
            },
            ..Self::development()
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert!(!config.session.cookie_secure);
        assert_eq!(config.session.max_age_secs, 86400);
        assert_eq!(config.google.jwks_url, GOOGLE_JWKS_URL);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert!(config.session.cookie_secure);
        assert_eq!(config.session.max_age_secs, 86400);
    }

    #[test]
    fn test_default_staging_config() {
        let config = AppConfig::staging();
        assert!(config.session.cookie_secure);
    }
}
