//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the service
//! configuration and seed data from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::session::validate_password_hash;

use super::types::{AttendanceConfig, SeedData, ServiceConfig};

/// Loads and provides access to the service configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and validates the values the engine depends on.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── service.yaml   # Bind address, session TTL, admin account, attendance rules
/// └── seed.yaml      # Optional initial master data
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Binding to {}", loader.service().bind_addr);
/// println!("Seeded vendors: {}", loader.seed().vendors.len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    service: ServiceConfig,
    seed: SeedData,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/default")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `service.yaml` is missing
    /// - Any file contains invalid YAML
    /// - Any value is out of range
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let service = Self::load_yaml::<ServiceConfig>(&path.join("service.yaml"))?;

        // seed.yaml is optional
        let seed_path = path.join("seed.yaml");
        let seed = if seed_path.exists() {
            Self::load_yaml::<SeedData>(&seed_path)?
        } else {
            SeedData::default()
        };

        Self::from_parts(service, seed)
    }

    /// Builds a loader from already-parsed parts, validating them.
    pub fn from_parts(service: ServiceConfig, seed: SeedData) -> EngineResult<Self> {
        Self::validate(&service)?;
        Ok(Self { service, seed })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate(service: &ServiceConfig) -> EngineResult<()> {
        if service.session.ttl_minutes <= 0 {
            return Err(EngineError::InvalidConfig {
                key: "session.ttl_minutes".to_string(),
                message: format!("must be positive, got {}", service.session.ttl_minutes),
            });
        }

        if service.admin.username.trim().is_empty() {
            return Err(EngineError::InvalidConfig {
                key: "admin.username".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        if let Err(err) = validate_password_hash(&service.admin.password_hash) {
            return Err(EngineError::InvalidConfig {
                key: "admin.password_hash".to_string(),
                message: format!("must be an Argon2 PHC string ({})", err),
            });
        }

        if service.bind_addr.parse::<std::net::SocketAddr>().is_err() {
            return Err(EngineError::InvalidConfig {
                key: "bind_addr".to_string(),
                message: format!("'{}' is not a socket address", service.bind_addr),
            });
        }

        Ok(())
    }

    /// Returns the service configuration.
    pub fn service(&self) -> &ServiceConfig {
        &self.service
    }

    /// Returns the attendance rules.
    pub fn attendance(&self) -> &AttendanceConfig {
        &self.service.attendance
    }

    /// Returns the seed data.
    pub fn seed(&self) -> &SeedData {
        &self.seed
    }

    /// Overrides the bind address, e.g. from the environment.
    pub fn with_bind_addr(mut self, bind_addr: impl Into<String>) -> EngineResult<Self> {
        self.service.bind_addr = bind_addr.into();
        Self::validate(&self.service)?;
        Ok(self)
    }
}
