//! Server configuration
//!
//! Loaded from a YAML file, then adjusted by environment variables and
//! command line flags. Every key is optional; missing keys use the defaults
//! below.

use serde::{Deserialize, Serialize};
use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::pagination::DEFAULT_VISIBLE_WINDOW;

/// Default port number
pub const DEFAULT_PORT: u16 = 3000;

/// Default configuration file name
pub const CONFIG_FILENAME: &str = "settings.yaml";

/// Default number of rows per result page
pub const DEFAULT_RESULTS_PER_PAGE: u64 = 30;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub bind_address: IpAddr,
    /// HTTP port; 0 picks a free port
    pub port: u16,
    /// SQLite database file
    pub database_path: PathBuf,
    /// Page size used when a request does not give a valid one
    pub results_per_page: u64,
    /// Upper bound for the page size a request may ask for
    pub max_results_per_page: u64,
    /// Page numbers shown around the current page
    pub visible_pages: u64,
    /// Maximum number of database connections in use at once
    pub connection_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            database_path: PathBuf::from("inventory.db"),
            results_per_page: DEFAULT_RESULTS_PER_PAGE,
            max_results_per_page: 200,
            visible_pages: DEFAULT_VISIBLE_WINDOW,
            connection_limit: 10,
        }
    }
}

impl ServerConfig {
    /// Load configuration from a YAML file
    ///
    /// # Returns
    /// The parsed configuration, or the defaults if the file does not exist
    pub fn load(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration as YAML
    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| AppError::Config(format!("failed to serialize config: {}", e)))?;

        fs::write(path, content)?;
        Ok(())
    }

    /// Apply `PORT` and `DATABASE_PATH` overrides
    ///
    /// `lookup` is normally [`std::env::var`]; tests pass a closure instead.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT").filter(|v| !v.trim().is_empty()) {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| AppError::Config(format!("PORT is not a valid port: {}", port)))?;
        }

        if let Some(path) = lookup("DATABASE_PATH").filter(|v| !v.trim().is_empty()) {
            self.database_path = PathBuf::from(path);
        }

        Ok(())
    }

    /// Check that the configuration can serve requests
    pub fn validate(&self) -> Result<(), AppError> {
        Self::validate_port(self.port)?;

        if self.results_per_page == 0 || self.max_results_per_page == 0 {
            return Err(AppError::Config("page sizes must be at least 1".to_string()));
        }
        if self.results_per_page > self.max_results_per_page {
            return Err(AppError::Config(format!(
                "results_per_page ({}) exceeds max_results_per_page ({})",
                self.results_per_page, self.max_results_per_page
            )));
        }
        if self.visible_pages == 0 || self.visible_pages % 2 == 0 {
            return Err(AppError::Config(format!(
                "visible_pages must be a positive odd number, got {}",
                self.visible_pages
            )));
        }
        if self.connection_limit == 0 {
            return Err(AppError::Config("connection_limit must be at least 1".to_string()));
        }

        Ok(())
    }

    /// Validate a port number
    ///
    /// Ports below 1024 are privileged and rejected; 0 asks the OS for a free
    /// port and is accepted.
    pub fn validate_port(port: u16) -> Result<(), AppError> {
        if port != 0 && port < 1024 {
            return Err(AppError::Config(
                "Port must be >= 1024 (non-privileged ports)".to_string(),
            ));
        }
        Ok(())
    }

    /// Socket address the server listens on
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }

    /// Page size for a request, falling back to the default for missing or
    /// zero values and capping at the configured maximum
    pub fn page_size(&self, requested: Option<u64>) -> u64 {
        match requested {
            Some(size) if size > 0 => size.min(self.max_results_per_page),
            _ => self.results_per_page,
        }
    }
}
