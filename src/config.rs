//! Configuration constants and profile loading for calcline
//!
//! A profile names the remote arithmetic service to talk to. Profiles live in
//! an INI file, one section per profile name:
//!
//! ```ini
//! [default]
//! server = http://localhost:8080
//! request_id_header = x-request-id
//! timeout_secs = 10
//! ```

use anyhow::{Context, Result};
use ini::Ini;
use std::path::Path;
use std::time::Duration;

/// Default profile file path for calcline
pub const DEFAULT_PROFILE_PATH: &str = "~/.calcline/profile";

/// Environment variable name for overriding the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "CALCLINE_PROFILE_PATH";

/// Service base address used when no profile provides one
pub const DEFAULT_SERVER: &str = "http://localhost:8080";

/// Response header carrying the request correlation id
pub const DEFAULT_REQUEST_ID_HEADER: &str = "x-request-id";

/// Get the profile file path, checking environment variable first, then falling back to default
pub fn get_profile_path() -> String {
    std::env::var_os(PROFILE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_string())
}

/// Connection settings for the remote arithmetic service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceProfile {
    server: String,
    request_id_header: String,
    timeout: Option<Duration>,
}

impl ServiceProfile {
    /// Profile pointing at `server` with default settings otherwise
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            ..Self::blank()
        }
    }

    /// Built-in profile used when nothing is configured
    pub fn blank() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            request_id_header: DEFAULT_REQUEST_ID_HEADER.to_string(),
            timeout: None,
        }
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn request_id_header(&self) -> &str {
        &self.request_id_header
    }

    /// Request timeout; `None` waits indefinitely
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = server.into();
        self
    }

    pub fn with_request_id_header(mut self, header: impl Into<String>) -> Self {
        self.request_id_header = header.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ServiceProfile {
    fn default() -> Self {
        Self::blank()
    }
}

/// Reads service profiles from an INI file
#[derive(Debug, Clone)]
pub struct IniProfileStore {
    path: String,
}

impl IniProfileStore {
    /// Create a store for `path`; a leading `~` is expanded
    pub fn new(path: &str) -> Self {
        Self {
            path: shellexpand::tilde(path).into_owned(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Look up a profile by name.
    ///
    /// A missing file or section yields `Ok(None)`; unreadable files and
    /// malformed values are errors.
    pub fn get_profile(&self, name: &str) -> Result<Option<ServiceProfile>> {
        if !Path::new(&self.path).exists() {
            tracing::debug!("Profile file '{}' does not exist", self.path);
            return Ok(None);
        }

        let ini = Ini::load_from_file(&self.path)
            .with_context(|| format!("Failed to read profile file '{}'", self.path))?;

        let Some(section) = ini.section(Some(name)) else {
            return Ok(None);
        };

        let mut profile = ServiceProfile::blank();
        if let Some(server) = section.get("server") {
            profile = profile.with_server(server.trim());
        }
        if let Some(header) = section.get("request_id_header") {
            profile = profile.with_request_id_header(header.trim());
        }
        if let Some(timeout) = section.get("timeout_secs") {
            let secs: u64 = timeout.trim().parse().with_context(|| {
                format!("Invalid timeout_secs '{timeout}' in profile '{name}'")
            })?;
            profile = profile.with_timeout(Some(Duration::from_secs(secs)));
        }

        Ok(Some(profile))
    }

    /// Look up a profile, falling back to the blank profile when absent
    pub fn get_profile_or_blank(&self, name: &str) -> Result<ServiceProfile> {
        match self.get_profile(name)? {
            Some(profile) => {
                tracing::debug!("Profile '{}' loaded, server: {}", name, profile.server());
                Ok(profile)
            }
            None => {
                tracing::debug!("Profile '{}' not found, using blank profile", name);
                Ok(ServiceProfile::blank())
            }
        }
    }
}
