//! Runtime environment detection.
//!
//! Databricks Apps inject a set of environment variables into the
//! container. Their presence switches the service into production mode:
//! debug off, bind on all interfaces. Anything else is treated as a
//! developer workstation.

use std::net::{IpAddr, Ipv4Addr};

/// Environment variables whose presence marks a Databricks runtime.
const RUNTIME_MARKERS: &[&str] = &[
    "DATABRICKS_RUNTIME_VERSION",
    "DATABRICKS_WORKSPACE_URL",
    "DATABRICKS_APP_ID",
    "DATABRICKS_APP_NAME",
];

/// Where the service believes it is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    /// Local workstation: debug logging, loopback bind.
    Development,
    /// Databricks-hosted: debug off, bind all interfaces.
    Production,
}

impl RuntimeEnv {
    /// Detect from the process environment.
    pub fn detect() -> Self {
        Self::detect_with(|key| std::env::var(key).ok())
    }

    /// Detect using an injected lookup, so tests stay hermetic.
    pub fn detect_with<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let marker_present = RUNTIME_MARKERS.iter().any(|key| get(key).is_some());

        let hosted_name = ["HOSTNAME", "USER"].iter().any(|key| {
            get(key)
                .map(|v| v.to_lowercase().contains("databricks"))
                .unwrap_or(false)
        });

        if marker_present || hosted_name {
            RuntimeEnv::Production
        } else {
            RuntimeEnv::Development
        }
    }

    /// Debug diagnostics are only on outside production.
    pub fn debug_enabled(self) -> bool {
        self == RuntimeEnv::Development
    }

    /// Address the HTTP server binds to.
    ///
    /// Development stays on loopback so a workstation instance is never
    /// reachable from the surrounding network; production binds all
    /// interfaces because the platform ingress connects from outside
    /// the container.
    pub fn bind_host(self) -> IpAddr {
        match self {
            RuntimeEnv::Development => IpAddr::V4(Ipv4Addr::LOCALHOST),
            RuntimeEnv::Production => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        }
    }

    /// Lowercase label for logs and the health endpoint.
    pub fn as_str(self) -> &'static str {
        match self {
            RuntimeEnv::Development => "development",
            RuntimeEnv::Production => "production",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_of<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn bare_environment_is_development() {
        let env = RuntimeEnv::detect_with(env_of(&[("USER", "alice"), ("HOSTNAME", "laptop")]));
        assert_eq!(env, RuntimeEnv::Development);
        assert!(env.debug_enabled());
        assert_eq!(env.bind_host(), IpAddr::V4(Ipv4Addr::LOCALHOST));
    }

    #[test]
    fn runtime_version_marks_production() {
        let env = RuntimeEnv::detect_with(env_of(&[("DATABRICKS_RUNTIME_VERSION", "15.4")]));
        assert_eq!(env, RuntimeEnv::Production);
        assert!(!env.debug_enabled());
        assert_eq!(env.bind_host(), IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    }

    #[test]
    fn databricks_hostname_marks_production() {
        let env = RuntimeEnv::detect_with(env_of(&[("HOSTNAME", "app-databricks-0042")]));
        assert_eq!(env, RuntimeEnv::Production);
    }

    #[test]
    fn app_id_marks_production() {
        let env = RuntimeEnv::detect_with(env_of(&[("DATABRICKS_APP_ID", "abc")]));
        assert_eq!(env, RuntimeEnv::Production);
    }
}
