//! Service health reporting.

use serde::Serialize;

use crate::config::RuntimeEnv;

/// Payload of the `/health` endpoint.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub environment: &'static str,
    pub mode: &'static str,
}

impl HealthReport {
    /// A report for a serving process. The service is healthy whenever it
    /// can answer at all; `mode` says whether live backends are wired.
    pub fn current(env: RuntimeEnv, online: bool) -> Self {
        Self {
            status: "healthy",
            environment: env.as_str(),
            mode: if online { "online" } else { "offline" },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_reflects_environment_and_mode() {
        let report = HealthReport::current(RuntimeEnv::Development, false);
        assert_eq!(report.status, "healthy");
        assert_eq!(report.environment, "development");
        assert_eq!(report.mode, "offline");

        let report = HealthReport::current(RuntimeEnv::Production, true);
        assert_eq!(report.environment, "production");
        assert_eq!(report.mode, "online");
    }
}
