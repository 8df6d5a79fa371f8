//! Supervision loop: spawn, wait, restart.

use std::time::Instant;

use thiserror::Error;
use tokio::process::Command;
use tokio::sync::broadcast;

use crate::config::SupervisorConfig;
use crate::supervisor::policy::RestartPolicy;

/// Error type for the supervision loop.
#[derive(Debug, Error)]
pub enum SupervisorError {
    #[error("no command given to supervise")]
    EmptyCommand,

    #[error("giving up after {attempts} consecutive failed runs")]
    RestartLimit { attempts: u32 },
}

/// Keeps a single child process alive.
///
/// Crash and clean exit are treated alike: log, wait, respawn. A spawn
/// failure (missing binary, permission error) counts as a failed run and
/// goes through the same policy rather than aborting the loop.
#[derive(Debug)]
pub struct Supervisor {
    command: Vec<String>,
    policy: RestartPolicy,
}

impl Supervisor {
    pub fn new(command: Vec<String>, config: SupervisorConfig) -> Result<Self, SupervisorError> {
        if command.is_empty() {
            return Err(SupervisorError::EmptyCommand);
        }
        Ok(Self {
            command,
            policy: RestartPolicy::new(config),
        })
    }

    /// Run the loop until shutdown is signalled or the restart cap trips.
    pub async fn run(
        &self,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), SupervisorError> {
        let mut failure_streak: u32 = 0;

        loop {
            tracing::info!(
                command = %self.command.join(" "),
                streak = failure_streak,
                "Starting application process"
            );

            let started = Instant::now();
            let spawned = Command::new(&self.command[0])
                .args(&self.command[1..])
                .spawn();

            match spawned {
                Ok(mut child) => {
                    let status = tokio::select! {
                        status = child.wait() => status,
                        _ = shutdown.recv() => {
                            tracing::info!("Shutdown requested, stopping child");
                            let _ = child.start_kill();
                            let _ = child.wait().await;
                            return Ok(());
                        }
                    };

                    let uptime = started.elapsed();
                    match status {
                        Ok(exit) => tracing::warn!(
                            exit = %exit,
                            uptime_secs = uptime.as_secs(),
                            "Application process died"
                        ),
                        Err(e) => tracing::error!(
                            error = %e,
                            "Failed waiting on application process"
                        ),
                    }

                    if self.policy.is_stable(uptime) {
                        failure_streak = 0;
                    }
                }
                Err(e) => {
                    tracing::error!(
                        command = %self.command[0],
                        error = %e,
                        "Failed to spawn application process"
                    );
                }
            }

            failure_streak += 1;
            if !self.policy.should_restart(failure_streak) {
                return Err(SupervisorError::RestartLimit {
                    attempts: failure_streak,
                });
            }

            let delay = self.policy.delay_for(failure_streak);
            tracing::info!(delay_ms = delay.as_millis() as u64, "Restarting after delay");

            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = shutdown.recv() => {
                    tracing::info!("Shutdown requested during restart delay");
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::Shutdown;
    use std::time::Duration;

    fn fast_config(max_restarts: Option<u32>) -> SupervisorConfig {
        SupervisorConfig {
            restart_delay_secs: 0,
            max_restarts,
            ..Default::default()
        }
    }

    #[test]
    fn empty_command_is_rejected() {
        let err = Supervisor::new(vec![], SupervisorConfig::default()).unwrap_err();
        assert!(matches!(err, SupervisorError::EmptyCommand));
    }

    #[tokio::test]
    async fn child_is_restarted_until_cap() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("runs.log");
        let script = format!("echo run >> {}", marker.display());

        let supervisor = Supervisor::new(
            vec!["sh".into(), "-c".into(), script],
            fast_config(Some(3)),
        )
        .unwrap();

        let shutdown = Shutdown::new();
        let result = supervisor.run(shutdown.subscribe()).await;

        assert!(matches!(
            result,
            Err(SupervisorError::RestartLimit { attempts: 4 })
        ));
        let runs = std::fs::read_to_string(&marker).unwrap();
        assert_eq!(runs.lines().count(), 4, "initial run plus three restarts");
    }

    #[tokio::test]
    async fn missing_binary_follows_restart_policy() {
        let supervisor = Supervisor::new(
            vec!["/nonexistent/definitely-not-a-binary".into()],
            fast_config(Some(2)),
        )
        .unwrap();

        let shutdown = Shutdown::new();
        let result = supervisor.run(shutdown.subscribe()).await;
        assert!(matches!(result, Err(SupervisorError::RestartLimit { .. })));
    }

    #[tokio::test]
    async fn shutdown_stops_a_running_child() {
        let supervisor = Supervisor::new(
            vec!["sleep".into(), "30".into()],
            fast_config(None),
        )
        .unwrap();

        let shutdown = Shutdown::new();
        let receiver = shutdown.subscribe();
        let handle = tokio::spawn(async move { supervisor.run(receiver).await });

        tokio::time::sleep(Duration::from_millis(200)).await;
        shutdown.trigger();

        let result = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("supervisor did not stop after shutdown")
            .unwrap();
        assert!(result.is_ok());
    }
}
