use async_trait::async_trait;
use splitdns_application::ports::RouteRegistrar;
use splitdns_domain::DomainError;
use std::net::IpAddr;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Registers addresses by running `<program> <ip>`.
///
/// A non-zero exit, a spawn failure, or exceeding `timeout` is an error.
/// The child is killed if the timeout drops it.
pub struct CommandRouteRegistrar {
    program: PathBuf,
    timeout: Duration,
}

impl CommandRouteRegistrar {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }
}

#[async_trait]
impl RouteRegistrar for CommandRouteRegistrar {
    async fn register(&self, ip: IpAddr) -> Result<(), DomainError> {
        let output = Command::new(&self.program)
            .arg(ip.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(self.timeout, output)
            .await
            .map_err(|_| {
                DomainError::RouteRegistrationFailed(format!(
                    "{} {} timed out after {:?}",
                    self.program.display(),
                    ip,
                    self.timeout
                ))
            })?
            .map_err(|e| {
                DomainError::RouteRegistrationFailed(format!(
                    "failed to run {}: {}",
                    self.program.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DomainError::RouteRegistrationFailed(format!(
                "{} {} exited with {}: {}",
                self.program.display(),
                ip,
                output.status,
                stderr.trim()
            )));
        }

        debug!(ip = %ip, program = %self.program.display(), "Route registered");
        Ok(())
    }
}
