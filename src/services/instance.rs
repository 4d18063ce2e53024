//! Single-instance guard built on the control listener

use std::{io::ErrorKind, time::Duration};

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::error::ReminderError;

/// Result of trying to become the running instance
#[derive(Debug)]
pub enum InstanceGuard {
    /// We own the control address
    Acquired(TcpListener),
    /// Another instance holds the control address
    AlreadyRunning,
    /// The guard could not be established; run without it
    Unavailable(ReminderError),
}

/// Bind the control address; holding the listener is holding the instance lock
pub async fn acquire(addr: &str) -> InstanceGuard {
    match TcpListener::bind(addr).await {
        Ok(listener) => InstanceGuard::Acquired(listener),
        Err(e) if e.kind() == ErrorKind::AddrInUse => InstanceGuard::AlreadyRunning,
        Err(e) => {
            InstanceGuard::Unavailable(ReminderError::unavailable("single-instance guard", e))
        }
    }
}

/// Ask the running instance to bring its control window forward
pub async fn focus_existing(addr: &str) -> bool {
    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            warn!("Cannot build control client: {}", e);
            return false;
        }
    };

    match client.post(format!("http://{}/control/show", addr)).send().await {
        Ok(response) if response.status().is_success() => {
            info!("Activated existing instance at {}", addr);
            true
        }
        Ok(response) => {
            warn!("Existing instance answered {}", response.status());
            false
        }
        Err(e) => {
            warn!("Failed to reach existing instance at {}: {}", addr, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn second_bind_reports_already_running() {
        let first = match acquire("127.0.0.1:0").await {
            InstanceGuard::Acquired(listener) => listener,
            other => panic!("expected listener, got {:?}", other),
        };
        let addr = first.local_addr().unwrap().to_string();

        assert!(matches!(acquire(&addr).await, InstanceGuard::AlreadyRunning));
    }

    #[tokio::test]
    async fn unresolvable_address_is_unavailable() {
        assert!(matches!(
            acquire("not-an-address").await,
            InstanceGuard::Unavailable(ReminderError::PlatformUnavailable { .. })
        ));
    }
}
