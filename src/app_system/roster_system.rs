use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::actors::RosterService;
use crate::clients::RosterClient;
use crate::gateway::PatientGateway;

/// Starts the roster service over a gateway and owns its task.
pub struct RosterSystem {
    pub roster_client: RosterClient,
    handle: tokio::task::JoinHandle<()>,
}

impl RosterSystem {
    #[instrument(name = "roster_system", skip(gateway))]
    pub fn start<G: PatientGateway>(gateway: Arc<G>, mailbox_size: usize) -> Self {
        let (service, roster_client) = RosterService::new(mailbox_size, gateway);
        let handle = tokio::spawn(service.run());
        info!("Roster system started");

        Self {
            roster_client,
            handle,
        }
    }

    /// Stops the service and waits for its loop to finish.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down roster system");
        let _ = self.roster_client.shutdown().await;

        if let Err(e) = self.handle.await {
            error!(error = ?e, "Roster service task failed");
            return Err(format!("Roster service task failed: {:?}", e));
        }

        info!("Roster system shutdown complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MemoryPatientGateway;

    #[tokio::test]
    async fn test_start_and_shutdown() {
        let system = RosterSystem::start(Arc::new(MemoryPatientGateway::with_demo_data()), 8);

        assert_eq!(system.roster_client.load().await, Ok(3));
        assert_eq!(system.shutdown().await, Ok(()));
    }
}
