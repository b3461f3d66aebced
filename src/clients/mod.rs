mod macros;

use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::domain::{FieldValues, Patient, PatientId};
use crate::error::RosterError;
use crate::messages::{RosterRequest, RosterSnapshot};
use macros::client_method;

/// Handle to the roster service. Cheap to clone; every method is one message.
#[derive(Clone)]
pub struct RosterClient {
    sender: mpsc::Sender<RosterRequest>,
}

impl RosterClient {
    pub fn new(sender: mpsc::Sender<RosterRequest>) -> Self {
        Self { sender }
    }

    /// Stops the service loop. Calls still in flight are dropped.
    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), RosterError> {
        debug!("Sending shutdown request");
        self.sender
            .send(RosterRequest::Shutdown)
            .await
            .map_err(|e| RosterError::ActorCommunicationError(e.to_string()))
    }
}

// Load resolves with the number of records now held locally.
client_method!(RosterClient => fn load() -> usize as RosterRequest::Load);
client_method!(RosterClient => fn begin_add() -> () as RosterRequest::BeginAdd);
// Resolves to false when `id` is not in the local list.
client_method!(RosterClient => fn begin_edit(id: PatientId) -> bool as RosterRequest::BeginEdit);
client_method!(RosterClient => fn submit(values: FieldValues) -> Patient as RosterRequest::Submit);
client_method!(RosterClient => fn cancel() -> () as RosterRequest::Cancel);
client_method!(RosterClient => fn delete(id: PatientId) -> () as RosterRequest::Delete);
client_method!(RosterClient => fn snapshot() -> RosterSnapshot as RosterRequest::Snapshot);
