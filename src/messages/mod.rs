use tokio::sync::oneshot;

use crate::domain::{EditorMode, EditorState, FieldValues, Patient, PatientId};
use crate::error::{GatewayError, RosterError};

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// What the screen needs to draw itself: the local list and the editor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterSnapshot {
    pub patients: Vec<Patient>,
    pub editor: EditorState,
}

/// Messages handled by [`crate::actors::RosterService`]. Each user intent
/// carries a oneshot channel for its outcome.
#[derive(Debug)]
pub enum RosterRequest {
    Load {
        respond_to: ServiceResponse<usize, RosterError>,
    },
    BeginAdd {
        respond_to: ServiceResponse<(), RosterError>,
    },
    BeginEdit {
        id: PatientId,
        respond_to: ServiceResponse<bool, RosterError>,
    },
    Submit {
        values: FieldValues,
        respond_to: ServiceResponse<Patient, RosterError>,
    },
    Cancel {
        respond_to: ServiceResponse<(), RosterError>,
    },
    Delete {
        id: PatientId,
        respond_to: ServiceResponse<(), RosterError>,
    },
    Snapshot {
        respond_to: ServiceResponse<RosterSnapshot, RosterError>,
    },
    /// Posted by a finished backend call; never sent by clients.
    Completed(Completion),
    Shutdown,
}

/// Result of a backend call, routed back through the mailbox so the list is
/// only ever touched by the service loop.
#[derive(Debug)]
pub enum Completion {
    Loaded {
        result: Result<Vec<Patient>, GatewayError>,
        respond_to: ServiceResponse<usize, RosterError>,
    },
    Saved {
        mode: EditorMode,
        /// Editor session that submitted the save.
        session: u64,
        result: Result<Patient, GatewayError>,
        respond_to: ServiceResponse<Patient, RosterError>,
    },
    Deleted {
        id: PatientId,
        result: Result<(), GatewayError>,
        respond_to: ServiceResponse<(), RosterError>,
    },
}
