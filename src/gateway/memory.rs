use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use super::PatientGateway;
use crate::domain::{Patient, PatientDraft, PatientId};
use crate::error::GatewayError;

struct Store {
    patients: Vec<Patient>,
    next_id: PatientId,
}

/// In-process stand-in for the backend, assigning ids the way the server would.
pub struct MemoryPatientGateway {
    store: Mutex<Store>,
}

impl Default for MemoryPatientGateway {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl MemoryPatientGateway {
    /// Starts from `patients`; new ids continue after the highest seeded one.
    pub fn new(patients: Vec<Patient>) -> Self {
        let next_id = patients.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        Self {
            store: Mutex::new(Store { patients, next_id }),
        }
    }

    /// A small roster for demo mode.
    pub fn with_demo_data() -> Self {
        Self::new(vec![
            Patient::new(1, "Ana", "Ruiz", "1990-05-01", "555-1111"),
            Patient::new(2, "Luis", "Gil", "1985-12-24", "555-2222"),
            Patient::new(3, "Marta", "Soler", "2001-03-17", "555-3333"),
        ])
    }
}

#[async_trait]
impl PatientGateway for MemoryPatientGateway {
    async fn list(&self) -> Result<Vec<Patient>, GatewayError> {
        Ok(self.store.lock().await.patients.clone())
    }

    #[instrument(skip(self, draft))]
    async fn create(&self, draft: PatientDraft) -> Result<Patient, GatewayError> {
        let mut store = self.store.lock().await;
        let id = store.next_id;
        store.next_id += 1;

        let patient = Patient::from_draft(id, draft);
        store.patients.push(patient.clone());
        debug!(patient_id = id, "Stored new patient");
        Ok(patient)
    }

    #[instrument(skip(self, draft))]
    async fn update(&self, id: PatientId, draft: PatientDraft) -> Result<Patient, GatewayError> {
        let mut store = self.store.lock().await;
        let slot = store
            .patients
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(GatewayError::NotFound(id))?;

        *slot = Patient::from_draft(id, draft);
        Ok(slot.clone())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: PatientId) -> Result<(), GatewayError> {
        let mut store = self.store.lock().await;
        let before = store.patients.len();
        store.patients.retain(|p| p.id != id);
        if store.patients.len() == before {
            return Err(GatewayError::NotFound(id));
        }
        Ok(())
    }
}
