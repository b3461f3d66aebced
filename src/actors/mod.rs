use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn, Instrument};

use crate::clients::RosterClient;
use crate::domain::{EditorMode, EditorState, FieldValues, Patient, PatientId};
use crate::error::RosterError;
use crate::gateway::PatientGateway;
use crate::messages::{Completion, RosterRequest, RosterSnapshot, ServiceResponse};

/// The patient list view.
///
/// Owns the local sequence of patients and the editor buffer. Backend calls
/// run on their own tasks and report back through the mailbox as
/// [`RosterRequest::Completed`], so the loop never waits on the network and
/// state is only mutated here.
pub struct RosterService<G: PatientGateway> {
    receiver: mpsc::Receiver<RosterRequest>,
    mailbox: mpsc::WeakSender<RosterRequest>,
    gateway: Arc<G>,
    patients: Vec<Patient>,
    editor: EditorState,
    /// Bumped each time an editor opens; saves only close their own session.
    editor_session: u64,
}

impl<G: PatientGateway> RosterService<G> {
    pub fn new(buffer_size: usize, gateway: Arc<G>) -> (Self, RosterClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            mailbox: sender.downgrade(),
            gateway,
            patients: Vec::new(),
            editor: EditorState::Closed,
            editor_session: 0,
        };
        let client = RosterClient::new(sender);
        (service, client)
    }

    #[instrument(name = "roster_service", skip(self))]
    pub async fn run(mut self) {
        info!("RosterService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                RosterRequest::Load { respond_to } => self.handle_load(respond_to),
                RosterRequest::BeginAdd { respond_to } => self.handle_begin_add(respond_to),
                RosterRequest::BeginEdit { id, respond_to } => self.handle_begin_edit(id, respond_to),
                RosterRequest::Submit { values, respond_to } => self.handle_submit(values, respond_to),
                RosterRequest::Cancel { respond_to } => self.handle_cancel(respond_to),
                RosterRequest::Delete { id, respond_to } => self.handle_delete(id, respond_to),
                RosterRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(Ok(RosterSnapshot {
                        patients: self.patients.clone(),
                        editor: self.editor.clone(),
                    }));
                }
                RosterRequest::Completed(completion) => self.apply(completion),
                RosterRequest::Shutdown => {
                    info!("RosterService shutting down");
                    break;
                }
            }
        }

        info!("RosterService stopped");
    }

    /// Runs a backend call on its own task and posts the outcome back.
    fn dispatch(&self, call: impl Future<Output = Completion> + Send + 'static) {
        let mailbox = self.mailbox.clone();
        tokio::spawn(
            async move {
                let completion = call.await;
                match mailbox.upgrade() {
                    Some(sender) => {
                        let _ = sender.send(RosterRequest::Completed(completion)).await;
                    }
                    None => debug!("Roster stopped before the call completed"),
                }
            }
            .in_current_span(),
        );
    }

    #[instrument(skip(self, respond_to))]
    fn handle_load(&self, respond_to: ServiceResponse<usize, RosterError>) {
        debug!("Fetching patients");
        let gateway = Arc::clone(&self.gateway);
        self.dispatch(async move {
            Completion::Loaded {
                result: gateway.list().await,
                respond_to,
            }
        });
    }

    #[instrument(skip(self, respond_to))]
    fn handle_begin_add(&mut self, respond_to: ServiceResponse<(), RosterError>) {
        self.editor = EditorState::create();
        self.editor_session += 1;
        debug!("Editor opened for a new patient");
        let _ = respond_to.send(Ok(()));
    }

    #[instrument(fields(patient_id = id), skip(self, respond_to))]
    fn handle_begin_edit(&mut self, id: PatientId, respond_to: ServiceResponse<bool, RosterError>) {
        let opened = match self.patients.iter().find(|p| p.id == id) {
            Some(patient) => {
                self.editor = EditorState::edit(patient);
                self.editor_session += 1;
                debug!("Editor opened with patient values");
                true
            }
            None => {
                debug!("Patient not in local list, ignoring");
                false
            }
        };
        let _ = respond_to.send(Ok(opened));
    }

    #[instrument(skip(self, values, respond_to))]
    fn handle_submit(&mut self, values: FieldValues, respond_to: ServiceResponse<Patient, RosterError>) {
        let EditorState::Open(editor) = &mut self.editor else {
            warn!("Submit with no open editor");
            let _ = respond_to.send(Err(RosterError::EditorClosed));
            return;
        };

        let draft = match values.validate() {
            Ok(draft) => draft,
            Err(errors) => {
                debug!(missing = errors.len(), "Submission blocked by empty fields");
                editor.values = values;
                editor.errors = errors.clone();
                let _ = respond_to.send(Err(RosterError::InvalidForm(errors)));
                return;
            }
        };

        editor.values = values;
        editor.errors.clear();
        let mode = editor.mode;
        let session = self.editor_session;
        let gateway = Arc::clone(&self.gateway);

        match mode {
            EditorMode::Create => {
                debug!("Creating patient");
                self.dispatch(async move {
                    Completion::Saved {
                        mode,
                        session,
                        result: gateway.create(draft).await,
                        respond_to,
                    }
                });
            }
            EditorMode::Edit(id) => {
                debug!(patient_id = id, "Updating patient");
                self.dispatch(async move {
                    Completion::Saved {
                        mode,
                        session,
                        result: gateway.update(id, draft).await,
                        respond_to,
                    }
                });
            }
        }
    }

    #[instrument(skip(self, respond_to))]
    fn handle_cancel(&mut self, respond_to: ServiceResponse<(), RosterError>) {
        self.editor = EditorState::Closed;
        let _ = respond_to.send(Ok(()));
    }

    #[instrument(fields(patient_id = id), skip(self, respond_to))]
    fn handle_delete(&self, id: PatientId, respond_to: ServiceResponse<(), RosterError>) {
        debug!("Deleting patient");
        let gateway = Arc::clone(&self.gateway);
        self.dispatch(async move {
            Completion::Deleted {
                id,
                result: gateway.delete(id).await,
                respond_to,
            }
        });
    }

    /// Folds a finished backend call into local state. Failures are logged
    /// and leave the list and editor as they were.
    fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::Loaded { result, respond_to } => {
                let outcome = match result {
                    Ok(patients) => {
                        info!(patient_count = patients.len(), "Patients loaded");
                        self.patients = patients;
                        Ok(self.patients.len())
                    }
                    Err(e) => {
                        error!(error = %e, "Error fetching patients");
                        Err(e.into())
                    }
                };
                let _ = respond_to.send(outcome);
            }
            Completion::Saved { mode, session, result, respond_to } => {
                let outcome = match result {
                    Ok(patient) => {
                        self.store_saved(mode, &patient);
                        self.close_editor_for(session);
                        Ok(patient)
                    }
                    Err(e) => {
                        match mode {
                            EditorMode::Create => error!(error = %e, "Error adding patient"),
                            EditorMode::Edit(id) => {
                                error!(error = %e, patient_id = id, "Error updating patient")
                            }
                        }
                        Err(e.into())
                    }
                };
                let _ = respond_to.send(outcome);
            }
            Completion::Deleted { id, result, respond_to } => {
                let outcome = match result {
                    Ok(()) => {
                        self.patients.retain(|p| p.id != id);
                        info!(patient_id = id, "Patient deleted");
                        Ok(())
                    }
                    Err(e) => {
                        error!(error = %e, patient_id = id, "Error deleting patient");
                        Err(e.into())
                    }
                };
                let _ = respond_to.send(outcome);
            }
        }
    }

    fn store_saved(&mut self, mode: EditorMode, patient: &Patient) {
        match mode {
            EditorMode::Create => {
                info!(patient_id = patient.id, "Patient added");
                self.patients.push(patient.clone());
            }
            EditorMode::Edit(id) => match self.patients.iter_mut().find(|p| p.id == id) {
                Some(slot) => {
                    info!(patient_id = id, "Patient updated");
                    *slot = patient.clone();
                }
                None => warn!(patient_id = id, "Updated patient is no longer in the local list"),
            },
        }
    }

    /// Closes the editor if it is still the session that submitted.
    fn close_editor_for(&mut self, session: u64) {
        if self.editor.is_open() && self.editor_session == session {
            self.editor = EditorState::Closed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MemoryPatientGateway;

    /// Spins up a service over the demo backend.
    fn start() -> RosterClient {
        let gateway = Arc::new(MemoryPatientGateway::with_demo_data());
        let (service, client) = RosterService::new(10, gateway);
        tokio::spawn(service.run());
        client
    }

    #[tokio::test]
    async fn test_list_starts_empty_until_loaded() -> Result<(), Box<dyn std::error::Error>> {
        let client = start();

        let snapshot = client.snapshot().await?;
        assert!(snapshot.patients.is_empty());
        assert!(!snapshot.editor.is_open());

        assert_eq!(client.load().await?, 3);
        assert_eq!(client.snapshot().await?.patients.len(), 3);

        client.shutdown().await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_submit_without_editor_is_rejected() {
        let client = start();
        let values = FieldValues::new("Ana", "Ruiz", None, "555-1111");

        assert_eq!(client.submit(values).await, Err(RosterError::EditorClosed));
    }

    #[tokio::test]
    async fn test_cancel_closes_editor() -> Result<(), Box<dyn std::error::Error>> {
        let client = start();
        client.load().await?;

        assert!(client.begin_edit(2).await?);
        assert_eq!(client.snapshot().await?.editor.mode(), Some(EditorMode::Edit(2)));

        client.cancel().await?;
        assert_eq!(client.snapshot().await?.editor, EditorState::Closed);
        Ok(())
    }

    #[tokio::test]
    async fn test_calls_fail_after_shutdown() -> Result<(), Box<dyn std::error::Error>> {
        let client = start();
        client.shutdown().await?;

        assert!(matches!(
            client.load().await,
            Err(RosterError::ActorCommunicationError(_))
        ));
        Ok(())
    }
}
