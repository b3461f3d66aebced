//! # Mock Framework
//!
//! Utilities for testing the roster without a backend.
//!
//! Use [`create_mock_gateway`] to get a gateway and a receiver of the calls
//! made on it. Then use helpers like [`expect_list`] or [`expect_create`] to
//! assert each call and decide its outcome.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::domain::{Patient, PatientDraft, PatientId};
use crate::error::GatewayError;
use crate::gateway::PatientGateway;

pub type Responder<T> = oneshot::Sender<Result<T, GatewayError>>;

/// One call made on a [`MockGateway`], waiting for the test to answer it.
#[derive(Debug)]
pub enum GatewayCall {
    List {
        respond_to: Responder<Vec<Patient>>,
    },
    Create {
        draft: PatientDraft,
        respond_to: Responder<Patient>,
    },
    Update {
        id: PatientId,
        draft: PatientDraft,
        respond_to: Responder<Patient>,
    },
    Delete {
        id: PatientId,
        respond_to: Responder<()>,
    },
}

/// Gateway that forwards every call to a channel the test controls.
pub struct MockGateway {
    sender: mpsc::Sender<GatewayCall>,
}

impl MockGateway {
    async fn call<T>(&self, make: impl FnOnce(Responder<T>) -> GatewayCall) -> Result<T, GatewayError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| GatewayError::Connection("Mock closed".to_string()))?;
        response
            .await
            .map_err(|_| GatewayError::Connection("Mock dropped".to_string()))?
    }
}

#[async_trait]
impl PatientGateway for MockGateway {
    async fn list(&self) -> Result<Vec<Patient>, GatewayError> {
        self.call(|respond_to| GatewayCall::List { respond_to }).await
    }

    async fn create(&self, draft: PatientDraft) -> Result<Patient, GatewayError> {
        self.call(|respond_to| GatewayCall::Create { draft, respond_to }).await
    }

    async fn update(&self, id: PatientId, draft: PatientDraft) -> Result<Patient, GatewayError> {
        self.call(|respond_to| GatewayCall::Update { id, draft, respond_to }).await
    }

    async fn delete(&self, id: PatientId) -> Result<(), GatewayError> {
        self.call(|respond_to| GatewayCall::Delete { id, respond_to }).await
    }
}

/// Creates a mock gateway and a receiver for asserting the calls made on it.
pub fn create_mock_gateway(buffer_size: usize) -> (Arc<MockGateway>, mpsc::Receiver<GatewayCall>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (Arc::new(MockGateway { sender }), receiver)
}

/// The error a test hands back to simulate a dead network.
pub fn transport_error() -> GatewayError {
    GatewayError::Connection("simulated transport failure".to_string())
}

/// Helper to verify that the next call is a List
pub async fn expect_list(receiver: &mut mpsc::Receiver<GatewayCall>) -> Option<Responder<Vec<Patient>>> {
    match receiver.recv().await {
        Some(GatewayCall::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next call is a Create
pub async fn expect_create(
    receiver: &mut mpsc::Receiver<GatewayCall>,
) -> Option<(PatientDraft, Responder<Patient>)> {
    match receiver.recv().await {
        Some(GatewayCall::Create { draft, respond_to }) => Some((draft, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next call is an Update
pub async fn expect_update(
    receiver: &mut mpsc::Receiver<GatewayCall>,
) -> Option<(PatientId, PatientDraft, Responder<Patient>)> {
    match receiver.recv().await {
        Some(GatewayCall::Update { id, draft, respond_to }) => Some((id, draft, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next call is a Delete
pub async fn expect_delete(receiver: &mut mpsc::Receiver<GatewayCall>) -> Option<(PatientId, Responder<()>)> {
    match receiver.recv().await {
        Some(GatewayCall::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_gateway() {
        let (gateway, mut receiver) = create_mock_gateway(10);

        let list_task = tokio::spawn(async move { gateway.list().await });

        let responder = expect_list(&mut receiver).await.expect("Expected List call");
        responder
            .send(Ok(vec![Patient::new(1, "Ana", "Ruiz", "1990-05-01", "555-1111")]))
            .unwrap();

        let result = list_task.await.unwrap().unwrap();
        assert_eq!(result.len(), 1);
    }

    #[tokio::test]
    async fn test_dropped_responder_is_a_transport_error() {
        let (gateway, mut receiver) = create_mock_gateway(10);

        let delete_task = tokio::spawn(async move { gateway.delete(4).await });

        let (id, responder) = expect_delete(&mut receiver).await.expect("Expected Delete call");
        assert_eq!(id, 4);
        drop(responder);

        assert!(matches!(delete_task.await.unwrap(), Err(GatewayError::Connection(_))));
    }
}
