//! Access to the patient backend.
//!
//! The roster only depends on [`PatientGateway`]; the REST implementation is
//! what the binary uses against a real server, the in-memory one backs demo
//! mode.

mod memory;
mod rest;

pub use memory::*;
pub use rest::*;

use async_trait::async_trait;

use crate::domain::{Patient, PatientDraft, PatientId};
use crate::error::GatewayError;

/// The four REST calls the roster depends on.
#[async_trait]
pub trait PatientGateway: Send + Sync + 'static {
    /// Fetches the whole collection, in server order.
    async fn list(&self) -> Result<Vec<Patient>, GatewayError>;

    /// Creates a record and returns it with its server-assigned id.
    async fn create(&self, draft: PatientDraft) -> Result<Patient, GatewayError>;

    /// Replaces the record `id` and returns the stored version.
    async fn update(&self, id: PatientId, draft: PatientDraft) -> Result<Patient, GatewayError>;

    /// Deletes the record `id`. Any response body is ignored.
    async fn delete(&self, id: PatientId) -> Result<(), GatewayError>;
}
