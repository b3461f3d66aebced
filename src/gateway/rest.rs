use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::PatientGateway;
use crate::domain::{Patient, PatientDraft, PatientId};
use crate::error::GatewayError;

/// Collection path of the patient resource, relative to the base URL.
pub const PATIENTS_PATH: &str = "/clinicadental/pacientes";

/// [`PatientGateway`] over HTTP/JSON.
#[derive(Clone)]
pub struct RestPatientGateway {
    client: Client,
    collection_url: String,
}

impl RestPatientGateway {
    /// Create a gateway rooted at `base_url`.
    ///
    /// Without a `timeout` requests may wait forever for the server.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, GatewayError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(GatewayError::Http)?;

        Ok(Self {
            client,
            collection_url: format!("{}{}", base_url.trim_end_matches('/'), PATIENTS_PATH),
        })
    }

    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    fn record_url(&self, id: PatientId) -> String {
        format!("{}/{}", self.collection_url, id)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, GatewayError> {
        let response = request.send().await.map_err(|e| {
            if e.is_connect() {
                GatewayError::Connection(format!("Cannot connect to {}", self.collection_url))
            } else {
                GatewayError::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
        response
            .json()
            .await
            .map_err(|e| GatewayError::Parse(e.to_string()))
    }
}

#[async_trait]
impl PatientGateway for RestPatientGateway {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Patient>, GatewayError> {
        debug!("GET {}", self.collection_url);
        let response = self.send(self.client.get(&self.collection_url)).await?;
        Self::decode(response).await
    }

    #[instrument(skip(self, draft))]
    async fn create(&self, draft: PatientDraft) -> Result<Patient, GatewayError> {
        debug!("POST {}", self.collection_url);
        let response = self
            .send(self.client.post(&self.collection_url).json(&draft))
            .await?;
        Self::decode(response).await
    }

    #[instrument(skip(self, draft))]
    async fn update(&self, id: PatientId, draft: PatientDraft) -> Result<Patient, GatewayError> {
        let url = self.record_url(id);
        debug!("PUT {}", url);
        let response = self.send(self.client.put(&url).json(&draft)).await?;
        Self::decode(response).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: PatientId) -> Result<(), GatewayError> {
        let url = self.record_url(id);
        debug!("DELETE {}", url);
        self.send(self.client.delete(&url)).await?;
        Ok(())
    }
}
