use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::envelope::Envelope;
use crate::model::{ServiceRecord, ServiceRequest};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never completed: DNS, connection or body decoding failure.
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with `success: false`.
    #[error("{}", .message.as_deref().unwrap_or("request rejected"))]
    Rejected {
        status: u16,
        message: Option<String>,
    },

    #[error("response did not include data")]
    MissingData,

    #[error("invalid api url: {0}")]
    InvalidUrl(String),
}

/// The service API as seen by the orchestrator.
#[async_trait]
pub trait ServiceApi: Send + Sync {
    async fn list_all(&self) -> Result<Vec<ServiceRecord>, ClientError>;

    async fn search(&self, vehicle_no: &str) -> Result<Vec<ServiceRecord>, ClientError>;

    /// `None` when the API reports the id as not found.
    async fn get(&self, service_id: i32) -> Result<Option<ServiceRecord>, ClientError>;

    async fn create(&self, request: &ServiceRequest) -> Result<ServiceRecord, ClientError>;

    async fn update(
        &self,
        service_id: i32,
        request: &ServiceRequest,
    ) -> Result<ServiceRecord, ClientError>;

    async fn delete(&self, service_id: i32) -> Result<(), ClientError>;
}

/// `ServiceApi` over HTTP. One request per call, no retries, no timeout.
pub struct HttpServiceApi {
    client: Client,
    base_url: Url,
}

impl HttpServiceApi {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(base_url).map_err(|err| ClientError::InvalidUrl(format!("{base_url}: {err}")))?;

        Ok(HttpServiceApi {
            client: Client::new(),
            base_url,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<Envelope<T>, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let envelope: Envelope<T> = response.json().await?;

        if !envelope.success {
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                message: envelope.message,
            });
        }
        Ok(envelope)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        self.send(request).await?.data.ok_or(ClientError::MissingData)
    }
}

#[async_trait]
impl ServiceApi for HttpServiceApi {
    async fn list_all(&self) -> Result<Vec<ServiceRecord>, ClientError> {
        let url = self.endpoint(&["services"])?;
        self.fetch(self.client.get(url)).await
    }

    async fn search(&self, vehicle_no: &str) -> Result<Vec<ServiceRecord>, ClientError> {
        let url = self.endpoint(&["services", "search", vehicle_no])?;
        self.fetch(self.client.get(url)).await
    }

    async fn get(&self, service_id: i32) -> Result<Option<ServiceRecord>, ClientError> {
        let url = self.endpoint(&["services", &service_id.to_string()])?;
        match self.fetch(self.client.get(url)).await {
            Ok(service) => Ok(Some(service)),
            Err(ClientError::Rejected { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    async fn create(&self, request: &ServiceRequest) -> Result<ServiceRecord, ClientError> {
        let url = self.endpoint(&["services"])?;
        self.fetch(self.client.post(url).json(request)).await
    }

    async fn update(
        &self,
        service_id: i32,
        request: &ServiceRequest,
    ) -> Result<ServiceRecord, ClientError> {
        let url = self.endpoint(&["services", &service_id.to_string()])?;
        self.fetch(self.client.put(url).json(request)).await
    }

    async fn delete(&self, service_id: i32) -> Result<(), ClientError> {
        let url = self.endpoint(&["services", &service_id.to_string()])?;
        self.send::<serde_json::Value>(self.client.delete(url))
            .await
            .map(|_| ())
    }
}
