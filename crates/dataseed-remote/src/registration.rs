use std::time::Duration;

use async_trait::async_trait;
use dataseed_batch::Caller;
use dataseed_core::{CallOutcome, WorkItem};
use reqwest::{Client, StatusCode, header};
use serde::Serialize;
use serde_json::json;

use crate::classify::{status_failure, transport_failure, truncate};
use crate::errors::RemoteError;

/// Settings for the registration endpoint.
#[derive(Debug, Clone)]
pub struct RegistrarConfig {
    pub endpoint: String,
    pub timeout: Duration,
}

/// Registers one user per work item.
///
/// Item metadata must carry `username`, `userMail`, `userPhoneNumber` and
/// `password`.
#[derive(Debug, Clone)]
pub struct Registrar {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest<'a> {
    username: &'a str,
    user_mail: &'a str,
    user_phone_number: &'a str,
    password: &'a str,
}

impl<'a> RegisterRequest<'a> {
    fn from_item(item: &'a WorkItem) -> dataseed_core::Result<Self> {
        Ok(Self {
            username: item.metadata_str("username")?,
            user_mail: item.metadata_str("userMail")?,
            user_phone_number: item.metadata_str("userPhoneNumber")?,
            password: item.metadata_str("password")?,
        })
    }
}

impl Registrar {
    pub fn new(config: RegistrarConfig) -> Result<Self, RemoteError> {
        if config.endpoint.trim().is_empty() {
            return Err(RemoteError::InvalidConfig(
                "registration endpoint is empty".to_string(),
            ));
        }
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint,
        })
    }
}

#[async_trait]
impl Caller for Registrar {
    async fn call(&self, item: &WorkItem) -> CallOutcome {
        let request = match RegisterRequest::from_item(item) {
            Ok(request) => request,
            Err(err) => return CallOutcome::permanent(err.to_string()),
        };

        let response = match self
            .client
            .post(&self.endpoint)
            .header(header::ACCEPT, "application/json")
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => return transport_failure(&err),
        };

        let status = response.status();
        if status.is_success() {
            return CallOutcome::success(json!({ "status": status.as_u16() }));
        }

        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::CONFLICT {
            return CallOutcome::permanent(format!(
                "User already exists: {}",
                truncate(&body, 512)
            ));
        }
        status_failure(status, &body)
    }
}
