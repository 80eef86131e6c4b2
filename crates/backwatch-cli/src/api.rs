//! Client for the backup-management API.
//!
//! Two calls are used per run: a login that exchanges credentials for a
//! bearer token, and the monitoring listing of every plan. Failures are not
//! retried; the next scheduled run tries again.

use std::time::Duration;

use anyhow::{Context, Result};
use backwatch_core::{config::ApiSettings, models::parse_records, RawPlan};
use log::{debug, info};
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct LoginRequest<'a> {
    user_name: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    access_token: String,
}

/// Authenticated access to the backup API.
pub struct BackupApiClient {
    client: reqwest::Client,
    endpoint: String,
}

impl BackupApiClient {
    /// Create a client for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.endpoint)
    }

    /// Exchange credentials for an access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API rejects the
    /// credentials, or the response has no `access_token`.
    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        let url = self.url("Provider/Login");
        debug!("logging in to {url}");

        let response: LoginResponse = self
            .client
            .post(&url)
            .json(&LoginRequest {
                user_name: username,
                password,
            })
            .send()
            .await
            .context("Login request failed")?
            .error_for_status()
            .context("Login rejected")?
            .json()
            .await
            .context("Login response has no access token")?;

        Ok(response.access_token)
    }

    /// Fetch the status record of every plan.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a list of
    /// plan records.
    pub async fn monitoring(&self, token: &str) -> Result<Vec<RawPlan>> {
        let url = self.url("Monitoring");
        debug!("fetching {url}");

        let body = self
            .client
            .get(&url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("bearer {token}")).context("Invalid access token")?,
            )
            .send()
            .await
            .context("Monitoring request failed")?
            .error_for_status()
            .context("Monitoring request rejected")?
            .text()
            .await
            .context("Failed to read monitoring response")?;

        let plans = parse_records(&body).context("Unexpected monitoring response")?;
        info!("fetched {} plan records", plans.len());
        Ok(plans)
    }

    /// Log in and fetch every plan record.
    ///
    /// # Errors
    ///
    /// Returns an error if either call fails.
    pub async fn fetch_plans(settings: &ApiSettings) -> Result<Vec<RawPlan>> {
        let client = Self::new(settings)?;
        let token = client
            .login(&settings.username, &settings.password)
            .await?;
        client.monitoring(&token).await
    }
}
