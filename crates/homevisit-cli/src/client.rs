//! Blocking HTTP client for the registry and transfer backends
//!
//! Both backends are single-URL endpoints: `GET` returns the patient list,
//! `POST` accepts a JSON [`BackendRequest`] body.

use std::time::Duration;

use anyhow::Context;
use homevisit_registry::{
    record::{PatientFeed, PatientRecord},
    request::BackendRequest,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::blocking::Client,
    url: String,
}

impl BackendClient {
    pub fn new(url: &str) -> anyhow::Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            url: url.to_owned(),
        })
    }

    pub fn fetch_patients(&self) -> anyhow::Result<Vec<PatientRecord>> {
        tracing::info!(url = %self.url, "fetching patients");
        let feed = self
            .http
            .get(&self.url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .with_context(|| format!("Failed to fetch patients from {}", self.url))?
            .json::<PatientFeed>()
            .with_context(|| format!("Failed to decode patient list from {}", self.url))?;
        let patients = feed.into_patients();
        tracing::info!(count = patients.len(), "patients loaded");
        Ok(patients)
    }

    pub fn send(&self, request: &BackendRequest) -> anyhow::Result<()> {
        let action = request.action();
        tracing::info!(url = %self.url, action, "sending request");
        let response = self
            .http
            .post(&self.url)
            .json(request)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .with_context(|| format!("Failed to send {action} request to {}", self.url))?;
        tracing::debug!(status = %response.status(), action, "request accepted");
        Ok(())
    }
}
