//! Client for the external analysis service
//!
//! `POST <endpoint>` with `{"text": ...}`. A 2xx body is an [`AnalysisResult`];
//! anything else is a failure whose optional `{"error": ...}` body supplies the
//! message shown to the user.
//!
//! No retry and no request timeout. While a request is pending the trigger
//! stays disabled.

use crate::error::{RequestError, GENERIC_FAILURE};
use crate::model::{AnalysisResult, AnalyzeRequest, ErrorPayload};
use reqwest::blocking::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Default endpoint of the analysis backend.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/analyze";

/// Anything that can turn validated text into an analysis result.
pub trait AnalysisService {
    fn analyze(&self, text: &str) -> Result<AnalysisResult, RequestError>;
}

impl<T: AnalysisService + ?Sized> AnalysisService for &T {
    fn analyze(&self, text: &str) -> Result<AnalysisResult, RequestError> {
        (**self).analyze(text)
    }
}

/// Blocking HTTP implementation backed by `reqwest`.
pub struct HttpAnalysisClient {
    client: Client,
    endpoint: String,
}

impl HttpAnalysisClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, RequestError> {
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| RequestError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl AnalysisService for HttpAnalysisClient {
    fn analyze(&self, text: &str) -> Result<AnalysisResult, RequestError> {
        let start = Instant::now();
        debug!(endpoint = %self.endpoint, chars = text.chars().count(), "sending analysis request");

        let resp = self
            .client
            .post(&self.endpoint)
            .json(&AnalyzeRequest { text: text.to_string() })
            .send()
            .map_err(|e| RequestError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            // The body is optional and may not even be JSON
            let message = resp
                .json::<ErrorPayload>()
                .ok()
                .and_then(|p| p.error)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());

            warn!(status = status.as_u16(), %message, "analysis request rejected");
            return Err(RequestError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let result = resp
            .json::<AnalysisResult>()
            .map_err(|e| RequestError::InvalidResponse(e.to_string()))?;

        info!(
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            persuasion = result.persuasion_score,
            ethical = result.ethical_score,
            "analysis complete"
        );
        Ok(result)
    }
}
