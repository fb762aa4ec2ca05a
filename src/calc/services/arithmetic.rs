//! # Arithmetic Service
//!
//! Talks to the remote arithmetic service: one GET per operation, addressed
//! by operator name, with both operands as query parameters. Requests run on
//! spawned tokio tasks and report back through a channel so the UI loop never
//! blocks on the network.

use crate::calc::models::{format_number, OperationRequest};
use crate::config::ServiceProfile;
use anyhow::{Context, Result};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;
use std::error::Error as StdError;
use tokio::sync::mpsc;

/// Shown in place of the correlation id when the service sends none
pub const MISSING_REQUEST_ID: &str = "N/A";

/// Error message used when a successful response carries no usable result
pub const MISSING_RESULT_MESSAGE: &str = "resultado ausente";

/// How a remote computation ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteOutcome {
    /// The service produced a result
    Success { result: String, request_id: String },
    /// The service answered but reported an error
    Rejected { message: String, request_id: String },
    /// The service could not be reached or the exchange broke off
    CommunicationFailure { reason: String },
}

/// Body shape of the service's responses; every field is optional
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OperationResponseBody {
    result: Option<Value>,
    error: Option<Value>,
    #[serde(rename = "requestId")]
    request_id: Option<Value>,
}

impl OperationResponseBody {
    /// Parse the body, treating anything that is not a JSON object as empty
    fn parse(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value @ Value::Object(_)) => serde_json::from_value(value).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    fn error_message(&self) -> Option<String> {
        non_empty_text(self.error.as_ref()?)
    }

    fn request_id(&self) -> Option<String> {
        non_empty_text(self.request_id.as_ref()?)
    }

    /// The result as display text, if it is a finite number or numeric string
    fn result_text(&self) -> Option<String> {
        match self.result.as_ref()? {
            Value::Number(n) if n.is_f64() => n.as_f64().and_then(format_number),
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) => {
                let text = s.trim();
                let value = text.parse::<f64>().ok()?;
                value.is_finite().then(|| text.to_string())
            }
            _ => None,
        }
    }
}

fn non_empty_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

impl RemoteOutcome {
    /// Interpret a response from its status, correlation header and raw body
    pub fn from_response(status: StatusCode, header_request_id: Option<&str>, body: &str) -> Self {
        let body = OperationResponseBody::parse(body);
        let request_id = header_request_id
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .or_else(|| body.request_id())
            .unwrap_or_else(|| MISSING_REQUEST_ID.to_string());

        if !status.is_success() || body.error_message().is_some() {
            let message = body
                .error_message()
                .unwrap_or_else(|| status.as_u16().to_string());
            return RemoteOutcome::Rejected {
                message,
                request_id,
            };
        }

        match body.result_text() {
            Some(result) => RemoteOutcome::Success { result, request_id },
            None => RemoteOutcome::Rejected {
                message: MISSING_RESULT_MESSAGE.to_string(),
                request_id,
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RemoteOutcome::Success { .. })
    }
}

/// A finished remote computation, tagged with the ticket it was issued under
#[derive(Debug)]
pub struct ComputeMessage {
    pub ticket: u64,
    pub request: OperationRequest,
    pub outcome: RemoteOutcome,
}

/// Client for the remote arithmetic service
pub struct ArithmeticService {
    client: Client,
    base_url: Url,
    request_id_header: String,
    /// Channel for receiving async compute results
    response_receiver: mpsc::Receiver<ComputeMessage>,
    /// Channel sender for async tasks to send results
    response_sender: mpsc::Sender<ComputeMessage>,
}

impl ArithmeticService {
    /// Create a new ArithmeticService with a profile
    pub fn new(profile: &ServiceProfile) -> Result<Self> {
        tracing::debug!("Creating ArithmeticService for {}", profile.server());
        let base_url = Url::parse(profile.server())
            .with_context(|| format!("Invalid server URL '{}'", profile.server()))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Server URL '{}' cannot be used as a base", profile.server());
        }

        let mut builder = Client::builder();
        if let Some(timeout) = profile.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        let (response_sender, response_receiver) = mpsc::channel(10);

        Ok(Self {
            client,
            base_url,
            request_id_header: profile.request_id_header().to_string(),
            response_receiver,
            response_sender,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `<base>/<operator>?operand1=..&operand2=..`
    pub fn request_url(&self, request: &OperationRequest) -> Result<Url> {
        let base_url = &self.base_url;
        let mut url = base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Server URL '{base_url}' cannot be used as a base"))?
            .pop_if_empty()
            .push(request.operator.name());
        url.query_pairs_mut()
            .clear()
            .append_pair("operand1", &request.operand1)
            .append_pair("operand2", &request.operand2);
        Ok(url)
    }

    async fn compute(client: &Client, url: Url, request_id_header: &str) -> RemoteOutcome {
        tracing::info!("GET {url}");

        let response = match client.get(url).send().await {
            Ok(response) => response,
            Err(e) => return Self::communication_failure(e),
        };

        let status = response.status();
        let request_id = response
            .headers()
            .get(request_id_header)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return Self::communication_failure(e),
        };

        let outcome = RemoteOutcome::from_response(status, request_id.as_deref(), &body);
        match &outcome {
            RemoteOutcome::Success { result, request_id } => {
                tracing::info!("Remote result {result} (request id {request_id})");
            }
            RemoteOutcome::Rejected {
                message,
                request_id,
            } => {
                tracing::warn!("Remote error {status}: {message} (request id {request_id})");
            }
            RemoteOutcome::CommunicationFailure { .. } => {}
        }
        outcome
    }

    fn communication_failure(e: reqwest::Error) -> RemoteOutcome {
        // Show full error chain
        let mut reason = format!("{e}");
        let mut source = StdError::source(&e);
        while let Some(cause) = source {
            reason.push_str(&format!("\n  Caused by: {cause}"));
            source = StdError::source(cause);
        }
        tracing::error!("Remote compute failed: {reason}");
        RemoteOutcome::CommunicationFailure { reason }
    }

    /// Run a computation on a spawned task.
    ///
    /// The outcome arrives later through [`poll_response`](Self::poll_response)
    /// or [`next_response`](Self::next_response), tagged with `ticket`.
    pub fn execute_async(&self, ticket: u64, request: OperationRequest) {
        let client = self.client.clone();
        let request_id_header = self.request_id_header.clone();
        let result_sender = self.response_sender.clone();
        let url = self.request_url(&request);

        tokio::spawn(async move {
            let outcome = match url {
                Ok(url) => Self::compute(&client, url, &request_id_header).await,
                Err(e) => RemoteOutcome::CommunicationFailure {
                    reason: e.to_string(),
                },
            };

            // Ignore send errors (receiver might have been dropped)
            let _ = result_sender
                .send(ComputeMessage {
                    ticket,
                    request,
                    outcome,
                })
                .await;
        });
    }

    /// Check for a finished computation (non-blocking)
    pub fn poll_response(&mut self) -> Option<ComputeMessage> {
        self.response_receiver.try_recv().ok()
    }

    /// Wait for the next finished computation
    pub async fn next_response(&mut self) -> Option<ComputeMessage> {
        self.response_receiver.recv().await
    }
}
