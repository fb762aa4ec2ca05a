//! # Status Line Model
//!
//! Request lifecycle text shown under the display: empty while idle, a
//! placeholder while the remote call is outstanding, then the correlation
//! id or the error.

use std::fmt;

/// Placeholder shown while a remote computation is in flight
pub const COMPUTING_TEXT: &str = "Calculando...";

/// Shown when the remote service could not be reached
pub const COMMUNICATION_FAILURE_TEXT: &str = "Falha de comunicação";

/// Status line state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusLine {
    #[default]
    Idle,
    Computing,
    /// Correlation id of the request that produced the shown value
    RequestId(String),
    /// Error reported by the service (message or status code)
    Error(String),
    CommunicationFailure,
}

impl StatusLine {
    pub fn is_idle(&self) -> bool {
        matches!(self, StatusLine::Idle)
    }

    pub fn is_computing(&self) -> bool {
        matches!(self, StatusLine::Computing)
    }

    /// Text to put on the status surface
    pub fn text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusLine::Idle => Ok(()),
            StatusLine::Computing => f.write_str(COMPUTING_TEXT),
            StatusLine::RequestId(id) => write!(f, "ID: {id}"),
            StatusLine::Error(message) => write!(f, "Erro: {message}"),
            StatusLine::CommunicationFailure => f.write_str(COMMUNICATION_FAILURE_TEXT),
        }
    }
}
