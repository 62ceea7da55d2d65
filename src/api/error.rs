//! Error decoding for the MicroBank services.
//!
//! Failed responses are decoded exactly once, at the transport boundary,
//! into [`ApiError`]. Downstream code matches on the variants instead of
//! probing response bodies.

use reqwest::StatusCode;
use serde::Deserialize;

/// Standing account restrictions the services report through the
/// `errorCode` field. These describe the caller's own account state, not a
/// systemic fault, so commands render them as advisories rather than
/// hard failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessRestriction {
    Blacklisted,
    Inactive,
    TransactionBlocked,
    NotFound,
    Unauthorized,
    ServiceUnavailable,
}

impl AccessRestriction {
    /// Map a wire error code onto a restriction. Codes outside the set
    /// are ordinary API errors.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "CLIENT_BLACKLISTED" => Some(AccessRestriction::Blacklisted),
            "CLIENT_INACTIVE" => Some(AccessRestriction::Inactive),
            "CLIENT_TRANSACTION_BLOCKED" => Some(AccessRestriction::TransactionBlocked),
            "CLIENT_NOT_FOUND" => Some(AccessRestriction::NotFound),
            "UNAUTHORIZED_ACCESS" => Some(AccessRestriction::Unauthorized),
            "SERVICE_UNAVAILABLE" => Some(AccessRestriction::ServiceUnavailable),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccessRestriction::Blacklisted => "CLIENT_BLACKLISTED",
            AccessRestriction::Inactive => "CLIENT_INACTIVE",
            AccessRestriction::TransactionBlocked => "CLIENT_TRANSACTION_BLOCKED",
            AccessRestriction::NotFound => "CLIENT_NOT_FOUND",
            AccessRestriction::Unauthorized => "UNAUTHORIZED_ACCESS",
            AccessRestriction::ServiceUnavailable => "SERVICE_UNAVAILABLE",
        }
    }

    /// Tailored advisory sentence for the restriction.
    pub fn advisory(&self) -> &'static str {
        match self {
            AccessRestriction::Blacklisted => {
                "Your account has been temporarily suspended. Please contact customer support for assistance."
            }
            AccessRestriction::Inactive => {
                "Your account is currently inactive. Please contact customer support to reactivate your account."
            }
            AccessRestriction::TransactionBlocked => {
                "You are not authorized to perform this transaction. Please contact customer support for assistance."
            }
            AccessRestriction::NotFound => {
                "Client account not found. Please contact customer support for assistance."
            }
            AccessRestriction::Unauthorized => {
                "You are not authorized to access this service. Please contact customer support for assistance."
            }
            AccessRestriction::ServiceUnavailable => {
                "Service is temporarily unavailable. Please try again later or contact customer support."
            }
        }
    }
}

/// Error envelope the services emit for failed requests. Every field is
/// optional here because gateway errors and proxy bodies do not always
/// follow the format.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

/// Whether a request carried the session token.
///
/// A 401 on an authenticated request means the session is gone; a 401 on a
/// credential request (login, register, first-admin setup) is an ordinary
/// rejection of the submitted credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Credentials,
    Authenticated,
}

/// Unified client-side API error.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 401 on an authenticated request. The application shell reacts by
    /// clearing the stored token and asking the user to log in again.
    #[error("Authentication required. Please log in again.")]
    SessionExpired,

    /// The service reported a standing restriction on the caller's account.
    #[error("{message}")]
    AccessRestricted {
        code: AccessRestriction,
        message: String,
    },

    /// Any other non-success response. `message` is the body's message
    /// field when one was present; display falls back to a fixed string
    /// per status otherwise.
    #[error("{}", api_message(.status, .message))]
    Api {
        status: StatusCode,
        code: Option<String>,
        message: Option<String>,
    },

    /// The request never produced a response (connect, timeout, body read).
    #[error("{}", transport_message(.0))]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// User-facing message for this error.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Machine error code, when the response carried one.
    pub fn code(&self) -> Option<&str> {
        match self {
            ApiError::AccessRestricted { code, .. } => Some(code.as_str()),
            ApiError::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// HTTP status of the failed response, if there was one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::SessionExpired => Some(StatusCode::UNAUTHORIZED),
            ApiError::Api { status, .. } => Some(*status),
            ApiError::AccessRestricted { .. } => None,
            ApiError::Transport(err) => err.status(),
        }
    }

    /// The account restriction behind this error, if that is what it is.
    pub fn access_restriction(&self) -> Option<AccessRestriction> {
        match self {
            ApiError::AccessRestricted { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Tailored advisory for restriction errors; the ordinary message
    /// for everything else.
    pub fn advisory(&self) -> String {
        match self {
            ApiError::AccessRestricted { code, .. } => code.advisory().to_string(),
            other => other.to_string(),
        }
    }
}

/// Decode a failed response into an [`ApiError`].
///
/// Message selection: the body's `message` field verbatim when present and
/// non-empty, otherwise a fixed fallback keyed by status.
pub fn decode_response(status: StatusCode, body: &str, kind: RequestKind) -> ApiError {
    if kind == RequestKind::Authenticated && status == StatusCode::UNAUTHORIZED {
        return ApiError::SessionExpired;
    }

    let envelope: ErrorEnvelope = serde_json::from_str(body).unwrap_or_default();
    let message = envelope.message.filter(|m| !m.is_empty());

    if let Some(code) = envelope.error_code.as_deref() {
        if let Some(restriction) = AccessRestriction::from_code(code) {
            return ApiError::AccessRestricted {
                code: restriction,
                message: message.unwrap_or_else(|| fallback_message(status).to_string()),
            };
        }
    }

    ApiError::Api {
        status,
        code: envelope.error_code,
        message,
    }
}

/// Fixed fallback message for a response that carried no usable body.
pub fn fallback_message(status: StatusCode) -> &'static str {
    match status {
        StatusCode::UNAUTHORIZED => "Authentication required. Please log in again.",
        StatusCode::FORBIDDEN => {
            "Access denied. You do not have permission to perform this action."
        }
        StatusCode::NOT_FOUND => "The requested resource was not found.",
        StatusCode::INTERNAL_SERVER_ERROR => {
            "An internal server error occurred. Please try again later."
        }
        _ => "An error occurred while processing your request.",
    }
}

fn api_message(status: &StatusCode, message: &Option<String>) -> String {
    match message {
        Some(m) => m.clone(),
        None => fallback_message(*status).to_string(),
    }
}

fn transport_message(err: &reqwest::Error) -> String {
    let text = err.to_string();
    if text.is_empty() {
        "An unexpected error occurred. Please try again later.".to_string()
    } else {
        text
    }
}
