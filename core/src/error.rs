//! Error types for the Pagecraft client.
//!
//! # Design
//! Two kinds only. `ConfigError` is raised while constructing the client and
//! never after. `ApiError::Request` covers every failed call, whether the
//! server answered with a non-2xx status or the connection never completed
//! (status `0`); it is not split into client/server/network kinds.
//! `Deserialization` covers a 2xx body that does not fit the declared shape.

use std::fmt;

/// Name embedded in every request error message.
pub const SERVICE_NAME: &str = "Pagecraft";

/// Missing credentials detected by `ApiConfig::validate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    MissingApiToken,
    MissingProjectId,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingApiToken => {
                write!(f, "{SERVICE_NAME} API token is required but was not provided")
            }
            ConfigError::MissingProjectId => {
                write!(f, "{SERVICE_NAME} project id is required but was not provided")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors returned by `PagecraftClient` parse and fetch methods.
#[derive(Debug)]
pub enum ApiError {
    /// Non-2xx response, or a transport failure reported with status 0.
    Request {
        status: u16,
        message: String,
        body: String,
    },

    /// The response body could not be deserialized into the expected type.
    Deserialization(String),
}

impl ApiError {
    /// Status of a request error; `None` for deserialization failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Request { status, .. } => Some(*status),
            ApiError::Deserialization(_) => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Request { status, message, .. } => {
                write!(f, "{SERVICE_NAME} API error {status}: {message}")
            }
            ApiError::Deserialization(msg) => {
                write!(f, "{SERVICE_NAME} response could not be decoded: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
