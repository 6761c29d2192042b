// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Error types for the Guggy client.

use std::path::PathBuf;
use std::time::Duration;

use http::StatusCode;
use thiserror::Error;

/// Boxed error returned by [`Transport`](crate::Transport) implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias for Guggy operations.
pub type Result<T> = std::result::Result<T, GuggyError>;

/// Errors that can occur when configuring or using the Guggy client.
#[derive(Debug, Error)]
pub enum GuggyError {
	/// Missing or blank configuration, such as the API key.
	#[error("configuration error: {message}")]
	Config { message: String },

	/// The secret file named by a `*_FILE` variable could not be read.
	#[error("failed to read secret file at {path}: {source}")]
	SecretFile {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// The search request was rejected before being sent.
	#[error("invalid search request: {0}")]
	Validation(String),

	/// Network-level failure reported by the transport.
	#[error("network error: {0}")]
	Network(#[source] BoxError),

	/// The service answered with a non-2xx status.
	#[error("Guggy API error: {}", status_line(.status))]
	Status { status: StatusCode },

	/// The caller cancelled the search.
	#[error("search cancelled")]
	Cancelled,

	/// The caller-supplied deadline elapsed before the service answered.
	#[error("search deadline of {0:?} exceeded")]
	DeadlineExceeded(Duration),

	/// The request body could not be serialized.
	#[error("failed to encode request: {0}")]
	Encode(#[source] serde_json::Error),

	/// The outgoing HTTP request could not be built.
	#[error("failed to build HTTP request: {0}")]
	InvalidRequest(#[from] http::Error),

	/// The response body is not valid JSON for a search response.
	#[error("invalid response from Guggy: {0}")]
	Decode(#[source] serde_json::Error),

	/// The service returned a syntactically valid but empty response.
	#[error("server sent back a blank response")]
	EmptyResponse,
}

fn status_line(status: &StatusCode) -> String {
	match status.canonical_reason() {
		Some(reason) => format!("{} {reason}", status.as_u16()),
		None => status.as_u16().to_string(),
	}
}

impl GuggyError {
	pub(crate) fn config(message: impl Into<String>) -> Self {
		GuggyError::Config {
			message: message.into(),
		}
	}

	/// True for configuration errors raised at construction time.
	pub fn is_config(&self) -> bool {
		matches!(self, GuggyError::Config { .. } | GuggyError::SecretFile { .. })
	}

	/// True for network failures and non-2xx responses.
	pub fn is_transport(&self) -> bool {
		matches!(self, GuggyError::Network(_) | GuggyError::Status { .. })
	}

	/// True when the search was aborted by the caller's token or deadline.
	pub fn is_cancellation(&self) -> bool {
		matches!(self, GuggyError::Cancelled | GuggyError::DeadlineExceeded(_))
	}

	pub fn is_decode(&self) -> bool {
		matches!(self, GuggyError::Decode(_))
	}

	/// HTTP status of a non-2xx response, if that is what this error is.
	pub fn status(&self) -> Option<StatusCode> {
		match self {
			GuggyError::Status { status } => Some(*status),
			_ => None,
		}
	}
}
