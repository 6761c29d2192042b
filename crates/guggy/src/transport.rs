// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Pluggable HTTP execution for the search client.
//!
//! [`SearchClient`](crate::SearchClient) builds a complete [`http::Request`]
//! and hands it to a [`Transport`]. The default is [`ReqwestTransport`]; tests
//! and embedders can swap in their own implementation with
//! [`SearchClient::set_transport`](crate::SearchClient::set_transport).

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use tracing::{debug, error};

use crate::error::{BoxError, GuggyError, Result};

/// Default timeout applied by [`ReqwestTransport`].
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Executes one HTTP request and returns the fully buffered response.
///
/// Implementations must return non-2xx responses as `Ok`; the client decides
/// what a status means. `Err` is reserved for failures where no response was
/// received at all.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
	async fn execute(
		&self,
		request: http::Request<Bytes>,
	) -> std::result::Result<http::Response<Bytes>, BoxError>;
}

#[async_trait]
impl<T> Transport for Arc<T>
where
	T: Transport + ?Sized,
{
	async fn execute(
		&self,
		request: http::Request<Bytes>,
	) -> std::result::Result<http::Response<Bytes>, BoxError> {
		(**self).execute(request).await
	}
}

/// [`Transport`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
	client: Client,
}

impl ReqwestTransport {
	/// Creates a transport with the default timeout and User-Agent.
	pub fn new() -> Result<Self> {
		Self::with_options(DEFAULT_REQUEST_TIMEOUT, user_agent())
	}

	/// Creates a transport with a custom timeout and User-Agent.
	pub fn with_options(timeout: Duration, user_agent: impl Into<String>) -> Result<Self> {
		let client = Client::builder()
			.user_agent(user_agent.into())
			.timeout(timeout)
			.build()
			.map_err(|e| GuggyError::config(format!("failed to build HTTP client: {e}")))?;
		Ok(Self { client })
	}

	/// Wraps an existing `reqwest` client.
	pub fn from_client(client: Client) -> Self {
		Self { client }
	}
}

#[async_trait]
impl Transport for ReqwestTransport {
	async fn execute(
		&self,
		request: http::Request<Bytes>,
	) -> std::result::Result<http::Response<Bytes>, BoxError> {
		let request = reqwest::Request::try_from(request)?;
		debug!(method = %request.method(), url = %request.url(), "Executing HTTP request");

		let response = self.client.execute(request).await.map_err(|e| {
			if e.is_timeout() {
				error!("Request timed out");
			} else {
				error!(error = %e, "Network error during Guggy request");
			}
			e
		})?;

		let mut builder = http::Response::builder()
			.status(response.status())
			.version(response.version());
		if let Some(headers) = builder.headers_mut() {
			headers.extend(response.headers().clone());
		}

		// Always drain the body so the connection goes back to the pool.
		let body = response.bytes().await?;
		Ok(builder.body(body)?)
	}
}

/// Returns the User-Agent sent by the default transport.
///
/// Format: `guggy-rust/{crate version}`
pub fn user_agent() -> String {
	format!("guggy-rust/{}", env!("CARGO_PKG_VERSION"))
}
