// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Guggy search client implementation.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::Method;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, instrument, trace, warn};

use crate::config::{require_api_key_env, API_KEY_ENV};
use crate::error::{GuggyError, Result};
use crate::key::ApiKey;
use crate::transport::{self, ReqwestTransport, Transport, DEFAULT_REQUEST_TIMEOUT};
use crate::types::{SearchRequest, SearchResponse, WireRequest};

pub const DEFAULT_BASE_URL: &str = "https://text2gif.guggy.com/v2";
const SEARCH_PATH: &str = "/guggify";
const API_KEY_HEADER: &str = "apiKey";

/// Client for the Guggy text-to-GIF API.
///
/// Cloning is cheap and clones share configuration: a key rotated through one
/// handle is used by every other handle on its next search.
#[derive(Debug, Clone)]
pub struct SearchClient {
	inner: Arc<RwLock<ClientState>>,
}

#[derive(Debug)]
struct ClientState {
	api_key: ApiKey,
	base_url: String,
	transport: Arc<dyn Transport>,
}

/// What one search needs from the shared state, taken under a single read.
struct Snapshot {
	api_key: ApiKey,
	url: String,
	transport: Arc<dyn Transport>,
}

/// Builder for constructing a [`SearchClient`].
#[derive(Debug)]
pub struct SearchClientBuilder {
	api_key: Option<String>,
	base_url: Option<String>,
	request_timeout: Duration,
	user_agent: Option<String>,
	transport: Option<Arc<dyn Transport>>,
}

impl SearchClientBuilder {
	pub fn new() -> Self {
		Self {
			api_key: None,
			base_url: None,
			request_timeout: DEFAULT_REQUEST_TIMEOUT,
			user_agent: None,
			transport: None,
		}
	}

	/// Sets the API key. Required.
	pub fn api_key(mut self, key: impl Into<String>) -> Self {
		self.api_key = Some(key.into());
		self
	}

	/// Sets a custom base URL for the API (useful for testing).
	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.base_url = Some(url.into());
		self
	}

	/// Sets the timeout of the default transport.
	///
	/// Ignored when a custom transport is supplied.
	pub fn request_timeout(mut self, timeout: Duration) -> Self {
		self.request_timeout = timeout;
		self
	}

	/// Sets the User-Agent of the default transport.
	///
	/// Ignored when a custom transport is supplied.
	pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = Some(user_agent.into());
		self
	}

	/// Uses `transport` instead of the default `reqwest` one.
	pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
		self.transport = Some(Arc::new(transport));
		self
	}

	pub fn build(self) -> Result<SearchClient> {
		let api_key = self
			.api_key
			.ok_or_else(|| GuggyError::config("expecting a non-blank API key"))?;
		let api_key = ApiKey::new(api_key)?;

		let transport = match self.transport {
			Some(transport) => transport,
			None => Arc::new(ReqwestTransport::with_options(
				self.request_timeout,
				self.user_agent.unwrap_or_else(transport::user_agent),
			)?),
		};

		let base_url = normalize_base_url(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL));
		debug!(base_url = %base_url, "Guggy client initialized");

		Ok(SearchClient {
			inner: Arc::new(RwLock::new(ClientState {
				api_key,
				base_url,
				transport,
			})),
		})
	}
}

impl Default for SearchClientBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl SearchClient {
	/// Creates a client with the given API key and the default transport.
	pub fn new(api_key: impl Into<String>) -> Result<Self> {
		Self::builder().api_key(api_key).build()
	}

	/// Creates a client from `GUGGY_API_KEY` (or `GUGGY_API_KEY_FILE`).
	pub fn from_env() -> Result<Self> {
		Self::from_env_var(API_KEY_ENV)
	}

	/// Creates a client from a caller-chosen environment variable.
	pub fn from_env_var(var: &str) -> Result<Self> {
		let api_key = require_api_key_env(var)?;
		Self::new(api_key.expose())
	}

	pub fn builder() -> SearchClientBuilder {
		SearchClientBuilder::new()
	}

	/// Replaces the transport used by subsequent searches.
	///
	/// Searches already in flight keep the transport they started with.
	pub fn set_transport(&self, transport: impl Transport + 'static) {
		self.write().transport = Arc::new(transport);
	}

	/// Replaces the API key used by subsequent searches.
	///
	/// A blank key is rejected and the current key is kept.
	pub fn set_api_key(&self, key: impl Into<String>) -> Result<()> {
		let api_key = ApiKey::new(key)?;
		self.write().api_key = api_key;
		debug!("Guggy API key rotated");
		Ok(())
	}

	/// Replaces the base URL used by subsequent searches.
	pub fn set_base_url(&self, url: impl Into<String>) {
		self.write().base_url = normalize_base_url(&url.into());
	}

	pub fn base_url(&self) -> String {
		self.read().base_url.clone()
	}

	/// Performs a search, waiting until the transport completes or fails.
	#[instrument(skip(self, request), fields(lang = ?request.language))]
	pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
		self.search_inner(request).await
	}

	/// Performs a search that is aborted when `token` is cancelled.
	#[instrument(skip(self, request, token), fields(lang = ?request.language))]
	pub async fn search_with_cancellation(
		&self,
		request: &SearchRequest,
		token: &CancellationToken,
	) -> Result<SearchResponse> {
		tokio::select! {
			biased;
			_ = token.cancelled() => {
				warn!("Search cancelled by caller");
				Err(GuggyError::Cancelled)
			}
			result = self.search_inner(request) => result,
		}
	}

	/// Performs a search that is aborted once `timeout` has elapsed.
	#[instrument(skip(self, request), fields(lang = ?request.language))]
	pub async fn search_with_timeout(
		&self,
		request: &SearchRequest,
		timeout: Duration,
	) -> Result<SearchResponse> {
		match tokio::time::timeout(timeout, self.search_inner(request)).await {
			Ok(result) => result,
			Err(_) => {
				warn!(?timeout, "Search deadline exceeded");
				Err(GuggyError::DeadlineExceeded(timeout))
			}
		}
	}

	async fn search_inner(&self, request: &SearchRequest) -> Result<SearchResponse> {
		if request.query.trim().is_empty() {
			return Err(GuggyError::Validation(
				"expecting a non-blank query".to_string(),
			));
		}

		let body = serde_json::to_vec(&WireRequest::from(request)).map_err(GuggyError::Encode)?;
		let snapshot = self.snapshot();

		let http_request = http::Request::builder()
			.method(Method::POST)
			.uri(&snapshot.url)
			.header(CONTENT_TYPE, "application/json")
			.header(API_KEY_HEADER, snapshot.api_key.expose())
			.body(Bytes::from(body))?;

		debug!(url = %snapshot.url, "Sending search request to Guggy");
		trace!(query = %request.query, "Search parameters");

		let response = snapshot
			.transport
			.execute(http_request)
			.await
			.map_err(GuggyError::Network)?;

		let status = response.status();
		debug!(status = %status, "Received response from Guggy");

		if !status.is_success() {
			error!(status = status.as_u16(), "Guggy API error");
			return Err(GuggyError::Status { status });
		}

		let body = response.into_body();
		trace!(body = %String::from_utf8_lossy(&body), "Response body");

		let response: SearchResponse = serde_json::from_slice(&body).map_err(|e| {
			error!(error = %e, "Failed to parse Guggy response");
			GuggyError::Decode(e)
		})?;

		if response.is_empty() {
			error!("Guggy returned a blank response");
			return Err(GuggyError::EmptyResponse);
		}

		debug!(
			request_id = %response.request_id,
			gif_count = response.gifs.len(),
			sticker_count = response.stickers.len(),
			"Search completed successfully"
		);

		Ok(response)
	}

	fn snapshot(&self) -> Snapshot {
		let state = self.read();
		Snapshot {
			api_key: state.api_key.clone(),
			url: format!("{}{SEARCH_PATH}", state.base_url),
			transport: Arc::clone(&state.transport),
		}
	}

	// The state is always left valid, so a poisoned lock is safe to reuse.
	fn read(&self) -> std::sync::RwLockReadGuard<'_, ClientState> {
		self.inner.read().unwrap_or_else(PoisonError::into_inner)
	}

	fn write(&self) -> std::sync::RwLockWriteGuard<'_, ClientState> {
		self.inner.write().unwrap_or_else(PoisonError::into_inner)
	}
}

fn normalize_base_url(url: &str) -> String {
	url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::BoxError;
	use crate::language::Language;
	use async_trait::async_trait;
	use http::StatusCode;
	use std::sync::atomic::{AtomicUsize, Ordering};
	use std::sync::Mutex;

	/// Transport that answers every request with a canned response and
	/// records what it was sent.
	#[derive(Debug, Default)]
	struct StubTransport {
		status: u16,
		body: &'static str,
		calls: AtomicUsize,
		seen: Mutex<Vec<http::Request<Bytes>>>,
	}

	impl StubTransport {
		fn new(status: u16, body: &'static str) -> Arc<Self> {
			Arc::new(Self {
				status,
				body,
				..Default::default()
			})
		}
	}

	#[async_trait]
	impl Transport for StubTransport {
		async fn execute(
			&self,
			request: http::Request<Bytes>,
		) -> std::result::Result<http::Response<Bytes>, BoxError> {
			self.calls.fetch_add(1, Ordering::SeqCst);
			self.seen.lock().unwrap().push(request);
			Ok(
				http::Response::builder()
					.status(self.status)
					.body(Bytes::from_static(self.body.as_bytes()))?,
			)
		}
	}

	/// Transport that never answers.
	#[derive(Debug)]
	struct PendingTransport;

	#[async_trait]
	impl Transport for PendingTransport {
		async fn execute(
			&self,
			_request: http::Request<Bytes>,
		) -> std::result::Result<http::Response<Bytes>, BoxError> {
			std::future::pending().await
		}
	}

	#[derive(Debug)]
	struct FailingTransport;

	#[async_trait]
	impl Transport for FailingTransport {
		async fn execute(
			&self,
			_request: http::Request<Bytes>,
		) -> std::result::Result<http::Response<Bytes>, BoxError> {
			Err("connection refused".into())
		}
	}

	const ONE_GIF: &str = r#"{"reqId":"r-1","animated":[{"gif":{"original":{"secureUrl":"https://cdn/a.gif"}}}],"stickers":[]}"#;

	fn client_with(transport: impl Transport + 'static) -> SearchClient {
		SearchClient::builder()
			.api_key("test-api-key-1")
			.transport(transport)
			.build()
			.unwrap()
	}

	#[test]
	fn blank_key_is_a_config_error() {
		assert!(SearchClient::new("").unwrap_err().is_config());
		assert!(SearchClient::new("   ").unwrap_err().is_config());
		assert!(SearchClient::builder().build().unwrap_err().is_config());
	}

	#[test]
	fn from_env_var_names_the_variable() {
		let var = "GUGGY_CLIENT_TEST_UNSET_KEY";
		std::env::remove_var(var);
		std::env::remove_var(format!("{var}_FILE"));

		let err = SearchClient::from_env_var(var).unwrap_err();
		assert!(err.is_config());
		assert!(err.to_string().contains(var));
	}

	#[test]
	fn base_url_is_normalized() {
		let client = SearchClient::builder()
			.api_key("key")
			.base_url("http://localhost:8080/v2/")
			.build()
			.unwrap();
		assert_eq!(client.base_url(), "http://localhost:8080/v2");

		client.set_base_url("http://other/");
		assert_eq!(client.base_url(), "http://other");
	}

	#[test]
	fn default_base_url() {
		let client = SearchClient::new("key").unwrap();
		assert_eq!(client.base_url(), DEFAULT_BASE_URL);
	}

	#[test]
	fn set_api_key_rejects_blank_key() {
		let client = SearchClient::new("key").unwrap();
		assert!(client.set_api_key(" ").unwrap_err().is_config());
		assert_eq!(client.read().api_key.expose(), "key");
	}

	#[tokio::test]
	async fn empty_query_is_rejected_without_network_call() {
		let stub = StubTransport::new(200, ONE_GIF);
		let client = client_with(Arc::clone(&stub));

		for request in [SearchRequest::default(), SearchRequest::new("  \n")] {
			let err = client.search(&request).await.unwrap_err();
			assert!(matches!(err, GuggyError::Validation(_)));
		}
		assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn request_carries_headers_and_wire_body() {
		let stub = StubTransport::new(200, ONE_GIF);
		let client = client_with(Arc::clone(&stub));

		let request = SearchRequest::new("What is the weather up there?").with_language(Language::German);
		client.search(&request).await.unwrap();

		let seen = stub.seen.lock().unwrap();
		let sent = &seen[0];
		assert_eq!(sent.method(), Method::POST);
		assert_eq!(
			sent.uri().to_string(),
			"https://text2gif.guggy.com/v2/guggify"
		);
		assert_eq!(sent.headers()[CONTENT_TYPE], "application/json");
		assert_eq!(sent.headers()["apiKey"], "test-api-key-1");

		let body: serde_json::Value = serde_json::from_slice(sent.body()).unwrap();
		assert_eq!(
			body,
			serde_json::json!({"sentence": "What is the weather up there?", "lang": "de"})
		);
	}

	#[tokio::test]
	async fn unauthorized_status_is_a_transport_error() {
		let stub = StubTransport::new(401, "not json at all");
		let client = client_with(stub);

		let err = client.search(&SearchRequest::new("hi")).await.unwrap_err();
		assert!(err.is_transport());
		assert!(!err.is_decode());
		assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
		assert!(err.to_string().contains("Unauthorized"));
	}

	#[tokio::test]
	async fn zero_value_response_is_rejected() {
		let stub = StubTransport::new(200, r#"{"reqId":"","stickers":null,"animated":null}"#);
		let client = client_with(stub);

		let err = client.search(&SearchRequest::new("hi")).await.unwrap_err();
		assert!(matches!(err, GuggyError::EmptyResponse));
	}

	#[tokio::test]
	async fn malformed_body_is_a_decode_error() {
		let stub = StubTransport::new(200, r#"{"reqId": 42"#);
		let client = client_with(stub);

		let err = client.search(&SearchRequest::new("hi")).await.unwrap_err();
		assert!(err.is_decode());
	}

	#[tokio::test]
	async fn transport_failure_is_a_network_error() {
		let client = client_with(FailingTransport);

		let err = client.search(&SearchRequest::new("hi")).await.unwrap_err();
		assert!(matches!(err, GuggyError::Network(_)));
		assert!(err.to_string().contains("connection refused"));
	}

	#[tokio::test]
	async fn successful_search_returns_collections() {
		let client = client_with(StubTransport::new(200, ONE_GIF));

		let response = client.search(&SearchRequest::new("hi")).await.unwrap();
		assert_eq!(response.request_id, "r-1");
		assert_eq!(response.gifs.len(), 1);
		assert!(response.stickers.is_empty());
	}

	#[tokio::test]
	async fn set_transport_affects_next_search() {
		let client = client_with(StubTransport::new(500, ""));
		assert!(client.search(&SearchRequest::new("hi")).await.is_err());

		client.set_transport(StubTransport::new(200, ONE_GIF));
		assert!(client.search(&SearchRequest::new("hi")).await.is_ok());
	}

	#[tokio::test]
	async fn rotated_key_is_sent_on_next_search() {
		let stub = StubTransport::new(200, ONE_GIF);
		let client = client_with(Arc::clone(&stub));

		client.set_api_key("test-api-key-2").unwrap();
		client.search(&SearchRequest::new("hi")).await.unwrap();

		assert_eq!(stub.seen.lock().unwrap()[0].headers()["apiKey"], "test-api-key-2");
	}

	#[tokio::test]
	async fn cancellation_before_response_is_reported() {
		let client = client_with(PendingTransport);
		let token = CancellationToken::new();

		let cancel = token.clone();
		tokio::spawn(async move {
			tokio::time::sleep(Duration::from_millis(20)).await;
			cancel.cancel();
		});

		let err = client
			.search_with_cancellation(&SearchRequest::new("hi"), &token)
			.await
			.unwrap_err();
		assert!(matches!(err, GuggyError::Cancelled));
		assert!(err.is_cancellation());
	}

	#[tokio::test]
	async fn already_cancelled_token_skips_the_request() {
		let stub = StubTransport::new(200, ONE_GIF);
		let client = client_with(Arc::clone(&stub));
		let token = CancellationToken::new();
		token.cancel();

		let err = client
			.search_with_cancellation(&SearchRequest::new("hi"), &token)
			.await
			.unwrap_err();
		assert!(matches!(err, GuggyError::Cancelled));
		assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn uncancelled_token_lets_search_complete() {
		let client = client_with(StubTransport::new(200, ONE_GIF));
		let token = CancellationToken::new();

		let response = client
			.search_with_cancellation(&SearchRequest::new("hi"), &token)
			.await
			.unwrap();
		assert_eq!(response.gifs.len(), 1);
	}

	#[tokio::test]
	async fn timeout_before_response_is_reported() {
		let client = client_with(PendingTransport);

		let err = client
			.search_with_timeout(&SearchRequest::new("hi"), Duration::from_millis(50))
			.await
			.unwrap_err();
		assert!(matches!(err, GuggyError::DeadlineExceeded(d) if d == Duration::from_millis(50)));
		assert!(err.is_cancellation());
	}

	#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
	async fn concurrent_key_rotation_never_sends_a_torn_key() {
		let stub = StubTransport::new(200, ONE_GIF);
		let client = client_with(Arc::clone(&stub));

		let mut handles = Vec::new();
		for i in 0..32 {
			let client = client.clone();
			handles.push(tokio::spawn(async move {
				if i % 2 == 0 {
					let key = if i % 4 == 0 { "test-api-key-1" } else { "test-api-key-2" };
					client.set_api_key(key).unwrap();
				}
				client.search(&SearchRequest::new("hi")).await.unwrap();
			}));
		}
		for handle in handles {
			handle.await.unwrap();
		}

		let seen = stub.seen.lock().unwrap();
		assert_eq!(seen.len(), 32);
		for request in seen.iter() {
			let key = request.headers()["apiKey"].to_str().unwrap();
			assert!(key == "test-api-key-1" || key == "test-api-key-2", "unexpected key {key}");
		}
	}
}
