//! Shared HTTP and JSON-RPC plumbing for adapters
//!
//! Every failure is attributed to the chain being queried: transport errors,
//! timeouts and non-success statuses become transport-kind errors, bodies
//! that are not the expected JSON become decode errors, and JSON-RPC error
//! objects become [`AdapterError::Rpc`].

use std::sync::Arc;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use supply_types::{AdapterError, AdapterResult, ChainConfig, DecodeError};
use tracing::debug;
use url::Url;

use crate::client_cache::{ClientCache, ClientConfig};

/// Default bound on a single network call
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Default bound on a catalog/metadata lookup
pub const DEFAULT_CATALOG_TIMEOUT_MS: u64 = 15_000;

/// Longest response excerpt carried into an error message
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Timeout classes used by adapters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdapterTimeouts {
	pub request_ms: u64,
	pub catalog_ms: u64,
}

impl Default for AdapterTimeouts {
	fn default() -> Self {
		Self {
			request_ms: DEFAULT_REQUEST_TIMEOUT_MS,
			catalog_ms: DEFAULT_CATALOG_TIMEOUT_MS,
		}
	}
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
	result: Option<T>,
	error: Option<JsonRpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcErrorObject {
	code: Option<i64>,
	message: Option<String>,
}

/// HTTP access shared by all adapters
#[derive(Debug, Clone)]
pub struct HttpContext {
	cache: ClientCache,
	timeouts: AdapterTimeouts,
}

impl HttpContext {
	pub fn new(cache: ClientCache, timeouts: AdapterTimeouts) -> Self {
		Self { cache, timeouts }
	}

	pub fn with_timeouts(timeouts: AdapterTimeouts) -> Self {
		Self::new(ClientCache::new(), timeouts)
	}

	pub fn timeouts(&self) -> AdapterTimeouts {
		self.timeouts
	}

	fn client(&self, chain_id: &str, timeout_ms: u64) -> AdapterResult<Arc<Client>> {
		self.cache
			.get_client(&ClientConfig::with_timeout(timeout_ms))
			.map_err(|e| AdapterError::transport(chain_id, format!("client setup failed: {}", e)))
	}

	/// GET a JSON document under the request timeout
	pub async fn get_json<T: DeserializeOwned>(
		&self,
		chain_id: &str,
		url: &str,
	) -> AdapterResult<T> {
		let timeout_ms = self.timeouts.request_ms;
		let client = self.client(chain_id, timeout_ms)?;
		debug!("GET {} (chain: {})", url, chain_id);
		let response = send(chain_id, client.get(url), timeout_ms).await?;
		read_json(chain_id, response).await
	}

	/// POST a JSON body and decode a JSON response
	pub async fn post_json<T: DeserializeOwned>(
		&self,
		chain_id: &str,
		url: &str,
		body: &Value,
		timeout_ms: u64,
	) -> AdapterResult<T> {
		let client = self.client(chain_id, timeout_ms)?;
		debug!("POST {} (chain: {})", url, chain_id);
		let response = send(chain_id, client.post(url).json(body), timeout_ms).await?;
		read_json(chain_id, response).await
	}

	/// Existence check: `Ok(true)` on a success status, `Ok(false)` on any other status
	pub async fn probe(&self, chain_id: &str, url: &str, timeout_ms: u64) -> AdapterResult<bool> {
		let client = self.client(chain_id, timeout_ms)?;
		debug!("Probing {} (chain: {})", url, chain_id);
		let response = client
			.get(url)
			.send()
			.await
			.map_err(|e| map_reqwest_error(chain_id, timeout_ms, e))?;
		Ok(response.status().is_success())
	}

	/// JSON-RPC 2.0 call returning the decoded `result` member
	pub async fn json_rpc<T: DeserializeOwned>(
		&self,
		chain_id: &str,
		url: &str,
		method: &str,
		params: Value,
	) -> AdapterResult<T> {
		let body = json!({
			"jsonrpc": "2.0",
			"id": 1,
			"method": method,
			"params": params,
		});
		let envelope: JsonRpcResponse<T> = self
			.post_json(chain_id, url, &body, self.timeouts.request_ms)
			.await?;

		if let Some(error) = envelope.error {
			return Err(AdapterError::rpc(
				chain_id,
				error.code,
				error
					.message
					.unwrap_or_else(|| format!("{} failed", method)),
			));
		}
		envelope
			.result
			.ok_or_else(|| AdapterError::decode(chain_id, DecodeError::missing("result")))
	}
}

impl Default for HttpContext {
	fn default() -> Self {
		Self::with_timeouts(AdapterTimeouts::default())
	}
}

/// Join a REST path onto the chain's RPC URL and append query parameters
pub fn endpoint(chain: &ChainConfig, path: &str, query: &[(&str, &str)]) -> AdapterResult<String> {
	let raw = format!("{}/{}", chain.base_url(), path.trim_start_matches('/'));
	let mut url = Url::parse(&raw).map_err(|e| {
		AdapterError::configuration(&chain.id, format!("invalid RPC URL '{}': {}", raw, e))
	})?;
	if !query.is_empty() {
		url.query_pairs_mut().extend_pairs(query.iter());
	}
	Ok(url.to_string())
}

async fn send(chain_id: &str, request: RequestBuilder, timeout_ms: u64) -> AdapterResult<Response> {
	let response = request
		.send()
		.await
		.map_err(|e| map_reqwest_error(chain_id, timeout_ms, e))?;

	let status = response.status();
	if status.is_success() {
		return Ok(response);
	}

	// Surface the server's own message when it sends one
	let body = response.text().await.unwrap_or_default();
	let message = serde_json::from_str::<Value>(&body)
		.ok()
		.and_then(|value| value.get("message").and_then(Value::as_str).map(str::to_string));
	Err(match message {
		Some(reason) => AdapterError::HttpStatus {
			chain_id: chain_id.to_string(),
			status_code: status.as_u16(),
			reason,
		},
		None => AdapterError::from_http_failure(chain_id, status.as_u16()),
	})
}

async fn read_json<T: DeserializeOwned>(chain_id: &str, response: Response) -> AdapterResult<T> {
	let body = response
		.text()
		.await
		.map_err(|e| AdapterError::transport(chain_id, format!("failed to read body: {}", e)))?;
	serde_json::from_str(&body).map_err(|e| {
		AdapterError::decode(
			chain_id,
			DecodeError::shape(format!("{} in body '{}'", e, excerpt(&body))),
		)
	})
}

fn map_reqwest_error(chain_id: &str, timeout_ms: u64, error: reqwest::Error) -> AdapterError {
	if error.is_timeout() {
		AdapterError::timeout(chain_id, timeout_ms)
	} else {
		AdapterError::transport(chain_id, error.to_string())
	}
}

fn excerpt(body: &str) -> String {
	if body.chars().count() <= MAX_ERROR_BODY_CHARS {
		return body.to_string();
	}
	let mut cut: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
	cut.push_str("...");
	cut
}
