//! Error types for adapter operations

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::DecodeError;

/// Coarse failure taxonomy surfaced alongside each failed chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
	/// Malformed or out-of-range data in a response
	Decode,
	/// Deployment defect: unmapped chain type or missing static lookup
	Configuration,
	/// Network failure, timeout, non-success HTTP status or RPC error object
	Transport,
	/// Metadata pre-resolution exhausted every strategy
	Resolution,
}

/// Adapter operation errors; every variant names the chain it came from
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdapterError {
	#[error("decode error: {reason}")]
	Decode { chain_id: String, reason: String },

	#[error("configuration error: {reason}")]
	Configuration { chain_id: String, reason: String },

	#[error("request failed: {reason}")]
	Transport { chain_id: String, reason: String },

	#[error("HTTP {status_code}: {reason}")]
	HttpStatus {
		chain_id: String,
		status_code: u16,
		reason: String,
	},

	#[error("RPC error: {message}")]
	Rpc {
		chain_id: String,
		code: Option<i64>,
		message: String,
	},

	#[error("timeout occurred after {timeout_ms}ms")]
	Timeout { chain_id: String, timeout_ms: u64 },

	#[error("metadata resolution failed: {reason}")]
	Resolution { chain_id: String, reason: String },
}

impl AdapterError {
	pub fn decode(chain_id: &str, error: DecodeError) -> Self {
		Self::Decode {
			chain_id: chain_id.to_string(),
			reason: error.to_string(),
		}
	}

	pub fn configuration(chain_id: &str, reason: impl Into<String>) -> Self {
		Self::Configuration {
			chain_id: chain_id.to_string(),
			reason: reason.into(),
		}
	}

	pub fn transport(chain_id: &str, reason: impl Into<String>) -> Self {
		Self::Transport {
			chain_id: chain_id.to_string(),
			reason: reason.into(),
		}
	}

	pub fn rpc(chain_id: &str, code: Option<i64>, message: impl Into<String>) -> Self {
		Self::Rpc {
			chain_id: chain_id.to_string(),
			code,
			message: message.into(),
		}
	}

	pub fn resolution(chain_id: &str, reason: impl Into<String>) -> Self {
		Self::Resolution {
			chain_id: chain_id.to_string(),
			reason: reason.into(),
		}
	}

	pub fn timeout(chain_id: &str, timeout_ms: u64) -> Self {
		Self::Timeout {
			chain_id: chain_id.to_string(),
			timeout_ms,
		}
	}

	/// Create an HTTP failure error from response status with default reason
	pub fn from_http_failure(chain_id: &str, status_code: u16) -> Self {
		let reason = match status_code {
			400 => "Bad Request".to_string(),
			401 => "Unauthorized".to_string(),
			403 => "Forbidden".to_string(),
			404 => "Not Found".to_string(),
			408 => "Request Timeout".to_string(),
			429 => "Too Many Requests".to_string(),
			500 => "Internal Server Error".to_string(),
			502 => "Bad Gateway".to_string(),
			503 => "Service Unavailable".to_string(),
			504 => "Gateway Timeout".to_string(),
			_ => format!("HTTP Error {}", status_code),
		};

		Self::HttpStatus {
			chain_id: chain_id.to_string(),
			status_code,
			reason,
		}
	}

	/// Position of this error in the four-kind taxonomy
	pub fn kind(&self) -> ErrorKind {
		match self {
			AdapterError::Decode { .. } => ErrorKind::Decode,
			AdapterError::Configuration { .. } => ErrorKind::Configuration,
			AdapterError::Transport { .. }
			| AdapterError::HttpStatus { .. }
			| AdapterError::Rpc { .. }
			| AdapterError::Timeout { .. } => ErrorKind::Transport,
			AdapterError::Resolution { .. } => ErrorKind::Resolution,
		}
	}

	/// Chain the failure originated from
	pub fn chain_id(&self) -> &str {
		match self {
			AdapterError::Decode { chain_id, .. }
			| AdapterError::Configuration { chain_id, .. }
			| AdapterError::Transport { chain_id, .. }
			| AdapterError::HttpStatus { chain_id, .. }
			| AdapterError::Rpc { chain_id, .. }
			| AdapterError::Timeout { chain_id, .. }
			| AdapterError::Resolution { chain_id, .. } => chain_id,
		}
	}

	/// Re-attribute the error to a chain (used where the originating call was chain-agnostic)
	pub fn with_chain(mut self, id: &str) -> Self {
		match &mut self {
			AdapterError::Decode { chain_id, .. }
			| AdapterError::Configuration { chain_id, .. }
			| AdapterError::Transport { chain_id, .. }
			| AdapterError::HttpStatus { chain_id, .. }
			| AdapterError::Rpc { chain_id, .. }
			| AdapterError::Timeout { chain_id, .. }
			| AdapterError::Resolution { chain_id, .. } => *chain_id = id.to_string(),
		}
		self
	}

	/// Extract HTTP status code from the error if available
	pub fn status_code(&self) -> Option<u16> {
		match self {
			AdapterError::HttpStatus { status_code, .. } => Some(*status_code),
			_ => None,
		}
	}
}
