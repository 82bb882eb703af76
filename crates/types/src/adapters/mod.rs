//! Adapter domain model, errors and trait

pub mod errors;
pub mod traits;

pub use errors::{AdapterError, ErrorKind};
pub use traits::SupplyAdapter;

/// Result type for adapter operations
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Descriptive information about an adapter implementation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adapter {
	/// Unique identifier for the adapter
	pub adapter_id: String,

	/// Human-readable name
	pub name: String,

	/// Version of the adapter implementation
	pub version: String,
}

impl Adapter {
	pub fn new(adapter_id: &str, name: &str) -> Self {
		Self {
			adapter_id: adapter_id.to_string(),
			name: name.to_string(),
			version: "1.0.0".to_string(),
		}
	}
}
