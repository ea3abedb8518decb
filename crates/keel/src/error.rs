use std::io;

use crate::Tag;
use crate::TransportError;

/// Errors returned by generated builders, decoders, and client methods.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
	#[error("failed to encode value: {0}")]
	Encode(#[source] io::Error),

	#[error("failed to decode value: {0}")]
	Decode(#[source] io::Error),

	#[error("data is {actual} bytes long, expected at least {expected}")]
	DataTooShort { expected: usize, actual: usize },

	#[error("tag mismatch: expected {expected}, found {actual}")]
	TagMismatch { expected: Tag, actual: Tag },

	#[error("program data log is not valid base64: {0}")]
	InvalidLogData(#[from] base64::DecodeError),

	#[error("submission failed: {0}")]
	Submit(#[source] TransportError),

	#[error("account fetch failed: {0}")]
	Fetch(#[source] TransportError),
}

/// Why an event could not be written into an
/// [`EventBuffer`](crate::EventBuffer).
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
	#[error("event needs {size} bytes but the limit is {max}")]
	TooLarge { size: usize, max: usize },

	#[error("failed to encode event: {0}")]
	Encode(#[source] io::Error),
}
