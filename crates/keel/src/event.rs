use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use borsh::BorshSerialize;
use solana_msg::msg;

use crate::ClientError;
use crate::EmitError;
use crate::Event;
use crate::TAG_LEN;
use crate::Tag;

/// The largest event record, tag included, that will be published.
pub const MAX_EVENT_SIZE: usize = 1024;

/// Prefix the runtime puts in front of data logs.
pub const PROGRAM_DATA_PREFIX: &str = "Program data: ";

/// Destination for published event records.
pub trait LogSink {
	fn publish(&mut self, record: &[u8]);
}

/// The program log. Each record is written as a `Program data: <base64>`
/// line, the form in which data logs appear in transaction metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgramLog;

impl LogSink for ProgramLog {
	fn publish(&mut self, record: &[u8]) {
		msg!("{}{}", PROGRAM_DATA_PREFIX, STANDARD.encode(record));
	}
}

/// Collects records in memory.
impl LogSink for Vec<Vec<u8>> {
	fn publish(&mut self, record: &[u8]) {
		self.push(record.to_vec());
	}
}

/// A fixed-size stack buffer holding one encoded event record.
pub struct EventBuffer {
	bytes: [u8; MAX_EVENT_SIZE],
	len: usize,
}

impl EventBuffer {
	pub const fn new() -> Self {
		Self {
			bytes: [0; MAX_EVENT_SIZE],
			len: 0,
		}
	}

	/// Write `tag ++ borsh(value)` into the buffer and return the written
	/// bytes. Nothing is written when the record would not fit.
	pub fn encode<T: BorshSerialize + ?Sized>(
		&mut self,
		tag: Tag,
		value: &T,
	) -> Result<&[u8], EmitError> {
		self.len = 0;

		let body_len = borsh::object_length(value).map_err(EmitError::Encode)?;
		let size = TAG_LEN.saturating_add(body_len);
		if size > MAX_EVENT_SIZE {
			return Err(EmitError::TooLarge {
				size,
				max: MAX_EVENT_SIZE,
			});
		}

		self.bytes[..TAG_LEN].copy_from_slice(tag.as_bytes());
		let mut body: &mut [u8] = &mut self.bytes[TAG_LEN..size];
		value.serialize(&mut body).map_err(EmitError::Encode)?;
		let written = body_len - body.len();

		self.len = TAG_LEN + written;
		Ok(&self.bytes[..self.len])
	}

	/// The record written by the last successful [`EventBuffer::encode`].
	pub fn as_bytes(&self) -> &[u8] {
		&self.bytes[..self.len]
	}
}

impl Default for EventBuffer {
	fn default() -> Self {
		Self::new()
	}
}

/// Publish `event` to the program log.
///
/// Emission never fails the caller: a record larger than [`MAX_EVENT_SIZE`]
/// or one that cannot be encoded is dropped with a warning in the log.
pub fn emit<E: Event>(event: &E) {
	emit_to(&mut ProgramLog, event);
}

/// Publish `event` to `sink`, tagged with `E::tag()`.
pub fn emit_to<E: Event, S: LogSink + ?Sized>(sink: &mut S, event: &E) {
	emit_with_tag_to(sink, E::tag(), event);
}

/// Publish `value` to the program log under a caller-supplied tag, for tags
/// fixed by an earlier schema version.
pub fn emit_with_tag<T: BorshSerialize + ?Sized>(tag: Tag, value: &T) {
	emit_with_tag_to(&mut ProgramLog, tag, value);
}

/// Publish `value` to `sink` under a caller-supplied tag.
pub fn emit_with_tag_to<T, S>(sink: &mut S, tag: Tag, value: &T)
where
	T: BorshSerialize + ?Sized,
	S: LogSink + ?Sized,
{
	let mut buffer = EventBuffer::new();
	match buffer.encode(tag, value) {
		Ok(record) => sink.publish(record),
		Err(error) => msg!("Warning: event {} dropped: {}", tag, error),
	}
}

/// Extract the record bytes from a `Program data: <base64>` log line.
/// Returns `Ok(None)` for any other line.
pub fn parse_program_data(line: &str) -> Result<Option<Vec<u8>>, ClientError> {
	let Some(encoded) = line.strip_prefix(PROGRAM_DATA_PREFIX) else {
		return Ok(None);
	};

	Ok(Some(STANDARD.decode(encoded.trim())?))
}
