use borsh::BorshDeserialize;
use borsh::BorshSerialize;

use crate::ClientError;
use crate::LogSink;
use crate::Namespace;
use crate::Tag;
use crate::decode_record;
use crate::encode_tagged;

/// A persisted account record. Its data is laid out as `tag ++ borsh(self)`
/// where the tag is derived from [`Record::NAME`] in the `account`
/// namespace.
pub trait Record: BorshSerialize + BorshDeserialize {
	/// The simple type name the tag is derived from.
	const NAME: &'static str;

	fn tag() -> Tag {
		Tag::derive(Namespace::Account, Self::NAME)
	}

	/// Check the tag and decode the record. Trailing bytes are ignored.
	fn try_from_account_data(data: &[u8]) -> Result<Self, ClientError> {
		decode_record(Self::tag(), data)
	}

	/// Encode the record as account data.
	fn to_account_data(&self) -> Result<Vec<u8>, ClientError> {
		encode_tagged(Self::tag(), self)
	}
}

/// A notification published through the program log. The published bytes are
/// `tag ++ borsh(self)` where the tag is derived from [`Event::NAME`] in the
/// `event` namespace.
pub trait Event: BorshSerialize {
	/// The simple type name the tag is derived from.
	const NAME: &'static str;

	fn tag() -> Tag {
		Tag::derive(Namespace::Event, Self::NAME)
	}

	/// Publish this event to the program log. See [`emit`](crate::emit).
	fn emit(&self)
	where
		Self: Sized,
	{
		crate::emit(self);
	}

	/// Publish this event to `sink`. See [`emit_to`](crate::emit_to).
	fn emit_to<S: LogSink + ?Sized>(&self, sink: &mut S)
	where
		Self: Sized,
	{
		crate::emit_to(sink, self);
	}
}
