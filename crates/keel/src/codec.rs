use borsh::BorshDeserialize;
use borsh::BorshSerialize;

use crate::ClientError;
use crate::TAG_LEN;
use crate::Tag;

/// Borsh-encode `value`.
pub fn encode<T: BorshSerialize + ?Sized>(value: &T) -> Result<Vec<u8>, ClientError> {
	borsh::to_vec(value).map_err(ClientError::Encode)
}

/// Borsh-decode `data` as a `T`. Every byte must be consumed.
pub fn decode<T: BorshDeserialize>(data: &[u8]) -> Result<T, ClientError> {
	borsh::from_slice(data).map_err(ClientError::Decode)
}

/// The number of bytes [`encode`] would produce for `value`.
pub fn serialized_size<T: BorshSerialize + ?Sized>(value: &T) -> Result<usize, ClientError> {
	borsh::object_length(value).map_err(ClientError::Encode)
}

/// Build `tag ++ borsh(value)`. This is the payload layout shared by
/// instruction data, account records, and events.
///
/// ```
/// let tag = keel::derive_tag("instruction", "transfer");
/// let data = keel::encode_tagged(tag, &1000u64).unwrap_or_else(|e| panic!("{e}"));
/// assert_eq!(&data[..8], tag.as_bytes());
/// assert_eq!(&data[8..], &1000u64.to_le_bytes());
/// ```
pub fn encode_tagged<T: BorshSerialize + ?Sized>(tag: Tag, value: &T) -> Result<Vec<u8>, ClientError> {
	let mut data = Vec::with_capacity(TAG_LEN + serialized_size(value)?);
	data.extend_from_slice(tag.as_bytes());
	value.serialize(&mut data).map_err(ClientError::Encode)?;
	Ok(data)
}

/// Verify that `data` starts with `expected` and return the bytes after the
/// tag.
pub fn check_tag(expected: Tag, data: &[u8]) -> Result<&[u8], ClientError> {
	let Some(actual) = Tag::from_prefix(data) else {
		return Err(ClientError::DataTooShort {
			expected: TAG_LEN,
			actual: data.len(),
		});
	};

	if actual != expected {
		return Err(ClientError::TagMismatch { expected, actual });
	}

	Ok(&data[TAG_LEN..])
}

/// Decode a tagged account record. Bytes left over after the value are
/// ignored since account data is usually allocated with spare room.
pub fn decode_record<T: BorshDeserialize>(expected: Tag, data: &[u8]) -> Result<T, ClientError> {
	let mut body = check_tag(expected, data)?;
	T::deserialize(&mut body).map_err(ClientError::Decode)
}

/// Decode a tagged payload that must be consumed exactly, such as event or
/// instruction data.
pub fn decode_tagged<T: BorshDeserialize>(expected: Tag, data: &[u8]) -> Result<T, ClientError> {
	decode(check_tag(expected, data)?)
}
