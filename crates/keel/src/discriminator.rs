use core::fmt;
use core::str::FromStr;

use sha2::Digest;
use sha2::Sha256;

/// The number of bytes in every [`Tag`].
pub const TAG_LEN: usize = 8;

/// The 8-byte prefix identifying the type of a payload on the wire.
///
/// A tag is the first [`TAG_LEN`] bytes of `sha256("<namespace>:<name>")`.
/// It is a pure function of its inputs, so tags computed while generating a
/// client always equal the tags computed at runtime.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Tag([u8; TAG_LEN]);

impl Tag {
	/// Wrap raw tag bytes. Generated clients use this for their tag
	/// constants.
	pub const fn new(bytes: [u8; TAG_LEN]) -> Self {
		Self(bytes)
	}

	/// Derive the tag for `name` inside `namespace`.
	pub fn derive(namespace: Namespace, name: &str) -> Self {
		derive_tag(namespace.as_str(), name)
	}

	pub const fn as_bytes(&self) -> &[u8; TAG_LEN] {
		&self.0
	}

	pub const fn to_bytes(self) -> [u8; TAG_LEN] {
		self.0
	}

	pub fn to_vec(self) -> Vec<u8> {
		self.0.to_vec()
	}

	/// Read the tag stored in the first [`TAG_LEN`] bytes of `data`. Returns
	/// `None` when `data` is too short to hold one.
	pub fn from_prefix(data: &[u8]) -> Option<Self> {
		let prefix = data.get(..TAG_LEN)?;
		let mut bytes = [0u8; TAG_LEN];
		bytes.copy_from_slice(prefix);
		Some(Self(bytes))
	}

	/// Whether `data` starts with this tag.
	pub fn matches(&self, data: &[u8]) -> bool {
		data.starts_with(&self.0)
	}
}

impl From<[u8; TAG_LEN]> for Tag {
	fn from(bytes: [u8; TAG_LEN]) -> Self {
		Self(bytes)
	}
}

impl AsRef<[u8]> for Tag {
	fn as_ref(&self) -> &[u8] {
		&self.0
	}
}

impl fmt::Display for Tag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for byte in self.0 {
			write!(f, "{byte:02x}")?;
		}
		Ok(())
	}
}

impl fmt::LowerHex for Tag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(self, f)
	}
}

impl fmt::Debug for Tag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Tag({self})")
	}
}

/// The tag spaces. The same name yields unrelated tags in different
/// namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Namespace {
	Instruction,
	Account,
	Event,
}

impl Namespace {
	pub const ALL: [Self; 3] = [Self::Instruction, Self::Account, Self::Event];

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Instruction => "instruction",
			Self::Account => "account",
			Self::Event => "event",
		}
	}
}

impl fmt::Display for Namespace {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Returned when a string names no [`Namespace`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tag namespace `{0}` (expected one of: instruction, account, event)")]
pub struct UnknownNamespace(pub String);

impl FromStr for Namespace {
	type Err = UnknownNamespace;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|namespace| namespace.as_str() == s)
			.ok_or_else(|| UnknownNamespace(s.to_owned()))
	}
}

/// Derive the tag for `name` inside an arbitrary `namespace` string.
///
/// ```
/// let tag = keel::derive_tag("instruction", "transfer");
/// assert_eq!(tag.to_string(), "f9d3d92ff4851404");
/// ```
pub fn derive_tag(namespace: &str, name: &str) -> Tag {
	let mut hasher = Sha256::new();
	hasher.update(namespace.as_bytes());
	hasher.update(b":");
	hasher.update(name.as_bytes());
	let digest = hasher.finalize();

	let mut bytes = [0u8; TAG_LEN];
	bytes.copy_from_slice(&digest[..TAG_LEN]);
	Tag(bytes)
}
