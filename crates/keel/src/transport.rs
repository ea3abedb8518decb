use std::error::Error;
use std::fmt;

use crate::Account;
use crate::Instruction;
use crate::Pubkey;

/// The connection a generated client sends requests through.
///
/// keel never signs, retries, or times out; all of that belongs to the
/// implementation.
pub trait Transport {
	/// Whatever authorises a submission, e.g. a keypair.
	type Signer: ?Sized;
	/// Acknowledgement returned for an accepted submission, e.g. a
	/// transaction signature.
	type Receipt;

	/// Sign and submit `instruction`.
	fn submit(
		&self,
		instruction: Instruction,
		signers: &[&Self::Signer],
	) -> Result<Self::Receipt, TransportError>;

	/// Fetch the account stored at `address`, or `None` when there is none.
	fn fetch_account(&self, address: &Pubkey) -> Result<Option<Account>, TransportError>;
}

/// An opaque failure reported by a [`Transport`].
#[derive(Debug)]
pub struct TransportError(Box<dyn Error + Send + Sync + 'static>);

impl TransportError {
	pub fn new<E>(error: E) -> Self
	where
		E: Into<Box<dyn Error + Send + Sync + 'static>>,
	{
		Self(error.into())
	}

	pub fn get_ref(&self) -> &(dyn Error + Send + Sync + 'static) {
		self.0.as_ref()
	}

	pub fn into_inner(self) -> Box<dyn Error + Send + Sync + 'static> {
		self.0
	}
}

impl fmt::Display for TransportError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(&self.0, f)
	}
}

impl Error for TransportError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		Some(self.0.as_ref())
	}
}
