//! Runtime support for keel program clients.
//!
//! Every payload that crosses the wire is prefixed by an 8-byte [`Tag`]
//! derived from a namespace and a name. Instructions, account records, and
//! events each live in their own namespace so their tags never overlap. The
//! code emitted by `keel_cli` links against this crate for tag constants,
//! tagged encoding and decoding, and the [`Transport`] contract; on-chain code
//! uses [`emit`] to publish events with the same tags.

mod codec;
mod discriminator;
mod error;
mod event;
mod memory;
mod traits;
mod transport;

pub use base64;
pub use borsh;
pub use solana_account::Account;
pub use solana_account::ReadableAccount;
pub use solana_instruction::AccountMeta;
pub use solana_instruction::Instruction;
pub use solana_msg::msg;
pub use solana_pubkey::Pubkey;

pub use crate::codec::*;
pub use crate::discriminator::*;
pub use crate::error::*;
pub use crate::event::*;
pub use crate::memory::*;
pub use crate::traits::*;
pub use crate::transport::*;

/// Implement [`Event`] for a struct, using the struct's identifier as the
/// event name.
///
/// ```
/// use keel::Event;
///
/// #[derive(keel::borsh::BorshSerialize)]
/// #[borsh(crate = "keel::borsh")]
/// pub struct Deposited {
/// 	pub amount: u64,
/// }
///
/// keel::event!(Deposited);
///
/// assert_eq!(Deposited::NAME, "Deposited");
/// assert_eq!(Deposited::tag(), keel::derive_tag("event", "Deposited"));
/// ```
#[macro_export]
macro_rules! event {
	($struct_name:ident) => {
		impl $crate::Event for $struct_name {
			const NAME: &'static str = stringify!($struct_name);
		}
	};
}

/// Implement [`Record`] for a struct, deriving its tag from the struct's
/// identifier in the `account` namespace.
#[macro_export]
macro_rules! record {
	($struct_name:ident) => {
		impl $crate::Record for $struct_name {
			const NAME: &'static str = stringify!($struct_name);
		}
	};
}

/// Make sure all traits are available.
pub mod prelude {
	pub use crate::traits::*;
	pub use crate::transport::Transport;
	pub use solana_account::ReadableAccount;
}
