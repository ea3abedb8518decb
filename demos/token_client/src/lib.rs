//! A client for the token vault program, generated at build time from
//! `schema/token_program.json`.

mod generated {
	include!(concat!(env!("OUT_DIR"), "/token_program.rs"));
}

pub use generated::*;

pub mod state {
	use keel::borsh::BorshDeserialize;
	use keel::borsh::BorshSerialize;

	/// Program-wide settings. Defined by hand and referenced from the schema by
	/// path.
	#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
	#[borsh(crate = "keel::borsh")]
	pub struct Config {
		pub admin: keel::Pubkey,
		pub paused: bool,
	}

	keel::record!(Config);
}
