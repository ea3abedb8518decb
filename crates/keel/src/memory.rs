use std::cell::RefCell;
use std::collections::HashMap;

use crate::Account;
use crate::ClientError;
use crate::Instruction;
use crate::Pubkey;
use crate::Record;
use crate::Transport;
use crate::TransportError;

/// A [`Transport`] backed by an in-memory account map.
///
/// Submitted instructions are recorded rather than executed. A submission is
/// rejected when an account flagged as a signer has no matching entry in
/// `signers`, which is as much of signing as this transport models. Receipts
/// are sequence numbers starting at 1.
#[derive(Debug, Default)]
pub struct MemoryTransport {
	accounts: RefCell<HashMap<Pubkey, Account>>,
	submitted: RefCell<Vec<Instruction>>,
	rejection: RefCell<Option<String>>,
}

impl MemoryTransport {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn set_account(&self, address: Pubkey, account: Account) {
		self.accounts.borrow_mut().insert(address, account);
	}

	/// Store `record` as tagged account data owned by `owner`.
	pub fn set_record<R: Record>(
		&self,
		address: Pubkey,
		owner: Pubkey,
		record: &R,
	) -> Result<(), ClientError> {
		let data = record.to_account_data()?;
		self.set_account(address, Account {
			lamports: 0,
			data,
			owner,
			executable: false,
			rent_epoch: 0,
		});
		Ok(())
	}

	pub fn remove_account(&self, address: &Pubkey) -> Option<Account> {
		self.accounts.borrow_mut().remove(address)
	}

	/// Make the next submission fail with `reason`.
	pub fn reject_next_submission(&self, reason: impl Into<String>) {
		*self.rejection.borrow_mut() = Some(reason.into());
	}

	/// Every accepted instruction, in submission order.
	pub fn submitted(&self) -> Vec<Instruction> {
		self.submitted.borrow().clone()
	}
}

impl Transport for MemoryTransport {
	type Receipt = u64;
	type Signer = Pubkey;

	fn submit(
		&self,
		instruction: Instruction,
		signers: &[&Pubkey],
	) -> Result<u64, TransportError> {
		if let Some(reason) = self.rejection.borrow_mut().take() {
			return Err(TransportError::new(reason));
		}

		let missing = instruction
			.accounts
			.iter()
			.find(|meta| meta.is_signer && !signers.contains(&&meta.pubkey));
		if let Some(meta) = missing {
			return Err(TransportError::new(format!(
				"missing signature for {}",
				meta.pubkey
			)));
		}

		let mut submitted = self.submitted.borrow_mut();
		submitted.push(instruction);
		Ok(submitted.len() as u64)
	}

	fn fetch_account(&self, address: &Pubkey) -> Result<Option<Account>, TransportError> {
		Ok(self.accounts.borrow().get(address).cloned())
	}
}
