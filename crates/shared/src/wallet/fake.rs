//! Scripted in-process wallet for tests.

use super::{Receipt, WalletProvider};
use crate::error::TicketingError;
use alloy::primitives::{address, keccak256, Address};
use alloy::rpc::types::TransactionRequest;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Grant,
    Reject,
    NoAccounts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Mined,
    Reverted,
    SignatureRejected,
    Offline,
}

#[derive(Debug)]
pub struct FakeWallet {
    account: Address,
    access: Access,
    outcome: Outcome,
    confirmation_delay: Duration,
    sent: Mutex<Vec<TransactionRequest>>,
}

impl Default for FakeWallet {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeWallet {
    pub fn new() -> Self {
        Self {
            account: address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8"),
            access: Access::Grant,
            outcome: Outcome::Mined,
            confirmation_delay: Duration::ZERO,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn account(&self) -> Address {
        self.account
    }

    pub fn reject_connection(mut self) -> Self {
        self.access = Access::Reject;
        self
    }

    pub fn without_accounts(mut self) -> Self {
        self.access = Access::NoAccounts;
        self
    }

    pub fn revert_transactions(mut self) -> Self {
        self.outcome = Outcome::Reverted;
        self
    }

    pub fn reject_signatures(mut self) -> Self {
        self.outcome = Outcome::SignatureRejected;
        self
    }

    pub fn offline(mut self) -> Self {
        self.outcome = Outcome::Offline;
        self
    }

    /// Time between broadcast and inclusion.
    pub fn with_confirmation_delay(mut self, delay: Duration) -> Self {
        self.confirmation_delay = delay;
        self
    }

    /// Every transaction handed to the wallet, in order.
    pub fn sent(&self) -> Vec<TransactionRequest> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn send_count(&self) -> usize {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl WalletProvider for FakeWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>, TicketingError> {
        match self.access {
            Access::Grant => Ok(vec![self.account]),
            Access::NoAccounts => Ok(Vec::new()),
            Access::Reject => Err(TicketingError::UserRejected("User rejected the request.".into())),
        }
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<Receipt, TicketingError> {
        let nonce = {
            let mut sent = self.sent.lock().unwrap_or_else(|e| e.into_inner());
            sent.push(tx);
            sent.len() as u64
        };
        match self.outcome {
            Outcome::SignatureRejected => {
                return Err(TicketingError::UserRejected("User denied transaction signature.".into()))
            }
            Outcome::Offline => {
                return Err(TicketingError::NetworkUnavailable("connection refused".into()))
            }
            Outcome::Mined | Outcome::Reverted => {}
        }
        if !self.confirmation_delay.is_zero() {
            tokio::time::sleep(self.confirmation_delay).await;
        }
        Ok(Receipt {
            tx_hash: keccak256(nonce.to_be_bytes()),
            block_number: Some(nonce),
            gas_used: 21_000,
            success: self.outcome == Outcome::Mined,
        })
    }
}
