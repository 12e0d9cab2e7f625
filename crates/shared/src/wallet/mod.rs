//! Wallet access as an injected capability.
//!
//! Nothing here reaches for ambient global state: whoever builds a
//! [`WalletConnector`] decides which [`WalletProvider`] backs it, or that
//! there is none at all.

use crate::error::TicketingError;
use alloy::primitives::{Address, TxHash};
use alloy::rpc::types::TransactionRequest;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;

#[cfg(any(test, feature = "testing"))]
pub mod fake;

/// Confirmation record of an included transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
    pub gas_used: u64,
    pub success: bool,
}

/// EIP-1193 style account access and transaction submission.
pub trait WalletProvider: Send + Sync {
    /// May prompt the user. An empty list means no account was authorized.
    fn request_accounts(&self) -> impl Future<Output = Result<Vec<Address>, TicketingError>> + Send;

    /// Signs and broadcasts `tx`, then waits for it to be mined. No timeout.
    fn send_transaction(
        &self,
        tx: TransactionRequest,
    ) -> impl Future<Output = Result<Receipt, TicketingError>> + Send;
}

/// An authorized account together with the wallet able to sign for it.
#[derive(Debug)]
pub struct Signer<W> {
    address: Address,
    wallet: Arc<W>,
}

impl<W> Clone for Signer<W> {
    fn clone(&self) -> Self {
        Self { address: self.address, wallet: Arc::clone(&self.wallet) }
    }
}

impl<W: WalletProvider> Signer<W> {
    pub fn address(&self) -> Address {
        self.address
    }

    pub(crate) fn wallet(&self) -> &W {
        &self.wallet
    }
}

#[derive(Debug)]
pub struct WalletConnector<W> {
    provider: Option<Arc<W>>,
}

impl<W> Clone for WalletConnector<W> {
    fn clone(&self) -> Self {
        Self { provider: self.provider.clone() }
    }
}

impl<W: WalletProvider> WalletConnector<W> {
    pub fn new(provider: Option<Arc<W>>) -> Self {
        Self { provider }
    }

    pub fn with_provider(provider: W) -> Self {
        Self::new(Some(Arc::new(provider)))
    }

    pub fn unavailable() -> Self {
        Self::new(None)
    }

    pub fn is_available(&self) -> bool {
        self.provider.is_some()
    }

    /// Asks the wallet for access and signs with the first account it grants.
    pub async fn connect(&self) -> Result<Signer<W>, TicketingError> {
        let wallet = self.provider.as_ref().ok_or(TicketingError::NoWalletProvider)?;
        let accounts = wallet.request_accounts().await?;
        let Some(address) = accounts.first().copied() else {
            return Err(TicketingError::UserRejected("no account authorized".into()));
        };
        tracing::info!(%address, "wallet connected");
        Ok(Signer { address, wallet: Arc::clone(wallet) })
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeWallet;
    use super::*;

    #[tokio::test]
    async fn connect_without_provider_fails_cleanly() {
        let connector = WalletConnector::<FakeWallet>::unavailable();
        assert!(!connector.is_available());
        assert!(matches!(connector.connect().await, Err(TicketingError::NoWalletProvider)));
    }

    #[tokio::test]
    async fn connect_uses_first_account() {
        let wallet = FakeWallet::new();
        let expected = wallet.account();
        let signer = WalletConnector::with_provider(wallet).connect().await.unwrap();
        assert_eq!(signer.address(), expected);
    }

    #[tokio::test]
    async fn denied_access_is_user_rejected() {
        let connector = WalletConnector::with_provider(FakeWallet::new().reject_connection());
        assert!(matches!(connector.connect().await, Err(TicketingError::UserRejected(_))));
    }

    #[tokio::test]
    async fn empty_account_list_is_user_rejected() {
        let connector = WalletConnector::with_provider(FakeWallet::new().without_accounts());
        assert!(matches!(connector.connect().await, Err(TicketingError::UserRejected(_))));
    }
}
