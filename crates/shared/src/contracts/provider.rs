use crate::error::TicketingError;
use crate::wallet::{Receipt, WalletProvider};
use crate::AppConfig;
use alloy::network::{EthereumWallet, ReceiptResponse};
use alloy::primitives::Address;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::http::reqwest::Url;
use alloy::transports::TransportError;

/// EIP-1193 user rejected the request.
const USER_REJECTED: i64 = 4001;
/// EIP-1193 the requested account is not authorized.
const UNAUTHORIZED: i64 = 4100;
/// Geth-style execution reverted.
const EXECUTION_REVERTED: i64 = 3;
const METHOD_NOT_FOUND: i64 = -32601;

/// Wallet reached over JSON-RPC.
///
/// Without a private key the endpoint is expected to hold the accounts and
/// sign (`eth_requestAccounts` / `eth_sendTransaction`), the way a desktop
/// wallet's local RPC port or a dev node with unlocked accounts does. With a
/// key, signing happens here and the endpoint only needs to be a node.
#[derive(Clone)]
pub struct RpcWallet {
    provider: DynProvider,
    local_account: Option<Address>,
}

impl RpcWallet {
    pub fn connect(url: &str, private_key: Option<&str>) -> Result<Self, TicketingError> {
        let url: Url = url
            .parse()
            .map_err(|e| TicketingError::Config(format!("invalid wallet_rpc_url {url:?}: {e}")))?;

        let Some(key) = private_key else {
            let provider = ProviderBuilder::new().connect_http(url).erased();
            return Ok(Self { provider, local_account: None });
        };

        let signer: PrivateKeySigner = key
            .trim()
            .parse()
            .map_err(|_| TicketingError::Config("invalid wallet_private_key".into()))?;
        let account = signer.address();
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(url)
            .erased();
        Ok(Self { provider, local_account: Some(account) })
    }

    /// `None` when no wallet endpoint is configured.
    pub fn from_config(cfg: &AppConfig) -> Result<Option<Self>, TicketingError> {
        match cfg.wallet_rpc_url.as_deref() {
            Some(url) => {
                let wallet = Self::connect(url, cfg.wallet_private_key.as_deref())?;
                tracing::info!(url, local_signer = wallet.local_account.is_some(), "wallet provider configured");
                Ok(Some(wallet))
            }
            None => {
                tracing::warn!("no wallet_rpc_url configured, wallet actions are unavailable");
                Ok(None)
            }
        }
    }
}

impl WalletProvider for RpcWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>, TicketingError> {
        if let Some(account) = self.local_account {
            return Ok(vec![account]);
        }
        let requested: Result<Vec<Address>, TransportError> =
            self.provider.raw_request("eth_requestAccounts".into(), ()).await;
        match requested {
            Ok(accounts) => Ok(accounts),
            Err(e) if rpc_code(&e) == Some(METHOD_NOT_FOUND) => {
                tracing::debug!("eth_requestAccounts unsupported, falling back to eth_accounts");
                self.provider.get_accounts().await.map_err(classify)
            }
            Err(e) => Err(classify(e)),
        }
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<Receipt, TicketingError> {
        let pending = self.provider.send_transaction(tx).await.map_err(classify)?;
        let tx_hash = *pending.tx_hash();
        tracing::info!(%tx_hash, "transaction broadcast, awaiting inclusion");
        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| TicketingError::NetworkUnavailable(e.to_string()))?;
        Ok(Receipt {
            tx_hash: receipt.transaction_hash(),
            block_number: receipt.block_number(),
            gas_used: receipt.gas_used(),
            success: receipt.status(),
        })
    }
}

fn rpc_code(err: &TransportError) -> Option<i64> {
    err.as_error_resp().map(|p| p.code)
}

/// Maps a JSON-RPC failure onto the error taxonomy. Anything that is not an
/// error response from the endpoint counts as the network being unavailable.
pub(crate) fn classify(err: TransportError) -> TicketingError {
    let Some(payload) = err.as_error_resp() else {
        return TicketingError::NetworkUnavailable(err.to_string());
    };
    let message = payload.message.to_string();
    let lower = message.to_lowercase();
    match payload.code {
        USER_REJECTED | UNAUTHORIZED => TicketingError::UserRejected(message),
        EXECUTION_REVERTED => TicketingError::TransactionReverted { tx_hash: None, reason: message },
        _ if lower.contains("revert") || lower.contains("insufficient funds") => {
            TicketingError::TransactionReverted { tx_hash: None, reason: message }
        }
        code => TicketingError::Rpc { code, message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::rpc::json_rpc::ErrorPayload;
    use alloy::transports::TransportErrorKind;

    fn resp(code: i64, message: &'static str) -> TransportError {
        TransportError::ErrorResp(ErrorPayload { code, message: message.into(), data: None })
    }

    #[test]
    fn classifies_wallet_error_responses() {
        assert!(matches!(classify(resp(4001, "User rejected the request.")), TicketingError::UserRejected(_)));
        assert!(matches!(classify(resp(4100, "Unauthorized")), TicketingError::UserRejected(_)));
        assert!(matches!(
            classify(resp(3, "execution reverted: sold out")),
            TicketingError::TransactionReverted { tx_hash: None, .. }
        ));
        assert!(matches!(
            classify(resp(-32000, "insufficient funds for gas * price + value")),
            TicketingError::TransactionReverted { .. }
        ));
        assert!(matches!(
            classify(resp(-32000, "nonce too low")),
            TicketingError::Rpc { code: -32000, .. }
        ));
    }

    #[test]
    fn transport_failures_are_network_errors() {
        let err = TransportErrorKind::custom_str("connection refused");
        assert!(matches!(classify(err), TicketingError::NetworkUnavailable(_)));
    }

    #[test]
    fn rejects_malformed_settings() {
        assert!(matches!(RpcWallet::connect("not a url", None), Err(TicketingError::Config(_))));
        assert!(matches!(
            RpcWallet::connect("http://127.0.0.1:8545", Some("0xnope")),
            Err(TicketingError::Config(_))
        ));
    }

    #[tokio::test]
    async fn local_key_reports_its_own_account() {
        // anvil's first dev key
        let wallet = RpcWallet::connect(
            "http://127.0.0.1:8545",
            Some("0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"),
        )
        .unwrap();
        let accounts = wallet.request_accounts().await.unwrap();
        assert_eq!(
            accounts,
            [alloy::primitives::address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266")]
        );
    }
}
