use crate::contracts::bindings::DONATE;
use crate::contracts::client::ContractHandle;
use crate::domain::amount::TokenAmount;
use crate::error::TicketingError;
use crate::wallet::{Receipt, WalletProvider};
use alloy::dyn_abi::DynSolValue;
use alloy::network::TransactionBuilder;
use alloy::primitives::Address;
use alloy::rpc::types::TransactionRequest;

/// Sends one call to `method` and waits for it to be mined.
///
/// There are no retries and no timeout. A receipt with a failed status is
/// reported as [`TicketingError::TransactionReverted`], so an `Ok` always
/// means the call succeeded on chain.
pub async fn submit<W: WalletProvider>(
    handle: &ContractHandle<W>,
    method: &str,
    args: &[DynSolValue],
) -> Result<Receipt, TicketingError> {
    let input = handle.encode_call(method, args)?;
    let signer = handle.signer();
    let tx = TransactionRequest::default()
        .with_from(signer.address())
        .with_to(handle.address())
        .with_input(input);

    tracing::info!(contract = %handle.address(), from = %signer.address(), method, "submitting transaction");
    let receipt = signer.wallet().send_transaction(tx).await.inspect_err(|e| {
        tracing::warn!(method, error = %e, "transaction failed");
    })?;

    if !receipt.success {
        tracing::warn!(tx_hash = %receipt.tx_hash, method, "transaction reverted");
        return Err(TicketingError::TransactionReverted {
            tx_hash: Some(receipt.tx_hash),
            reason: format!("{method} reverted in block {}", receipt.block_number.unwrap_or_default()),
        });
    }
    tracing::info!(tx_hash = %receipt.tx_hash, block = ?receipt.block_number, gas_used = receipt.gas_used, "transaction confirmed");
    Ok(receipt)
}

/// `donate(signer, beneficiary, amount)`, the call behind event creation.
pub async fn donate<W: WalletProvider>(
    handle: &ContractHandle<W>,
    beneficiary: Address,
    amount: TokenAmount,
) -> Result<Receipt, TicketingError> {
    let args = [
        DynSolValue::Address(handle.signer().address()),
        DynSolValue::Address(beneficiary),
        DynSolValue::Uint(amount.base_units(), 256),
    ];
    submit(handle, DONATE, &args).await
}
