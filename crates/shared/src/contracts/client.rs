use crate::wallet::{Signer, WalletProvider};
use alloy::contract::Interface;
use alloy::dyn_abi::DynSolValue;
use alloy::json_abi::JsonAbi;
use alloy::primitives::{Address, Bytes};
use crate::error::TicketingError;

/// A contract address and its callable surface, bound to a signer.
#[derive(Debug, Clone)]
pub struct ContractHandle<W> {
    address: Address,
    interface: Interface,
    signer: Signer<W>,
}

/// Pure construction, nothing is sent to the network.
pub fn bind<W: WalletProvider>(address: Address, abi: JsonAbi, signer: Signer<W>) -> ContractHandle<W> {
    ContractHandle { address, interface: Interface::new(abi), signer }
}

impl<W: WalletProvider> ContractHandle<W> {
    pub fn address(&self) -> Address {
        self.address
    }

    pub fn signer(&self) -> &Signer<W> {
        &self.signer
    }

    pub fn has_method(&self, method: &str) -> bool {
        self.interface.abi().function(method).is_some()
    }

    /// ABI-encodes a call to `method`, selector included.
    pub fn encode_call(&self, method: &str, args: &[DynSolValue]) -> Result<Bytes, TicketingError> {
        if !self.has_method(method) {
            return Err(TicketingError::Interface(format!("contract has no method `{method}`")));
        }
        self.interface
            .encode_input(method, args)
            .map(Bytes::from)
            .map_err(|e| TicketingError::Interface(format!("{method}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::bindings::{default_interface, DONATE};
    use crate::wallet::fake::FakeWallet;
    use crate::wallet::WalletConnector;
    use alloy::primitives::{address, U256};

    async fn handle() -> ContractHandle<FakeWallet> {
        let signer = WalletConnector::with_provider(FakeWallet::new()).connect().await.unwrap();
        bind(
            address!("0xaF91afD9420c7947ed8D5c8D14899F417eC39D7b"),
            default_interface().unwrap(),
            signer,
        )
    }

    #[tokio::test]
    async fn encodes_donate_with_selector() {
        let h = handle().await;
        let from = h.signer().address();
        let data = h
            .encode_call(
                DONATE,
                &[
                    DynSolValue::Address(from),
                    DynSolValue::Address(Address::ZERO),
                    DynSolValue::Uint(U256::from(1u64), 256),
                ],
            )
            .unwrap();
        // selector + three 32-byte words
        assert_eq!(data.len(), 4 + 3 * 32);
        let selector = alloy::primitives::keccak256("donate(address,address,uint256)");
        assert_eq!(&data[..4], &selector[..4]);
        assert_eq!(&data[16..36], from.as_slice());
    }

    #[tokio::test]
    async fn unknown_method_or_bad_args_are_interface_errors() {
        let h = handle().await;
        assert!(matches!(h.encode_call("mint", &[]), Err(TicketingError::Interface(_))));
        assert!(matches!(
            h.encode_call(DONATE, &[DynSolValue::Bool(true)]),
            Err(TicketingError::Interface(_))
        ));
    }
}
