use crate::contracts::bindings::load_interface;
use crate::domain::amount::TokenAmount;
use crate::error::TicketingError;
use crate::AppConfig;
use alloy::json_abi::JsonAbi;
use alloy::primitives::Address;

/// Everything needed to reach the deployed ticketing contract, resolved once at startup.
#[derive(Clone, Debug)]
pub struct ContractSettings {
    pub address: Address,
    pub interface: JsonAbi,
    pub beneficiary: Address,
    pub donation: TokenAmount,
}

impl ContractSettings {
    pub fn from_config(cfg: &AppConfig) -> Result<Self, TicketingError> {
        let parse = |name: &str, raw: &str| -> Result<Address, TicketingError> {
            raw.trim()
                .parse()
                .map_err(|e| TicketingError::Config(format!("invalid {name} {raw:?}: {e}")))
        };
        let settings = Self {
            address: parse("contract_address", &cfg.contract_address)?,
            interface: load_interface(cfg.contract_abi_path.as_deref())?,
            beneficiary: parse("donation_beneficiary", &cfg.donation_beneficiary)?,
            donation: cfg
                .donation_amount
                .parse()
                .map_err(|e| TicketingError::Config(format!("invalid donation_amount: {e}")))?,
        };
        tracing::info!(
            contract = %settings.address,
            beneficiary = %settings.beneficiary,
            donation = %settings.donation,
            "contract settings resolved"
        );
        Ok(settings)
    }

    pub fn method_names(&self) -> Vec<&str> {
        self.interface.functions.keys().map(String::as_str).collect()
    }
}
