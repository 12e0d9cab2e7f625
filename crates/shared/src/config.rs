use crate::error::TicketingError;
use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// JSON-RPC endpoint of the wallet. Unset means no wallet is available.
    pub wallet_rpc_url: Option<String>,
    /// Sign locally with this key and use `wallet_rpc_url` as a plain node.
    pub wallet_private_key: Option<String>,
    pub contract_address: String,
    /// ABI array or build artifact. Falls back to the built-in `donate` interface.
    pub contract_abi_path: Option<PathBuf>,
    pub donation_beneficiary: String,
    #[serde(default = "default_donation_amount", deserialize_with = "decimal_text")]
    pub donation_amount: String,
    #[serde(default = "default_success_display_ms")]
    pub success_display_ms: u64,
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

fn default_donation_amount() -> String { "1".into() }
fn default_success_display_ms() -> u64 { 1500 }
fn default_listen_addr() -> String { "0.0.0.0:8080".into() }

const ENV_PREFIX: &str = "TICKETING_";

/// Whole numbers are accepted as-is. Fractions must arrive as text, an f64
/// cannot carry 18 decimals.
fn decimal_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Whole(u64),
        Fraction(f64),
    }
    Ok(match Raw::deserialize(d)? {
        Raw::Text(s) => s,
        Raw::Whole(n) => n.to_string(),
        Raw::Fraction(f) => {
            return Err(serde::de::Error::custom(format!(
                "donation_amount {f} must be given as a quoted string to keep its precision"
            )))
        }
    })
}

impl AppConfig {
    pub fn from_env() -> Result<Self, TicketingError> {
        dotenvy::dotenv().ok();
        Self::from_figment(Self::figment())
    }

    /// Prefixed environment, with `DONATION_AMOUNT` taken verbatim since the
    /// env provider would otherwise parse it as a float.
    pub fn figment() -> Figment {
        let fig = Figment::new().merge(Env::prefixed(ENV_PREFIX).ignore(&["donation_amount"]));
        match std::env::var(format!("{ENV_PREFIX}DONATION_AMOUNT")) {
            Ok(raw) => fig.merge(Serialized::default("donation_amount", raw)),
            Err(_) => fig,
        }
    }

    pub fn from_figment(fig: Figment) -> Result<Self, TicketingError> {
        fig.extract().map_err(|e| TicketingError::Config(e.to_string()))
    }

    pub fn success_display_delay(&self) -> Duration {
        Duration::from_millis(self.success_display_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn loads_prefixed_env_with_defaults() {
        Jail::expect_with(|jail| {
            jail.set_env("TICKETING_CONTRACT_ADDRESS", "0xaF91afD9420c7947ed8D5c8D14899F417eC39D7b");
            jail.set_env("TICKETING_DONATION_BENEFICIARY", "0x94A7Af5edB47c3B91d1B4Ffc2CA535d7aDA8CEDe");
            let cfg = AppConfig::from_figment(AppConfig::figment())
                .expect("config");
            assert_eq!(cfg.donation_amount, "1");
            assert_eq!(cfg.success_display_delay(), Duration::from_millis(1500));
            assert_eq!(cfg.listen_addr, "0.0.0.0:8080");
            assert!(cfg.wallet_rpc_url.is_none());
            assert!(cfg.contract_abi_path.is_none());
            Ok(())
        });
    }

    #[test]
    fn overrides_and_optional_fields() {
        Jail::expect_with(|jail| {
            jail.set_env("TICKETING_CONTRACT_ADDRESS", "0x01");
            jail.set_env("TICKETING_DONATION_BENEFICIARY", "0x02");
            jail.set_env("TICKETING_WALLET_RPC_URL", "http://127.0.0.1:1248");
            jail.set_env("TICKETING_SUCCESS_DISPLAY_MS", "0");
            jail.set_env("TICKETING_CONTRACT_ABI_PATH", "abi/EventTicketing.json");
            let cfg = AppConfig::from_figment(AppConfig::figment())
                .expect("config");
            assert_eq!(cfg.wallet_rpc_url.as_deref(), Some("http://127.0.0.1:1248"));
            assert_eq!(cfg.success_display_delay(), Duration::ZERO);
            assert_eq!(cfg.contract_abi_path, Some(PathBuf::from("abi/EventTicketing.json")));
            Ok(())
        });
    }

    #[test]
    fn numeric_donation_amount_is_kept_as_text() {
        Jail::expect_with(|jail| {
            jail.set_env("TICKETING_CONTRACT_ADDRESS", "0x01");
            jail.set_env("TICKETING_DONATION_BENEFICIARY", "0x02");
            jail.set_env("TICKETING_DONATION_AMOUNT", "0.5");
            let cfg = AppConfig::from_figment(AppConfig::figment())
                .expect("config");
            assert_eq!(cfg.donation_amount, "0.5");

            jail.set_env("TICKETING_DONATION_AMOUNT", "3");
            let cfg = AppConfig::from_figment(AppConfig::figment())
                .expect("config");
            assert_eq!(cfg.donation_amount, "3");
            Ok(())
        });
    }

    #[test]
    fn eighteen_decimal_donation_amount_is_not_rounded() {
        Jail::expect_with(|jail| {
            jail.set_env("TICKETING_CONTRACT_ADDRESS", "0x01");
            jail.set_env("TICKETING_DONATION_BENEFICIARY", "0x02");
            jail.set_env("TICKETING_DONATION_AMOUNT", "0.123456789012345678");
            let cfg = AppConfig::from_figment(AppConfig::figment()).expect("config");
            assert_eq!(cfg.donation_amount, "0.123456789012345678");
            Ok(())
        });
    }

    #[test]
    fn float_donation_amount_from_other_sources_is_refused() {
        let fig = Figment::from(Serialized::defaults(serde_json::json!({
            "contract_address": "0x01",
            "donation_beneficiary": "0x02",
            "donation_amount": 0.5,
        })));
        let err = AppConfig::from_figment(fig).unwrap_err();
        assert!(matches!(err, TicketingError::Config(m) if m.contains("quoted")));
    }

    #[test]
    fn missing_contract_address_is_a_config_error() {
        Jail::expect_with(|jail| {
            jail.set_env("TICKETING_DONATION_BENEFICIARY", "0x02");
            let err = AppConfig::from_figment(AppConfig::figment())
                .unwrap_err();
            assert!(matches!(err, TicketingError::Config(_)));
            Ok(())
        });
    }
}
