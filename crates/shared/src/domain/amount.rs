use alloy::primitives::utils::{format_units, parse_units};
use alloy::primitives::U256;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Decimal factor of the chain's native token.
pub const TOKEN_DECIMALS: u8 = 18;

/// A non-negative token quantity held in base units (10^-18).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TokenAmount(U256);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,
    #[error("amount must not be negative")]
    Negative,
    #[error("amount has more than 18 fractional digits")]
    TooPrecise,
    #[error("not a decimal number: {0}")]
    Malformed(String),
}

impl TokenAmount {
    pub const ZERO: Self = Self(U256::ZERO);

    pub fn base_units(&self) -> U256 {
        self.0
    }
}

impl FromStr for TokenAmount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AmountError::Empty);
        }
        if s.starts_with('-') {
            return Err(AmountError::Negative);
        }
        if !s.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return Err(AmountError::Malformed(s.to_owned()));
        }
        // parse_units silently truncates extra digits
        if let Some((_, frac)) = s.split_once('.') {
            if frac.len() > TOKEN_DECIMALS as usize {
                return Err(AmountError::TooPrecise);
            }
        }
        let parsed =
            parse_units(s, TOKEN_DECIMALS).map_err(|e| AmountError::Malformed(e.to_string()))?;
        Ok(Self(parsed.get_absolute()))
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let full = format_units(self.0, TOKEN_DECIMALS).map_err(|_| fmt::Error)?;
        let short = match full.contains('.') {
            true => full.trim_end_matches('0').trim_end_matches('.'),
            false => full.as_str(),
        };
        f.write_str(short)
    }
}

impl TryFrom<String> for TokenAmount {
    type Error = AmountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TokenAmount> for String {
    fn from(value: TokenAmount) -> Self {
        value.to_string()
    }
}
