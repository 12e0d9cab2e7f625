use crate::error::TicketingError;
use alloy::json_abi::JsonAbi;
use serde::Deserialize;
use std::path::Path;

/// Interface assumed when no ABI file is configured.
pub const DEFAULT_INTERFACE: &[&str] =
    &["function donate(address from, address to, uint256 amount)"];

pub const DONATE: &str = "donate";

#[derive(Deserialize)]
#[serde(untagged)]
enum AbiFile {
    Bare(JsonAbi),
    Artifact { abi: JsonAbi },
}

pub fn default_interface() -> Result<JsonAbi, TicketingError> {
    JsonAbi::parse(DEFAULT_INTERFACE.iter().copied())
        .map_err(|e| TicketingError::Interface(e.to_string()))
}

/// Accepts either a bare ABI array or a compiler artifact carrying an `abi` field.
pub fn parse_interface(json: &str) -> Result<JsonAbi, TicketingError> {
    match serde_json::from_str(json) {
        Ok(AbiFile::Bare(abi)) | Ok(AbiFile::Artifact { abi }) => Ok(abi),
        Err(e) => Err(TicketingError::Interface(format!("unrecognised ABI document: {e}"))),
    }
}

pub fn load_interface(path: Option<&Path>) -> Result<JsonAbi, TicketingError> {
    let Some(path) = path else {
        return default_interface();
    };
    let raw = std::fs::read_to_string(path)
        .map_err(|e| TicketingError::Config(format!("read {}: {e}", path.display())))?;
    let abi = parse_interface(&raw)?;
    tracing::debug!(path = %path.display(), functions = abi.functions.len(), "contract interface loaded");
    Ok(abi)
}
