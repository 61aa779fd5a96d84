use serde::{Deserialize, Serialize};

use crate::model::WalletRecord;

pub const LINKED_WALLETS_ENDPOINT: &str = "linked-wallets";
pub const COMMAND_ENDPOINT: &str = "mcp";

/// Command understood by the operator backend's command endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum WalletCommand {
    GenerateWallet {},
    ImportWallet {
        private_key: String,
        password: Option<String>,
        name: Option<String>,
    },
}

impl WalletCommand {
    pub fn import(private_key: String, name: Option<String>) -> Self {
        Self::ImportWallet {
            private_key,
            password: None,
            name,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::GenerateWallet {} => "GenerateWallet",
            Self::ImportWallet { .. } => "ImportWallet",
        }
    }
}

/// Body of a rejected command.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: Option<String>,
}

/// Extract the wallet list from a directory payload.
///
/// A payload without a `linked_wallets` array carries no update and yields
/// `None`. Elements that do not decode make the whole payload invalid.
pub fn parse_linked_wallets(
    payload: serde_json::Value,
) -> Result<Option<Vec<WalletRecord>>, serde_json::Error> {
    match payload {
        serde_json::Value::Object(mut fields) => match fields.remove("linked_wallets") {
            Some(list @ serde_json::Value::Array(_)) => serde_json::from_value(list).map(Some),
            _ => Ok(None),
        },
        _ => Ok(None),
    }
}

/// Normalise a user-provided wallet label: blank means no label.
pub fn normalize_name(name: &str) -> Option<String> {
    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn command_payloads() {
        assert_eq!(
            serde_json::to_value(WalletCommand::GenerateWallet {}).unwrap(),
            json!({"GenerateWallet": {}})
        );
        assert_eq!(
            serde_json::to_value(WalletCommand::import("abcd".into(), None)).unwrap(),
            json!({"ImportWallet": {"private_key": "abcd", "password": null, "name": null}})
        );
        assert_eq!(
            serde_json::to_value(WalletCommand::import("abcd".into(), Some("ops".into())))
                .unwrap(),
            json!({"ImportWallet": {"private_key": "abcd", "password": null, "name": "ops"}})
        );
    }

    #[test]
    fn missing_or_non_array_list_is_no_update() {
        assert_eq!(parse_linked_wallets(json!({})).unwrap(), None);
        assert_eq!(
            parse_linked_wallets(json!({"linked_wallets": null})).unwrap(),
            None
        );
        assert_eq!(
            parse_linked_wallets(json!({"linked_wallets": "nope"})).unwrap(),
            None
        );
        assert_eq!(parse_linked_wallets(json!([])).unwrap(), None);
        assert_eq!(
            parse_linked_wallets(json!({"linked_wallets": []})).unwrap(),
            Some(Vec::new())
        );
    }

    #[test]
    fn undecodable_element_is_an_error() {
        assert!(parse_linked_wallets(json!({"linked_wallets": [{"address": "0x12"}]})).is_err());
        assert!(parse_linked_wallets(json!({"linked_wallets": [{"name": "x"}]})).is_err());
    }

    #[test]
    fn full_dto_decodes() {
        let wallets = parse_linked_wallets(json!({
            "linked_wallets": [{
                "address": "0x000000000000000000000000000000000000dead",
                "name": "hot",
                "is_managed": true,
                "is_linked_on_chain": false,
                "is_active": true,
                "is_encrypted": true,
                "is_selected": false,
                "is_unlocked": false
            }]
        }))
        .unwrap()
        .unwrap();
        assert_eq!(wallets.len(), 1);
        assert_eq!(wallets[0].name.as_deref(), Some("hot"));
        assert!(wallets[0].is_managed && wallets[0].is_active && wallets[0].is_encrypted);
    }

    #[test]
    fn names_are_normalized() {
        assert_eq!(normalize_name(""), None);
        assert_eq!(normalize_name(" \t "), None);
        assert_eq!(normalize_name("  ops "), Some("ops".to_string()));
    }
}
