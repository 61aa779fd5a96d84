use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Account identifier on the operator's chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; 20]);

/// Identifier of a submitted transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TxHash([u8; 32]);

#[derive(Debug, Clone, PartialEq)]
pub enum ParseHexError {
    Hex(hex::FromHexError),
    Length { expected: usize, found: usize },
}

impl fmt::Display for ParseHexError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Hex(e) => write!(f, "invalid hex: {}", e),
            Self::Length { expected, found } => {
                write!(f, "expected {} bytes, found {}", expected, found)
            }
        }
    }
}

impl std::error::Error for ParseHexError {}

fn parse_fixed<const N: usize>(s: &str) -> Result<[u8; N], ParseHexError> {
    let s = s.trim();
    let s = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    let bytes = hex::decode(s).map_err(ParseHexError::Hex)?;
    let found = bytes.len();
    bytes.try_into().map_err(|_| ParseHexError::Length {
        expected: N,
        found,
    })
}

impl Address {
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// `0x1234…abcd`
    pub fn short(&self) -> String {
        let full = self.to_string();
        format!("{}…{}", &full[..6], &full[full.len() - 4..])
    }
}

impl FromStr for Address {
    type Err = ParseHexError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_fixed::<20>(s).map(Self)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Address::from_str(&s)
            .map_err(|e| de::Error::custom(format!("invalid address '{}': {}", s, e)))
    }
}

impl TxHash {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl FromStr for TxHash {
    type Err = ParseHexError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_fixed::<32>(s).map(Self)
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// On-chain account/name pair owning the signer registry being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorIdentity {
    pub address: Address,
    pub entry_name: String,
}

/// A wallet as reported by the operator backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WalletRecord {
    pub address: Address,
    #[serde(default)]
    pub name: Option<String>,
    /// The backend holds signing material for this address.
    #[serde(default)]
    pub is_managed: bool,
    /// The operator's signers note currently lists this address.
    #[serde(default)]
    pub is_linked_on_chain: bool,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_encrypted: bool,
    #[serde(default)]
    pub is_selected: bool,
    #[serde(default)]
    pub is_unlocked: bool,
}

impl WalletRecord {
    pub fn display_name(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.address.short(),
        }
    }

    /// Records that are neither managed nor linked are not shown anywhere.
    pub fn is_displayed(&self) -> bool {
        self.is_managed || self.is_linked_on_chain
    }
}
