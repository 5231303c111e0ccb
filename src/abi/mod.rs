//! Contract ABI as emitted by the Noir contract compiler, and function
//! selector derivation.

use serde::Deserialize;
use sha3::{Digest, Keccak256};
use std::fmt;

pub const FUNCTION_SELECTOR_NUM_BYTES: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContractAbi {
    pub name: String,
    #[serde(default)]
    pub functions: Vec<FunctionAbi>,
}

impl ContractAbi {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// First function with the given name. Duplicate names are not detected.
    pub fn function(&self, name: &str) -> Option<&FunctionAbi> {
        self.functions.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionAbi {
    pub name: String,
    #[serde(default)]
    pub function_type: Option<String>,
    #[serde(default)]
    pub parameters: Vec<AbiParameter>,
    #[serde(default)]
    pub return_types: Vec<AbiType>,
}

impl FunctionAbi {
    pub fn selector(&self) -> FunctionSelector {
        compute_selector(&self.name, &self.parameters)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AbiParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: AbiType,
    #[serde(default)]
    pub visibility: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AbiVariable {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: AbiType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Unsigned,
    Signed,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AbiType {
    Field,
    Boolean,
    Integer {
        sign: Sign,
        width: u32,
    },
    Array {
        length: u64,
        #[serde(rename = "type")]
        ty: Box<AbiType>,
    },
    String {
        length: u64,
    },
    Struct {
        fields: Vec<AbiVariable>,
        #[serde(default)]
        path: String,
    },
    Tuple {
        fields: Vec<AbiType>,
    },
}

impl AbiType {
    /// The type as it appears inside a function signature.
    pub fn signature(&self) -> String {
        match self {
            AbiType::Field => "Field".to_string(),
            AbiType::Boolean => "bool".to_string(),
            AbiType::Integer { sign: Sign::Unsigned, width } => format!("u{}", width),
            AbiType::Integer { sign: Sign::Signed, width } => format!("i{}", width),
            AbiType::Array { length, ty } => format!("[{};{}]", ty.signature(), length),
            AbiType::String { length } => format!("str<{}>", length),
            AbiType::Struct { fields, .. } => {
                let inner: Vec<String> = fields.iter().map(|f| f.ty.signature()).collect();
                format!("({})", inner.join(","))
            }
            AbiType::Tuple { fields } => {
                let inner: Vec<String> = fields.iter().map(AbiType::signature).collect();
                format!("({})", inner.join(","))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FunctionSelector([u8; FUNCTION_SELECTOR_NUM_BYTES]);

impl FunctionSelector {
    pub fn from_bytes(bytes: [u8; FUNCTION_SELECTOR_NUM_BYTES]) -> Self {
        FunctionSelector(bytes)
    }
}

impl fmt::Display for FunctionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// `transfer(Field,Field)` style signature used as the selector preimage.
pub fn function_signature(name: &str, parameters: &[AbiParameter]) -> String {
    let types: Vec<String> = parameters.iter().map(|p| p.ty.signature()).collect();
    format!("{}({})", name, types.join(","))
}

/// First four bytes of the keccak256 hash of the function signature.
pub fn compute_selector(name: &str, parameters: &[AbiParameter]) -> FunctionSelector {
    let hash = Keccak256::digest(function_signature(name, parameters).as_bytes());
    let mut bytes = [0u8; FUNCTION_SELECTOR_NUM_BYTES];
    bytes.copy_from_slice(&hash[..FUNCTION_SELECTOR_NUM_BYTES]);
    FunctionSelector::from_bytes(bytes)
}
