use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub use crate::structure::StateMutability;

/// One input or output slot; `indexed` only appears on event inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexed: Option<bool>,
}

/// A callable-interface entry, serialized in the standard JSON ABI shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AbiEntry {
    Function {
        name: String,
        #[serde(default)]
        inputs: Vec<Param>,
        #[serde(default)]
        outputs: Vec<Param>,
        #[serde(rename = "stateMutability")]
        mutability: StateMutability,
    },
    Event {
        name: String,
        #[serde(default)]
        inputs: Vec<Param>,
        #[serde(default)]
        anonymous: bool,
    },
}

impl AbiEntry {
    pub fn name(&self) -> &str {
        match self {
            AbiEntry::Function { name, .. } | AbiEntry::Event { name, .. } => name,
        }
    }

    pub fn is_function(&self) -> bool {
        matches!(self, AbiEntry::Function { .. })
    }
}

/// Distinct function names in an interface
pub fn function_names(entries: &[AbiEntry]) -> BTreeSet<&str> {
    entries
        .iter()
        .filter(|e| e.is_function())
        .map(AbiEntry::name)
        .collect()
}
