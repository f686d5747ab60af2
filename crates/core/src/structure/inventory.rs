use serde::{Deserialize, Serialize};

/// Declared visibility of a function or state variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
    Internal,
    External,
}

impl Visibility {
    /// Whether the member is part of the contract's callable surface.
    pub fn is_exposed(&self) -> bool {
        matches!(self, Visibility::Public | Visibility::External)
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Private => write!(f, "private"),
            Visibility::Internal => write!(f, "internal"),
            Visibility::External => write!(f, "external"),
        }
    }
}

/// State mutability; displayed and serialized with the ABI spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateMutability {
    Pure,
    View,
    #[serde(rename = "nonpayable")]
    NonPayable,
    Payable,
}

impl std::fmt::Display for StateMutability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateMutability::Pure => write!(f, "pure"),
            StateMutability::View => write!(f, "view"),
            StateMutability::NonPayable => write!(f, "nonpayable"),
            StateMutability::Payable => write!(f, "payable"),
        }
    }
}

/// Kind of top-level unit declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractKind {
    Contract,
    Abstract,
    Interface,
    Library,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractDecl {
    pub name: String,
    pub kind: ContractKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionDecl {
    pub name: String,
    pub visibility: Visibility,
    pub mutability: StateMutability,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub visibility: Visibility,
    pub constant: bool,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventDecl {
    pub name: String,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModifierDecl {
    pub name: String,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportRef {
    pub path: String,
}

/// Everything the lexical scan found, each kind in order of first appearance.
/// Functions are a sequence, not a map: overloads appear once per declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeclarationInventory {
    pub contracts: Vec<ContractDecl>,
    pub functions: Vec<FunctionDecl>,
    pub variables: Vec<VariableDecl>,
    pub events: Vec<EventDecl>,
    pub modifiers: Vec<ModifierDecl>,
    pub imports: Vec<ImportRef>,
}

impl DeclarationInventory {
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
            && self.functions.is_empty()
            && self.variables.is_empty()
            && self.events.is_empty()
            && self.modifiers.is_empty()
            && self.imports.is_empty()
    }

    pub fn function_names(&self) -> Vec<&str> {
        self.functions.iter().map(|f| f.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutability_display_matches_serialization() {
        for mutability in [
            StateMutability::Pure,
            StateMutability::View,
            StateMutability::NonPayable,
            StateMutability::Payable,
        ] {
            let json = serde_json::to_value(mutability).unwrap();
            assert_eq!(json.as_str(), Some(mutability.to_string().as_str()));
        }
    }
}
