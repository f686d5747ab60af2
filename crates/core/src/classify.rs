use serde::Serialize;

use crate::finding::{Diagnostic, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContractCategory {
    #[serde(rename = "ERC1155")]
    Erc1155,
    #[serde(rename = "ERC721")]
    Erc721,
    #[serde(rename = "ERC20")]
    Erc20,
    DeFi,
    Governance,
    Token,
    #[serde(rename = "NFT")]
    Nft,
    Custom,
}

impl std::fmt::Display for ContractCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ContractCategory::Erc1155 => "ERC1155",
            ContractCategory::Erc721 => "ERC721",
            ContractCategory::Erc20 => "ERC20",
            ContractCategory::DeFi => "DeFi",
            ContractCategory::Governance => "Governance",
            ContractCategory::Token => "Token",
            ContractCategory::Nft => "NFT",
            ContractCategory::Custom => "Custom",
        };
        f.write_str(label)
    }
}

/// Checked top to bottom; the first category with any marker present wins.
const CATEGORY_MARKERS: &[(ContractCategory, &[&str])] = &[
    (ContractCategory::Erc1155, &["erc1155"]),
    (ContractCategory::Erc721, &["erc721"]),
    (ContractCategory::Erc20, &["erc20"]),
    (
        ContractCategory::DeFi,
        &["swap", "liquidity", "lending", "borrow", "stake", "staking", "vault", "amm"],
    ),
    (
        ContractCategory::Governance,
        &["governor", "proposal", "voting", "quorum", "timelock"],
    ),
    (ContractCategory::Token, &["token"]),
    (ContractCategory::Nft, &["nft"]),
];

pub fn contract_category(source: &str) -> ContractCategory {
    let text = source.to_lowercase();
    CATEGORY_MARKERS
        .iter()
        .find(|(_, markers)| markers.iter().any(|m| text.contains(m)))
        .map_or(ContractCategory::Custom, |(category, _)| *category)
}

/// Independent checklist: every construct present is listed, in this order.
const UNSAFE_CONSTRUCTS: &[(&[&str], &str)] = &[
    (
        &["selfdestruct", "suicide("],
        "Kill switch: contract can self-destruct (selfdestruct)",
    ),
    (
        &["delegatecall"],
        "delegatecall executes foreign code in this contract's storage context",
    ),
    (&["assembly"], "Inline assembly bypasses compiler safety checks"),
    (&["tx.origin"], "tx.origin used (phishable authorization)"),
    (
        &["block.timestamp"],
        "block.timestamp dependence (miner-influenced)",
    ),
    (&["block.number"], "block.number dependence"),
];

pub fn unsafe_constructs(source: &str) -> Vec<String> {
    let text = source.to_lowercase();
    UNSAFE_CONSTRUCTS
        .iter()
        .filter(|(markers, _)| markers.iter().any(|m| text.contains(m)))
        .map(|(_, label)| label.to_string())
        .collect()
}

/// Pre-deployment advice derived from the security diagnostics.
pub fn deployment_warnings(security: &[Diagnostic]) -> Vec<String> {
    let mut warnings = Vec::new();

    let high = security
        .iter()
        .filter(|d| d.severity == Severity::High)
        .count();
    if high > 0 {
        warnings.push(format!(
            "{high} high-severity issue(s) must be resolved before deployment"
        ));
    }

    let mentions = |needle: &str| {
        security
            .iter()
            .any(|d| d.rule.to_lowercase().contains(needle))
    };
    if mentions("reentrancy") {
        warnings.push(
            "Reentrancy risk: apply checks-effects-interactions and a reentrancy guard".to_string(),
        );
    }
    if mentions("overflow") {
        warnings.push(
            "Arithmetic overflow risk: compile with Solidity 0.8+ or use checked math".to_string(),
        );
    }
    if mentions("access") {
        warnings.push(
            "Access control gaps: restrict privileged functions before deployment".to_string(),
        );
    }

    warnings
}
