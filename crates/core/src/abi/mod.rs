pub mod compiler;
pub mod heuristic;
pub mod types;

use std::path::Path;

use tracing::{debug, info};

pub use compiler::CompilerToolchain;
pub use heuristic::heuristic_interface;
pub use types::{function_names, AbiEntry, Param};


/// Builds the callable interface: compiler first, lexical fallback second.
pub struct InterfaceSynthesizer {
    compiler: Option<CompilerToolchain>,
}

impl InterfaceSynthesizer {
    pub fn new(compiler: Option<CompilerToolchain>) -> Self {
        Self { compiler }
    }

    /// Heuristic-only synthesizer
    pub fn heuristic() -> Self {
        Self { compiler: None }
    }

    /// Never fails: any compiler problem (missing binary, compile error,
    /// empty output, no contracts, empty interface) selects the fallback.
    pub async fn synthesize(&self, source: &str, file: &Path) -> Vec<AbiEntry> {
        if let Some(compiler) = &self.compiler {
            match compiler.interface(file, &preferred_contracts(source)).await {
                Ok(entries) if !entries.is_empty() => {
                    debug!(entries = entries.len(), "interface from compiler");
                    return entries;
                }
                Ok(_) => info!("compiler returned an empty interface; using heuristic extraction"),
                Err(error) => info!(
                    compiler = %compiler.command().program,
                    %error,
                    "compiler unavailable; using heuristic extraction"
                ),
            }
        }
        heuristic_interface(source)
    }
}

/// Names in the order the compiler output is searched; the heuristic
/// fallback describes the first of them.
fn preferred_contracts(source: &str) -> Vec<String> {
    heuristic::preferred_units(source)
        .into_iter()
        .map(|unit| unit.name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ToolCommand;
    use std::time::Duration;

    #[test]
    fn test_preferred_contracts_order() {
        let src = "interface IToken {}\nlibrary Math {}\ncontract Token is IToken {}";
        assert_eq!(
            preferred_contracts(src),
            vec!["Token".to_string(), "IToken".to_string(), "Math".to_string()]
        );
    }

    #[tokio::test]
    async fn test_missing_compiler_falls_back() {
        let src = "contract V { function withdraw() external { } }";
        let synth = InterfaceSynthesizer::new(Some(CompilerToolchain::new(ToolCommand::new(
            "solidity-guard-missing-solc",
            &["--combined-json", "abi", "{file}"],
            Duration::from_secs(1),
        ))));
        let abi = synth.synthesize(src, Path::new("unused.sol")).await;
        assert_eq!(abi.len(), 1);
        assert_eq!(abi[0].name(), "withdraw");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_compiler_and_fallback_agree_on_function_names() {
        let src = r#"
contract Token {
    uint256 public totalSupply;
    function transfer(address to, uint256 amount) external returns (bool) { return true; }
    function _burn(uint256 amount) internal {}
}
"#;
        // Stand-in compiler printing what solc emits for this unit.
        let compiled = r#"{"contracts":{"t.sol:Token":{"abi":[
            {"type":"function","name":"totalSupply","inputs":[],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
            {"type":"function","name":"transfer","inputs":[{"name":"to","type":"address"},{"name":"amount","type":"uint256"}],"outputs":[{"name":"","type":"bool"}],"stateMutability":"nonpayable"}
        ]}}}"#;
        let synth = InterfaceSynthesizer::new(Some(CompilerToolchain::new(ToolCommand::new(
            "echo",
            &[compiled],
            Duration::from_secs(5),
        ))));
        let from_compiler = synth.synthesize(src, Path::new("t.sol")).await;
        let from_heuristic = heuristic_interface(src);

        assert_eq!(function_names(&from_compiler), function_names(&from_heuristic));
        assert_eq!(from_compiler.len(), 2);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_paths_agree_when_interface_precedes_contract() {
        let src = r#"
interface IToken {
    function transfer(address to, uint256 amount) external returns (bool);
}

contract Vault {
    function withdraw() external {}
}

library Math {
    function add(uint256 a, uint256 b) public pure returns (uint256) { return a + b; }
}
"#;
        let compiled = r#"{"contracts":{
            "v.sol:IToken":{"abi":[{"type":"function","name":"transfer","inputs":[],"outputs":[],"stateMutability":"nonpayable"}]},
            "v.sol:Math":{"abi":[]},
            "v.sol:Vault":{"abi":[{"type":"function","name":"withdraw","inputs":[],"outputs":[],"stateMutability":"nonpayable"}]}
        }}"#;
        let synth = InterfaceSynthesizer::new(Some(CompilerToolchain::new(ToolCommand::new(
            "echo",
            &[compiled],
            Duration::from_secs(5),
        ))));
        let from_compiler = synth.synthesize(src, Path::new("v.sol")).await;
        let from_heuristic = heuristic_interface(src);

        assert_eq!(function_names(&from_compiler), function_names(&from_heuristic));
        assert_eq!(
            function_names(&from_heuristic).into_iter().collect::<Vec<_>>(),
            vec!["withdraw"]
        );
    }
}
