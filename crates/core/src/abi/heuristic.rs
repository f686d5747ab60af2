use crate::structure::scanner::{self, ContractMatch};
use crate::structure::{ContractKind, StateMutability};

use super::types::{AbiEntry, Param};

/// Derive an interface from the text alone, using the same anchor and
/// window technique as the structural extractor.
///
/// Functions whose inferred visibility is internal or private are left out,
/// as are constructors (they have no `function` anchor). Public state
/// variables contribute a zero-argument `view` accessor returning their
/// declared type; mapping and array accessors therefore lack the key
/// parameters a compiler would generate. Entries appear in source order.
///
/// Only the unit the compiler path would describe is scanned (see
/// [`primary_unit`]), so both paths report the same function names.
pub fn heuristic_interface(source: &str) -> Vec<AbiEntry> {
    let source = primary_unit(source);
    let mut entries: Vec<(usize, AbiEntry)> = Vec::new();

    for m in scanner::functions(source) {
        if !scanner::infer_visibility(m.window).is_exposed() {
            continue;
        }
        entries.push((
            m.start,
            AbiEntry::Function {
                name: m.name.to_string(),
                inputs: scanner::split_params(m.params),
                outputs: scanner::return_params(m.header),
                mutability: scanner::infer_mutability(m.window),
            },
        ));
    }

    for m in scanner::events(source) {
        let inputs = m
            .params
            .map(scanner::split_params)
            .unwrap_or_default()
            .into_iter()
            .map(|p| Param {
                indexed: Some(p.indexed.unwrap_or(false)),
                ..p
            })
            .collect();
        let declaration = scanner::header(source, m.start);
        let anonymous = declaration
            .rsplit(')')
            .next()
            .is_some_and(|tail| tail.contains("anonymous"));
        entries.push((
            m.start,
            AbiEntry::Event {
                name: m.name.to_string(),
                inputs,
                anonymous,
            },
        ));
    }

    for v in scanner::state_variables(source) {
        if !v.attributes.contains("public") {
            continue;
        }
        entries.push((
            v.start,
            AbiEntry::Function {
                name: v.name.to_string(),
                inputs: Vec::new(),
                outputs: vec![Param {
                    ty: v.type_name,
                    name: String::new(),
                    indexed: None,
                }],
                mutability: StateMutability::View,
            },
        ));
    }

    entries.sort_by_key(|(offset, _)| *offset);
    entries.into_iter().map(|(_, entry)| entry).collect()
}

/// Declared units in source order, concrete contracts before interfaces
/// and libraries.
pub fn preferred_units(source: &str) -> Vec<ContractMatch<'_>> {
    let (concrete, other): (Vec<_>, Vec<_>) = scanner::contracts(source)
        .into_iter()
        .partition(|unit| matches!(unit.kind, ContractKind::Contract | ContractKind::Abstract));
    concrete.into_iter().chain(other).collect()
}

/// Text of the first preferred unit, from its anchor up to the next unit's
/// anchor. A source without unit declarations is returned whole.
pub fn primary_unit(source: &str) -> &str {
    let Some(primary) = preferred_units(source).into_iter().next() else {
        return source;
    };
    let end = scanner::contracts(source)
        .into_iter()
        .map(|unit| unit.start)
        .find(|start| *start > primary.start)
        .unwrap_or(source.len());
    &source[primary.start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"
contract Token {
    uint256 public totalSupply;
    mapping(address => uint256) private balances;

    event Transfer(address indexed from, address indexed to, uint256 value);
    event Log(string message) anonymous;

    constructor(uint256 supply) { totalSupply = supply; }

    function transfer(address to, uint256 amount) external returns (bool) {
        balances[msg.sender] -= amount;
        balances[to] += amount;
        emit Transfer(msg.sender, to, amount);
        return true;
    }

    function balanceOf(address who) public view returns (uint256) {
        return balances[who];
    }

    function _move(address from, address to) internal {}
    function _secret() private {}
}
"#;

    #[test]
    fn test_functions_events_and_accessors() {
        let abi = heuristic_interface(SOURCE);
        let names: Vec<&str> = abi.iter().map(AbiEntry::name).collect();
        assert_eq!(
            names,
            vec!["totalSupply", "Transfer", "Log", "transfer", "balanceOf"]
        );
    }

    #[test]
    fn test_function_signature_shapes() {
        let abi = heuristic_interface(SOURCE);
        let transfer = abi.iter().find(|e| e.name() == "transfer").unwrap();
        match transfer {
            AbiEntry::Function {
                inputs,
                outputs,
                mutability,
                ..
            } => {
                assert_eq!(inputs.len(), 2);
                assert_eq!(inputs[0].ty, "address");
                assert_eq!(inputs[1].name, "amount");
                assert_eq!(outputs[0].ty, "bool");
                assert_eq!(*mutability, StateMutability::NonPayable);
            }
            other => panic!("unexpected entry {other:?}"),
        }
    }

    #[test]
    fn test_public_variable_accessor() {
        let abi = heuristic_interface(SOURCE);
        match &abi[0] {
            AbiEntry::Function {
                inputs,
                outputs,
                mutability,
                ..
            } => {
                assert!(inputs.is_empty());
                assert_eq!(outputs[0].ty, "uint256");
                assert_eq!(*mutability, StateMutability::View);
            }
            other => panic!("unexpected entry {other:?}"),
        }
    }

    #[test]
    fn test_events_carry_indexed_and_anonymous() {
        let abi = heuristic_interface(SOURCE);
        match abi.iter().find(|e| e.name() == "Transfer").unwrap() {
            AbiEntry::Event {
                inputs, anonymous, ..
            } => {
                assert_eq!(inputs[0].indexed, Some(true));
                assert_eq!(inputs[2].indexed, Some(false));
                assert!(!anonymous);
            }
            other => panic!("unexpected entry {other:?}"),
        }
        match abi.iter().find(|e| e.name() == "Log").unwrap() {
            AbiEntry::Event { anonymous, .. } => assert!(anonymous),
            other => panic!("unexpected entry {other:?}"),
        }
    }

    #[test]
    fn test_primary_unit_skips_interfaces_and_libraries() {
        let src = "interface IToken {\n    function transfer() external;\n}\ncontract Vault {\n    function withdraw() external {}\n}\nlibrary Math {}\n";
        let unit = primary_unit(src);
        assert!(unit.starts_with("contract Vault"));
        assert!(!unit.contains("library"));

        let entries = heuristic_interface(src);
        let names: Vec<&str> = entries.iter().map(AbiEntry::name).collect();
        assert_eq!(names, vec!["withdraw"]);
    }

    #[test]
    fn test_free_functions_scan_whole_source() {
        let src = "function helper() public {}";
        assert_eq!(primary_unit(src), src);
        assert_eq!(heuristic_interface(src).len(), 1);
    }

    #[test]
    fn test_interface_only_source() {
        let src = "interface IERC20 {\n    function totalSupply() external view returns (uint256);\n}\n";
        let entries = heuristic_interface(src);
        let names: Vec<&str> = entries.iter().map(AbiEntry::name).collect();
        assert_eq!(names, vec!["totalSupply"]);
    }
}
