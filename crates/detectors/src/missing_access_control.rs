use solidity_guard::detector::{AnalysisContext, Detector};
use solidity_guard::finding::*;
use solidity_guard::structure::scanner::{self, FunctionMatch};

/// Detects externally reachable functions whose header carries no modifier.
///
/// A header counts as guarded when it names a modifier declared in the same
/// source or any `only*` identifier. A source that mentions `onlyOwner`
/// anywhere is treated as access-controlled as a whole and never flagged.
pub struct MissingAccessControl;

/// A declared modifier name or an `only*` guard such as `onlyRole`
fn is_modifier_word(word: &str, declared: &[&str]) -> bool {
    declared.contains(&word) || (word.len() > 4 && word.starts_with("only"))
}

fn has_modifier(function: &FunctionMatch, declared: &[&str]) -> bool {
    let tail = function
        .header
        .find('(')
        .and_then(|open| function.header.get(open + function.params.len() + 2..))
        .unwrap_or("");
    tail.split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
        .any(|word| is_modifier_word(word, declared))
}

fn unguarded_functions(source: &str) -> Vec<&str> {
    let declared: Vec<&str> = scanner::modifiers(source).iter().map(|m| m.name).collect();
    scanner::functions(source)
        .into_iter()
        .filter(|f| scanner::infer_visibility(f.window).is_exposed())
        .filter(|f| !has_modifier(f, &declared))
        .map(|f| f.name)
        .collect()
}

impl Detector for MissingAccessControl {
    fn name(&self) -> &str {
        "missing-access-control"
    }

    fn description(&self) -> &str {
        "Detects public or external functions without an access-control modifier"
    }

    fn category(&self) -> Category {
        Category::Security
    }

    fn severity(&self) -> Severity {
        Severity::Medium
    }

    fn confidence(&self) -> Option<Confidence> {
        Some(Confidence::Low)
    }

    fn recommendation(&self) -> Option<&str> {
        Some("Restrict privileged functions with a modifier such as onlyOwner or a role check.")
    }

    fn detect(&self, ctx: &AnalysisContext) -> Vec<Diagnostic> {
        if ctx.mentions("onlyowner") {
            return Vec::new();
        }
        let unguarded = unguarded_functions(ctx.source());
        if unguarded.is_empty() {
            return Vec::new();
        }
        vec![self.diagnostic(
            format!(
                "Externally callable functions without access-control modifiers: {}",
                unguarded.join(", ")
            ),
            1,
            MULTIPLE_FUNCTIONS,
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(source: &str) -> Vec<Diagnostic> {
        MissingAccessControl.detect(&AnalysisContext::new(source))
    }

    #[test]
    fn test_detects_unguarded_setter() {
        let source = r#"
            contract Config {
                uint256 public fee;
                function setFee(uint256 newFee) external {
                    fee = newFee;
                }
            }
        "#;
        let findings = analyze(source);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, "missing-access-control");
        assert_eq!(findings[0].confidence, Some(Confidence::Low));
        assert!(findings[0].message.contains("setFee"));
    }

    #[test]
    fn test_declared_modifier_guards() {
        let source = r#"
            contract Config {
                modifier auth() { require(msg.sender == admin); _; }
                function setFee(uint256 newFee) external auth {
                    fee = newFee;
                }
            }
        "#;
        assert!(analyze(source).is_empty());
    }

    #[test]
    fn test_only_prefix_guards() {
        let source = "function pause() external onlyRole(PAUSER) { paused = true; }";
        assert!(analyze(source).is_empty());
    }

    #[test]
    fn test_onlyowner_anywhere_suppresses() {
        let source = r#"
            import "Ownable.sol";
            function a() external onlyOwner {}
            function b() external {}
        "#;
        assert!(analyze(source).is_empty());
    }

    #[test]
    fn test_unguarded_view_is_flagged() {
        let source = "contract C { uint x; function get() external view returns (uint) { return x; } }";
        let findings = analyze(source);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("get"));
    }

    #[test]
    fn test_internal_and_private_ignored() {
        let source = r#"
            function helper() internal { t = 1; }
            function _secret() private view returns (uint) { return t; }
        "#;
        assert!(analyze(source).is_empty());
    }

    #[test]
    fn test_all_unguarded_listed_in_one_diagnostic() {
        let source = r#"
            function total() external view returns (uint256) { return t; }
            function calc(uint a) public pure returns (uint) { return a; }
            function set(uint a) public { t = a; }
        "#;
        let findings = analyze(source);
        assert_eq!(findings.len(), 1);
        assert!(findings[0]
            .message
            .ends_with("total, calc, set"));
    }
}
