//! Token-window scanning primitives.
//!
//! This is a lexical approximation of Solidity, not a parser. Each declaration
//! kind is found through a fixed anchor pattern, and attributes such as
//! visibility are read by substring presence inside a bounded window that
//! starts at the anchor. Comments, string literals and nested braces are not
//! treated specially: a `function foo(` inside a comment is reported like any
//! other, a header longer than the window loses its trailing keywords, and a
//! window that runs into the body can pick up keywords from it. Callers rely
//! on exactly this behaviour; do not quietly "fix" it here.

use once_cell::sync::Lazy;
use regex::Regex;

use super::inventory::{ContractKind, StateMutability, Visibility};
use crate::abi::Param;

/// Maximum number of bytes inspected after an anchor when inferring keywords.
pub const MODIFIER_WINDOW: usize = 100;

static FUNCTION_ANCHOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bfunction\s+([A-Za-z_$][A-Za-z0-9_$]*)\s*\(").expect("valid function regex")
});

static MODIFIER_ANCHOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bmodifier\s+([A-Za-z_$][A-Za-z0-9_$]*)").expect("valid modifier regex")
});

static EVENT_ANCHOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bevent\s+([A-Za-z_$][A-Za-z0-9_$]*)\s*\(").expect("valid event regex")
});

static IMPORT_ANCHOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\bimport\s+(?:[^;"']*?\bfrom\s+)?["']([^"']+)["']"#).expect("valid import regex")
});

static CONTRACT_ANCHOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(abstract\s+contract|contract|interface|library)\s+([A-Za-z_$][A-Za-z0-9_$]*)")
        .expect("valid contract regex")
});

/// A line-leading elementary or mapping type, optional attribute keywords,
/// an identifier, an optional initializer, then `;`. Local variables of
/// value types match as well; that over-match is part of the approximation.
static STATE_VARIABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^[ \t]*(mapping\s*\([^;]*?\)|(?:u?int\d*|address(?:\s+payable)?|bool|string|bytes\d*)(?:\[\d*\])*)((?:\s+(?:public|private|internal|constant|immutable|override))*)\s+([A-Za-z_$][A-Za-z0-9_$]*)\s*(?:=[^;]*)?;",
    )
    .expect("valid state variable regex")
});

/// One `function <name>(` anchor and the text around it.
#[derive(Debug, Clone)]
pub struct FunctionMatch<'a> {
    pub name: &'a str,
    /// Byte offset of the `function` keyword
    pub start: usize,
    /// Text between the parameter list's parentheses
    pub params: &'a str,
    /// Text from the anchor up to the first `{` or `;`
    pub header: &'a str,
    /// Bounded keyword window starting at the anchor
    pub window: &'a str,
}

/// A named anchor (event, modifier) with its parameter text, if any.
#[derive(Debug, Clone)]
pub struct NamedMatch<'a> {
    pub name: &'a str,
    pub start: usize,
    pub params: Option<&'a str>,
    pub window: &'a str,
}

#[derive(Debug, Clone)]
pub struct VariableMatch<'a> {
    pub name: &'a str,
    pub type_name: String,
    pub attributes: &'a str,
    pub start: usize,
}

/// Slice `len` bytes from `start`, backing off to a char boundary.
pub fn window(text: &str, start: usize, len: usize) -> &str {
    let mut end = start.saturating_add(len).min(text.len());
    while end > start && !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[start..end]
}

/// 1-based line number of a byte offset
pub fn line_of(text: &str, offset: usize) -> usize {
    let offset = offset.min(text.len());
    text.as_bytes()[..offset].iter().filter(|b| **b == b'\n').count() + 1
}

/// Visibility by keyword presence; `internal` when nothing is found.
pub fn infer_visibility(window: &str) -> Visibility {
    if window.contains("external") {
        Visibility::External
    } else if window.contains("public") {
        Visibility::Public
    } else if window.contains("private") {
        Visibility::Private
    } else {
        Visibility::Internal
    }
}

/// Mutability by keyword presence; non-payable when nothing is found.
pub fn infer_mutability(window: &str) -> StateMutability {
    if window.contains("pure") {
        StateMutability::Pure
    } else if window.contains("view") {
        StateMutability::View
    } else if window.contains("payable") {
        StateMutability::Payable
    } else {
        StateMutability::NonPayable
    }
}

/// Contents of the parenthesized group opening at `open`, and the offset
/// just past its closing parenthesis. Unbalanced input runs to end of text.
pub fn paren_group(text: &str, open: usize) -> (&str, usize) {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    for (i, b) in bytes.iter().enumerate().skip(open) {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return (&text[open + 1..i], i + 1);
                }
            }
            _ => {}
        }
    }
    (&text[(open + 1).min(text.len())..], text.len())
}

/// Text from `start` up to (not including) the first `{` or `;`.
pub fn header(text: &str, start: usize) -> &str {
    let rest = &text[start..];
    let end = rest.find(['{', ';']).unwrap_or(rest.len());
    &rest[..end]
}

pub fn functions(text: &str) -> Vec<FunctionMatch<'_>> {
    FUNCTION_ANCHOR
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?.as_str();
            let open = whole.end() - 1;
            let (params, _) = paren_group(text, open);
            Some(FunctionMatch {
                name,
                start: whole.start(),
                params,
                header: header(text, whole.start()),
                window: window(text, whole.start(), MODIFIER_WINDOW),
            })
        })
        .collect()
}

pub fn events(text: &str) -> Vec<NamedMatch<'_>> {
    EVENT_ANCHOR
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let (params, _) = paren_group(text, whole.end() - 1);
            Some(NamedMatch {
                name: caps.get(1)?.as_str(),
                start: whole.start(),
                params: Some(params),
                window: window(text, whole.start(), MODIFIER_WINDOW),
            })
        })
        .collect()
}

pub fn modifiers(text: &str) -> Vec<NamedMatch<'_>> {
    MODIFIER_ANCHOR
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(NamedMatch {
                name: caps.get(1)?.as_str(),
                start: whole.start(),
                params: None,
                window: window(text, whole.start(), MODIFIER_WINDOW),
            })
        })
        .collect()
}

pub fn imports(text: &str) -> Vec<&str> {
    IMPORT_ANCHOR
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// A `contract`/`interface`/`library` declaration and where it starts.
#[derive(Debug, Clone, Copy)]
pub struct ContractMatch<'a> {
    pub name: &'a str,
    pub kind: ContractKind,
    pub start: usize,
}

pub fn contracts(text: &str) -> Vec<ContractMatch<'_>> {
    CONTRACT_ANCHOR
        .captures_iter(text)
        .filter_map(|caps| {
            let keyword = caps.get(1)?.as_str();
            let kind = if keyword.starts_with("abstract") {
                ContractKind::Abstract
            } else {
                match keyword {
                    "interface" => ContractKind::Interface,
                    "library" => ContractKind::Library,
                    _ => ContractKind::Contract,
                }
            };
            Some(ContractMatch {
                name: caps.get(2)?.as_str(),
                kind,
                start: caps.get(0)?.start(),
            })
        })
        .collect()
}

pub fn state_variables(text: &str) -> Vec<VariableMatch<'_>> {
    STATE_VARIABLE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let raw_type = caps.get(1)?.as_str();
            Some(VariableMatch {
                name: caps.get(3)?.as_str(),
                type_name: normalize_type(raw_type),
                attributes: caps.get(2).map_or("", |m| m.as_str()),
                start: whole.start(),
            })
        })
        .collect()
}

/// Canonical ABI spelling of a type: collapses whitespace, expands the
/// `uint`/`int` aliases and drops `payable` from `address payable`.
pub fn normalize_type(raw: &str) -> String {
    let compact: String = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let compact = compact.replace("address payable", "address");
    let (base, suffix) = match compact.find('[') {
        Some(idx) => compact.split_at(idx),
        None => (compact.as_str(), ""),
    };
    let base = match base {
        "uint" => "uint256",
        "int" => "int256",
        other => other,
    };
    format!("{base}{suffix}")
}

const NON_NAME_TOKENS: &[&str] = &["memory", "storage", "calldata", "indexed", "payable"];

/// Split a parameter list on commas.
///
/// The split is naive: a comma inside a nested type (a tuple or a
/// function-typed parameter) breaks that parameter in two.
pub fn split_params(list: &str) -> Vec<Param> {
    list.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| {
            let tokens: Vec<&str> = p.split_whitespace().collect();
            let indexed = tokens.contains(&"indexed");
            let name = match tokens.last() {
                Some(last) if tokens.len() > 1 && !NON_NAME_TOKENS.contains(last) => {
                    (*last).to_string()
                }
                _ => String::new(),
            };
            let ty = tokens.first().map_or_else(String::new, |t| normalize_type(t));
            Param {
                ty,
                name,
                indexed: indexed.then_some(true),
            }
        })
        .collect()
}

/// Output parameters from a function header's `returns (...)` clause.
pub fn return_params(header: &str) -> Vec<Param> {
    match header.find("returns") {
        Some(idx) => {
            let rest = &header[idx..];
            match rest.find('(') {
                Some(open) => split_params(paren_group(rest, open).0),
                None => Vec::new(),
            }
        }
        None => Vec::new(),
    }
}
