use super::inventory::*;
use super::scanner;

/// Build the declaration inventory for a source text.
///
/// Total and pure: any input (including the empty string) produces an
/// inventory, and identical input always produces an identical one.
/// See [`scanner`] for the precision limits of the lexical approach.
pub fn extract(source: &str) -> DeclarationInventory {
    let contracts = scanner::contracts(source)
        .into_iter()
        .map(|m| ContractDecl {
            name: m.name.to_string(),
            kind: m.kind,
        })
        .collect();

    let functions = scanner::functions(source)
        .into_iter()
        .map(|m| FunctionDecl {
            name: m.name.to_string(),
            visibility: scanner::infer_visibility(m.window),
            mutability: scanner::infer_mutability(m.window),
            line: scanner::line_of(source, m.start),
        })
        .collect();

    let variables = scanner::state_variables(source)
        .into_iter()
        .map(|m| VariableDecl {
            name: m.name.to_string(),
            type_name: m.type_name,
            visibility: variable_visibility(m.attributes),
            constant: m.attributes.contains("constant") || m.attributes.contains("immutable"),
            line: scanner::line_of(source, m.start),
        })
        .collect();

    let events = scanner::events(source)
        .into_iter()
        .map(|m| EventDecl {
            name: m.name.to_string(),
            line: scanner::line_of(source, m.start),
        })
        .collect();

    let modifiers = scanner::modifiers(source)
        .into_iter()
        .map(|m| ModifierDecl {
            name: m.name.to_string(),
            line: scanner::line_of(source, m.start),
        })
        .collect();

    let imports = scanner::imports(source)
        .into_iter()
        .map(|path| ImportRef {
            path: path.to_string(),
        })
        .collect();

    DeclarationInventory {
        contracts,
        functions,
        variables,
        events,
        modifiers,
        imports,
    }
}

/// State variables have no `external`; unlabeled ones are internal.
fn variable_visibility(attributes: &str) -> Visibility {
    match scanner::infer_visibility(attributes) {
        Visibility::External => Visibility::Internal,
        other => other,
    }
}
