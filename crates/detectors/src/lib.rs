use solidity_guard::detector::Detector;

pub mod consecutive_blank_lines;
pub mod delegatecall_usage;
pub mod integer_overflow;
pub mod license_identifier;
pub mod max_line_length;
pub mod missing_access_control;
pub mod reentrancy_pattern;
pub mod selfdestruct;
pub mod timestamp_dependence;
pub mod trailing_whitespace;
pub mod tx_origin;
pub mod unchecked_call;

/// Heuristic substitutes for the external security tool
pub fn security_detectors() -> Vec<Box<dyn Detector>> {
    vec![
        Box::new(reentrancy_pattern::ReentrancyPattern),
        Box::new(unchecked_call::UncheckedCall),
        Box::new(integer_overflow::IntegerOverflow),
        Box::new(delegatecall_usage::DelegatecallUsage),
        Box::new(tx_origin::TxOrigin),
        Box::new(timestamp_dependence::TimestampDependence),
        Box::new(missing_access_control::MissingAccessControl),
        Box::new(selfdestruct::Selfdestruct),
    ]
}

/// Heuristic substitutes for the external lint tool
pub fn style_detectors() -> Vec<Box<dyn Detector>> {
    vec![
        Box::new(license_identifier::LicenseIdentifier),
        Box::new(max_line_length::MaxLineLength),
        Box::new(consecutive_blank_lines::ConsecutiveBlankLines),
        Box::new(trailing_whitespace::TrailingWhitespace),
    ]
}

/// Returns all built-in detectors
pub fn all_detectors() -> Vec<Box<dyn Detector>> {
    let mut detectors = security_detectors();
    detectors.extend(style_detectors());
    detectors
}

#[cfg(test)]
mod tests {
    use super::*;
    use solidity_guard::finding::Category;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let all = all_detectors();
        let names: HashSet<&str> = all.iter().map(|d| d.name()).collect();
        assert_eq!(names.len(), all.len());
    }

    #[test]
    fn test_families_match_category() {
        assert!(security_detectors()
            .iter()
            .all(|d| d.category() == Category::Security && d.confidence().is_some()));
        assert!(style_detectors()
            .iter()
            .all(|d| d.category() == Category::Style && d.confidence().is_none()));
    }
}
