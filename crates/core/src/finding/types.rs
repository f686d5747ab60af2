use serde::Serialize;

/// Severity levels ordered from most to least severe.
/// IMPORTANT: Variant order matters: derived Ord puts the security levels
/// first (High < Medium < Low < Informational), then the lint levels, then
/// Unknown. Registry sorting relies on this. Do NOT reorder these variants.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    High,
    Medium,
    Low,
    Informational,
    Error,
    Warning,
    /// Anything an external tool reported that we do not recognize.
    Unknown,
}

impl Severity {
    /// Parse a security-tool impact label (case-insensitive).
    pub fn from_impact(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "high" => Severity::High,
            "medium" => Severity::Medium,
            "low" => Severity::Low,
            "informational" | "info" => Severity::Informational,
            _ => Severity::Unknown,
        }
    }

    /// Parse a lint-tool severity label (case-insensitive).
    pub fn from_lint_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "error" => Severity::Error,
            "warning" | "warn" => Severity::Warning,
            _ => Severity::Unknown,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::High => write!(f, "High"),
            Severity::Medium => write!(f, "Medium"),
            Severity::Low => write!(f, "Low"),
            Severity::Informational => write!(f, "Informational"),
            Severity::Error => write!(f, "Error"),
            Severity::Warning => write!(f, "Warning"),
            Severity::Unknown => write!(f, "Unknown"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "high" => Some(Confidence::High),
            "medium" => Some(Confidence::Medium),
            "low" => Some(Confidence::Low),
            _ => None,
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::High => write!(f, "High"),
            Confidence::Medium => write!(f, "Medium"),
            Confidence::Low => write!(f, "Low"),
        }
    }
}

/// Which detector family a diagnostic (or a detector) belongs to.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Security,
    Style,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Security => write!(f, "security"),
            Category::Style => write!(f, "style"),
        }
    }
}

/// The backend that produced a diagnostic.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticSource {
    SecurityTool,
    SecurityHeuristic,
    LintTool,
    LintHeuristic,
}

impl DiagnosticSource {
    pub fn heuristic(category: Category) -> Self {
        match category {
            Category::Security => DiagnosticSource::SecurityHeuristic,
            Category::Style => DiagnosticSource::LintHeuristic,
        }
    }
}

/// 1-based position of a diagnostic in the analyzed text.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

impl SourceLocation {
    pub fn line(line: usize) -> Self {
        Self { line, column: None }
    }
}

/// Function label used by heuristics that do not resolve a call site.
pub const MULTIPLE_FUNCTIONS: &str = "Multiple";
/// Function label used when no function applies.
pub const NO_FUNCTION: &str = "N/A";

/// One reported issue, normalized across every backend.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Diagnostic {
    pub source: DiagnosticSource,
    pub rule: String,
    pub message: String,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    pub location: SourceLocation,
    pub function: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}
