/// Provides detectors with the source text in the shapes they scan.
pub struct AnalysisContext<'a> {
    source: &'a str,
    lowercase: String,
    lines: Vec<&'a str>,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            lowercase: source.to_lowercase(),
            lines: source.lines().collect(),
        }
    }

    /// Raw source text
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Case-insensitive substring test; `needle` must already be lowercase
    pub fn mentions(&self, needle: &str) -> bool {
        self.lowercase.contains(needle)
    }

    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    /// Get source line by number (1-indexed)
    pub fn get_line(&self, line: usize) -> Option<&'a str> {
        self.lines.get(line.checked_sub(1)?).copied()
    }
}
