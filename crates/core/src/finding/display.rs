use std::fmt;

use super::types::{Diagnostic, SourceLocation};

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.column {
            Some(col) => write!(f, "line {}:{}", self.line, col),
            None => write!(f, "line {}", self.line),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({}) at {}",
            self.severity, self.message, self.rule, self.location
        )?;
        if self.function != super::types::NO_FUNCTION {
            write!(f, " in {}", self.function)?;
        }
        Ok(())
    }
}
