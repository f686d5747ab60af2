use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::abi::AbiEntry;
use crate::classify::ContractCategory;
use crate::finding::{Diagnostic, Severity};
use crate::risk::AuditGrade;
use crate::structure::DeclarationInventory;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub informational: usize,
    pub error: usize,
    pub warning: usize,
}

impl SeverityCounts {
    pub fn from_diagnostics<'a>(diagnostics: impl IntoIterator<Item = &'a Diagnostic>) -> Self {
        let mut counts = Self::default();
        for d in diagnostics {
            match d.severity {
                Severity::High => counts.high += 1,
                Severity::Medium => counts.medium += 1,
                Severity::Low => counts.low += 1,
                Severity::Informational => counts.informational += 1,
                Severity::Error => counts.error += 1,
                Severity::Warning => counts.warning += 1,
                Severity::Unknown => {}
            }
        }
        counts
    }
}

/// The complete result of analyzing one source text. Built once, handed off
/// whole, never modified; renderers and transports treat it as read-only.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub risk_score: u8,
    pub audit_grade: AuditGrade,
    pub contract_category: ContractCategory,
    pub security_diagnostics: Vec<Diagnostic>,
    pub style_diagnostics: Vec<Diagnostic>,
    pub findings_by_severity: SeverityCounts,
    pub inventory: DeclarationInventory,
    pub abi: Vec<AbiEntry>,
    pub unsafe_constructs: Vec<String>,
    pub deployment_warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative_summary: Option<String>,
    /// SHA-256 of the analyzed text, hex encoded
    pub source_hash: String,
    pub generated_at: DateTime<Utc>,
}

impl AnalysisRecord {
    pub fn total_diagnostics(&self) -> usize {
        self.security_diagnostics.len() + self.style_diagnostics.len()
    }
}
