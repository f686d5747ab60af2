//! Risk score and audit grade.
//!
//! Invariants:
//! - The score is a clamped weighted sum, always within `0..=MAX_SCORE`
//! - Adding a diagnostic never lowers the score
//! - Escalation markers force grade C regardless of score

use serde::Serialize;

use crate::finding::{Diagnostic, Severity};

pub const MAX_SCORE: u8 = 100;

/// Scores strictly above this grade C.
pub const GRADE_C_ABOVE: u8 = 70;
/// Scores strictly above this (and not C) grade B.
pub const GRADE_B_ABOVE: u8 = 40;

/// Rule-name substrings that force grade C: upgradeability, minting and
/// self-destruct capability.
pub const ESCALATION_MARKERS: &[&str] = &[
    "proxy",
    "upgradeable",
    "mint",
    "unrestricted",
    "suicide",
    "selfdestruct",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum AuditGrade {
    A,
    B,
    C,
}

impl std::fmt::Display for AuditGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditGrade::A => write!(f, "A"),
            AuditGrade::B => write!(f, "B"),
            AuditGrade::C => write!(f, "C"),
        }
    }
}

/// Weight of a security severity; non-security severities weigh nothing.
pub fn security_weight(severity: Severity) -> u32 {
    match severity {
        Severity::High => 25,
        Severity::Medium => 15,
        Severity::Low => 5,
        Severity::Informational => 1,
        Severity::Error | Severity::Warning | Severity::Unknown => 0,
    }
}

/// Weight of a style severity; non-style severities weigh nothing.
pub fn style_weight(severity: Severity) -> u32 {
    match severity {
        Severity::Error => 3,
        Severity::Warning => 1,
        _ => 0,
    }
}

/// Weighted sum of both lists, clamped to `0..=100` (saturates, never scales).
pub fn score(security: &[Diagnostic], style: &[Diagnostic]) -> u8 {
    let total = security
        .iter()
        .map(|d| security_weight(d.severity))
        .chain(style.iter().map(|d| style_weight(d.severity)))
        .fold(0u32, u32::saturating_add);
    total.min(MAX_SCORE as u32) as u8
}

/// The first security diagnostic whose rule name carries an escalation marker.
pub fn escalation(security: &[Diagnostic]) -> Option<&Diagnostic> {
    security.iter().find(|d| {
        let rule = d.rule.to_lowercase();
        ESCALATION_MARKERS.iter().any(|marker| rule.contains(marker))
    })
}

pub fn grade(score: u8, security: &[Diagnostic]) -> AuditGrade {
    if score > GRADE_C_ABOVE || escalation(security).is_some() {
        AuditGrade::C
    } else if score > GRADE_B_ABOVE {
        AuditGrade::B
    } else {
        AuditGrade::A
    }
}
