use anyhow::Result;
use colored::{ColoredString, Colorize};
use solidity_guard::finding::{Diagnostic, Severity};
use solidity_guard::risk::AuditGrade;

use crate::commands::analyze::FileAnalysis;

fn severity_label(severity: Severity) -> ColoredString {
    match severity {
        Severity::High => "HIGH".red().bold(),
        Severity::Medium => "MEDIUM".yellow().bold(),
        Severity::Low => "LOW".blue(),
        Severity::Informational => "INFO".dimmed(),
        Severity::Error => "ERROR".red(),
        Severity::Warning => "WARNING".yellow(),
        Severity::Unknown => "UNKNOWN".dimmed(),
    }
}

fn grade_label(grade: AuditGrade) -> ColoredString {
    match grade {
        AuditGrade::A => "A".green().bold(),
        AuditGrade::B => "B".yellow().bold(),
        AuditGrade::C => "C".red().bold(),
    }
}

fn print_diagnostics(title: &str, diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }
    println!("  {}", title.bold());
    for d in diagnostics {
        println!("  [{}] {} ({})", severity_label(d.severity), d.message, d.rule);
        let function = match d.function.as_str() {
            solidity_guard::finding::NO_FUNCTION => String::new(),
            name => format!(" in {}", name),
        };
        println!("    {} {}{}", "-->".dimmed(), d.location, function);
        if let Some(rec) = &d.recommendation {
            println!("    {} {}", "Fix:".green(), rec);
        }
    }
    println!();
}

pub fn print(analyses: &[FileAnalysis], quiet: bool, no_color: bool) -> Result<()> {
    if no_color {
        colored::control::set_override(false);
    }

    if !quiet {
        println!();
        println!("{}", "  solidity-guard - Solidity Risk Analysis".bold());
        println!("  Files analyzed: {}", analyses.len());
        println!();
    }

    for FileAnalysis { file, record } in analyses {
        println!(
            "{} {}  grade {}  risk {}/100  {}",
            "==>".bold(),
            file.display(),
            grade_label(record.audit_grade),
            record.risk_score,
            record.contract_category
        );
        println!();

        if record.total_diagnostics() == 0 {
            println!("  {} No issues found.", "✓".green().bold());
            println!();
        }
        print_diagnostics("Security", &record.security_diagnostics);
        print_diagnostics("Style", &record.style_diagnostics);

        for construct in &record.unsafe_constructs {
            println!("  {} {}", "!".red().bold(), construct);
        }
        for warning in &record.deployment_warnings {
            println!("  {} {}", "Deploy:".yellow().bold(), warning);
        }
        if let Some(summary) = &record.narrative_summary {
            println!();
            println!("  {}", "Summary".bold().underline());
            for line in summary.lines() {
                println!("    {}", line);
            }
        }

        if !quiet {
            let counts = &record.findings_by_severity;
            let inventory = &record.inventory;
            println!();
            println!("{}", "  Overview".bold().underline());
            println!(
                "    Contracts: {}  Functions: {}  Events: {}  Modifiers: {}  ABI entries: {}",
                inventory.contracts.len(),
                inventory.functions.len(),
                inventory.events.len(),
                inventory.modifiers.len(),
                record.abi.len()
            );
            println!(
                "    High: {}  Medium: {}  Low: {}  Info: {}  Errors: {}  Warnings: {}",
                counts.high,
                counts.medium,
                counts.low,
                counts.informational,
                counts.error,
                counts.warning
            );
            println!("    Source hash: {}", record.source_hash);
        }
        println!();
    }

    Ok(())
}
