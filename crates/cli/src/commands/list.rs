use anyhow::Result;

pub fn run() -> Result<()> {
    let detectors = solidity_guard_detectors::all_detectors();

    println!(
        "{:<26} {:<10} {:<10} {:<12} Description",
        "Name", "Category", "Severity", "Confidence"
    );
    println!("{}", "-".repeat(100));

    for d in &detectors {
        let confidence = d
            .confidence()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<26} {:<10} {:<10} {:<12} {}",
            d.name(),
            d.category().to_string(),
            d.severity().to_string(),
            confidence,
            d.description()
        );
    }

    println!("\nTotal: {} detectors", detectors.len());
    Ok(())
}
