//! Value an entire block of policies from a CSV file
//!
//! Outputs one summary row per policy for downstream pricing review

use rayon::prelude::*;
use std::fs::File;
use std::io::Write;
use std::time::Instant;

use valuation_system::policy::load_policy_inputs;
use valuation_system::{ValuationEngine, ValuationRequest};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let input_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "policy_block.csv".to_string());
    let output_path = std::env::args()
        .nth(2)
        .unwrap_or_else(|| "valuation_block_output.csv".to_string());

    let start = Instant::now();
    println!("Loading policies from {input_path}...");

    let inputs = load_policy_inputs(&input_path)
        .map_err(|e| anyhow::anyhow!("failed to load {input_path}: {e}"))?;
    println!("Loaded {} policies in {:?}", inputs.len(), start.elapsed());

    let engine = ValuationEngine::with_defaults();

    println!("Running valuations...");
    let run_start = Instant::now();

    // Value policies in parallel; each row is independent
    let results: Vec<_> = inputs
        .par_iter()
        .map(|input| {
            let request = ValuationRequest::from_policy(input.clone());
            (input, engine.value_policy(&request))
        })
        .collect();

    println!(
        "Valued {} policies in {:?}",
        results.len(),
        run_start.elapsed()
    );

    let mut file = File::create(&output_path)?;
    writeln!(
        file,
        "Company,ProductType,FinalValue,BaseValue,RiskGrade,Confidence,CompositeRisk,Warnings,Error"
    )?;

    let mut rejected = 0usize;
    for (input, result) in &results {
        match result {
            Ok(result) => {
                writeln!(
                    file,
                    "{},{},{:.2},{:.2},{},{:.4},{:.4},{},",
                    input.company,
                    input.product_type,
                    result.final_value,
                    result.breakdown.base_value,
                    result.risk_grade,
                    result.confidence,
                    result.composite_risk,
                    result.warnings.len(),
                )?;
            }
            Err(err) => {
                rejected += 1;
                writeln!(
                    file,
                    "{},{},,,,,,,\"{err}\"",
                    input.company, input.product_type,
                )?;
            }
        }
    }

    println!("\nResults written to: {output_path}");
    if rejected > 0 {
        println!("{rejected} policies rejected as invalid input");
    }

    Ok(())
}
