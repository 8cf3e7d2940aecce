//! Valuation System CLI
//!
//! Values a single policy from command-line facts and prints the breakdown

use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::io::Write;

use valuation_system::{
    PolicyFactsInput, ValuationEngine, ValuationRequest,
};

/// Value one in-force policy from the command line
#[derive(Debug, Parser)]
#[command(name = "valuation_system", version, about)]
struct Args {
    /// Issuing insurer
    #[arg(long, default_value = "AIA")]
    company: String,

    /// Product category
    #[arg(long, default_value = "Savings Plan")]
    product_type: String,

    /// Contract period in years
    #[arg(long, default_value_t = 10)]
    contract_period_years: i32,

    /// Years already paid
    #[arg(long, default_value_t = 5)]
    paid_years: i32,

    /// Annual premium
    #[arg(long, default_value_t = 3000.0)]
    annual_premium: f64,

    /// Total premium paid (defaults to annual x period)
    #[arg(long)]
    total_premium: Option<f64>,

    /// Declared surrender value
    #[arg(long, default_value_t = 12000.0)]
    surrender_value: f64,

    /// Policy currency code
    #[arg(long)]
    currency: Option<String>,

    /// Write the full result JSON to this path
    #[arg(long, default_value = "valuation_output.json")]
    output: String,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    println!("Valuation System v0.1.0");
    println!("=======================\n");

    let request = ValuationRequest::from_policy(PolicyFactsInput {
        company: args.company,
        product_type: args.product_type,
        contract_period_years: args.contract_period_years,
        paid_years: args.paid_years,
        annual_premium: args.annual_premium,
        total_premium: args.total_premium,
        surrender_value: args.surrender_value,
        currency: args.currency,
    });

    println!("Policy: {} / {}", request.policy.company, request.policy.product_type);
    println!("  Contract Period: {} years", request.policy.contract_period_years);
    println!("  Paid Years: {}", request.policy.paid_years);
    println!("  Annual Premium: ${:.2}", request.policy.annual_premium);
    println!("  Surrender Value: ${:.2}", request.policy.surrender_value);
    println!();

    let engine = ValuationEngine::with_defaults();
    let result = engine.value_policy(&request).context("valuation failed")?;

    println!("Result:");
    println!("  Final Value: ${:.2}", result.final_value);
    println!("  Risk Grade: {}", result.risk_grade);
    println!("  Confidence: {:.1}%", result.confidence * 100.0);
    println!("  Composite Risk: {:.4}", result.composite_risk);
    println!();

    println!("Breakdown:");
    println!("  {:<24} {:>14.2}", "Base Value", result.breakdown.base_value);
    println!("  {:<24} {:>14.4}", "Market Adjustment (x)", result.breakdown.market_adjustment);
    println!("  {:<24} {:>14.4}", "Risk Adjustment (x)", result.breakdown.risk_adjustment);
    println!("  {:<24} {:>14.4}", "Liquidity Adjustment (x)", result.breakdown.liquidity_adjustment);
    println!("  {:<24} {:>14.4}", "Regulatory Adjustment (x)", result.breakdown.regulatory_adjustment);
    println!("  {:<24} {:>14.2}", "Real Estate (+)", result.breakdown.real_estate_adjustment);
    println!("  {:<24} {:>14.2}", "Document Nudge (+)", result.breakdown.document_adjustment);
    println!();

    if !result.warnings.is_empty() {
        println!("Warnings:");
        for warning in &result.warnings {
            println!("  - {warning:?}");
        }
        println!();
    }

    if !result.recommendations.is_empty() {
        println!("Recommendations:");
        for rec in &result.recommendations.immediate {
            println!("  [immediate] {rec}");
        }
        for rec in &result.recommendations.short_term {
            println!("  [short-term] {rec}");
        }
        for rec in &result.recommendations.long_term {
            println!("  [long-term] {rec}");
        }
        for rec in &result.recommendations.risk_mitigation {
            println!("  [risk] {rec}");
        }
        println!();
    }

    let mut file = File::create(&args.output)
        .with_context(|| format!("unable to create {}", args.output))?;
    let json = serde_json::to_string_pretty(&result)?;
    writeln!(file, "{json}")?;

    println!("Full result written to: {}", args.output);

    Ok(())
}
