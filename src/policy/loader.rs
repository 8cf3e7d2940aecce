//! Load policy inputs from CSV for batch valuation

use super::PolicyFactsInput;
use csv::Reader;
use std::error::Error;
use std::path::Path;

/// Raw CSV row matching the batch input columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Company")]
    company: String,
    #[serde(rename = "ProductType")]
    product_type: String,
    #[serde(rename = "ContractPeriodYears")]
    contract_period_years: i32,
    #[serde(rename = "PaidYears")]
    paid_years: i32,
    #[serde(rename = "AnnualPremium")]
    annual_premium: f64,
    #[serde(rename = "TotalPremium")]
    total_premium: Option<f64>,
    #[serde(rename = "SurrenderValue")]
    surrender_value: f64,
    #[serde(rename = "Currency")]
    currency: Option<String>,
}

impl CsvRow {
    fn into_input(self) -> PolicyFactsInput {
        PolicyFactsInput {
            company: self.company,
            product_type: self.product_type,
            contract_period_years: self.contract_period_years,
            paid_years: self.paid_years,
            annual_premium: self.annual_premium,
            total_premium: self.total_premium,
            surrender_value: self.surrender_value,
            currency: self.currency.filter(|c| !c.is_empty()),
        }
    }
}

/// Load all policy inputs from a CSV file
pub fn load_policy_inputs<P: AsRef<Path>>(path: P) -> Result<Vec<PolicyFactsInput>, Box<dyn Error>> {
    let mut reader = Reader::from_path(path)?;
    let mut inputs = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        inputs.push(row.into_input());
    }

    Ok(inputs)
}

/// Load policy inputs from any reader (e.g., string buffer, network stream)
pub fn load_policy_inputs_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<PolicyFactsInput>, Box<dyn Error>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut inputs = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        inputs.push(row.into_input());
    }

    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Company,ProductType,ContractPeriodYears,PaidYears,AnnualPremium,TotalPremium,SurrenderValue,Currency
AIA,Savings Plan,10,5,3000,15000,12000,USD
Prudential,Whole Life,20,8,5000,,31000,
";

    #[test]
    fn test_load_from_reader() {
        let inputs = load_policy_inputs_from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(inputs.len(), 2);

        assert_eq!(inputs[0].company, "AIA");
        assert_eq!(inputs[0].total_premium, Some(15000.0));
        assert_eq!(inputs[0].currency.as_deref(), Some("USD"));

        // Blank optional columns come through as None
        assert_eq!(inputs[1].total_premium, None);
        assert_eq!(inputs[1].currency, None);
    }
}
