//! Company and product rating lookup
//!
//! Strength/performance scores are plain data: adding a company or product is
//! a table entry (builtin or CSV), never a code branch. Unknown keys resolve
//! to documented neutral defaults at the call site.

use std::collections::HashMap;
use std::error::Error;
use std::fs::File;
use std::path::Path;

/// Neutral company strength substituted for unknown companies.
pub const NEUTRAL_COMPANY_STRENGTH: f64 = 0.70;

/// Neutral product performance substituted for unknown product types.
pub const NEUTRAL_PRODUCT_PERFORMANCE: f64 = 0.60;

/// Scores found for one company/product pair. `None` means the key was
/// absent from the table; the caller substitutes the neutral default and
/// records the degradation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RatingEntry {
    pub company_strength: Option<f64>,
    pub product_performance: Option<f64>,
}

/// External rating source for company strength and product performance.
pub trait CompanyRatingProvider: Send + Sync {
    fn lookup(&self, company: &str, product_type: &str) -> RatingEntry;
}

/// In-memory rating table keyed by canonical names.
#[derive(Debug, Clone)]
pub struct RatingTable {
    companies: HashMap<String, f64>,
    products: HashMap<String, f64>,
}

/// Builtin company strengths: Hong Kong market persistency rates.
const BUILTIN_COMPANIES: [(&str, f64); 12] = [
    ("AIA", 0.923),
    ("Prudential", 0.891),
    ("FWD", 0.847),
    ("Great Eastern", 0.876),
    ("Zurich", 0.885),
    ("Manulife", 0.863),
    ("Sun Life", 0.869),
    ("Allianz", 0.882),
    ("AXA", 0.888),
    ("Generali", 0.871),
    ("MetLife", 0.854),
    ("New York Life", 0.935),
];

/// Builtin product performance scores by category.
const BUILTIN_PRODUCTS: [(&str, f64); 7] = [
    ("Investment Linked", 0.82),
    ("Whole Life", 0.80),
    ("Endowment Plan", 0.78),
    ("Pension Plan", 0.70),
    ("Savings Plan", 0.65),
    ("Annuity", 0.60),
    ("Term Life", 0.55),
];

impl RatingTable {
    /// Table populated with the builtin market data.
    pub fn builtin() -> Self {
        Self {
            companies: BUILTIN_COMPANIES
                .iter()
                .map(|(name, score)| (name.to_string(), *score))
                .collect(),
            products: BUILTIN_PRODUCTS
                .iter()
                .map(|(name, score)| (name.to_string(), *score))
                .collect(),
        }
    }

    /// Load a table from `company_ratings.csv` and `product_ratings.csv`
    /// in the given directory. Each file has `Name,Score` columns.
    pub fn from_csv_path(path: &Path) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            companies: load_scores(&path.join("company_ratings.csv"))?,
            products: load_scores(&path.join("product_ratings.csv"))?,
        })
    }

    /// Case-insensitive lookup; a table key also matches as a leading word
    /// prefix so "AIA Group Limited" resolves via the "AIA" entry.
    fn score_for<'a>(table: &'a HashMap<String, f64>, query: &str) -> Option<f64> {
        let query = query.trim();
        let mut best: Option<(&'a str, f64)> = None;
        for (key, score) in table {
            if query.eq_ignore_ascii_case(key) {
                return Some(*score);
            }
            let bytes = query.as_bytes();
            if bytes.len() > key.len()
                && bytes[..key.len()].eq_ignore_ascii_case(key.as_bytes())
                && bytes[key.len()] == b' '
            {
                // Longest matching prefix wins, deterministically
                if best.map_or(true, |(b, _)| key.len() > b.len()) {
                    best = Some((key, *score));
                }
            }
        }
        best.map(|(_, score)| score)
    }
}

impl CompanyRatingProvider for RatingTable {
    fn lookup(&self, company: &str, product_type: &str) -> RatingEntry {
        RatingEntry {
            company_strength: Self::score_for(&self.companies, company),
            product_performance: Self::score_for(&self.products, product_type),
        }
    }
}

/// Load `Name,Score` rows from a CSV file.
fn load_scores(path: &Path) -> Result<HashMap<String, f64>, Box<dyn Error>> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);

    let mut scores = HashMap::new();
    for result in reader.records() {
        let record = result?;
        let name = record[0].to_string();
        let score: f64 = record[1].parse()?;
        scores.insert(name, score.clamp(0.0, 1.0));
    }

    Ok(scores)
}
