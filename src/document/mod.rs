//! Document extraction handling: field model and confidence validation

mod extraction;
mod validator;

pub use extraction::DocumentExtraction;
pub use validator::{parse_document_date, validate, DocumentValidation};
