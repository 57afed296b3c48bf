//! lvc-bedrock
//!
//! Inspection report generation: the fixed LVC prompt template and the
//! Bedrock model that fills it in.

pub mod error;
pub mod generate;
pub mod model;
pub mod prompt;

pub use generate::ReportGenerator;
pub use model::{BedrockReportModel, ReportModel};
