pub mod document;
pub mod report;
pub mod resolution;
pub mod term;
