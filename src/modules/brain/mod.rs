pub mod llm;
pub mod report;

pub use llm::{GeminiClient, Generation, TextGenerator};
pub use report::{DegradeReason, ReportOutcome, ReportSynthesizer};
