pub mod use_cases;

pub use use_cases::extraction::ExtractionUseCase;
pub use use_cases::generation::{GenerationReport, GenerationUseCase};
