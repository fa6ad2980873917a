pub mod qualification;

pub use qualification::{QualificationOutcome, QualificationPipeline};
