pub mod assembler;
pub mod config;
pub mod data;
pub mod error;
pub mod frame;
pub mod geo;
pub mod metrics;
pub mod output;
pub mod policy;
pub mod stats;

pub use assembler::{PipelineOptions, TrainingSetAssembler};
pub use error::{PipelineError, Result};
pub use frame::FeatureFrame;
