//! Result records produced by the batch pipeline

mod result;

pub use result::{AnalysisDetails, AnalysisResult, BatchSummary, Status};
