pub mod dataset;
pub mod metrics;
pub mod patient;

pub use dataset::*;
pub use metrics::*;
pub use patient::*;
