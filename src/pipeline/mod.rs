pub mod chart;
pub mod extraction;
pub mod metrics;
pub mod processor;
pub mod tabular;
