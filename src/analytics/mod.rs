//! Analytics module - Aggregation of the sales table into dashboard series

mod engine;
mod kpi;

pub use engine::{
    AggregationConfig, AggregationEngine, AggregationResult, CategoryBreakdown, WeeklyPoint,
    DEFAULT_TOP_N,
};
pub use kpi::{Direction, Kpi};
