//! Screen state for the dashboard: keyed fetch containers that keep only the
//! latest result, plus the assistant chat session.

pub mod chat;
pub mod industry;
mod query;
pub mod stock;

#[cfg(test)]
mod test_support;

pub use chat::{ChatOptions, ChatSession, ChatState};
pub use industry::IndustryBenchmarkState;
pub use query::Snapshot;
pub use stock::StockAnalysisState;
