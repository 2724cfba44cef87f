use async_trait::async_trait;

use crate::{ApiResult, ChatRequest, ChatResponse, IndustryBenchmark, StockAnalysis};

/// Backend operations the dashboard screens depend on.
///
/// Implemented by the HTTP client; screen state containers only see this trait.
#[async_trait]
pub trait DashboardProvider: Send + Sync {
    async fn industry_benchmark(&self, industry_name: &str) -> ApiResult<IndustryBenchmark>;

    async fn stock_fundamentals(
        &self,
        ticker: &str,
        industry: Option<&str>,
        include_industry_context: bool,
    ) -> ApiResult<StockAnalysis>;

    async fn chat(&self, request: ChatRequest) -> ApiResult<ChatResponse>;
}
