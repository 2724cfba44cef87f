use async_trait::async_trait;
use dashboard_core::{
    ApiResult, ChatRequest, ChatResponse, DashboardProvider, IndustryBenchmark, StockAnalysis,
};

use crate::DashboardClient;

/// HTTP-backed provider; the fallback policy applies as on the client itself.
#[async_trait]
impl DashboardProvider for DashboardClient {
    async fn industry_benchmark(&self, industry_name: &str) -> ApiResult<IndustryBenchmark> {
        self.post_industry_benchmark(industry_name).await
    }

    async fn stock_fundamentals(
        &self,
        ticker: &str,
        industry: Option<&str>,
        include_industry_context: bool,
    ) -> ApiResult<StockAnalysis> {
        self.post_stock_fundamentals(ticker, industry, include_industry_context)
            .await
    }

    async fn chat(&self, request: ChatRequest) -> ApiResult<ChatResponse> {
        self.post_chat(&request).await
    }
}
