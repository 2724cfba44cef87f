use dashboard_core::{
    ApiError, ApiResult, CallOutcome, ChatRequest, ChatResponse, IndustryBenchmark,
    IndustryBenchmarkRequest, ModuleAnalyzeResponse, StockAnalysis, StockAnalysisRequest,
    StockFundamentalsRequest,
};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::fallback::{EndpointFamily, FallbackState};
use crate::mock::{mock_industry_benchmark, mock_stock_analysis};
use crate::normalize::normalize_financial_payload;
use crate::transport::Transport;
use crate::ApiConfig;

/// The five module-analyze routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleRoute {
    Borrowings,
    AssetQuality,
    WorkingCapital,
    CapexCwip,
    Liquidity,
}

impl ModuleRoute {
    pub const ALL: [ModuleRoute; 5] = [
        ModuleRoute::Borrowings,
        ModuleRoute::AssetQuality,
        ModuleRoute::WorkingCapital,
        ModuleRoute::CapexCwip,
        ModuleRoute::Liquidity,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            ModuleRoute::Borrowings => "/borrowings/analyze",
            ModuleRoute::AssetQuality => "/asset_quality/analyze",
            ModuleRoute::WorkingCapital => "/working_capital_module/analyze",
            ModuleRoute::CapexCwip => "/capex_cwip_module/analyze",
            ModuleRoute::Liquidity => "/liquidity/analyze",
        }
    }

    /// Key used in the aggregated all-modules result.
    pub fn key(&self) -> &'static str {
        match self {
            ModuleRoute::Borrowings => "borrowings",
            ModuleRoute::AssetQuality => "asset_quality",
            ModuleRoute::WorkingCapital => "working_capital",
            ModuleRoute::CapexCwip => "capex_cwip",
            ModuleRoute::Liquidity => "liquidity",
        }
    }
}

/// Typed client for every dashboard backend route.
///
/// Industry benchmark and stock fundamentals fall back to generated data when
/// the backend route is missing or unreachable; every other route surfaces
/// the transport error.
#[derive(Clone)]
pub struct DashboardClient {
    transport: Transport,
    fallback: Arc<FallbackState>,
}

impl DashboardClient {
    pub fn new(config: ApiConfig) -> Self {
        Self::with_fallback_state(config, Arc::new(FallbackState::new()))
    }

    pub fn with_defaults() -> Self {
        Self::new(ApiConfig::from_env())
    }

    /// Share fallback flags with other clients (e.g. one per screen).
    pub fn with_fallback_state(config: ApiConfig, fallback: Arc<FallbackState>) -> Self {
        Self {
            transport: Transport::new(&config),
            fallback,
        }
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    pub fn fallback_state(&self) -> &FallbackState {
        &self.fallback
    }

    /// Whether `family` is currently answered from generated data.
    pub fn is_using_mock(&self, family: EndpointFamily) -> bool {
        self.fallback.is_active(family)
    }

    fn resolve<T>(
        &self,
        family: EndpointFamily,
        outcome: CallOutcome<T>,
        generate: impl FnOnce() -> T,
    ) -> ApiResult<T> {
        match outcome {
            CallOutcome::Success(value) => {
                self.fallback.reset(family);
                Ok(value)
            }
            CallOutcome::RecoverableMiss(err) => {
                self.fallback.warn_once(family, &err.message);
                Ok(generate())
            }
            CallOutcome::HardFailure(err) => Err(err),
        }
    }

    /// POST /industry-benchmark, falling back to generated data.
    pub async fn post_industry_benchmark(&self, industry_name: &str) -> ApiResult<IndustryBenchmark> {
        let request = IndustryBenchmarkRequest {
            industry_name: industry_name.to_string(),
        };
        let outcome: CallOutcome<IndustryBenchmark> =
            CallOutcome::classify(self.transport.post_json("/industry-benchmark", &request).await);
        self.resolve(EndpointFamily::IndustryBenchmark, outcome, || {
            mock_industry_benchmark(industry_name)
        })
    }

    /// POST /stock-fundamentals, falling back to generated data.
    pub async fn post_stock_fundamentals(
        &self,
        ticker: &str,
        industry: Option<&str>,
        include_industry_context: bool,
    ) -> ApiResult<StockAnalysis> {
        let request = StockFundamentalsRequest {
            ticker: ticker.to_string(),
            industry: industry.map(str::to_string),
            include_industry_context: Some(include_industry_context),
        };
        let outcome: CallOutcome<StockAnalysis> =
            CallOutcome::classify(self.transport.post_json("/stock-fundamentals", &request).await);
        self.resolve(EndpointFamily::StockFundamentals, outcome, || {
            mock_stock_analysis(ticker, industry)
        })
    }

    /// POST /analyze-stock (simplified analysis, no fallback).
    pub async fn post_analyze_stock(&self, ticker: &str) -> ApiResult<StockAnalysis> {
        let request = StockAnalysisRequest {
            ticker: ticker.to_string(),
        };
        self.transport.post_json("/analyze-stock", &request).await
    }

    pub async fn post_chat(&self, request: &ChatRequest) -> ApiResult<ChatResponse> {
        self.transport.post_json("/chat", request).await
    }

    /// Normalize `payload` and POST it to one module-analyze route.
    pub async fn post_module_analyze(
        &self,
        route: ModuleRoute,
        payload: Value,
    ) -> ApiResult<ModuleAnalyzeResponse> {
        let body = normalize_financial_payload(payload);
        self.transport.post_json(route.path(), &body).await
    }

    pub async fn post_borrowings_analyze(&self, payload: Value) -> ApiResult<ModuleAnalyzeResponse> {
        self.post_module_analyze(ModuleRoute::Borrowings, payload).await
    }

    pub async fn post_asset_quality_analyze(&self, payload: Value) -> ApiResult<ModuleAnalyzeResponse> {
        self.post_module_analyze(ModuleRoute::AssetQuality, payload).await
    }

    pub async fn post_working_capital_analyze(&self, payload: Value) -> ApiResult<ModuleAnalyzeResponse> {
        self.post_module_analyze(ModuleRoute::WorkingCapital, payload).await
    }

    pub async fn post_capex_cwip_analyze(&self, payload: Value) -> ApiResult<ModuleAnalyzeResponse> {
        self.post_module_analyze(ModuleRoute::CapexCwip, payload).await
    }

    pub async fn post_liquidity_analyze(&self, payload: Value) -> ApiResult<ModuleAnalyzeResponse> {
        self.post_module_analyze(ModuleRoute::Liquidity, payload).await
    }

    /// Run all five module analyses concurrently against one normalized payload.
    ///
    /// All-or-nothing: the first failure fails the whole call and no partial
    /// map is returned. The remaining requests are not cancelled; they run to
    /// completion in their own tasks and their results are discarded.
    pub async fn post_all_modules_analyze(
        &self,
        payload: Value,
    ) -> ApiResult<BTreeMap<String, ModuleAnalyzeResponse>> {
        let body = Arc::new(normalize_financial_payload(payload));
        let calls = ModuleRoute::ALL.into_iter().map(|route| {
            let transport = self.transport.clone();
            let body = Arc::clone(&body);
            let handle = tokio::spawn(async move {
                transport
                    .post_json::<_, ModuleAnalyzeResponse>(route.path(), body.as_ref())
                    .await
            });
            async move {
                let response = handle
                    .await
                    .map_err(|e| ApiError::network(format!("Module task failed: {}", e)))??;
                Ok::<_, ApiError>((route.key().to_string(), response))
            }
        });

        let results = futures_util::future::try_join_all(calls).await?;
        tracing::debug!("All {} module analyses completed", results.len());
        Ok(results.into_iter().collect())
    }
}
