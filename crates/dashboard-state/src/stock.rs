use dashboard_core::{DashboardProvider, StockAnalysis};
use std::sync::Arc;
use tokio::runtime::Handle;

use crate::query::{FetchFn, Query, Snapshot};

#[derive(Debug, Clone, PartialEq)]
struct StockKey {
    ticker: String,
    industry: Option<String>,
}

/// Stock analysis screen state. Fetches fundamentals with industry context
/// whenever the ticker or industry changes.
#[derive(Clone)]
pub struct StockAnalysisState {
    query: Query<StockKey, StockAnalysis>,
}

impl StockAnalysisState {
    /// Fetch on the current tokio runtime. Panics outside a runtime.
    pub fn new(provider: Arc<dyn DashboardProvider>) -> Self {
        Self::with_runtime(provider, Handle::current())
    }

    pub fn with_runtime(provider: Arc<dyn DashboardProvider>, runtime: Handle) -> Self {
        let fetch: FetchFn<StockKey, StockAnalysis> = Arc::new(move |key: StockKey| {
            let provider = Arc::clone(&provider);
            Box::pin(async move {
                provider
                    .stock_fundamentals(&key.ticker, key.industry.as_deref(), true)
                    .await
            }) as futures_util::future::BoxFuture<'static, _>
        });
        Self {
            query: Query::new(fetch, runtime),
        }
    }

    /// Select a ticker (and optional industry). A missing or blank ticker clears the screen.
    pub fn set_ticker(&self, ticker: Option<String>, industry: Option<String>) {
        let key = ticker
            .filter(|t| !t.trim().is_empty())
            .map(|ticker| StockKey {
                ticker,
                industry: industry.filter(|i| !i.trim().is_empty()),
            });
        self.query.set_key(key);
    }

    pub fn refresh(&self) {
        self.query.refresh();
    }

    pub fn snapshot(&self) -> Snapshot<StockAnalysis> {
        self.query.snapshot()
    }

    pub async fn settled(&self) -> Snapshot<StockAnalysis> {
        self.query.settled().await
    }
}
