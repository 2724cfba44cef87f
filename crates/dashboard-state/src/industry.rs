use dashboard_core::{DashboardProvider, IndustryBenchmark};
use std::sync::Arc;
use tokio::runtime::Handle;

use crate::query::{FetchFn, Query, Snapshot};

/// Industry benchmark screen state.
///
/// ```ignore
/// let screen = IndustryBenchmarkState::new(provider);
/// screen.set_industry(Some("Banking".into()));
/// let state = screen.settled().await;
/// ```
#[derive(Clone)]
pub struct IndustryBenchmarkState {
    query: Query<String, IndustryBenchmark>,
}

impl IndustryBenchmarkState {
    /// Fetch on the current tokio runtime. Panics outside a runtime; use
    /// [`with_runtime`](Self::with_runtime) from other threads.
    pub fn new(provider: Arc<dyn DashboardProvider>) -> Self {
        Self::with_runtime(provider, Handle::current())
    }

    pub fn with_runtime(provider: Arc<dyn DashboardProvider>, runtime: Handle) -> Self {
        let fetch: FetchFn<String, IndustryBenchmark> = Arc::new(move |industry: String| {
            let provider = Arc::clone(&provider);
            Box::pin(async move { provider.industry_benchmark(&industry).await })
                as futures_util::future::BoxFuture<'static, _>
        });
        Self {
            query: Query::new(fetch, runtime),
        }
    }

    /// Select an industry. `None` or a blank name clears the screen.
    pub fn set_industry(&self, industry: Option<String>) {
        let industry = industry.filter(|name| !name.trim().is_empty());
        self.query.set_key(industry);
    }

    pub fn refresh(&self) {
        self.query.refresh();
    }

    pub fn snapshot(&self) -> Snapshot<IndustryBenchmark> {
        self.query.snapshot()
    }

    pub async fn settled(&self) -> Snapshot<IndustryBenchmark> {
        self.query.settled().await
    }

    pub fn refresh_count(&self) -> u64 {
        self.query.refresh_count()
    }
}
