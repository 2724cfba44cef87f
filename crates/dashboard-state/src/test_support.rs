use async_trait::async_trait;
use dashboard_api::mock::{mock_industry_benchmark, mock_stock_analysis};
use dashboard_core::{
    ApiError, ApiResult, ChatResponse, ChatRole, ChatRequest, DashboardProvider,
    IndustryBenchmark, StockAnalysis,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{watch, Notify};

/// In-memory provider that records calls and can hold or fail individual
/// requests. Call keys look like `industry:Banking`, `stock:TCS:-` or `chat`.
pub struct FakeProvider {
    calls: Mutex<Vec<String>>,
    holds: Mutex<HashMap<String, Arc<Notify>>>,
    failures: Mutex<HashMap<String, ApiError>>,
    global_failure: Mutex<Option<ApiError>>,
    chat_requests: Mutex<Vec<ChatRequest>>,
    chat_meta: Mutex<Option<(String, Option<String>)>>,
    completed: watch::Sender<usize>,
}

impl FakeProvider {
    pub fn new() -> Arc<Self> {
        let (completed, _) = watch::channel(0);
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            holds: Mutex::new(HashMap::new()),
            failures: Mutex::new(HashMap::new()),
            global_failure: Mutex::new(None),
            chat_requests: Mutex::new(Vec::new()),
            chat_meta: Mutex::new(None),
            completed,
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn chat_requests(&self) -> Vec<ChatRequest> {
        self.chat_requests.lock().unwrap().clone()
    }

    /// Every later call fails with this error.
    pub fn fail_with(&self, status: u16, message: &str) {
        *self.global_failure.lock().unwrap() = Some(ApiError::new(status, message));
    }

    pub fn fail_key(&self, key: &str, status: u16, message: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(key.to_string(), ApiError::new(status, message));
    }

    /// Block calls for `key` until the returned handle is notified.
    pub fn hold(&self, key: &str) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.holds
            .lock()
            .unwrap()
            .insert(key.to_string(), Arc::clone(&notify));
        notify
    }

    /// Override the id and timestamp of chat replies.
    pub fn set_chat_reply_meta(&self, id: &str, timestamp: Option<&str>) {
        *self.chat_meta.lock().unwrap() =
            Some((id.to_string(), timestamp.map(str::to_string)));
    }

    pub async fn wait_for_completions(&self, count: usize) {
        let mut rx = self.completed.subscribe();
        rx.wait_for(|done| *done >= count).await.unwrap();
    }

    async fn respond<T>(&self, key: String, make: impl FnOnce() -> T + Send) -> ApiResult<T> {
        self.calls.lock().unwrap().push(key.clone());
        let hold = self.holds.lock().unwrap().get(&key).cloned();
        if let Some(notify) = hold {
            notify.notified().await;
        }

        let failure = self
            .failures
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .or_else(|| self.global_failure.lock().unwrap().clone());
        let result = match failure {
            Some(err) => Err(err),
            None => Ok(make()),
        };
        self.completed.send_modify(|done| *done += 1);
        result
    }
}

#[async_trait]
impl DashboardProvider for FakeProvider {
    async fn industry_benchmark(&self, industry_name: &str) -> ApiResult<IndustryBenchmark> {
        self.respond(format!("industry:{}", industry_name), || {
            mock_industry_benchmark(industry_name)
        })
        .await
    }

    async fn stock_fundamentals(
        &self,
        ticker: &str,
        industry: Option<&str>,
        _include_industry_context: bool,
    ) -> ApiResult<StockAnalysis> {
        let key = format!("stock:{}:{}", ticker, industry.unwrap_or("-"));
        self.respond(key, || mock_stock_analysis(ticker, industry)).await
    }

    async fn chat(&self, request: ChatRequest) -> ApiResult<ChatResponse> {
        let reply_number = {
            let mut requests = self.chat_requests.lock().unwrap();
            requests.push(request.clone());
            requests.len()
        };
        let content = request
            .messages
            .last()
            .map(|turn| format!("echo: {}", turn.content))
            .unwrap_or_default();
        let meta = self.chat_meta.lock().unwrap().clone();
        let (id, timestamp) = meta.unwrap_or_else(|| {
            (
                format!("reply-{}", reply_number),
                Some("2024-05-01T10:00:00Z".to_string()),
            )
        });

        self.respond("chat".to_string(), || ChatResponse {
            id,
            role: ChatRole::Assistant,
            content,
            timestamp,
        })
        .await
    }
}
