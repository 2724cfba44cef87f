use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Industries offered by the dashboard's industry selector.
pub const KNOWN_INDUSTRIES: &[&str] = &[
    "Banking",
    "Healthcare",
    "Retail",
    "Cement",
    "Technology",
    "Consumer Durables",
    "Power",
    "Media & Entertainment",
];

// ---------------------------------------------------------------------------
// Industry benchmark
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryBenchmarkRequest {
    pub industry_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryBenchmark {
    pub industry_name: String,
    pub summary: IndustrySummary,
    pub revenue_trend: RevenueTrend,
    pub capex_trend: CapexTrend,
    pub benchmarks: Vec<BenchmarkBand>,
    pub key_insights: Vec<String>,
    pub observations: Vec<String>,
    pub risks: Vec<String>,
    pub peer_stocks: Vec<PeerStock>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustrySummary {
    pub narrative: String,
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendTag {
    Expanding,
    Moderate,
    Stagnant,
    Declining,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearGrowth {
    pub year: String,
    pub growth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueTrend {
    pub trend_tag: TrendTag,
    pub industry_cagr: f64,
    pub yoy_growth: Vec<YearGrowth>,
    pub insight: String,
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CapexCycle {
    Expansion,
    Stable,
    Softening,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapexTrend {
    pub cycle: CapexCycle,
    pub growth_estimate: f64,
    pub intensity: f64,
    pub insight: String,
}

/// Green/yellow/red thresholds for one metric, as display strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkBand {
    pub metric: String,
    pub green: String,
    pub yellow: String,
    pub red: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerStock {
    pub name: String,
    pub ticker: String,
    pub exchange: String,
    pub market_cap: f64,
    pub latest_price: f64,
}

// ---------------------------------------------------------------------------
// Stock analysis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockFundamentalsRequest {
    pub ticker: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_industry_context: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockAnalysisRequest {
    pub ticker: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockAnalysis {
    pub ticker: String,
    pub company_name: String,
    pub industry: String,
    pub modules: Vec<StockModule>,
    pub health_score: f64,
    pub summary_metrics: SummaryMetrics,
    pub rule_counts: RuleCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub de_ratio: f64,
    pub roe: f64,
    pub ccc: f64,
    pub capex_intensity: f64,
    pub asset_turnover: f64,
    pub ocf_debt: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleCounts {
    pub green: u32,
    pub yellow: u32,
    pub red: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockModule {
    pub module_name: String,
    pub description: String,
    pub key_metrics: Vec<MetricItem>,
    pub trends: Vec<TrendItem>,
    pub rules: Vec<RuleItem>,
    pub red_flags: Vec<RedFlag>,
    pub positive_points: Vec<String>,
    pub analysis_narrative: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricFormat {
    Ratio,
    Percentage,
    Currency,
    Number,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricItem {
    pub name: String,
    pub value: f64,
    pub format: MetricFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendItem {
    pub label: String,
    pub data: Vec<f64>,
    pub yoy_growth: f64,
    pub insight: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleFlag {
    Green,
    Yellow,
    Red,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleItem {
    pub flag: RuleFlag,
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedFlag {
    pub severity: Severity,
    pub title: String,
    pub detail: String,
}

impl RuleCounts {
    /// Tally rule flags across every module.
    pub fn tally(modules: &[StockModule]) -> Self {
        let mut counts = Self::default();
        for rule in modules.iter().flat_map(|m| m.rules.iter()) {
            match rule.flag {
                RuleFlag::Green => counts.green += 1,
                RuleFlag::Yellow => counts.yellow += 1,
                RuleFlag::Red => counts.red += 1,
            }
        }
        counts
    }
}

// ---------------------------------------------------------------------------
// Module analysis
// ---------------------------------------------------------------------------

/// Response of a `/<module>/analyze` route. The backend shape varies per
/// module, so only the common sections are named and everything else is kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleAnalyzeResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insights: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// Which dashboard sections the assistant may draw on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatContext {
    pub include_industry_summary: bool,
    pub include_benchmarks: bool,
    pub include_stock_analysis: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatTurn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ChatContext>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
}

fn assistant_role() -> ChatRole {
    ChatRole::Assistant
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default = "assistant_role")]
    pub role: ChatRole,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// A message as held in a chat session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl From<&ChatMessage> for ChatTurn {
    fn from(message: &ChatMessage) -> Self {
        Self {
            role: message.role,
            content: message.content.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_optional_request_fields_omitted() {
        let req = StockFundamentalsRequest {
            ticker: "TCS".to_string(),
            industry: None,
            include_industry_context: Some(true),
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v, json!({"ticker": "TCS", "include_industry_context": true}));
    }

    #[test]
    fn test_chat_context_is_camel_case() {
        let ctx = ChatContext {
            include_industry_summary: true,
            include_benchmarks: false,
            include_stock_analysis: true,
        };
        let v = serde_json::to_value(ctx).unwrap();
        assert_eq!(v["includeIndustrySummary"], json!(true));
        assert_eq!(v["includeStockAnalysis"], json!(true));
    }

    #[test]
    fn test_chat_response_defaults() {
        let resp: ChatResponse = serde_json::from_value(json!({"content": "hi"})).unwrap();
        assert_eq!(resp.role, ChatRole::Assistant);
        assert!(resp.id.is_empty());
        assert!(resp.timestamp.is_none());
    }

    #[test]
    fn test_module_response_keeps_unknown_sections() {
        let resp: ModuleAnalyzeResponse = serde_json::from_value(json!({
            "metrics": {"de_ratio": 0.4},
            "module": "borrowings",
            "score": 72
        }))
        .unwrap();
        assert_eq!(resp.metrics, Some(json!({"de_ratio": 0.4})));
        assert_eq!(resp.extra.get("module"), Some(&json!("borrowings")));
        assert_eq!(resp.extra.get("score"), Some(&json!(72)));
        assert!(resp.warnings.is_none());
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(serde_json::to_value(TrendTag::Expanding).unwrap(), json!("EXPANDING"));
        assert_eq!(serde_json::to_value(CapexCycle::Softening).unwrap(), json!("SOFTENING"));
        assert_eq!(serde_json::to_value(MetricFormat::Percentage).unwrap(), json!("percentage"));
        assert_eq!(serde_json::to_value(RuleFlag::Yellow).unwrap(), json!("YELLOW"));
        assert_eq!(serde_json::to_value(ChatRole::User).unwrap(), json!("user"));
    }
}
