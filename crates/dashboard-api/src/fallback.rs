use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Endpoint families allowed to fall back to generated data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointFamily {
    IndustryBenchmark,
    StockFundamentals,
}

impl EndpointFamily {
    pub fn label(&self) -> &'static str {
        match self {
            EndpointFamily::IndustryBenchmark => "industry analysis",
            EndpointFamily::StockFundamentals => "stock fundamentals",
        }
    }
}

/// Warn-once flags, one per fallback-eligible family.
///
/// A flag is raised the first time a family falls back and lowered by the
/// next successful real call, so each failure episode warns exactly once.
#[derive(Debug, Default)]
pub struct FallbackState {
    industry_benchmark: AtomicBool,
    stock_fundamentals: AtomicBool,
    warnings: AtomicUsize,
}

impl FallbackState {
    pub fn new() -> Self {
        Self::default()
    }

    fn flag(&self, family: EndpointFamily) -> &AtomicBool {
        match family {
            EndpointFamily::IndustryBenchmark => &self.industry_benchmark,
            EndpointFamily::StockFundamentals => &self.stock_fundamentals,
        }
    }

    /// Whether `family` is currently serving generated data.
    pub fn is_active(&self, family: EndpointFamily) -> bool {
        self.flag(family).load(Ordering::SeqCst)
    }

    /// Raise the flag; returns true only for the call that raised it.
    pub fn mark(&self, family: EndpointFamily) -> bool {
        !self.flag(family).swap(true, Ordering::SeqCst)
    }

    /// Total fallback warnings emitted across all families.
    pub fn warnings_emitted(&self) -> usize {
        self.warnings.load(Ordering::SeqCst)
    }

    pub fn reset(&self, family: EndpointFamily) {
        self.flag(family).store(false, Ordering::SeqCst);
    }

    /// Record a fallback for `family`, logging a warning if this opens a new
    /// episode. Returns whether the warning was emitted.
    pub fn warn_once(&self, family: EndpointFamily, reason: &str) -> bool {
        let first = self.mark(family);
        if first {
            self.warnings.fetch_add(1, Ordering::SeqCst);
            tracing::warn!(
                "Using local mock for {} - backend endpoint not available. Error: {}",
                family.label(),
                reason
            );
        }
        first
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warns_once_per_episode() {
        let state = FallbackState::new();
        let family = EndpointFamily::IndustryBenchmark;

        assert!(state.warn_once(family, "HTTP 501"));
        assert!(!state.warn_once(family, "HTTP 501"));
        assert!(!state.warn_once(family, "HTTP 404"));
        assert!(state.is_active(family));

        assert_eq!(state.warnings_emitted(), 1);

        state.reset(family);
        assert!(!state.is_active(family));
        assert!(state.warn_once(family, "offline"));
        assert_eq!(state.warnings_emitted(), 2);
    }

    #[test]
    fn test_families_independent() {
        let state = FallbackState::new();
        assert!(state.warn_once(EndpointFamily::IndustryBenchmark, "x"));
        assert!(!state.is_active(EndpointFamily::StockFundamentals));
        assert!(state.warn_once(EndpointFamily::StockFundamentals, "x"));

        state.reset(EndpointFamily::IndustryBenchmark);
        assert!(state.is_active(EndpointFamily::StockFundamentals));
    }
}
