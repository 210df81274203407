//! Token and Cost Estimation
//!
//! Rough, advisory estimate shown before a summary is generated.
//!
//! ## Strategy
//! - Character-based token count (chars / `chars_per_token`, floored, at least 1)
//! - Cost = tokens × per-token rate × currency conversion
//! - Never blocks the pipeline and makes no accuracy claim

use serde::Serialize;

use crate::config::CostConfig;
use crate::types::TokenCount;

/// Estimate for one body of raw text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostEstimate {
    pub tokens: TokenCount,
    /// Cost in the display currency
    pub cost: f64,
    pub currency: String,
}

impl std::fmt::Display for CostEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Estimated tokens: {} → Cost ≈ {:.2} {}",
            self.tokens, self.cost, self.currency
        )
    }
}

/// Character-count cost estimator
#[derive(Debug, Clone)]
pub struct CostEstimator {
    chars_per_token: usize,
    usd_per_token: f64,
    conversion_rate: f64,
    currency: String,
}

impl Default for CostEstimator {
    fn default() -> Self {
        Self::from_config(&CostConfig::default())
    }
}

impl CostEstimator {
    pub fn from_config(config: &CostConfig) -> Self {
        Self {
            chars_per_token: config.chars_per_token.max(1),
            usd_per_token: config.usd_per_token,
            conversion_rate: config.conversion_rate,
            currency: config.currency.clone(),
        }
    }

    /// Approximate token count; never below 1
    pub fn count_tokens(&self, text: &str) -> TokenCount {
        let chars = text.chars().count();
        TokenCount::new((chars / self.chars_per_token).max(1) as u64)
    }

    pub fn estimate(&self, text: &str) -> CostEstimate {
        let tokens = self.count_tokens(text);
        CostEstimate {
            tokens,
            cost: tokens.get() as f64 * self.usd_per_token * self.conversion_rate,
            currency: self.currency.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_minimum_one_token() {
        let estimator = CostEstimator::default();
        assert_eq!(estimator.count_tokens("").get(), 1);
        assert_eq!(estimator.count_tokens("abc").get(), 1);
    }

    #[test]
    fn test_floor_division() {
        let estimator = CostEstimator::default();
        assert_eq!(estimator.count_tokens("abcdefg").get(), 1);
        assert_eq!(estimator.count_tokens("abcdefgh").get(), 2);
        assert_eq!(estimator.count_tokens(&"x".repeat(4001)).get(), 1000);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let estimator = CostEstimator::default();
        assert_eq!(estimator.count_tokens("åäöåäöåä").get(), 2);
    }

    #[test]
    fn test_default_cost_in_sek() {
        let estimate = CostEstimator::default().estimate(&"x".repeat(4000));
        assert_eq!(estimate.tokens.get(), 1000);
        assert!((estimate.cost - 0.1).abs() < 1e-9);
        assert_eq!(estimate.to_string(), "Estimated tokens: 1000 → Cost ≈ 0.10 SEK");
    }

    #[test]
    fn test_custom_rates() {
        let config = CostConfig {
            chars_per_token: 2,
            usd_per_token: 0.5,
            conversion_rate: 1.0,
            currency: "USD".to_string(),
        };
        let estimate = CostEstimator::from_config(&config).estimate("abcd");
        assert_eq!(estimate.tokens.get(), 2);
        assert!((estimate.cost - 1.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_longer_text_never_cheaper(base in ".{0,300}", extra in ".{0,300}") {
            let estimator = CostEstimator::default();
            let short = estimator.estimate(&base);
            let long = estimator.estimate(&format!("{}{}", base, extra));
            prop_assert!(long.tokens >= short.tokens);
            prop_assert!(long.cost >= short.cost);
        }
    }
}
