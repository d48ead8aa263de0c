//! Model pricing for cost accounting

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Dollar prices per million tokens for one model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelPrice {
    /// $/million input tokens
    pub input_per_million: f64,

    /// $/million output tokens
    pub output_per_million: f64,
}

impl ModelPrice {
    /// Zero-cost entry used for unknown models
    pub const ZERO: ModelPrice = ModelPrice {
        input_per_million: 0.0,
        output_per_million: 0.0,
    };

    /// Input-side cost for a token count
    pub fn input_cost(&self, tokens: u64) -> f64 {
        tokens as f64 / 1e6 * self.input_per_million
    }

    /// Output-side cost for a token count
    pub fn output_cost(&self, tokens: u64) -> f64 {
        tokens as f64 / 1e6 * self.output_per_million
    }
}

/// Static mapping from model identifier to per-million-token prices.
///
/// Lookups never fail: unknown model identifiers map to [`ModelPrice::ZERO`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceTable {
    entries: HashMap<String, ModelPrice>,
}

impl Default for PriceTable {
    fn default() -> Self {
        let mut entries = HashMap::new();
        entries.insert(
            "o3-mini".to_string(),
            ModelPrice {
                input_per_million: 1.1,
                output_per_million: 4.4,
            },
        );
        entries.insert(
            "gpt-4o".to_string(),
            ModelPrice {
                input_per_million: 2.5,
                output_per_million: 10.0,
            },
        );
        entries.insert(
            "gpt-4o-mini".to_string(),
            ModelPrice {
                input_per_million: 0.15,
                output_per_million: 0.6,
            },
        );
        entries.insert(
            "gpt-4.1".to_string(),
            ModelPrice {
                input_per_million: 1.2,
                output_per_million: 8.0,
            },
        );
        Self { entries }
    }
}

impl PriceTable {
    /// Empty price table (every model is zero-cost)
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Add or replace a price entry
    pub fn with_price(mut self, model: impl Into<String>, price: ModelPrice) -> Self {
        self.entries.insert(model.into(), price);
        self
    }

    /// Price for a model identifier; zero-cost when the model is unknown
    pub fn price_for(&self, model: &str) -> ModelPrice {
        self.entries.get(model).copied().unwrap_or(ModelPrice::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_models() {
        let table = PriceTable::default();
        let price = table.price_for("o3-mini");
        assert_eq!(price.input_per_million, 1.1);
        assert_eq!(price.output_per_million, 4.4);

        let price = table.price_for("gpt-4.1");
        assert_eq!(price.input_per_million, 1.2);
        assert_eq!(price.output_per_million, 8.0);
    }

    #[test]
    fn test_unknown_model_is_zero_cost() {
        let table = PriceTable::default();
        let price = table.price_for("some-future-model");
        assert_eq!(price, ModelPrice::ZERO);
        assert_eq!(price.input_cost(1_000_000), 0.0);
    }

    #[test]
    fn test_cost_per_million() {
        let price = ModelPrice {
            input_per_million: 1.10,
            output_per_million: 4.40,
        };
        assert!((price.input_cost(1_000_000) - 1.10).abs() < 1e-9);
        assert!((price.output_cost(500_000) - 2.20).abs() < 1e-9);
    }

    #[test]
    fn test_with_price_overrides() {
        let table = PriceTable::empty().with_price(
            "local-llama",
            ModelPrice {
                input_per_million: 0.0,
                output_per_million: 0.0,
            },
        );
        assert_eq!(table.price_for("local-llama"), ModelPrice::ZERO);
    }
}
