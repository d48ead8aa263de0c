//! Process-wide token usage and cost accounting

use papermine_domain::{ModelPrice, StageTag};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Accumulated token counts for one stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageUsage {
    /// Input (prompt-side) tokens
    pub tokens_in: u64,

    /// Output (completion-side) tokens
    pub tokens_out: u64,
}

impl StageUsage {
    /// Combined token count
    pub fn total(&self) -> u64 {
        self.tokens_in + self.tokens_out
    }
}

/// Accumulator of token counts and derived dollar cost, keyed by stage tag.
///
/// Counters only grow; the ledger lives for the whole pipeline run and is
/// reset only by process restart. `record` takes one lock per increment, so
/// concurrent calls against the same stage never lose updates.
#[derive(Debug, Default)]
pub struct UsageLedger {
    entries: Mutex<BTreeMap<StageTag, StageUsage>>,
}

impl UsageLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate one call's token counts under a stage tag
    pub fn record(&self, stage: &StageTag, tokens_in: u64, tokens_out: u64) {
        let mut entries = self.entries.lock().unwrap();
        let usage = entries.entry(stage.clone()).or_default();
        usage.tokens_in += tokens_in;
        usage.tokens_out += tokens_out;
    }

    /// Accumulated usage for one stage (zero when never recorded)
    pub fn usage_for(&self, stage: &StageTag) -> StageUsage {
        self.entries
            .lock()
            .unwrap()
            .get(stage)
            .copied()
            .unwrap_or_default()
    }

    /// Total usage across all stages
    pub fn total(&self) -> StageUsage {
        let entries = self.entries.lock().unwrap();
        entries.values().fold(StageUsage::default(), |acc, u| StageUsage {
            tokens_in: acc.tokens_in + u.tokens_in,
            tokens_out: acc.tokens_out + u.tokens_out,
        })
    }

    /// Human-readable usage table: per-stage token totals in millions,
    /// dollar cost at the given price, and percentage share of total tokens.
    ///
    /// Stages with zero activity are omitted; stages print in tag order so
    /// the same ledger always renders the same table. A ledger with no
    /// recorded usage renders a "no usage" notice instead of dividing by
    /// zero.
    pub fn report(&self, price: &ModelPrice) -> String {
        let entries = self.entries.lock().unwrap();

        let total_tokens: u64 = entries.values().map(|u| u.total()).sum();
        if total_tokens == 0 {
            return "No token usage recorded.".to_string();
        }

        let mut lines = Vec::new();
        lines.push(format!(
            "{:<10} {:<12} {:<12} {:<15} {:<15} {:<10}",
            "Stage", "Input (M)", "Output (M)", "Input Cost ($)", "Output Cost ($)", "% of Total"
        ));
        lines.push("-".repeat(80));

        let mut total_in = 0u64;
        let mut total_out = 0u64;
        let mut total_in_cost = 0.0;
        let mut total_out_cost = 0.0;

        for (stage, usage) in entries.iter() {
            if usage.total() == 0 {
                continue;
            }

            let input_cost = price.input_cost(usage.tokens_in);
            let output_cost = price.output_cost(usage.tokens_out);
            let share = usage.total() as f64 / total_tokens as f64 * 100.0;

            total_in += usage.tokens_in;
            total_out += usage.tokens_out;
            total_in_cost += input_cost;
            total_out_cost += output_cost;

            lines.push(format!(
                "{:<10} {:<12.3} {:<12.3} {:<15.4} {:<15.4} {:<10.2}",
                stage,
                usage.tokens_in as f64 / 1e6,
                usage.tokens_out as f64 / 1e6,
                input_cost,
                output_cost,
                share
            ));
        }

        lines.push("-".repeat(80));
        lines.push(format!(
            "{:<10} {:<12.3} {:<12.3} {:<15.4} {:<15.4} {:<10.2}",
            "Total",
            total_in as f64 / 1e6,
            total_out as f64 / 1e6,
            total_in_cost,
            total_out_cost,
            100.0
        ));

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn stage(label: &str) -> StageTag {
        StageTag::new(label)
    }

    #[test]
    fn test_record_accumulates() {
        let ledger = UsageLedger::new();
        ledger.record(&stage("extract"), 100, 50);
        ledger.record(&stage("extract"), 30, 20);

        let usage = ledger.usage_for(&stage("extract"));
        assert_eq!(usage.tokens_in, 130);
        assert_eq!(usage.tokens_out, 70);
    }

    #[test]
    fn test_stages_are_independent() {
        let ledger = UsageLedger::new();
        ledger.record(&stage("extract"), 10, 5);
        ledger.record(&stage("screen"), 1, 2);

        assert_eq!(ledger.usage_for(&stage("extract")).tokens_in, 10);
        assert_eq!(ledger.usage_for(&stage("screen")).tokens_out, 2);
        assert_eq!(ledger.total().total(), 18);
    }

    #[test]
    fn test_empty_report_signals_no_usage() {
        let ledger = UsageLedger::new();
        let report = ledger.report(&ModelPrice::ZERO);
        assert_eq!(report, "No token usage recorded.");
    }

    #[test]
    fn test_report_costs() {
        let ledger = UsageLedger::new();
        ledger.record(&stage("extract"), 1_000_000, 500_000);

        let price = ModelPrice {
            input_per_million: 1.10,
            output_per_million: 4.40,
        };
        let report = ledger.report(&price);

        assert!(report.contains("extract"));
        // 1.0M input at $1.10/M and 0.5M output at $4.40/M.
        assert!(report.contains("1.1000"), "report was:\n{report}");
        assert!(report.contains("2.2000"), "report was:\n{report}");
        assert!(report.contains("100.00"));
    }

    #[test]
    fn test_report_omits_idle_stages() {
        let ledger = UsageLedger::new();
        ledger.record(&stage("extract"), 10, 10);
        ledger.record(&stage("screen"), 0, 0);

        let report = ledger.report(&ModelPrice::ZERO);
        assert!(report.contains("extract"));
        assert!(!report.contains("screen"));
    }

    #[test]
    fn test_report_orders_stages_deterministically() {
        let ledger = UsageLedger::new();
        ledger.record(&stage("screen"), 1, 1);
        ledger.record(&stage("extract"), 1, 1);

        let report = ledger.report(&ModelPrice::ZERO);
        assert!(report.find("extract").unwrap() < report.find("screen").unwrap());
    }

    #[test]
    fn test_concurrent_records_do_not_lose_updates() {
        let ledger = Arc::new(UsageLedger::new());
        let mut handles = Vec::new();

        for _ in 0..8 {
            let ledger = Arc::clone(&ledger);
            handles.push(std::thread::spawn(move || {
                for _ in 0..1_000 {
                    ledger.record(&StageTag::new("extract"), 3, 2);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let usage = ledger.usage_for(&stage("extract"));
        assert_eq!(usage.tokens_in, 8 * 1_000 * 3);
        assert_eq!(usage.tokens_out, 8 * 1_000 * 2);
    }
}
