use std::collections::BTreeMap;

use crate::parser::lines::LogLine;
use crate::parser::patterns;

/// The one metric whose positive value marks a job as succeeded.
pub const INCENTIVE_KEY: &str = "Incentive";

/// Recover every `key: value` metric from `Emission/day` lines. A malformed
/// token drops only itself; later lines overwrite same-named keys.
pub fn extract(lines: &[LogLine]) -> BTreeMap<String, f64> {
    let mut metrics = BTreeMap::new();

    for line in lines {
        if !line.text.contains(patterns::INCENTIVE_MARKER) {
            continue;
        }
        for token in line.text.split('|') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            let Some((key, value)) = token.split_once(':') else {
                continue;
            };
            let Some(lead) = value.split_whitespace().next() else {
                tracing::warn!(token, "incentive metric without a value");
                continue;
            };
            match lead.parse::<f64>() {
                Ok(v) => {
                    metrics.insert(key.trim().to_string(), v);
                }
                Err(err) => {
                    tracing::warn!(token, %err, "skipping malformed incentive metric");
                }
            }
        }
    }

    metrics
}
