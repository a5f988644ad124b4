//! Pure reductions over metric samples
//!
//! "Current" always means the most recent sample inside the lookback
//! window; samples outside the window never reach these functions. The
//! reductions keep the first sample seen when timestamps tie, so
//! iteration order stays deterministic.

use std::collections::HashMap;
use std::time::Duration;

use jiff::{SignedDuration, Timestamp};
use prismnet_core::{MetricKind, ProviderId, ProviderMetric};

/// Latest sample per provider
///
/// Callers pass samples already restricted to a single kind.
pub fn latest_by_provider(samples: &[ProviderMetric]) -> HashMap<ProviderId, &ProviderMetric> {
    samples.iter().fold(HashMap::new(), |mut latest, sample| {
        latest
            .entry(sample.provider_id)
            .and_modify(|current: &mut &ProviderMetric| {
                if sample.timestamp > current.timestamp {
                    *current = sample;
                }
            })
            .or_insert(sample);
        latest
    })
}

/// Latest sample per provider and kind
pub fn latest_by_provider_and_kind(
    samples: &[ProviderMetric],
) -> HashMap<ProviderId, HashMap<MetricKind, &ProviderMetric>> {
    samples.iter().fold(HashMap::new(), |mut latest, sample| {
        latest
            .entry(sample.provider_id)
            .or_default()
            .entry(sample.kind)
            .and_modify(|current: &mut &ProviderMetric| {
                if sample.timestamp > current.timestamp {
                    *current = sample;
                }
            })
            .or_insert(sample);
        latest
    })
}

/// Start of the lookback window ending now
pub fn lookback_start(lookback: Duration) -> Timestamp {
    let span = SignedDuration::try_from(lookback).unwrap_or(SignedDuration::MAX);
    Timestamp::now().checked_sub(span).unwrap_or(Timestamp::MIN)
}
