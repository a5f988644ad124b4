//! Shared fixtures for strategy and router tests

use std::sync::Arc;

use jiff::{Timestamp, ToSpan};
use prismnet_core::{
    MemoryStore, MetricKind, Model, ModelRecordId, Provider, ProviderId, ProviderMetric,
};
use secrecy::SecretString;
use url::Url;

pub fn provider(id: u64, name: &str) -> Provider {
    Provider {
        id: ProviderId(id),
        name: name.to_owned(),
        base_url: Url::parse("https://api.example.com/v1").unwrap(),
        api_key: SecretString::from("test-key"),
        active: true,
    }
}

pub fn model(id: u64, provider_id: u64, model_id: &str, input: f64, output: f64) -> Model {
    Model {
        id: ModelRecordId(id),
        provider_id: ProviderId(provider_id),
        model_id: model_id.to_owned(),
        display_name: model_id.to_owned(),
        context_window: 128_000,
        input_pricing: input,
        output_pricing: output,
        active: true,
    }
}

pub fn metric(provider_id: u64, kind: MetricKind, value: f64, age_minutes: i64) -> ProviderMetric {
    ProviderMetric {
        provider_id: ProviderId(provider_id),
        kind,
        value,
        timestamp: Timestamp::now() - age_minutes.minutes(),
    }
}

pub fn store_with(models: Vec<Model>) -> Arc<MemoryStore> {
    let mut store = MemoryStore::new();
    for m in models {
        store = store.with_model(m);
    }
    Arc::new(store)
}

pub fn store_with_metrics(models: Vec<Model>, metrics: Vec<ProviderMetric>) -> Arc<MemoryStore> {
    let mut store = MemoryStore::new();
    for m in models {
        store = store.with_model(m);
    }
    for s in metrics {
        store = store.with_metric(s);
    }
    Arc::new(store)
}
