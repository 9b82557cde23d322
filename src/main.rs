use std::sync::Arc;

use chrono::{Duration, Utc};
use parcelwatch::carriers::CarrierRegistry;
use parcelwatch::config::SyncConfig;
use parcelwatch::model::InboundMessage;
use parcelwatch::pipeline::mapper::{
    MessageToPackageMapper, RandomDeliveryEstimator, UuidIdGenerator,
};
use parcelwatch::store::{MemoryStore, PackageStore};
use parcelwatch::sync::SyncEngine;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let user_id = std::env::var("PARCELWATCH_USER").unwrap_or_else(|_| "demo".to_string());

    let defaults = SyncConfig::default();
    let config = SyncConfig {
        min_offset_days: std::env::var("PARCELWATCH_MIN_OFFSET_DAYS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.min_offset_days),
        max_offset_days: std::env::var("PARCELWATCH_MAX_OFFSET_DAYS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_offset_days),
    };

    eprintln!("📦 Parcelwatch v{}", env!("CARGO_PKG_VERSION"));
    eprintln!(
        "   Syncing sample inbox for user {user_id:?} (forecast window {}-{} days)\n",
        config.min_offset_days, config.max_offset_days
    );
    let registry = Arc::new(CarrierRegistry::new());
    let mapper = MessageToPackageMapper::new(
        registry,
        Arc::new(UuidIdGenerator),
        Arc::new(RandomDeliveryEstimator::new(&config)),
    );
    let store = Arc::new(MemoryStore::new());
    let engine = SyncEngine::new(mapper, Arc::clone(&store) as Arc<dyn PackageStore>);

    // A stand-in for the external mail-access layer: a small already-fetched
    // batch of messages.
    let now = Utc::now();
    let batch = vec![
        InboundMessage {
            id: "email1".into(),
            thread_id: "thread1".into(),
            subject: "Your Amazon order has shipped".into(),
            snippet: "Your package with tracking number 1Z999AA10123456784 has shipped".into(),
            from: "ship-confirm@amazon.com".into(),
            date: now - Duration::days(2),
        },
        InboundMessage {
            id: "email2".into(),
            thread_id: "thread2".into(),
            subject: "FedEx Shipment Notification".into(),
            snippet: "Tracking # 794657100123".into(),
            from: "fedexshipment@fedex.com".into(),
            date: now - Duration::days(1),
        },
        InboundMessage {
            id: "email3".into(),
            thread_id: "thread3".into(),
            subject: "Lunch on Friday?".into(),
            snippet: "Does noon still work for you?".into(),
            from: "alice@example.com".into(),
            date: now,
        },
    ];

    let report = engine.sync(&user_id, &batch)?;
    eprintln!(
        "Scanned {} message(s): {} candidate(s), {} added, {} updated, {} tracked total\n",
        report.scanned, report.candidates, report.added, report.updated, report.total
    );

    let collection = store.load(&user_id)?;
    println!("{}", serde_json::to_string_pretty(&collection)?);

    Ok(())
}
