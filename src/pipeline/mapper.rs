//! Message-to-package mapping — turns one inbound message into zero or one
//! candidate package with a single seed event.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use tracing::debug;
use uuid::Uuid;

use crate::carriers::CarrierRegistry;
use crate::config::SyncConfig;
use crate::model::{InboundMessage, Package, TrackingEvent};
use crate::pipeline::extract::TrackingNumberExtractor;
use crate::pipeline::status::StatusClassifier;

/// Seed events have no location signal; they carry this placeholder.
const SEED_EVENT_LOCATION: &str = "Unknown";

/// Generates unique ids for packages and events.
///
/// A seam so tests can assert exact outputs instead of shape only.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Production id generator backed by UUID v4.
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Produces the estimated-delivery forecast for a freshly mapped package.
///
/// The production impl is a placeholder heuristic (uniform 3-5 days after the
/// message date), not derived from carrier data. A real forecasting input can
/// replace it without touching the mapper.
pub trait DeliveryEstimator: Send + Sync {
    fn estimate(&self, from: DateTime<Utc>) -> DateTime<Utc>;
}

/// Uniform random offset within the configured day window.
pub struct RandomDeliveryEstimator {
    min_days: i64,
    max_days: i64,
}

impl RandomDeliveryEstimator {
    pub fn new(config: &SyncConfig) -> Self {
        Self {
            min_days: config.min_offset_days,
            max_days: config.max_offset_days,
        }
    }
}

impl DeliveryEstimator for RandomDeliveryEstimator {
    fn estimate(&self, from: DateTime<Utc>) -> DateTime<Utc> {
        let days = rand::thread_rng().gen_range(self.min_days..=self.max_days);
        from + Duration::days(days)
    }
}

/// Maps inbound messages to candidate packages.
pub struct MessageToPackageMapper {
    registry: Arc<CarrierRegistry>,
    extractor: TrackingNumberExtractor,
    classifier: StatusClassifier,
    ids: Arc<dyn IdGenerator>,
    estimator: Arc<dyn DeliveryEstimator>,
}

impl MessageToPackageMapper {
    pub fn new(
        registry: Arc<CarrierRegistry>,
        ids: Arc<dyn IdGenerator>,
        estimator: Arc<dyn DeliveryEstimator>,
    ) -> Self {
        let extractor = TrackingNumberExtractor::new(Arc::clone(&registry));
        Self {
            registry,
            extractor,
            classifier: StatusClassifier::new(),
            ids,
            estimator,
        }
    }

    /// Map one message to a candidate package.
    ///
    /// Returns `None` when no tracking signal is found — not an error, the
    /// message is simply not a shipment and the batch continues.
    pub fn map(&self, message: &InboundMessage) -> Option<Package> {
        let text = message.combined_text();

        let Some(extraction) = self.extractor.extract(&text) else {
            debug!(message_id = %message.id, "No tracking signal, skipping");
            return None;
        };

        // Domain evidence beats text-shape evidence.
        let carrier = self
            .registry
            .classify_by_sender(&message.from)
            .cloned()
            .unwrap_or(extraction.carrier);

        let status = self.classifier.classify(&text);

        let seed_event = TrackingEvent {
            id: self.ids.next_id(),
            timestamp: message.date,
            // No location signal exists at extraction time.
            location: Some(SEED_EVENT_LOCATION.to_string()),
            description: message.subject.clone(),
            status,
        };

        let package = Package {
            id: self.ids.next_id(),
            tracking_number: extraction.tracking_number,
            description: format!("Order from {}", carrier.name),
            carrier,
            status,
            estimated_delivery: Some(self.estimator.estimate(message.date)),
            order_date: message.date,
            last_updated: message.date,
            email_thread_id: Some(message.thread_id.clone()),
            events: vec![seed_event],
        };

        debug!(
            message_id = %message.id,
            tracking_number = %package.tracking_number,
            carrier = %package.carrier.id,
            status = package.status.label(),
            "Mapped message to package candidate"
        );

        Some(package)
    }
}
