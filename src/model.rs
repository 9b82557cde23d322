//! Core data model — carriers, shipment statuses, tracking events, packages,
//! and the inbound message shape delivered by the mail-access layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shipping carrier operating its own tracking number namespace.
///
/// Immutable reference data — looked up from the registry, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Carrier {
    /// Unique key, e.g. "ups", "fedex".
    pub id: String,
    /// Display name, e.g. "UPS", "FedEx".
    pub name: String,
    /// Optional display glyph for list views.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glyph: Option<String>,
}

/// Coarse lifecycle stage of a shipment.
///
/// A classification label only — ordering between variants carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
    /// Order placed, no shipment signal yet.
    Pending,
    /// Shipment is being prepared.
    Processing,
    /// Shipment is moving (includes "out for delivery").
    Transit,
    /// Shipment arrived.
    Delivered,
    /// Delay, failure, or other problem.
    Exception,
}

impl ShipmentStatus {
    /// Short display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Transit => "In Transit",
            Self::Delivered => "Delivered",
            Self::Exception => "Exception",
        }
    }
}

/// One point in a package's tracking history.
///
/// Immutable once created — appended to a package's event list, never edited
/// or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingEvent {
    /// Unique within the owning package.
    pub id: String,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// Where it occurred, when known. Seed events carry "Unknown" since no
    /// location signal exists at extraction time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Free-text description (for seed events, the source message subject).
    pub description: String,
    /// Status at this point in time.
    pub status: ShipmentStatus,
}

/// A tracked shipment assembled from one or more inbound messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Unique across the collection.
    pub id: String,
    /// Carrier-formatted tracking number.
    pub tracking_number: String,
    /// Owning carrier (the registry's unknown sentinel when unclassified).
    pub carrier: Carrier,
    /// Human description, e.g. "Order from UPS".
    pub description: String,
    /// Denormalized current status — always equals the status of some event
    /// in `events`, kept consistent on every mutation.
    pub status: ShipmentStatus,
    /// Placeholder delivery forecast. Not derived from carrier data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_delivery: Option<DateTime<Utc>>,
    /// When the order was first seen.
    pub order_date: DateTime<Utc>,
    /// When the package last changed.
    pub last_updated: DateTime<Utc>,
    /// Source mail thread this package was extracted from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_thread_id: Option<String>,
    /// Tracking history in arrival order (not necessarily timestamp order).
    pub events: Vec<TrackingEvent>,
}

impl Package {
    /// Natural dedup key across merges — no two packages in a collection may
    /// share both fields.
    pub fn dedup_key(&self) -> (&str, &str) {
        (&self.tracking_number, &self.carrier.id)
    }
}

/// An inbox message as delivered by the external mail-access layer.
///
/// Read-only to the core; the fetch/auth mechanics behind it are out of scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Message id (mail-provider native).
    pub id: String,
    /// Thread/conversation id.
    pub thread_id: String,
    /// Subject line.
    pub subject: String,
    /// Short body excerpt.
    pub snippet: String,
    /// Sender address.
    pub from: String,
    /// When the message was received.
    pub date: DateTime<Utc>,
}

impl InboundMessage {
    /// Combined subject + snippet, the text the extraction pipeline scans.
    pub fn combined_text(&self) -> String {
        format!("{} {}", self.subject, self.snippet)
    }
}
