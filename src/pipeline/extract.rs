//! Tracking number extraction — ordered carrier-specific patterns plus a
//! generic "tracking number: XYZ" fallback.

use std::sync::Arc;

use regex::Regex;
use tracing::debug;

use crate::carriers::CarrierRegistry;
use crate::model::Carrier;

/// A tracking number found in message text, with the best-guess carrier.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// The tracking number exactly as it appeared (carrier formatting kept).
    pub tracking_number: String,
    /// Carrier implied by the matching pattern, or re-classified by shape for
    /// generic matches. Sender-domain evidence may still override this.
    pub carrier: Carrier,
}

/// An embedded pattern searching for a carrier's tracking format anywhere in
/// text, unlike the registry's full-string shape rules.
struct EmbeddedPattern {
    carrier_id: &'static str,
    pattern: Regex,
}

/// Scans message text for tracking numbers.
pub struct TrackingNumberExtractor {
    registry: Arc<CarrierRegistry>,
    patterns: Vec<EmbeddedPattern>,
    generic: Regex,
}

impl TrackingNumberExtractor {
    /// Build the extractor with the built-in pattern set.
    pub fn new(registry: Arc<CarrierRegistry>) -> Self {
        // Tested in this order, stopping at the first match.
        let patterns = vec![
            embedded("ups", r"\b(1Z[0-9A-Z]{16})\b"),
            embedded("fedex", r"\b([0-9]{12})\b"),
            embedded("usps", r"\b(9[0-9]{15,21})\b"),
            embedded("amazon", r"\b(TBA[0-9]{9,12})\b"),
        ];

        // "tracking" + optional separator word, then an 8-30 char token.
        let generic =
            Regex::new(r"(?i)tracking\s+(?:number|#|no|code)[:.\s]*\s*([A-Z0-9]{8,30})\b")
                .unwrap();

        Self {
            registry,
            patterns,
            generic,
        }
    }

    /// Find a tracking number in `text` (the combined subject + snippet).
    ///
    /// Carrier-specific patterns run first; if none match, the generic
    /// fallback captures a candidate token and re-classifies it through the
    /// registry's shape rules rather than trusting pattern position. `None`
    /// means the message is not a shipment candidate.
    pub fn extract(&self, text: &str) -> Option<Extraction> {
        for embedded in &self.patterns {
            if let Some(caps) = embedded.pattern.captures(text) {
                let tracking_number = caps[1].to_string();
                debug!(
                    tracking_number = %tracking_number,
                    carrier = embedded.carrier_id,
                    "Carrier pattern matched"
                );
                let carrier = self
                    .registry
                    .lookup(embedded.carrier_id)
                    .map(Carrier::clone)
                    .unwrap_or_else(|_| self.registry.unknown().clone());
                return Some(Extraction {
                    tracking_number,
                    carrier,
                });
            }
        }

        if let Some(caps) = self.generic.captures(text) {
            let tracking_number = caps[1].to_string();
            let carrier = self.registry.classify_by_shape(&tracking_number).clone();
            debug!(
                tracking_number = %tracking_number,
                carrier = %carrier.id,
                "Generic pattern matched"
            );
            return Some(Extraction {
                tracking_number,
                carrier,
            });
        }

        None
    }
}

fn embedded(carrier_id: &'static str, pattern: &str) -> EmbeddedPattern {
    EmbeddedPattern {
        carrier_id,
        pattern: Regex::new(pattern).unwrap(),
    }
}
