//! Carrier registry — static carrier table plus the two classifiers that map
//! raw text to a carrier: tracking-number shape rules and sender-domain
//! fragments.
//!
//! Built once at startup and shared read-only (`Arc`). No runtime mutation.

use regex::Regex;
use tracing::debug;

use crate::error::RegistryError;
use crate::model::Carrier;

/// A full-string shape rule: a normalized tracking number matching `pattern`
/// belongs to `carrier_id`.
struct ShapeRule {
    carrier_id: &'static str,
    pattern: Regex,
}

/// A known sender-domain fragment pointing at a carrier.
struct DomainRule {
    carrier_id: &'static str,
    fragment: &'static str,
}

/// Read-only carrier reference data and classifiers.
pub struct CarrierRegistry {
    carriers: Vec<Carrier>,
    shape_rules: Vec<ShapeRule>,
    domain_rules: Vec<DomainRule>,
    /// Single well-known sentinel for unclassifiable tracking numbers, so
    /// every call site sees the same value.
    unknown: Carrier,
}

impl CarrierRegistry {
    /// Build the registry with the built-in carrier table and rules.
    pub fn new() -> Self {
        let carriers = vec![
            carrier("ups", "UPS", Some("📦")),
            carrier("fedex", "FedEx", Some("🚚")),
            carrier("usps", "USPS", Some("📬")),
            carrier("amazon", "Amazon", Some("📦")),
            carrier("dhl", "DHL", Some("🌐")),
        ];

        // Tested in this order, first match wins. The order is part of the
        // classification contract; DHL's bare 10-digit rule stays last.
        let shape_rules = vec![
            shape_rule("ups", r"^1Z[0-9A-Z]{16}$"),
            shape_rule("fedex", r"^[0-9]{12}$"),
            shape_rule("usps", r"^9[0-9]{15,21}$"),
            shape_rule("amazon", r"^TBA[0-9]{9,12}$"),
            shape_rule("dhl", r"^[0-9]{10}$"),
        ];

        // Checked in this order; matters for addresses mentioning two
        // carriers (e.g. a forwarder).
        let domain_rules = vec![
            DomainRule { carrier_id: "amazon", fragment: "amazon" },
            DomainRule { carrier_id: "fedex", fragment: "fedex" },
            DomainRule { carrier_id: "ups", fragment: "ups" },
            DomainRule { carrier_id: "usps", fragment: "usps" },
            DomainRule { carrier_id: "dhl", fragment: "dhl" },
        ];

        Self {
            carriers,
            shape_rules,
            domain_rules,
            unknown: Carrier {
                id: "unknown".to_string(),
                name: "Unknown Carrier".to_string(),
                glyph: None,
            },
        }
    }

    /// The sentinel carrier for tracking numbers no rule claims.
    pub fn unknown(&self) -> &Carrier {
        &self.unknown
    }

    /// Look up a carrier by id.
    ///
    /// `NotFound` means "unknown carrier" to callers, never a failure to
    /// bubble up a batch.
    pub fn lookup(&self, carrier_id: &str) -> Result<&Carrier, RegistryError> {
        self.carriers
            .iter()
            .find(|c| c.id == carrier_id)
            .ok_or_else(|| RegistryError::NotFound(carrier_id.to_string()))
    }

    /// Classify a tracking number by its shape.
    ///
    /// Whitespace is stripped before matching. Rules run in fixed order and
    /// the first match wins; no rule matching yields the unknown sentinel.
    pub fn classify_by_shape(&self, text: &str) -> &Carrier {
        let normalized: String = text.split_whitespace().collect();

        for rule in &self.shape_rules {
            if rule.pattern.is_match(&normalized) {
                debug!(tracking_number = %normalized, carrier = rule.carrier_id, "Shape rule matched");
                // Rule table only names ids present in the carrier table.
                return self
                    .carriers
                    .iter()
                    .find(|c| c.id == rule.carrier_id)
                    .unwrap_or(&self.unknown);
            }
        }

        &self.unknown
    }

    /// Classify a sender address by known carrier domain fragments.
    ///
    /// Substring match on the lowercased address. Returns `None` when no
    /// fragment matches; callers fall back to shape evidence.
    pub fn classify_by_sender(&self, address: &str) -> Option<&Carrier> {
        let address = address.to_lowercase();

        for rule in &self.domain_rules {
            if address.contains(rule.fragment) {
                debug!(sender = %address, carrier = rule.carrier_id, "Sender domain matched");
                return self.carriers.iter().find(|c| c.id == rule.carrier_id);
            }
        }

        None
    }
}

impl Default for CarrierRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn carrier(id: &str, name: &str, glyph: Option<&str>) -> Carrier {
    Carrier {
        id: id.to_string(),
        name: name.to_string(),
        glyph: glyph.map(String::from),
    }
}

fn shape_rule(carrier_id: &'static str, pattern: &str) -> ShapeRule {
    ShapeRule {
        carrier_id,
        // Patterns are compile-time constants; a failure here is a bug.
        pattern: Regex::new(pattern).unwrap(),
    }
}
