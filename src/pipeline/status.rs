//! Status inference — keyword scan over message text.
//!
//! Priority order is a deliberate policy, not alphabetical or severity-based:
//! delivered-keywords beat transit-keywords beat exception-keywords, so a
//! message saying both "shipped" and "delayed" classifies as transit.

use regex::Regex;

use crate::model::ShipmentStatus;

/// One keyword category mapping to a status.
struct StatusRule {
    pattern: Regex,
    status: ShipmentStatus,
}

/// Infers a coarse shipment status from message text.
pub struct StatusClassifier {
    rules: Vec<StatusRule>,
}

impl StatusClassifier {
    /// Build the classifier with the built-in keyword sets.
    pub fn new() -> Self {
        // Evaluated in this order, first match wins.
        let rules = vec![
            status_rule(r"(?i)delivered|completed|arrival", ShipmentStatus::Delivered),
            status_rule(
                r"(?i)shipped|transit|out for delivery",
                ShipmentStatus::Transit,
            ),
            status_rule(
                r"(?i)delay|exception|problem|failed",
                ShipmentStatus::Exception,
            ),
        ];
        Self { rules }
    }

    /// Classify message text. Defaults to `Processing` when no keyword
    /// category matches.
    pub fn classify(&self, text: &str) -> ShipmentStatus {
        for rule in &self.rules {
            if rule.pattern.is_match(text) {
                return rule.status;
            }
        }
        ShipmentStatus::Processing
    }
}

impl Default for StatusClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn status_rule(pattern: &str, status: ShipmentStatus) -> StatusRule {
    StatusRule {
        pattern: Regex::new(pattern).unwrap(),
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivered_keywords() {
        let c = StatusClassifier::new();
        assert_eq!(c.classify("Package delivered today"), ShipmentStatus::Delivered);
        assert_eq!(c.classify("Delivery completed"), ShipmentStatus::Delivered);
        assert_eq!(c.classify("Arrival confirmed"), ShipmentStatus::Delivered);
    }

    #[test]
    fn transit_keywords() {
        let c = StatusClassifier::new();
        assert_eq!(c.classify("Your order has shipped"), ShipmentStatus::Transit);
        assert_eq!(c.classify("Package in transit"), ShipmentStatus::Transit);
    }

    #[test]
    fn out_for_delivery_is_transit() {
        let c = StatusClassifier::new();
        assert_eq!(
            c.classify("Your package is out for delivery"),
            ShipmentStatus::Transit
        );
    }

    #[test]
    fn exception_keywords() {
        let c = StatusClassifier::new();
        assert_eq!(c.classify("Delivery delay expected"), ShipmentStatus::Exception);
        assert_eq!(c.classify("Delivery attempt failed"), ShipmentStatus::Exception);
    }

    #[test]
    fn delivered_beats_transit() {
        let c = StatusClassifier::new();
        assert_eq!(
            c.classify("Shipped last week, delivered this morning"),
            ShipmentStatus::Delivered
        );
    }

    #[test]
    fn transit_beats_exception() {
        // "shipped" and "delayed" in one message: transit wins because the
        // transit category is checked before the exception category.
        let c = StatusClassifier::new();
        assert_eq!(
            c.classify("Your order shipped but may be delayed"),
            ShipmentStatus::Transit
        );
    }

    #[test]
    fn case_insensitive() {
        let c = StatusClassifier::new();
        assert_eq!(c.classify("DELIVERED"), ShipmentStatus::Delivered);
        assert_eq!(c.classify("Out For Delivery"), ShipmentStatus::Transit);
    }

    #[test]
    fn no_keywords_defaults_to_processing() {
        let c = StatusClassifier::new();
        assert_eq!(
            c.classify("Thanks for your order"),
            ShipmentStatus::Processing
        );
    }
}
