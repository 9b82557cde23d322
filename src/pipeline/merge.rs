//! Package merging — reconciles freshly extracted candidates against the
//! existing collection without losing history.

use tracing::debug;

use crate::model::Package;

/// Result of a merge pass.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// Every pre-existing package (updated or untouched) plus every genuinely
    /// new candidate. Nothing is ever dropped.
    pub packages: Vec<Package>,
    /// Candidates appended as new packages.
    pub added: usize,
    /// Candidates folded into an existing package.
    pub updated: usize,
}

/// Merges candidate packages into an existing collection.
///
/// The dedup key is `(tracking_number, carrier.id)`. On a key match the
/// existing package keeps its identity (id, order date, description) and
/// takes the candidate's status, forecast, and timestamp; the candidate's
/// events are appended after the existing history. Candidates are processed
/// in list order, so a later candidate can match a package inserted earlier
/// in the same call.
pub struct PackageMerger;

impl PackageMerger {
    pub fn merge(&self, existing: Vec<Package>, candidates: Vec<Package>) -> MergeOutcome {
        let mut packages = existing;
        let mut added = 0;
        let mut updated = 0;

        for candidate in candidates {
            // Contract violation, not a runtime condition: the mapper never
            // produces a candidate without a tracking number.
            debug_assert!(
                !candidate.tracking_number.is_empty(),
                "merge candidate missing tracking number"
            );

            let matched = packages
                .iter()
                .position(|p| p.dedup_key() == candidate.dedup_key());

            match matched {
                Some(index) => {
                    let existing = &mut packages[index];
                    debug!(
                        package_id = %existing.id,
                        tracking_number = %candidate.tracking_number,
                        "Candidate matched existing package, updating"
                    );
                    existing.status = candidate.status;
                    existing.estimated_delivery = candidate.estimated_delivery;
                    existing.last_updated = candidate.last_updated;
                    // Prior events are never replaced or reordered.
                    existing.events.extend(candidate.events);
                    updated += 1;
                }
                None => {
                    debug!(
                        tracking_number = %candidate.tracking_number,
                        carrier = %candidate.carrier.id,
                        "New package"
                    );
                    packages.push(candidate);
                    added += 1;
                }
            }
        }

        MergeOutcome {
            packages,
            added,
            updated,
        }
    }
}
