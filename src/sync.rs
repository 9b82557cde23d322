//! Sync orchestration — runs a fetched message batch through the pipeline
//! and reconciles the result into a user's stored collection.

use std::sync::Arc;

use tracing::info;

use crate::error::Result;
use crate::model::InboundMessage;
use crate::pipeline::mapper::MessageToPackageMapper;
use crate::pipeline::merge::PackageMerger;
use crate::store::PackageStore;

/// Counters from one sync pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Messages scanned.
    pub scanned: usize,
    /// Messages that yielded a package candidate.
    pub candidates: usize,
    /// Candidates appended as new packages.
    pub added: usize,
    /// Candidates folded into an existing package.
    pub updated: usize,
    /// Collection size after the merge.
    pub total: usize,
}

/// Drives load → map → merge → save for one user.
///
/// Synchronous and safe to run concurrently for different users; the caller
/// must hold an exclusive view of a single user's collection across one
/// `sync` call, or concurrent syncs of that user can lose updates.
pub struct SyncEngine {
    mapper: MessageToPackageMapper,
    merger: PackageMerger,
    store: Arc<dyn PackageStore>,
}

impl SyncEngine {
    pub fn new(mapper: MessageToPackageMapper, store: Arc<dyn PackageStore>) -> Self {
        Self {
            mapper,
            merger: PackageMerger,
            store,
        }
    }

    /// Sync one fetched batch into `user_id`'s collection.
    ///
    /// Messages with no tracking signal are skipped silently; the batch never
    /// aborts on a single message.
    pub fn sync(&self, user_id: &str, messages: &[InboundMessage]) -> Result<SyncReport> {
        let existing = self.store.load(user_id)?;

        let candidates: Vec<_> = messages.iter().filter_map(|m| self.mapper.map(m)).collect();
        let scanned = messages.len();
        let candidate_count = candidates.len();

        let outcome = self.merger.merge(existing, candidates);
        self.store.save(user_id, &outcome.packages)?;

        let report = SyncReport {
            scanned,
            candidates: candidate_count,
            added: outcome.added,
            updated: outcome.updated,
            total: outcome.packages.len(),
        };

        info!(
            user_id,
            scanned = report.scanned,
            candidates = report.candidates,
            added = report.added,
            updated = report.updated,
            total = report.total,
            "Sync complete"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carriers::CarrierRegistry;
    use crate::pipeline::mapper::{DeliveryEstimator, IdGenerator};
    use crate::store::MemoryStore;
    use chrono::{DateTime, Duration, Utc};
    use std::sync::atomic::{AtomicU64, Ordering};

    struct SequentialIds(AtomicU64);

    impl IdGenerator for SequentialIds {
        fn next_id(&self) -> String {
            format!("id-{}", self.0.fetch_add(1, Ordering::Relaxed) + 1)
        }
    }

    struct FixedEstimator(i64);

    impl DeliveryEstimator for FixedEstimator {
        fn estimate(&self, from: DateTime<Utc>) -> DateTime<Utc> {
            from + Duration::days(self.0)
        }
    }

    fn engine(store: Arc<MemoryStore>) -> SyncEngine {
        let mapper = MessageToPackageMapper::new(
            Arc::new(CarrierRegistry::new()),
            Arc::new(SequentialIds(AtomicU64::new(0))),
            Arc::new(FixedEstimator(4)),
        );
        SyncEngine::new(mapper, store)
    }

    fn message(id: &str, subject: &str, snippet: &str, from: &str, date: &str) -> InboundMessage {
        InboundMessage {
            id: id.into(),
            thread_id: format!("thread-{id}"),
            subject: subject.into(),
            snippet: snippet.into(),
            from: from.into(),
            date: date.parse::<DateTime<Utc>>().unwrap(),
        }
    }

    #[test]
    fn sync_skips_non_shipment_messages() {
        let store = Arc::new(MemoryStore::new());
        let engine = engine(Arc::clone(&store));

        let batch = vec![
            message(
                "e1",
                "FedEx Shipment Notification",
                "Tracking # 794657100123",
                "fedexshipment@fedex.com",
                "2026-08-27T09:00:00Z",
            ),
            message(
                "e2",
                "Team offsite agenda",
                "See attached schedule",
                "alice@example.com",
                "2026-08-27T10:00:00Z",
            ),
        ];

        let report = engine.sync("alice", &batch).unwrap();
        assert_eq!(
            report,
            SyncReport {
                scanned: 2,
                candidates: 1,
                added: 1,
                updated: 0,
                total: 1,
            }
        );
        assert_eq!(store.load("alice").unwrap().len(), 1);
    }

    #[test]
    fn repeated_sync_updates_instead_of_duplicating() {
        let store = Arc::new(MemoryStore::new());
        let engine = engine(Arc::clone(&store));

        let batch = vec![message(
            "e1",
            "Your Amazon order has shipped",
            "Your package with tracking number 1Z999AA10123456784 has shipped",
            "ship-confirm@amazon.com",
            "2026-08-27T09:00:00Z",
        )];

        let first = engine.sync("alice", &batch).unwrap();
        assert_eq!(first.added, 1);

        let second = engine.sync("alice", &batch).unwrap();
        assert_eq!(second.added, 0);
        assert_eq!(second.updated, 1);
        assert_eq!(second.total, 1);

        let collection = store.load("alice").unwrap();
        assert_eq!(collection.len(), 1);
        // One seed event per sync pass.
        assert_eq!(collection[0].events.len(), 2);
    }

    #[test]
    fn syncs_are_isolated_per_user() {
        let store = Arc::new(MemoryStore::new());
        let engine = engine(Arc::clone(&store));

        let batch = vec![message(
            "e1",
            "FedEx Shipment Notification",
            "Tracking # 794657100123",
            "fedexshipment@fedex.com",
            "2026-08-27T09:00:00Z",
        )];

        engine.sync("alice", &batch).unwrap();
        engine.sync("bob", &batch).unwrap();

        assert_eq!(store.load("alice").unwrap().len(), 1);
        assert_eq!(store.load("bob").unwrap().len(), 1);
    }
}
