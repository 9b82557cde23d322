//! Email-to-package extraction pipeline.
//!
//! Each inbound message flows through:
//! 1. `TrackingNumberExtractor::extract()` — ordered pattern scan
//! 2. `StatusClassifier::classify()` — keyword-priority status inference
//! 3. `MessageToPackageMapper::map()` — candidate package with one seed event
//! 4. `PackageMerger::merge()` — dedup against the existing collection
//!
//! The whole pipeline is synchronous and side-effect-free; it allocates new
//! records and never touches shared mutable state.

pub mod extract;
pub mod mapper;
pub mod merge;
pub mod status;
