//! Resource snapshots and mutation payloads.
//!
//! Only the fields the composite layer reads, plus the ones callers commonly set,
//! are modeled. Everything else the service sends round-trips through the
//! flattened `extra` map on each type.

mod details;
mod resources;
mod state;

pub use details::{
    CreateLogAnalyticsEntityDetails, CreateLogAnalyticsObjectCollectionRuleDetails,
    CreateScheduledTaskDetails, PurgeStorageDataDetails, QueryDetails,
    RecallArchivedDataDetails, ReleaseRecalledDataDetails, UpdateLogAnalyticsEntityDetails,
    UpdateLogAnalyticsObjectCollectionRuleDetails, UpdateScheduledTaskDetails,
    UpsertLogAnalyticsAssociation, UpsertLogAnalyticsAssociationDetails,
};
pub use resources::{
    LogAnalyticsEntity, LogAnalyticsObjectCollectionRule, QueryAggregation, ScheduledTask,
    WorkRequest,
};
pub use state::{LifecycleState, WorkRequestStatus};

/// A snapshot that reports its own identifier and current state.
///
/// Resources report their `lifecycleState`, work requests their `status`.
pub trait StatefulResource {
    /// Human-readable kind used in log lines and error messages.
    const KIND: &'static str;

    fn identifier(&self) -> Option<&str>;

    fn reported_state(&self) -> Option<&str>;
}
