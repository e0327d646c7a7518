//! Composite operations, one file per resource family.
//!
//! Direct-state operations (entities, object collection rules, scheduled
//! tasks) wait on the resource's own lifecycle state. The rest run
//! asynchronously on the service side and are waited on through their work
//! request.

mod association;
mod collection_rule;
mod entity;
mod namespace;
mod query;
mod scheduled_task;
pub(crate) mod service;
mod storage;

pub use service::LogAnalyticsCompositeOperations;
