//! Case-type configuration administration.
//!
//! An administrator submits the full desired configuration for a case type;
//! the reconciliation engine merges it into the stored configuration while
//! preserving the identity of entries that logically survive the update.

pub mod configuration;
pub mod domain;
pub mod element;
pub mod payload;
pub mod reconcile;
pub mod router;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use configuration::{CaseTypeConfiguration, ConfigurationError, NotificationMode};
pub use domain::{
    CompletionRule, EventListenerTemplate, LookupTableBinding, NotificationBinding, Sender,
    TaskTemplate,
};
pub use element::{ConfigElement, ConfigurationId, ElementId};
pub use payload::{
    CompletionRulePayload, ConfigurationPayload, ConfigurationView, EventListenerPayload,
    LookupTableBindingPayload, NotificationBindingPayload, PayloadError, SenderPayload,
    TaskTemplatePayload,
};
pub use reconcile::{reconcile, ReconcileError};
pub use router::admin_router;
pub use service::{AdminServiceError, ConfigurationAdminService};
pub use store::{ConfigurationStore, StoreError};
