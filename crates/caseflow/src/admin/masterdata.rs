use serde::{Deserialize, Serialize};

/// Reason an administrator can select for closing a case early.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionReason {
    pub id: i64,
    pub name: String,
}

/// Notification template maintained outside the case-type configuration.
///
/// Bindings only reference these records; template content is managed by the
/// notification subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationTemplate {
    pub id: i64,
    pub name: String,
    pub subject: String,
}

/// Reference table a task template can expose to the workflow form layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupTable {
    pub id: i64,
    pub code: String,
}

/// Resolves master-data references before desired elements reach the core.
///
/// Payload conversion is the only caller; configuration elements themselves
/// carry the resolved values.
pub trait MasterDataCatalog: Send + Sync {
    fn completion_reason(&self, id: i64) -> Option<CompletionReason>;
    fn notification_template(&self, id: i64) -> Option<NotificationTemplate>;
    fn lookup_table(&self, id: i64) -> Option<LookupTable>;
}
