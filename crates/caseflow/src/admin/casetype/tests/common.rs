use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;
use uuid::Uuid;

use crate::admin::casetype::configuration::CaseTypeConfiguration;
use crate::admin::casetype::domain::{
    CompletionRule, EventListenerTemplate, LookupTableBinding, NotificationBinding, Sender,
    TaskTemplate,
};
use crate::admin::casetype::element::{ConfigurationId, ElementId};
use crate::admin::casetype::payload::{
    CompletionRulePayload, ConfigurationPayload, NotificationBindingPayload, SenderPayload,
    TaskTemplatePayload,
};
use crate::admin::casetype::service::ConfigurationAdminService;
use crate::admin::casetype::store::{ConfigurationStore, StoreError};
use crate::admin::masterdata::{
    CompletionReason, LookupTable, MasterDataCatalog, NotificationTemplate,
};

pub(super) fn case_type_id() -> Uuid {
    Uuid::parse_str("7f5f1a49-6f0f-4d52-9a6b-6d2f6f2a1c11").expect("valid uuid")
}

pub(super) fn reason(id: i64) -> CompletionReason {
    CompletionReason {
        id,
        name: format!("completion reason {id}"),
    }
}

pub(super) fn template(id: i64) -> NotificationTemplate {
    NotificationTemplate {
        id,
        name: format!("notification template {id}"),
        subject: format!("Case update {id}"),
    }
}

pub(super) fn task(step: &str) -> TaskTemplate {
    TaskTemplate {
        id: None,
        parent: None,
        step_id: step.to_string(),
        active: true,
        assigned_group: Some("intake".to_string()),
        duration_days: Some(5),
        lookup_tables: Vec::new(),
    }
}

pub(super) fn persisted_task(id: i64, step: &str) -> TaskTemplate {
    TaskTemplate {
        id: Some(ElementId(id)),
        parent: Some(ConfigurationId(1)),
        ..task(step)
    }
}

pub(super) fn listener(step: &str, note: Option<&str>) -> EventListenerTemplate {
    EventListenerTemplate {
        id: None,
        parent: None,
        step_id: step.to_string(),
        note: note.map(str::to_string),
    }
}

pub(super) fn completion_rule(reason_id: i64, outcome: Option<Uuid>) -> CompletionRule {
    CompletionRule {
        id: None,
        parent: None,
        reason: Some(reason(reason_id)),
        outcome_type_id: outcome,
    }
}

pub(super) fn binding(template_id: i64) -> NotificationBinding {
    NotificationBinding {
        id: None,
        parent: None,
        template: Some(template(template_id)),
    }
}

pub(super) fn sender(email: &str, is_default: bool) -> Sender {
    Sender {
        id: None,
        parent: None,
        email: email.to_string(),
        is_default,
        reply_to: None,
    }
}

pub(super) fn outcome(byte: u8) -> Uuid {
    Uuid::from_bytes([byte; 16])
}

pub(super) fn binding_with_tables(step: &str, tables: &[(&str, i64)]) -> TaskTemplate {
    TaskTemplate {
        lookup_tables: tables
            .iter()
            .map(|(field, table_id)| LookupTableBinding {
                field: field.to_string(),
                table_id: *table_id,
            })
            .collect(),
        ..task(step)
    }
}

/// Fixed master data: completion reasons 1-3, notification templates 10-12,
/// lookup tables 100-102.
pub(super) struct StaticCatalog;

impl MasterDataCatalog for StaticCatalog {
    fn completion_reason(&self, id: i64) -> Option<CompletionReason> {
        (1..=3).contains(&id).then(|| reason(id))
    }

    fn notification_template(&self, id: i64) -> Option<NotificationTemplate> {
        (10..=12).contains(&id).then(|| template(id))
    }

    fn lookup_table(&self, id: i64) -> Option<LookupTable> {
        (100..=102).contains(&id).then(|| LookupTable {
            id,
            code: format!("table-{id}"),
        })
    }
}

/// Storage double assigning sequential identities on save, as the real
/// gateway does.
#[derive(Default)]
pub(super) struct MemoryStore {
    configurations: Mutex<HashMap<Uuid, CaseTypeConfiguration>>,
    configuration_seq: AtomicI64,
    element_seq: AtomicI64,
}

impl ConfigurationStore for MemoryStore {
    fn fetch(&self, case_type_id: Uuid) -> Result<Option<CaseTypeConfiguration>, StoreError> {
        let guard = self.configurations.lock().expect("store mutex poisoned");
        Ok(guard.get(&case_type_id).cloned())
    }

    fn save(
        &self,
        mut configuration: CaseTypeConfiguration,
    ) -> Result<CaseTypeConfiguration, StoreError> {
        let id = configuration
            .id
            .unwrap_or_else(|| ConfigurationId(self.configuration_seq.fetch_add(1, Ordering::Relaxed) + 1));
        configuration.bind_identities(id, || {
            ElementId(self.element_seq.fetch_add(1, Ordering::Relaxed) + 1)
        });

        let mut guard = self.configurations.lock().expect("store mutex poisoned");
        guard.insert(configuration.case_type_id, configuration.clone());
        Ok(configuration)
    }

    fn list(&self) -> Result<Vec<CaseTypeConfiguration>, StoreError> {
        let guard = self.configurations.lock().expect("store mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

/// Storage double that fails every operation.
pub(super) struct UnavailableStore;

impl ConfigurationStore for UnavailableStore {
    fn fetch(&self, _case_type_id: Uuid) -> Result<Option<CaseTypeConfiguration>, StoreError> {
        Err(StoreError::Unavailable("maintenance window".to_string()))
    }

    fn save(
        &self,
        _configuration: CaseTypeConfiguration,
    ) -> Result<CaseTypeConfiguration, StoreError> {
        Err(StoreError::Unavailable("maintenance window".to_string()))
    }

    fn list(&self) -> Result<Vec<CaseTypeConfiguration>, StoreError> {
        Err(StoreError::Unavailable("maintenance window".to_string()))
    }
}

pub(super) fn admin_service() -> (Arc<MemoryStore>, ConfigurationAdminService<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let service = ConfigurationAdminService::new(store.clone());
    (store, service)
}

pub(super) fn configuration_payload() -> ConfigurationPayload {
    ConfigurationPayload {
        case_type_id: case_type_id(),
        case_type_name: "Passport application".to_string(),
        case_definition_id: Some("passport-flow".to_string()),
        default_group: Some("front-office".to_string()),
        default_assignee: None,
        target_date_warning_days: Some(5),
        due_date_warning_days: Some(2),
        inadmissible_outcome_type_id: Some(outcome(9)),
        intake_notification: Default::default(),
        completion_notification: Default::default(),
        intake_channel_type: Some("passport-request".to_string()),
        domain: None,
        task_templates: vec![TaskTemplatePayload {
            step_id: "verify-identity".to_string(),
            active: true,
            assigned_group: Some("front-office".to_string()),
            duration_days: Some(10),
            lookup_tables: Vec::new(),
        }],
        event_listeners: Vec::new(),
        completion_rules: vec![CompletionRulePayload {
            reason_id: 1,
            outcome_type_id: Some(outcome(3)),
        }],
        notification_bindings: vec![NotificationBindingPayload { template_id: 10 }],
        senders: vec![SenderPayload {
            email: "cases@city.example".to_string(),
            is_default: true,
            reply_to: None,
        }],
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
