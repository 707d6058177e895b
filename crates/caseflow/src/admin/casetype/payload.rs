use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::configuration::{CaseTypeConfiguration, NotificationMode};
use super::domain::{
    CompletionRule, EventListenerTemplate, LookupTableBinding, NotificationBinding, Sender,
    TaskTemplate,
};
use super::reconcile::ReconcileError;
use crate::admin::masterdata::MasterDataCatalog;

/// Desired state for one case-type configuration, as submitted by the admin
/// UI. Elements carry no persistent identity; reconciliation decides which
/// stored entries they correspond to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigurationPayload {
    pub case_type_id: Uuid,
    pub case_type_name: String,
    pub case_definition_id: Option<String>,
    pub default_group: Option<String>,
    pub default_assignee: Option<String>,
    pub target_date_warning_days: Option<u32>,
    pub due_date_warning_days: Option<u32>,
    pub inadmissible_outcome_type_id: Option<Uuid>,
    #[serde(default)]
    pub intake_notification: NotificationMode,
    #[serde(default)]
    pub completion_notification: NotificationMode,
    pub intake_channel_type: Option<String>,
    pub domain: Option<String>,
    #[serde(default)]
    pub task_templates: Vec<TaskTemplatePayload>,
    #[serde(default)]
    pub event_listeners: Vec<EventListenerPayload>,
    #[serde(default)]
    pub completion_rules: Vec<CompletionRulePayload>,
    #[serde(default)]
    pub notification_bindings: Vec<NotificationBindingPayload>,
    #[serde(default)]
    pub senders: Vec<SenderPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskTemplatePayload {
    pub step_id: String,
    #[serde(default)]
    pub active: bool,
    pub assigned_group: Option<String>,
    pub duration_days: Option<u32>,
    #[serde(default)]
    pub lookup_tables: Vec<LookupTableBindingPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupTableBindingPayload {
    pub field: String,
    pub table_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventListenerPayload {
    pub step_id: String,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRulePayload {
    pub reason_id: i64,
    pub outcome_type_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationBindingPayload {
    pub template_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SenderPayload {
    pub email: String,
    #[serde(default)]
    pub is_default: bool,
    pub reply_to: Option<String>,
}

/// Conversion faults. Unknown master-data references are user-visible input
/// errors; reconcile faults bubble up unchanged.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("unknown completion reason '{0}'")]
    UnknownCompletionReason(i64),
    #[error("unknown notification template '{0}'")]
    UnknownNotificationTemplate(i64),
    #[error("unknown lookup table '{table_id}' bound to field '{field}'")]
    UnknownLookupTable { table_id: i64, field: String },
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
}

impl ConfigurationPayload {
    /// Applies this desired state to a configuration: scalars are
    /// overwritten, element collections are resolved against the master-data
    /// catalog and reconciled into the stored collections.
    pub fn apply_to(
        &self,
        configuration: &mut CaseTypeConfiguration,
        catalog: &dyn MasterDataCatalog,
    ) -> Result<(), PayloadError> {
        configuration.case_type_name = self.case_type_name.clone();
        configuration.case_definition_id = self.case_definition_id.clone();
        configuration.default_group = self.default_group.clone();
        configuration.default_assignee = self.default_assignee.clone();
        configuration.target_date_warning_days = self.target_date_warning_days;
        configuration.due_date_warning_days = self.due_date_warning_days;
        configuration.inadmissible_outcome_type_id = self.inadmissible_outcome_type_id;
        configuration.intake_notification = self.intake_notification;
        configuration.completion_notification = self.completion_notification;
        // Trim to drop whitespace pasted into the admin form.
        configuration.intake_channel_type = self
            .intake_channel_type
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        configuration.domain = self.domain.clone();

        configuration.set_task_templates(self.desired_task_templates(catalog)?)?;
        configuration.set_event_listeners(self.desired_event_listeners())?;
        configuration.set_completion_rules(self.desired_completion_rules(catalog)?)?;
        configuration.set_notification_bindings(self.desired_notification_bindings(catalog)?)?;
        configuration.set_senders(self.desired_senders())?;
        Ok(())
    }

    fn desired_task_templates(
        &self,
        catalog: &dyn MasterDataCatalog,
    ) -> Result<Vec<TaskTemplate>, PayloadError> {
        self.task_templates
            .iter()
            .map(|payload| {
                let mut lookup_tables = Vec::with_capacity(payload.lookup_tables.len());
                for binding in &payload.lookup_tables {
                    if catalog.lookup_table(binding.table_id).is_none() {
                        return Err(PayloadError::UnknownLookupTable {
                            table_id: binding.table_id,
                            field: binding.field.clone(),
                        });
                    }
                    lookup_tables.push(LookupTableBinding {
                        field: binding.field.clone(),
                        table_id: binding.table_id,
                    });
                }
                Ok(TaskTemplate {
                    id: None,
                    parent: None,
                    step_id: payload.step_id.clone(),
                    active: payload.active,
                    assigned_group: payload.assigned_group.clone(),
                    duration_days: payload.duration_days,
                    lookup_tables,
                })
            })
            .collect()
    }

    fn desired_event_listeners(&self) -> Vec<EventListenerTemplate> {
        self.event_listeners
            .iter()
            .map(|payload| EventListenerTemplate {
                id: None,
                parent: None,
                step_id: payload.step_id.clone(),
                note: payload.note.clone(),
            })
            .collect()
    }

    fn desired_completion_rules(
        &self,
        catalog: &dyn MasterDataCatalog,
    ) -> Result<Vec<CompletionRule>, PayloadError> {
        self.completion_rules
            .iter()
            .map(|payload| {
                let reason = catalog
                    .completion_reason(payload.reason_id)
                    .ok_or(PayloadError::UnknownCompletionReason(payload.reason_id))?;
                Ok(CompletionRule {
                    id: None,
                    parent: None,
                    reason: Some(reason),
                    outcome_type_id: payload.outcome_type_id,
                })
            })
            .collect()
    }

    fn desired_notification_bindings(
        &self,
        catalog: &dyn MasterDataCatalog,
    ) -> Result<Vec<NotificationBinding>, PayloadError> {
        self.notification_bindings
            .iter()
            .map(|payload| {
                let template = catalog
                    .notification_template(payload.template_id)
                    .ok_or(PayloadError::UnknownNotificationTemplate(payload.template_id))?;
                Ok(NotificationBinding {
                    id: None,
                    parent: None,
                    template: Some(template),
                })
            })
            .collect()
    }

    fn desired_senders(&self) -> Vec<Sender> {
        self.senders
            .iter()
            .map(|payload| Sender {
                id: None,
                parent: None,
                email: payload.email.clone(),
                is_default: payload.is_default,
                reply_to: payload.reply_to.clone(),
            })
            .collect()
    }
}

/// Stored configuration as rendered to the admin UI, persistent identities
/// included so clients can observe which entries survived an update.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigurationView {
    pub id: Option<i64>,
    pub case_type_id: Uuid,
    pub case_type_name: String,
    pub case_definition_id: Option<String>,
    pub default_group: Option<String>,
    pub default_assignee: Option<String>,
    pub target_date_warning_days: Option<u32>,
    pub due_date_warning_days: Option<u32>,
    pub inadmissible_outcome_type_id: Option<Uuid>,
    pub intake_notification: NotificationMode,
    pub completion_notification: NotificationMode,
    pub intake_channel_type: Option<String>,
    pub domain: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub is_operational: bool,
    pub task_templates: Vec<TaskTemplateView>,
    pub event_listeners: Vec<EventListenerView>,
    pub completion_rules: Vec<CompletionRuleView>,
    pub notification_bindings: Vec<NotificationBindingView>,
    pub senders: Vec<SenderView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskTemplateView {
    pub id: Option<i64>,
    pub step_id: String,
    pub active: bool,
    pub assigned_group: Option<String>,
    pub duration_days: Option<u32>,
    pub lookup_tables: Vec<LookupTableBindingPayload>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventListenerView {
    pub id: Option<i64>,
    pub step_id: String,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompletionRuleView {
    pub id: Option<i64>,
    pub reason_id: i64,
    pub reason_name: String,
    pub outcome_type_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NotificationBindingView {
    pub id: Option<i64>,
    pub template_id: i64,
    pub template_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SenderView {
    pub id: Option<i64>,
    pub email: String,
    pub is_default: bool,
    pub reply_to: Option<String>,
}

impl ConfigurationView {
    pub fn from_configuration(configuration: &CaseTypeConfiguration) -> Self {
        Self {
            id: configuration.id.map(|id| id.0),
            case_type_id: configuration.case_type_id,
            case_type_name: configuration.case_type_name.clone(),
            case_definition_id: configuration.case_definition_id.clone(),
            default_group: configuration.default_group.clone(),
            default_assignee: configuration.default_assignee.clone(),
            target_date_warning_days: configuration.target_date_warning_days,
            due_date_warning_days: configuration.due_date_warning_days,
            inadmissible_outcome_type_id: configuration.inadmissible_outcome_type_id,
            intake_notification: configuration.intake_notification,
            completion_notification: configuration.completion_notification,
            intake_channel_type: configuration.intake_channel_type.clone(),
            domain: configuration.domain.clone(),
            created_at: configuration.created_at,
            is_operational: configuration.is_operational(),
            task_templates: configuration
                .task_templates()
                .iter()
                .map(|template| TaskTemplateView {
                    id: template.id.map(|id| id.0),
                    step_id: template.step_id.clone(),
                    active: template.active,
                    assigned_group: template.assigned_group.clone(),
                    duration_days: template.duration_days,
                    lookup_tables: template
                        .lookup_tables
                        .iter()
                        .map(|binding| LookupTableBindingPayload {
                            field: binding.field.clone(),
                            table_id: binding.table_id,
                        })
                        .collect(),
                })
                .collect(),
            event_listeners: configuration
                .event_listeners()
                .iter()
                .map(|listener| EventListenerView {
                    id: listener.id.map(|id| id.0),
                    step_id: listener.step_id.clone(),
                    note: listener.note.clone(),
                })
                .collect(),
            completion_rules: configuration
                .completion_rules()
                .iter()
                .map(|rule| CompletionRuleView {
                    id: rule.id.map(|id| id.0),
                    reason_id: rule.reason().id,
                    reason_name: rule.reason().name.clone(),
                    outcome_type_id: rule.outcome_type_id,
                })
                .collect(),
            notification_bindings: configuration
                .notification_bindings()
                .iter()
                .map(|binding| NotificationBindingView {
                    id: binding.id.map(|id| id.0),
                    template_id: binding.template().id,
                    template_name: binding.template().name.clone(),
                })
                .collect(),
            senders: configuration
                .senders()
                .iter()
                .map(|sender| SenderView {
                    id: sender.id.map(|id| id.0),
                    email: sender.email.clone(),
                    is_default: sender.is_default,
                    reply_to: sender.reply_to.clone(),
                })
                .collect(),
        }
    }
}
