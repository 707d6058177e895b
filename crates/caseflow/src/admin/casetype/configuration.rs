use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::domain::{
    CompletionRule, EventListenerTemplate, NotificationBinding, Sender, TaskTemplate,
};
use super::element::{ConfigElement, ConfigurationId, ElementId};
use super::reconcile::{reconcile, ReconcileError};

/// Whether a status notification is offered for a case phase, and whether it
/// is pre-selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationMode {
    #[default]
    AvailableOff,
    AvailableOn,
    Unavailable,
}

/// Lookup faults on the aggregate. Callers assert existence upstream, so a
/// miss is a programming error surfaced with full context.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("no completion rule for case type '{case_type_id}' and completion reason '{reason_id}'")]
    CompletionRuleNotFound { case_type_id: Uuid, reason_id: i64 },
    #[error("no event listener template for case type '{case_type_id}' and workflow step '{step_id}'")]
    EventListenerNotFound { case_type_id: Uuid, step_id: String },
}

/// Operational configuration of one case type: scalar settings plus the five
/// reconciled element collections. Elements are owned exclusively by their
/// configuration and are only ever mutated through the setters below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseTypeConfiguration {
    pub id: Option<ConfigurationId>,
    pub case_type_id: Uuid,
    pub case_type_name: String,
    /// Key of the workflow case definition driving cases of this type.
    /// Unset while the case type is still being prepared.
    pub case_definition_id: Option<String>,
    pub default_group: Option<String>,
    pub default_assignee: Option<String>,
    /// Days before the planned target date at which a warning is raised.
    pub target_date_warning_days: Option<u32>,
    /// Days before the statutory due date at which a warning is raised.
    pub due_date_warning_days: Option<u32>,
    /// Outcome type recorded when a case is closed as inadmissible.
    pub inadmissible_outcome_type_id: Option<Uuid>,
    pub intake_notification: NotificationMode,
    pub completion_notification: NotificationMode,
    /// Intake channel whose product requests open cases of this type.
    pub intake_channel_type: Option<String>,
    pub domain: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    task_templates: Vec<TaskTemplate>,
    event_listeners: Vec<EventListenerTemplate>,
    completion_rules: Vec<CompletionRule>,
    notification_bindings: Vec<NotificationBinding>,
    senders: Vec<Sender>,
}

impl CaseTypeConfiguration {
    pub fn new(case_type_id: Uuid, case_type_name: impl Into<String>) -> Self {
        Self {
            id: None,
            case_type_id,
            case_type_name: case_type_name.into(),
            case_definition_id: None,
            default_group: None,
            default_assignee: None,
            target_date_warning_days: None,
            due_date_warning_days: None,
            inadmissible_outcome_type_id: None,
            intake_notification: NotificationMode::default(),
            completion_notification: NotificationMode::default(),
            intake_channel_type: None,
            domain: None,
            created_at: None,
            task_templates: Vec::new(),
            event_listeners: Vec::new(),
            completion_rules: Vec::new(),
            notification_bindings: Vec::new(),
            senders: Vec::new(),
        }
    }

    pub fn task_templates(&self) -> &[TaskTemplate] {
        &self.task_templates
    }

    pub fn event_listeners(&self) -> &[EventListenerTemplate] {
        &self.event_listeners
    }

    pub fn completion_rules(&self) -> &[CompletionRule] {
        &self.completion_rules
    }

    pub fn notification_bindings(&self) -> &[NotificationBinding] {
        &self.notification_bindings
    }

    pub fn senders(&self) -> &[Sender] {
        &self.senders
    }

    pub fn set_task_templates(
        &mut self,
        desired: Vec<TaskTemplate>,
    ) -> Result<(), ReconcileError> {
        self.task_templates = apply_desired(&self.task_templates, desired, self.id)?;
        Ok(())
    }

    pub fn set_event_listeners(
        &mut self,
        desired: Vec<EventListenerTemplate>,
    ) -> Result<(), ReconcileError> {
        self.event_listeners = apply_desired(&self.event_listeners, desired, self.id)?;
        Ok(())
    }

    pub fn set_completion_rules(
        &mut self,
        desired: Vec<CompletionRule>,
    ) -> Result<(), ReconcileError> {
        self.completion_rules = apply_desired(&self.completion_rules, desired, self.id)?;
        Ok(())
    }

    pub fn set_notification_bindings(
        &mut self,
        desired: Vec<NotificationBinding>,
    ) -> Result<(), ReconcileError> {
        self.notification_bindings = apply_desired(&self.notification_bindings, desired, self.id)?;
        Ok(())
    }

    pub fn set_senders(&mut self, desired: Vec<Sender>) -> Result<(), ReconcileError> {
        self.senders = apply_desired(&self.senders, desired, self.id)?;
        Ok(())
    }

    /// The completion rule for a reason the caller already validated.
    pub fn completion_rule_by_reason(
        &self,
        reason_id: i64,
    ) -> Result<&CompletionRule, ConfigurationError> {
        self.completion_rules
            .iter()
            .find(|rule| rule.reason().id == reason_id)
            .ok_or(ConfigurationError::CompletionRuleNotFound {
                case_type_id: self.case_type_id,
                reason_id,
            })
    }

    /// The event listener template for a workflow step the caller already
    /// validated.
    pub fn event_listener_by_step(
        &self,
        step_id: &str,
    ) -> Result<&EventListenerTemplate, ConfigurationError> {
        self.event_listeners
            .iter()
            .find(|listener| listener.step_id == step_id)
            .ok_or_else(|| ConfigurationError::EventListenerNotFound {
                case_type_id: self.case_type_id,
                step_id: step_id.to_string(),
            })
    }

    pub fn find_task_template(&self, step_id: &str) -> Option<&TaskTemplate> {
        self.task_templates
            .iter()
            .find(|template| template.step_id == step_id)
    }

    /// Enough settings are present to start cases of this type.
    pub fn is_operational(&self) -> bool {
        has_value(&self.default_group)
            && has_value(&self.case_definition_id)
            && self.inadmissible_outcome_type_id.is_some()
    }

    /// Called by the storage gateway once a configuration row exists: records
    /// the configuration identity, stamps it onto every element, and assigns
    /// identities to elements inserted during reconciliation.
    pub fn bind_identities(
        &mut self,
        id: ConfigurationId,
        mut next_element_id: impl FnMut() -> ElementId,
    ) {
        self.id = Some(id);
        bind_collection(&mut self.task_templates, id, &mut next_element_id);
        bind_collection(&mut self.event_listeners, id, &mut next_element_id);
        bind_collection(&mut self.completion_rules, id, &mut next_element_id);
        bind_collection(&mut self.notification_bindings, id, &mut next_element_id);
        bind_collection(&mut self.senders, id, &mut next_element_id);
    }
}

fn has_value(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|value| !value.trim().is_empty())
}

/// Stamps the parent reference onto every desired element, then reconciles
/// against the current collection. The current collection is untouched when
/// reconciliation fails.
fn apply_desired<T>(
    current: &[T],
    mut desired: Vec<T>,
    parent: Option<ConfigurationId>,
) -> Result<Vec<T>, ReconcileError>
where
    T: ConfigElement + Clone,
{
    for element in &mut desired {
        element.set_parent(parent);
    }
    reconcile(current, &desired)
}

fn bind_collection<T>(
    collection: &mut [T],
    id: ConfigurationId,
    next_element_id: &mut impl FnMut() -> ElementId,
) where
    T: ConfigElement,
{
    for element in collection {
        element.set_parent(Some(id));
        if element.id().is_none() {
            element.assign_id(next_element_id());
        }
    }
}
