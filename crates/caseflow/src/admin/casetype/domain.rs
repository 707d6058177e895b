use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::element::{ConfigElement, ConfigurationId, ElementId};
use crate::admin::masterdata::{CompletionReason, NotificationTemplate};

/// Exposes a reference table to the form rendered for one task template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupTableBinding {
    pub field: String,
    pub table_id: i64,
}

/// Template for a human task bound to one workflow step of the case
/// definition. The workflow step is the pivot; everything else may be
/// changed by the administrator without the template becoming a new entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskTemplate {
    pub id: Option<ElementId>,
    pub parent: Option<ConfigurationId>,
    pub step_id: String,
    pub active: bool,
    pub assigned_group: Option<String>,
    pub duration_days: Option<u32>,
    pub lookup_tables: Vec<LookupTableBinding>,
}

impl ConfigElement for TaskTemplate {
    const KIND: &'static str = "task template";

    fn id(&self) -> Option<ElementId> {
        self.id
    }

    fn clear_id(&mut self) {
        self.id = None;
    }

    fn assign_id(&mut self, id: ElementId) {
        self.id = Some(id);
    }

    fn set_parent(&mut self, parent: Option<ConfigurationId>) {
        self.parent = parent;
    }

    fn entity_key(&self) -> String {
        self.step_id.clone()
    }

    fn same_entity(&self, other: &Self) -> bool {
        self.step_id == other.step_id
    }

    fn content_eq(&self, other: &Self) -> bool {
        // Bindings compare element-wise; collection identity carries no
        // meaning here.
        self.step_id == other.step_id
            && self.active == other.active
            && self.assigned_group == other.assigned_group
            && self.duration_days == other.duration_days
            && self.lookup_tables == other.lookup_tables
    }

    fn merge_from(&mut self, changes: &Self) {
        self.active = changes.active;
        self.assigned_group = changes.assigned_group.clone();
        self.duration_days = changes.duration_days;
        self.lookup_tables = changes.lookup_tables.clone();
    }
}

/// Template shown when a user event listener fires for a workflow step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventListenerTemplate {
    pub id: Option<ElementId>,
    pub parent: Option<ConfigurationId>,
    pub step_id: String,
    pub note: Option<String>,
}

impl ConfigElement for EventListenerTemplate {
    const KIND: &'static str = "event listener template";

    fn id(&self) -> Option<ElementId> {
        self.id
    }

    fn clear_id(&mut self) {
        self.id = None;
    }

    fn assign_id(&mut self, id: ElementId) {
        self.id = Some(id);
    }

    fn set_parent(&mut self, parent: Option<ConfigurationId>) {
        self.parent = parent;
    }

    fn entity_key(&self) -> String {
        self.step_id.clone()
    }

    fn same_entity(&self, other: &Self) -> bool {
        self.step_id == other.step_id
    }

    fn content_eq(&self, other: &Self) -> bool {
        self.step_id == other.step_id && self.note == other.note
    }

    fn merge_from(&mut self, changes: &Self) {
        self.note = changes.note.clone();
    }
}

/// Maps one completion reason to the outcome type recorded when a case is
/// closed for that reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRule {
    pub id: Option<ElementId>,
    pub parent: Option<ConfigurationId>,
    pub reason: Option<CompletionReason>,
    pub outcome_type_id: Option<Uuid>,
}

impl CompletionRule {
    /// The resolved completion reason. Panics when the rule reaches equality
    /// or pivot logic before resolution; that is a caller bug, not user input.
    pub fn reason(&self) -> &CompletionReason {
        self.reason
            .as_ref()
            .expect("completion rule used before its reason was resolved")
    }
}

impl ConfigElement for CompletionRule {
    const KIND: &'static str = "completion rule";

    fn id(&self) -> Option<ElementId> {
        self.id
    }

    fn clear_id(&mut self) {
        self.id = None;
    }

    fn assign_id(&mut self, id: ElementId) {
        self.id = Some(id);
    }

    fn set_parent(&mut self, parent: Option<ConfigurationId>) {
        self.parent = parent;
    }

    fn entity_key(&self) -> String {
        self.reason().id.to_string()
    }

    fn same_entity(&self, other: &Self) -> bool {
        self.reason().id == other.reason().id
    }

    fn content_eq(&self, other: &Self) -> bool {
        self.reason() == other.reason() && self.outcome_type_id == other.outcome_type_id
    }

    fn merge_from(&mut self, changes: &Self) {
        self.outcome_type_id = changes.outcome_type_id;
    }
}

/// Binds a notification template to the case type. The binding has no
/// mutable fields; the template reference is the whole entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationBinding {
    pub id: Option<ElementId>,
    pub parent: Option<ConfigurationId>,
    pub template: Option<NotificationTemplate>,
}

impl NotificationBinding {
    /// The resolved notification template. Panics when the binding reaches
    /// equality logic before resolution; that is a caller bug, not user input.
    pub fn template(&self) -> &NotificationTemplate {
        self.template
            .as_ref()
            .expect("notification binding used before its template was resolved")
    }
}

impl ConfigElement for NotificationBinding {
    const KIND: &'static str = "notification binding";

    fn id(&self) -> Option<ElementId> {
        self.id
    }

    fn clear_id(&mut self) {
        self.id = None;
    }

    fn assign_id(&mut self, id: ElementId) {
        self.id = Some(id);
    }

    fn set_parent(&mut self, parent: Option<ConfigurationId>) {
        self.parent = parent;
    }

    fn entity_key(&self) -> String {
        self.template().id.to_string()
    }

    fn same_entity(&self, other: &Self) -> bool {
        // With no mutable fields, entity identity degenerates to content
        // equality.
        self.content_eq(other)
    }

    fn content_eq(&self, other: &Self) -> bool {
        self.template() == other.template()
    }

    fn merge_from(&mut self, _changes: &Self) {
        // Nothing merges; a changed binding is a different entry.
    }
}

/// Outgoing-mail sender address selectable on cases of this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sender {
    pub id: Option<ElementId>,
    pub parent: Option<ConfigurationId>,
    pub email: String,
    pub is_default: bool,
    pub reply_to: Option<String>,
}

impl ConfigElement for Sender {
    const KIND: &'static str = "sender";

    fn id(&self) -> Option<ElementId> {
        self.id
    }

    fn clear_id(&mut self) {
        self.id = None;
    }

    fn assign_id(&mut self, id: ElementId) {
        self.id = Some(id);
    }

    fn set_parent(&mut self, parent: Option<ConfigurationId>) {
        self.parent = parent;
    }

    fn entity_key(&self) -> String {
        self.email.clone()
    }

    fn same_entity(&self, other: &Self) -> bool {
        self.email == other.email
    }

    fn content_eq(&self, other: &Self) -> bool {
        self.email == other.email
            && self.is_default == other.is_default
            && self.reply_to == other.reply_to
    }

    fn merge_from(&mut self, changes: &Self) {
        self.is_default = changes.is_default;
        self.reply_to = changes.reply_to.clone();
    }
}
