use serde::{Deserialize, Serialize};

/// Persistent identity of a stored configuration element. Absent until the
/// storage gateway assigns one on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(pub i64);

/// Persistent identity of a case-type configuration record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfigurationId(pub i64);

/// Capability set shared by every reconcilable configuration element.
///
/// Reconciliation never relies on a collection's own membership test; it
/// walks collections explicitly with these predicates. `content_eq` and
/// `same_entity` panic when a required master-data reference has not been
/// resolved; callers resolve references before elements reach the core.
pub trait ConfigElement {
    /// Element kind label used in diagnostics and error messages.
    const KIND: &'static str;

    fn id(&self) -> Option<ElementId>;

    /// Drops the persistent identity so storage treats the element as a
    /// fresh insert.
    fn clear_id(&mut self);

    /// Records the identity assigned by the storage gateway on insert.
    fn assign_id(&mut self, id: ElementId);

    /// Stamps the owning configuration. An element without a parent is not a
    /// valid standalone record.
    fn set_parent(&mut self, parent: Option<ConfigurationId>);

    /// Renders the pivot key for diagnostics.
    fn entity_key(&self) -> String;

    /// True when both elements denote the same logical entry, regardless of
    /// mutable fields.
    fn same_entity(&self, other: &Self) -> bool;

    /// Structural equality over all content fields, identity excluded.
    fn content_eq(&self, other: &Self) -> bool;

    /// Overwrites this element's mutable fields with those of `changes`.
    /// Pivot fields and persistent identity are untouched.
    fn merge_from(&mut self, changes: &Self);
}
