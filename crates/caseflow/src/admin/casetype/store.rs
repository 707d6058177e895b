use uuid::Uuid;

use super::configuration::CaseTypeConfiguration;

/// Storage gateway for case-type configurations.
///
/// Implementations assign configuration and element identities on insert
/// (via [`CaseTypeConfiguration::bind_identities`]) and translate the
/// reconciled collections into inserts, updates, and deletes. The core never
/// performs I/O itself.
///
/// [`CaseTypeConfiguration::bind_identities`]: super::configuration::CaseTypeConfiguration::bind_identities
pub trait ConfigurationStore: Send + Sync {
    fn fetch(&self, case_type_id: Uuid) -> Result<Option<CaseTypeConfiguration>, StoreError>;
    fn save(
        &self,
        configuration: CaseTypeConfiguration,
    ) -> Result<CaseTypeConfiguration, StoreError>;
    fn list(&self) -> Result<Vec<CaseTypeConfiguration>, StoreError>;
}

/// Error enumeration for storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("configuration already exists")]
    Conflict,
    #[error("configuration not found")]
    NotFound,
    #[error("configuration store unavailable: {0}")]
    Unavailable(String),
}
