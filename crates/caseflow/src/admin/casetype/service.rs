use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use super::configuration::CaseTypeConfiguration;
use super::store::{ConfigurationStore, StoreError};

/// Administration entry point for case-type configurations. Wraps the
/// storage gateway with the read-or-default, listing, and activation
/// queries the admin surface needs.
pub struct ConfigurationAdminService<S> {
    store: Arc<S>,
}

impl<S> ConfigurationAdminService<S>
where
    S: ConfigurationStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn find(&self, case_type_id: Uuid) -> Result<Option<CaseTypeConfiguration>, AdminServiceError> {
        Ok(self.store.fetch(case_type_id)?)
    }

    /// The stored configuration for the case type, or a fresh one when the
    /// case type has never been configured. A case type always has a
    /// configuration from the administrator's point of view.
    pub fn read_or_new(
        &self,
        case_type_id: Uuid,
        case_type_name: &str,
    ) -> Result<CaseTypeConfiguration, AdminServiceError> {
        Ok(self
            .store
            .fetch(case_type_id)?
            .unwrap_or_else(|| CaseTypeConfiguration::new(case_type_id, case_type_name)))
    }

    /// All configurations, newest first.
    pub fn list(&self) -> Result<Vec<CaseTypeConfiguration>, AdminServiceError> {
        let mut configurations = self.store.list()?;
        configurations.sort_by(|a, b| b.id.map(|id| id.0).cmp(&a.id.map(|id| id.0)));
        Ok(configurations)
    }

    /// Persists a configuration, stamping the creation timestamp on first
    /// save. Returns the stored configuration with identities bound.
    pub fn store(
        &self,
        mut configuration: CaseTypeConfiguration,
    ) -> Result<CaseTypeConfiguration, AdminServiceError> {
        if configuration.created_at.is_none() {
            configuration.created_at = Some(Utc::now());
        }

        let stored = self.store.save(configuration)?;
        info!(
            case_type_id = %stored.case_type_id,
            task_templates = stored.task_templates().len(),
            event_listeners = stored.event_listeners().len(),
            completion_rules = stored.completion_rules().len(),
            notification_bindings = stored.notification_bindings().len(),
            senders = stored.senders().len(),
            operational = stored.is_operational(),
            "stored case type configuration"
        );
        Ok(stored)
    }

    /// Configurations whose intake channel matches and which are the newest
    /// revision for their case type. More than one result means the intake
    /// channel is claimed by several case types; the caller reports that
    /// configuration error.
    pub fn active_for_intake_type(
        &self,
        intake_channel_type: &str,
    ) -> Result<Vec<CaseTypeConfiguration>, AdminServiceError> {
        let all = self.store.list()?;

        let mut newest_per_case_type: HashMap<String, DateTime<Utc>> = HashMap::new();
        for configuration in &all {
            let Some(created_at) = configuration.created_at else {
                continue;
            };
            newest_per_case_type
                .entry(configuration.case_type_name.clone())
                .and_modify(|newest| *newest = (*newest).max(created_at))
                .or_insert(created_at);
        }

        Ok(all
            .into_iter()
            .filter(|configuration| {
                configuration.intake_channel_type.as_deref() == Some(intake_channel_type)
                    && configuration.created_at.is_some()
                    && configuration.created_at
                        == newest_per_case_type
                            .get(&configuration.case_type_name)
                            .copied()
            })
            .collect())
    }
}

/// Error raised by the administration service.
#[derive(Debug, thiserror::Error)]
pub enum AdminServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
}
