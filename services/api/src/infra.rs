use caseflow::admin::casetype::{
    CaseTypeConfiguration, ConfigurationId, ConfigurationStore, ElementId, StoreError,
};
use caseflow::admin::masterdata::{
    CompletionReason, LookupTable, MasterDataCatalog, NotificationTemplate,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Configuration storage backed by process memory. Identities are assigned
/// here, as a database sequence would in a durable deployment.
#[derive(Default)]
pub(crate) struct InMemoryConfigurationStore {
    configurations: Mutex<HashMap<Uuid, CaseTypeConfiguration>>,
    configuration_seq: AtomicI64,
    element_seq: AtomicI64,
}

impl ConfigurationStore for InMemoryConfigurationStore {
    fn fetch(&self, case_type_id: Uuid) -> Result<Option<CaseTypeConfiguration>, StoreError> {
        let guard = self.configurations.lock().expect("store mutex poisoned");
        Ok(guard.get(&case_type_id).cloned())
    }

    fn save(
        &self,
        mut configuration: CaseTypeConfiguration,
    ) -> Result<CaseTypeConfiguration, StoreError> {
        let id = configuration.id.unwrap_or_else(|| {
            ConfigurationId(self.configuration_seq.fetch_add(1, Ordering::Relaxed) + 1)
        });
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

/// Master data as maintained by the registry team. A durable deployment
/// resolves these against the registry services; the entries here cover
/// local development and the CLI demo.
pub(crate) struct StandardMasterData {
    completion_reasons: Vec<CompletionReason>,
    notification_templates: Vec<NotificationTemplate>,
    lookup_tables: Vec<LookupTable>,
}

impl StandardMasterData {
    pub(crate) fn new() -> Self {
        Self {
            completion_reasons: vec![
                CompletionReason {
                    id: 1,
                    name: "Granted".to_string(),
                },
                CompletionReason {
                    id: 2,
                    name: "Refused".to_string(),
                },
                CompletionReason {
                    id: 3,
                    name: "Withdrawn by applicant".to_string(),
                },
            ],
            notification_templates: vec![
                NotificationTemplate {
                    id: 10,
                    name: "case-received".to_string(),
                    subject: "We received your case".to_string(),
                },
                NotificationTemplate {
                    id: 11,
                    name: "case-completed".to_string(),
                    subject: "Your case has been completed".to_string(),
                },
                NotificationTemplate {
                    id: 12,
                    name: "task-assigned".to_string(),
                    subject: "A task was assigned to your group".to_string(),
                },
            ],
            lookup_tables: vec![
                LookupTable {
                    id: 100,
                    code: "advice-kinds".to_string(),
                },
                LookupTable {
                    id: 101,
                    code: "document-kinds".to_string(),
                },
            ],
        }
    }
}

impl MasterDataCatalog for StandardMasterData {
    fn completion_reason(&self, id: i64) -> Option<CompletionReason> {
        self.completion_reasons
            .iter()
            .find(|reason| reason.id == id)
            .cloned()
    }

    fn notification_template(&self, id: i64) -> Option<NotificationTemplate> {
        self.notification_templates
            .iter()
            .find(|template| template.id == id)
            .cloned()
    }

    fn lookup_table(&self, id: i64) -> Option<LookupTable> {
        self.lookup_tables
            .iter()
            .find(|table| table.id == id)
            .cloned()
    }
}
