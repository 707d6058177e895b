use crate::infra::{InMemoryConfigurationStore, StandardMasterData};
use caseflow::admin::casetype::{
    CaseTypeConfiguration, CompletionRulePayload, ConfigurationAdminService, ConfigurationPayload,
    ConfigurationStore, EventListenerPayload, NotificationBindingPayload, SenderPayload,
    TaskTemplatePayload,
};
use caseflow::admin::masterdata::MasterDataCatalog;
use caseflow::error::AppError;
use clap::Args;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Case type to configure (defaults to a generated identifier)
    #[arg(long)]
    pub(crate) case_type_id: Option<Uuid>,
}

/// Seeds a case-type configuration, applies an amended desired state, and
/// prints which entries the reconciler kept, changed, and replaced.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let case_type_id = args.case_type_id.unwrap_or_else(Uuid::new_v4);
    let store = Arc::new(InMemoryConfigurationStore::default());
    let service = ConfigurationAdminService::new(store);
    let catalog = StandardMasterData::new();

    let first = submit(&service, &catalog, &seed_payload(case_type_id))?;
    println!("Seeded configuration for case type {case_type_id}:");
    print_configuration(&first);

    let second = submit(&service, &catalog, &amended_payload(case_type_id))?;
    println!();
    println!("After the amended submission:");
    print_configuration(&second);

    println!();
    let kept = second
        .task_templates()
        .iter()
        .filter(|template| {
            first
                .task_templates()
                .iter()
                .any(|previous| previous.id == template.id)
        })
        .count();
    let inserted = second.task_templates().len() - kept;
    let removed = first.task_templates().len() - kept;
    println!(
        "Task templates: {kept} kept their stored identity, {inserted} inserted, {removed} removed."
    );

    Ok(())
}

fn submit<S>(
    service: &ConfigurationAdminService<S>,
    catalog: &dyn MasterDataCatalog,
    payload: &ConfigurationPayload,
) -> Result<CaseTypeConfiguration, AppError>
where
    S: ConfigurationStore + 'static,
{
    let mut configuration = service.read_or_new(payload.case_type_id, &payload.case_type_name)?;
    payload.apply_to(&mut configuration, catalog)?;
    Ok(service.store(configuration)?)
}

fn print_configuration(configuration: &CaseTypeConfiguration) {
    println!(
        "  operational: {} (group: {}, case definition: {})",
        configuration.is_operational(),
        configuration.default_group.as_deref().unwrap_or("-"),
        configuration.case_definition_id.as_deref().unwrap_or("-"),
    );
    for template in configuration.task_templates() {
        println!(
            "  task template #{} step={} active={} group={} duration={}d",
            template.id.map(|id| id.0).unwrap_or_default(),
            template.step_id,
            template.active,
            template.assigned_group.as_deref().unwrap_or("-"),
            template.duration_days.unwrap_or_default(),
        );
    }
    for listener in configuration.event_listeners() {
        println!(
            "  event listener #{} step={} note={}",
            listener.id.map(|id| id.0).unwrap_or_default(),
            listener.step_id,
            listener.note.as_deref().unwrap_or("-"),
        );
    }
    for rule in configuration.completion_rules() {
        println!(
            "  completion rule #{} reason={} outcome={}",
            rule.id.map(|id| id.0).unwrap_or_default(),
            rule.reason().name,
            rule.outcome_type_id
                .map(|outcome| outcome.to_string())
                .unwrap_or_else(|| "-".to_string()),
        );
    }
    for binding in configuration.notification_bindings() {
        println!(
            "  notification binding #{} template={}",
            binding.id.map(|id| id.0).unwrap_or_default(),
            binding.template().name,
        );
    }
    for sender in configuration.senders() {
        println!(
            "  sender #{} email={} default={}",
            sender.id.map(|id| id.0).unwrap_or_default(),
            sender.email,
            sender.is_default,
        );
    }
}

fn seed_payload(case_type_id: Uuid) -> ConfigurationPayload {
    ConfigurationPayload {
        case_type_id,
        case_type_name: "Building permit".to_string(),
        case_definition_id: Some("building-permit-flow".to_string()),
        default_group: Some("permits".to_string()),
        default_assignee: None,
        target_date_warning_days: Some(7),
        due_date_warning_days: Some(3),
        inadmissible_outcome_type_id: Some(Uuid::from_u128(0x0901)),
        intake_notification: Default::default(),
        completion_notification: Default::default(),
        intake_channel_type: Some("building-permit-request".to_string()),
        domain: Some("physical-environment".to_string()),
        task_templates: vec![
            TaskTemplatePayload {
                step_id: "assess-application".to_string(),
                active: true,
                assigned_group: Some("permits".to_string()),
                duration_days: Some(10),
                lookup_tables: Vec::new(),
            },
            TaskTemplatePayload {
                step_id: "request-advice".to_string(),
                active: true,
                assigned_group: Some("advisors".to_string()),
                duration_days: Some(14),
                lookup_tables: Vec::new(),
            },
        ],
        event_listeners: vec![EventListenerPayload {
            step_id: "withdraw-application".to_string(),
            note: Some("Confirm the withdrawal with the applicant".to_string()),
        }],
        completion_rules: vec![
            CompletionRulePayload {
                reason_id: 1,
                outcome_type_id: Some(Uuid::from_u128(0x0101)),
            },
            CompletionRulePayload {
                reason_id: 3,
                outcome_type_id: Some(Uuid::from_u128(0x0103)),
            },
        ],
        notification_bindings: vec![NotificationBindingPayload { template_id: 10 }],
        senders: vec![SenderPayload {
            email: "permits@city.example".to_string(),
            is_default: true,
            reply_to: None,
        }],
    }
}

/// Same case type, one template reworked, one dropped, one added, the
/// notification binding repointed.
fn amended_payload(case_type_id: Uuid) -> ConfigurationPayload {
    let mut payload = seed_payload(case_type_id);
    payload.task_templates[0].duration_days = Some(21);
    payload.task_templates.remove(1);
    payload.task_templates.push(TaskTemplatePayload {
        step_id: "publish-decision".to_string(),
        active: false,
        assigned_group: Some("permits".to_string()),
        duration_days: Some(2),
        lookup_tables: Vec::new(),
    });
    payload.notification_bindings = vec![NotificationBindingPayload { template_id: 11 }];
    payload
}
