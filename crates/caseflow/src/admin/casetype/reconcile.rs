use super::element::ConfigElement;

/// Raised before any merge work starts; the persisted collection is never
/// partially updated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReconcileError {
    #[error("duplicate {kind} for key '{key}' in the submitted collection")]
    DuplicateKey { kind: &'static str, key: String },
}

/// Merges a desired collection into the persisted one.
///
/// Persisted elements matched by pivot keep their identity and receive the
/// candidate's mutable fields. Candidates matching nothing are appended with
/// identity cleared. Persisted elements without a content match in the
/// desired set are dropped. Membership is decided exclusively by the element
/// predicates; persistence-hydrated collections cannot be trusted to apply
/// domain equality in their own membership test.
pub fn reconcile<T>(persisted: &[T], desired: &[T]) -> Result<Vec<T>, ReconcileError>
where
    T: ConfigElement + Clone,
{
    for (index, candidate) in desired.iter().enumerate() {
        if desired[..index]
            .iter()
            .any(|earlier| earlier.same_entity(candidate))
        {
            return Err(ReconcileError::DuplicateKey {
                kind: T::KIND,
                key: candidate.entity_key(),
            });
        }
    }

    let mut merged: Vec<T> = persisted.to_vec();
    for candidate in desired {
        match merged.iter().position(|existing| existing.same_entity(candidate)) {
            Some(index) => {
                let target = &mut merged[index];
                if !target.content_eq(candidate) {
                    target.merge_from(candidate);
                }
            }
            None => {
                if !merged.iter().any(|existing| existing.content_eq(candidate)) {
                    let mut fresh = candidate.clone();
                    fresh.clear_id();
                    merged.push(fresh);
                }
            }
        }
    }

    // Elements merged above now match their desired counterpart again, so
    // this pass only drops entries the administrator removed.
    merged.retain(|existing| {
        desired
            .iter()
            .any(|candidate| existing.content_eq(candidate))
    });

    Ok(merged)
}
