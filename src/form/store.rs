//! Step store: per-step extraction into `FormData` and snapshot persistence

use serde::Deserialize;
use thiserror::Error;

use super::inputs::FormInputs;
use super::medium::{ContactMedium, MediumKind, MEDIUM_FIELD};
use super::schema::{self, StepSchema};
use super::types::{Category, FieldMap, FormData};
use crate::storage::{SnapshotSlot, StorageError};

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("snapshot is not valid form data: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Snapshot as read from storage. A category missing from the snapshot
/// leaves the in-memory category untouched.
#[derive(Debug, Deserialize)]
struct Snapshot {
    personal: Option<FieldMap>,
    contact: Option<FieldMap>,
    professional: Option<FieldMap>,
}

impl Snapshot {
    fn merge_into(self, data: &mut FormData) {
        for (category, fields) in [
            (Category::Personal, self.personal),
            (Category::Contact, self.contact),
            (Category::Professional, self.professional),
        ] {
            if let Some(fields) = fields {
                *data.category_mut(category) = fields;
            }
        }
    }
}

/// What `load` found in the slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing saved; a fresh session
    Fresh,
    /// Snapshot merged and republished into the inputs
    Restored,
    /// Snapshot was malformed and has been removed
    Discarded(String),
    /// Slot could not be read; the session starts fresh
    Unavailable(String),
}

/// Extract the values a step saves.
///
/// `lookup` reads the current value of an input by name. Returns `None` for
/// steps without a category.
pub fn extract_step<'a>(
    step: &StepSchema,
    lookup: impl Fn(&str) -> &'a str,
) -> Option<(Category, FieldMap)> {
    let category = step.category?;
    let mut fields = FieldMap::new();

    if category == Category::Contact {
        if let Some(medium) = ContactMedium::resolve(|name| Some(lookup(name))) {
            fields.insert(MEDIUM_FIELD.to_string(), medium.kind().tag().to_string());
            fields.insert(
                medium.kind().payload_field().to_string(),
                medium.payload().to_string(),
            );
        }
        for field in step.fields {
            if field.is_radio() || MediumKind::from_payload_field(field.name).is_some() {
                continue;
            }
            let value = lookup(field.name);
            if !value.is_empty() {
                fields.insert(field.name.to_string(), value.to_string());
            }
        }
    } else {
        for field in step.fields {
            let value = lookup(field.name);
            if !value.is_empty() {
                fields.insert(field.name.to_string(), value.to_string());
            }
        }
    }

    Some((category, fields))
}

/// Merge the inputs of `step` into `data`.
///
/// The contact step replaces its category wholesale so that only the
/// winning medium survives; other steps merge, keeping previously saved
/// values for inputs that are now empty.
pub fn save_step(data: &mut FormData, inputs: &FormInputs, step: usize) {
    let Some(step_schema) = schema::step(step) else {
        return;
    };
    let Some((category, fields)) = extract_step(step_schema, |name| inputs.value(name)) else {
        return;
    };

    let target = data.category_mut(category);
    if category == Category::Contact {
        target.clear();
    }
    target.extend(fields);
    tracing::debug!(step, category = category.key(), "step saved");
}

/// Write the full form data to the slot, overwriting the previous snapshot
pub fn persist(data: &FormData, slot: &dyn SnapshotSlot) -> Result<(), SnapshotError> {
    let contents = serde_json::to_string(data)?;
    slot.write(&contents)?;
    Ok(())
}

/// Read and decode the snapshot without touching any session state
pub fn read_snapshot(slot: &dyn SnapshotSlot) -> Result<Option<FormData>, SnapshotError> {
    let Some(contents) = slot.read()? else {
        return Ok(None);
    };
    let snapshot: Snapshot = serde_json::from_str(&contents)?;
    let mut data = FormData::new();
    snapshot.merge_into(&mut data);
    Ok(Some(data))
}

/// Restore the snapshot into `data` and republish it into `inputs`.
///
/// A malformed snapshot is discarded and removed from the slot so the next
/// start is clean.
pub fn load(data: &mut FormData, inputs: &mut FormInputs, slot: &dyn SnapshotSlot) -> LoadOutcome {
    let contents = match slot.read() {
        Ok(Some(contents)) => contents,
        Ok(None) => return LoadOutcome::Fresh,
        Err(e) => {
            tracing::warn!(error = %e, "snapshot unavailable, starting fresh");
            return LoadOutcome::Unavailable(e.to_string());
        }
    };

    match serde_json::from_str::<Snapshot>(&contents) {
        Ok(snapshot) => {
            snapshot.merge_into(data);
            publish(data, inputs);
            tracing::debug!("snapshot restored");
            LoadOutcome::Restored
        }
        Err(e) => {
            tracing::warn!(error = %e, "discarding malformed snapshot");
            if let Err(remove_err) = slot.remove() {
                tracing::warn!(error = %remove_err, "failed to remove malformed snapshot");
            }
            LoadOutcome::Discarded(e.to_string())
        }
    }
}

/// Write saved values back into inputs with the same name
pub fn publish(data: &FormData, inputs: &mut FormInputs) {
    for category in Category::all() {
        let saved = data.category(*category);
        for field in schema::category_fields(*category) {
            if MediumKind::from_payload_field(field.name).is_some() || field.name == MEDIUM_FIELD {
                continue;
            }
            if let Some(value) = saved.get(field.name).filter(|v| !v.is_empty()) {
                inputs.set(field.name, value);
            }
        }
    }

    let medium = ContactMedium::resolve(|name| data.contact.get(name).map(String::as_str));
    if medium.is_some() {
        inputs.medium_mut().set(medium);
    }
}

/// Remove the snapshot
pub fn clear(slot: &dyn SnapshotSlot) -> Result<(), StorageError> {
    slot.remove()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemorySlot;
    use std::collections::HashMap;

    fn contact_step() -> &'static StepSchema {
        schema::step(1).unwrap()
    }

    #[test]
    fn test_contact_priority_event_beats_invitation() {
        let mut raw = HashMap::new();
        raw.insert("nombreEvento", "Feria");
        raw.insert("quienInvito", "Laura");
        raw.insert("email", "ana@example.com");

        let (category, fields) =
            extract_step(contact_step(), |name| raw.get(name).copied().unwrap_or("")).unwrap();

        assert_eq!(category, Category::Contact);
        assert_eq!(fields.get("medioPrincipal").map(String::as_str), Some("Evento"));
        assert_eq!(fields.get("nombreEvento").map(String::as_str), Some("Feria"));
        assert!(!fields.contains_key("quienInvito"));
        assert_eq!(
            fields.get("email").map(String::as_str),
            Some("ana@example.com")
        );
    }

    #[test]
    fn test_contact_without_medium_saves_only_plain_fields() {
        let mut inputs = FormInputs::new();
        inputs.set("email", "ana@example.com");
        inputs.set("phone", "1234567890");
        inputs.medium_mut().choose(MediumKind::Redes);

        let mut data = FormData::new();
        save_step(&mut data, &inputs, 1);

        let keys: Vec<_> = data.contact.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["email", "phone"]);
    }

    #[test]
    fn test_contact_save_replaces_previous_medium() {
        let mut data = FormData::new();
        let mut inputs = FormInputs::new();
        inputs.set("email", "ana@example.com");
        inputs.medium_mut().on_input(MediumKind::Evento, "Feria");
        save_step(&mut data, &inputs, 1);

        inputs.medium_mut().on_input(MediumKind::Evento, "");
        inputs.medium_mut().on_input(MediumKind::Otro, "Periódico");
        save_step(&mut data, &inputs, 1);

        assert_eq!(data.get(Category::Contact, "medioPrincipal"), Some("Otro"));
        assert_eq!(data.get(Category::Contact, "otroTexto"), Some("Periódico"));
        assert_eq!(data.get(Category::Contact, "nombreEvento"), None);
    }

    #[test]
    fn test_other_steps_keep_previous_values_for_empty_inputs() {
        let mut data = FormData::new();
        let mut inputs = FormInputs::new();
        inputs.set("firstName", "Ana");
        inputs.set("genero", "Femenino");
        save_step(&mut data, &inputs, 0);

        inputs.set("firstName", "");
        inputs.set("lastName", "Pérez");
        save_step(&mut data, &inputs, 0);

        assert_eq!(data.get(Category::Personal, "firstName"), Some("Ana"));
        assert_eq!(data.get(Category::Personal, "lastName"), Some("Pérez"));
        assert_eq!(data.get(Category::Personal, "genero"), Some("Femenino"));
        assert!(data.get(Category::Personal, "civil").is_none());
    }

    #[test]
    fn test_review_step_saves_nothing() {
        let mut data = FormData::new();
        let mut inputs = FormInputs::new();
        inputs.set("firstName", "Ana");
        save_step(&mut data, &inputs, 3);
        assert!(data.is_empty());
    }

    #[test]
    fn test_save_then_load_restores_inputs() {
        let slot = MemorySlot::new();
        let mut data = FormData::new();
        let mut inputs = FormInputs::new();
        inputs.set("firstName", "Ana");
        inputs.set("cumpleaños", "1990-04-12");
        inputs.set("email", "ana@example.com");
        inputs.set("phone", "1234567890");
        inputs.medium_mut().on_input(MediumKind::Redes, "Instagram");
        inputs.set("occupation", "Ingeniera");
        for step in 0..3 {
            save_step(&mut data, &inputs, step);
        }
        persist(&data, &slot).unwrap();

        // Simulated reload
        let mut restored_data = FormData::new();
        let mut restored_inputs = FormInputs::new();
        let outcome = load(&mut restored_data, &mut restored_inputs, &slot);

        assert_eq!(outcome, LoadOutcome::Restored);
        assert_eq!(restored_data, data);
        for name in [
            "firstName",
            "cumpleaños",
            "email",
            "phone",
            "redSocial",
            "occupation",
            "medioPrincipal",
        ] {
            assert_eq!(restored_inputs.value(name), inputs.value(name), "{name}");
        }
        assert!(!restored_inputs.is_enabled("nombreEvento"));
    }

    #[test]
    fn test_load_merges_per_category() {
        let slot = MemorySlot::with_contents(r#"{"personal":{"firstName":"Luis"}}"#);
        let mut data = FormData::new();
        data.professional
            .insert("company".to_string(), "Acme".to_string());
        data.personal
            .insert("lastName".to_string(), "Gómez".to_string());
        let mut inputs = FormInputs::new();

        assert_eq!(load(&mut data, &mut inputs, &slot), LoadOutcome::Restored);

        // Whole personal category replaced, professional untouched
        assert_eq!(data.get(Category::Personal, "firstName"), Some("Luis"));
        assert_eq!(data.get(Category::Personal, "lastName"), None);
        assert_eq!(data.get(Category::Professional, "company"), Some("Acme"));
        assert_eq!(inputs.value("firstName"), "Luis");
    }

    #[test]
    fn test_load_without_snapshot_is_fresh() {
        let slot = MemorySlot::new();
        let mut data = FormData::new();
        let mut inputs = FormInputs::new();
        assert_eq!(load(&mut data, &mut inputs, &slot), LoadOutcome::Fresh);
        assert!(data.is_empty());
    }

    #[test]
    fn test_malformed_snapshot_is_discarded_and_removed() {
        for contents in [
            "{not json",
            r#"{"personal":"Ana"}"#,
            r#"{"contact":{"email":42}}"#,
            r#"[1,2,3]"#,
        ] {
            let slot = MemorySlot::with_contents(contents);
            let mut data = FormData::new();
            let mut inputs = FormInputs::new();

            let outcome = load(&mut data, &mut inputs, &slot);

            assert!(matches!(outcome, LoadOutcome::Discarded(_)), "{contents}");
            assert!(slot.contents().is_none());
            assert!(data.is_empty());
        }
    }

    #[test]
    fn test_snapshot_with_two_payloads_restores_priority_winner() {
        let slot = MemorySlot::with_contents(
            r#"{"contact":{"quienInvito":"Laura","nombreEvento":"Feria","email":"a@b.co"}}"#,
        );
        let mut data = FormData::new();
        let mut inputs = FormInputs::new();
        load(&mut data, &mut inputs, &slot);

        assert_eq!(inputs.value("nombreEvento"), "Feria");
        assert_eq!(inputs.value("quienInvito"), "");

        save_step(&mut data, &inputs, 1);
        assert_eq!(data.get(Category::Contact, "medioPrincipal"), Some("Evento"));
        assert_eq!(data.get(Category::Contact, "quienInvito"), None);
    }

    #[test]
    fn test_unknown_categories_are_ignored() {
        let slot = MemorySlot::with_contents(r#"{"otro":{"x":"y"},"personal":{"edad":"30"}}"#);
        let data = read_snapshot(&slot).unwrap().unwrap();
        assert_eq!(data.get(Category::Personal, "edad"), Some("30"));
    }

    #[test]
    fn test_clear_removes_snapshot() {
        let slot = MemorySlot::with_contents("{}");
        clear(&slot).unwrap();
        assert!(read_snapshot(&slot).unwrap().is_none());
    }
}
