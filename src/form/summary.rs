//! Summary projection of the accumulated answers

use std::fmt;

use serde::Serialize;

use super::schema;
use super::types::{Category, FormData};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryEntry {
    pub field: String,
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummarySection {
    pub category: Category,
    pub title: &'static str,
    pub entries: Vec<SummaryEntry>,
}

/// Display structure for the review step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub sections: Vec<SummarySection>,
}

impl Summary {
    pub fn entry_count(&self) -> usize {
        self.sections.iter().map(|s| s.entries.len()).sum()
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", section.title)?;
            for entry in &section.entries {
                writeln!(f, "  {}: {}", entry.label, entry.value)?;
            }
        }
        Ok(())
    }
}

/// Project `data` into titled sections of label/value pairs.
///
/// Sections always appear in category order, even when empty. Within a
/// section, fields follow the form definition; saved keys the definition
/// does not know come last in key order.
pub fn project(data: &FormData) -> Summary {
    let sections = Category::all()
        .iter()
        .map(|category| {
            let saved = data.category(*category);
            let known: Vec<&str> = schema::category_fields(*category)
                .map(|field| field.name)
                .collect();

            let ordered = known
                .iter()
                .filter_map(|name| saved.get_key_value(*name))
                .chain(
                    saved
                        .iter()
                        .filter(|(name, _)| !known.contains(&name.as_str())),
                );

            let entries = ordered
                .filter(|(_, value)| !value.is_empty())
                .map(|(name, value)| SummaryEntry {
                    field: name.clone(),
                    label: schema::summary_label(name).to_string(),
                    value: value.clone(),
                })
                .collect();

            SummarySection {
                category: *category,
                title: category.title(),
                entries,
            }
        })
        .collect();

    Summary { sections }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FormData {
        let mut data = FormData::new();
        data.personal
            .insert("lastName".to_string(), "Pérez".to_string());
        data.personal
            .insert("firstName".to_string(), "Ana".to_string());
        data.personal.insert("prof".to_string(), String::new());
        data.contact
            .insert("email".to_string(), "ana@example.com".to_string());
        data.contact
            .insert("medioPrincipal".to_string(), "Evento".to_string());
        data.contact
            .insert("nombreEvento".to_string(), "Feria".to_string());
        data.contact
            .insert("legacyField".to_string(), "x".to_string());
        data
    }

    #[test]
    fn test_sections_in_fixed_order_with_titles() {
        let summary = project(&FormData::new());
        let titles: Vec<_> = summary.sections.iter().map(|s| s.title).collect();
        assert_eq!(
            titles,
            vec![
                "Información personal",
                "Información de contacto",
                "Información profesional"
            ]
        );
        assert_eq!(summary.entry_count(), 0);
    }

    #[test]
    fn test_entries_use_labels_and_skip_empty_values() {
        let summary = project(&sample());
        let personal: Vec<_> = summary.sections[0]
            .entries
            .iter()
            .map(|e| (e.label.as_str(), e.value.as_str()))
            .collect();
        assert_eq!(personal, vec![("Nombre", "Ana"), ("Apellidos", "Pérez")]);
    }

    #[test]
    fn test_unlabeled_fields_fall_back_to_raw_name() {
        let summary = project(&sample());
        let contact: Vec<_> = summary.sections[1]
            .entries
            .iter()
            .map(|e| e.label.as_str())
            .collect();
        assert_eq!(
            contact,
            vec![
                "Correo electrónico",
                "medioPrincipal",
                "nombreEvento",
                "legacyField"
            ]
        );
    }

    #[test]
    fn test_projection_does_not_mutate() {
        let data = sample();
        let before = data.clone();
        let _ = project(&data);
        assert_eq!(data, before);
    }

    #[test]
    fn test_display_lists_sections() {
        let text = project(&sample()).to_string();
        assert!(text.starts_with("Información personal\n  Nombre: Ana\n"));
        assert!(text.contains("  Correo electrónico: ana@example.com\n"));
        assert!(text.contains("Información profesional\n"));
    }
}
