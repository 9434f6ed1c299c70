//! Answer categories and the accumulated form data

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Field name to value mapping for one category
pub type FieldMap = BTreeMap<String, String>;

/// Grouping key for the answers collected by one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Personal,
    Contact,
    Professional,
}

impl Category {
    /// All categories in display order
    pub fn all() -> &'static [Category] {
        &[
            Category::Personal,
            Category::Contact,
            Category::Professional,
        ]
    }

    /// Key used in the persisted snapshot
    pub fn key(&self) -> &'static str {
        match self {
            Category::Personal => "personal",
            Category::Contact => "contact",
            Category::Professional => "professional",
        }
    }

    /// Section title shown in the summary
    pub fn title(&self) -> &'static str {
        match self {
            Category::Personal => "Información personal",
            Category::Contact => "Información de contacto",
            Category::Professional => "Información profesional",
        }
    }
}

/// Answers accumulated across steps.
///
/// Every category is always present, possibly empty. The serialized shape
/// is `{"personal": {..}, "contact": {..}, "professional": {..}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormData {
    #[serde(default)]
    pub personal: FieldMap,
    #[serde(default)]
    pub contact: FieldMap,
    #[serde(default)]
    pub professional: FieldMap,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(&self, category: Category) -> &FieldMap {
        match category {
            Category::Personal => &self.personal,
            Category::Contact => &self.contact,
            Category::Professional => &self.professional,
        }
    }

    pub fn category_mut(&mut self, category: Category) -> &mut FieldMap {
        match category {
            Category::Personal => &mut self.personal,
            Category::Contact => &mut self.contact,
            Category::Professional => &mut self.professional,
        }
    }

    /// Saved value of a field, if any
    pub fn get(&self, category: Category, field: &str) -> Option<&str> {
        self.category(category).get(field).map(String::as_str)
    }

    /// Contact email used on the confirmation view
    pub fn contact_email(&self) -> Option<&str> {
        self.get(Category::Contact, "email")
    }

    /// Empty every category, keeping all keys present
    pub fn clear(&mut self) {
        for category in Category::all() {
            self.category_mut(*category).clear();
        }
    }

    pub fn is_empty(&self) -> bool {
        Category::all()
            .iter()
            .all(|category| self.category(*category).is_empty())
    }
}
