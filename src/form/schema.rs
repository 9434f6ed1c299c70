//! Compiled-in definition of the form: steps, fields and labels

use super::types::Category;

/// Input kinds a field can take
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Free single-line text
    Text,
    /// Email address, validated with the email rule
    Email,
    /// Telephone number, validated with the phone rule
    Tel,
    /// Date (YYYY-MM-DD)
    Date,
    /// Non-negative integer
    Number,
    /// Drop-down choice; empty means "not selected"
    Select,
    /// Radio group; empty means "nothing checked"
    Radio,
}

/// Definition of a single input
#[derive(Debug, Clone, Copy)]
pub struct FieldSchema {
    /// Input name, used as the key in `FormData`
    pub name: &'static str,
    /// Prompt shown next to the input
    pub label: &'static str,
    pub field_type: FieldType,
    pub required: bool,
    /// Choices for select and radio fields
    pub options: &'static [&'static str],
}

impl FieldSchema {
    const fn new(name: &'static str, label: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            label,
            field_type,
            required: false,
            options: &[],
        }
    }

    const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    const fn options(mut self, options: &'static [&'static str]) -> Self {
        self.options = options;
        self
    }

    pub fn is_radio(&self) -> bool {
        self.field_type == FieldType::Radio
    }

    pub fn has_options(&self) -> bool {
        matches!(self.field_type, FieldType::Select | FieldType::Radio)
    }
}

/// Definition of one step of the form
#[derive(Debug, Clone, Copy)]
pub struct StepSchema {
    pub title: &'static str,
    /// Category the step saves into; the review step has none
    pub category: Option<Category>,
    pub fields: &'static [FieldSchema],
}

impl StepSchema {
    pub fn required_fields(&self) -> impl Iterator<Item = &'static FieldSchema> {
        self.fields.iter().filter(|field| field.required)
    }
}

const PERSONAL_FIELDS: &[FieldSchema] = &[
    FieldSchema::new("firstName", "Nombre", FieldType::Text).required(),
    FieldSchema::new("lastName", "Apellidos", FieldType::Text).required(),
    FieldSchema::new("cumpleaños", "Fecha de nacimiento", FieldType::Date),
    FieldSchema::new("edad", "Edad", FieldType::Number),
    FieldSchema::new("genero", "Género", FieldType::Radio).options(&[
        "Masculino",
        "Femenino",
        "Otro",
    ]),
    FieldSchema::new("civil", "Estado civil", FieldType::Select).options(&[
        "Soltero(a)",
        "Casado(a)",
        "Divorciado(a)",
        "Viudo(a)",
        "Unión libre",
    ]),
    FieldSchema::new("nacion", "Nacionalidad", FieldType::Text),
    FieldSchema::new("prof", "Profesión/Ocupación", FieldType::Text),
];

const CONTACT_FIELDS: &[FieldSchema] = &[
    FieldSchema::new("email", "Correo electrónico", FieldType::Email).required(),
    FieldSchema::new("phone", "Teléfono", FieldType::Tel).required(),
    FieldSchema::new("address", "Dirección", FieldType::Text),
    FieldSchema::new("city", "Ciudad", FieldType::Text),
    FieldSchema::new(
        "medioPrincipal",
        "¿Cómo se enteró de nosotros?",
        FieldType::Radio,
    )
    .options(&["Evento", "Invitacion", "Redes", "Otro"]),
    FieldSchema::new("nombreEvento", "Nombre del evento", FieldType::Text),
    FieldSchema::new("quienInvito", "¿Quién lo invitó?", FieldType::Text),
    FieldSchema::new("redSocial", "Red social", FieldType::Select).options(&[
        "Facebook",
        "Instagram",
        "TikTok",
        "X",
        "LinkedIn",
        "YouTube",
    ]),
    FieldSchema::new("otroTexto", "Especifique", FieldType::Text),
    FieldSchema::new("medioPrincipalVisual", "Medio activo", FieldType::Radio)
        .options(&["Evento", "Invitacion", "Redes", "Otro"]),
];

const PROFESSIONAL_FIELDS: &[FieldSchema] = &[
    FieldSchema::new("occupation", "Ocupación", FieldType::Text).required(),
    FieldSchema::new("company", "Compañía", FieldType::Text),
    FieldSchema::new("experience", "Experiencia", FieldType::Select).options(&[
        "Menos de 1 año",
        "1-3 años",
        "3-5 años",
        "Más de 5 años",
    ]),
];

/// Steps in display order; the last one is the review step
pub const STEPS: &[StepSchema] = &[
    StepSchema {
        title: "Información personal",
        category: Some(Category::Personal),
        fields: PERSONAL_FIELDS,
    },
    StepSchema {
        title: "Información de contacto",
        category: Some(Category::Contact),
        fields: CONTACT_FIELDS,
    },
    StepSchema {
        title: "Información profesional",
        category: Some(Category::Professional),
        fields: PROFESSIONAL_FIELDS,
    },
    StepSchema {
        title: "Resumen",
        category: None,
        fields: &[],
    },
];

/// Summary labels; fields missing here are shown by their raw name
const SUMMARY_LABELS: &[(&str, &str)] = &[
    ("firstName", "Nombre"),
    ("lastName", "Apellidos"),
    ("cumpleaños", "Fecha de nacimiento"),
    ("edad", "Edad"),
    ("genero", "Género"),
    ("civil", "Estado Civil"),
    ("nacion", "Nacionalidad"),
    ("prof", "Profesión/Ocupación"),
    ("email", "Correo electrónico"),
    ("phone", "Teléfono"),
    ("address", "Dirección"),
    ("city", "Ciudad"),
    ("occupation", "Ocupación"),
    ("company", "Compañía"),
    ("experience", "Experiencia"),
];

pub fn step_count() -> usize {
    STEPS.len()
}

pub fn step(index: usize) -> Option<&'static StepSchema> {
    STEPS.get(index)
}

/// Look up a field definition by name across all steps
pub fn field(name: &str) -> Option<&'static FieldSchema> {
    STEPS
        .iter()
        .flat_map(|step| step.fields.iter())
        .find(|field| field.name == name)
}

/// Fields that save into a category, in definition order
pub fn category_fields(category: Category) -> impl Iterator<Item = &'static FieldSchema> {
    STEPS
        .iter()
        .filter(move |step| step.category == Some(category))
        .flat_map(|step| step.fields.iter())
}

pub fn summary_label(name: &str) -> &str {
    SUMMARY_LABELS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, label)| *label)
        .unwrap_or(name)
}
