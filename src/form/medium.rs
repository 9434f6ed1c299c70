//! Contact medium exclusivity.
//!
//! The "how did you hear about us" answer is one of four alternatives, each
//! with its own payload input. `MediumSelector` owns the only copy of that
//! answer, so at most one alternative can hold a value at any time.

/// Radio group that reveals one alternative's input section
pub const MEDIUM_FIELD: &str = "medioPrincipal";
/// Radio group mirroring the active alternative
pub const MEDIUM_VISUAL_FIELD: &str = "medioPrincipalVisual";

/// The four alternatives, in save priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediumKind {
    Evento,
    Invitacion,
    Redes,
    Otro,
}

impl MediumKind {
    /// All alternatives; the order is the first-match priority used when
    /// several payloads are populated
    pub fn all() -> &'static [MediumKind] {
        &[
            MediumKind::Evento,
            MediumKind::Invitacion,
            MediumKind::Redes,
            MediumKind::Otro,
        ]
    }

    /// Tag saved as `medioPrincipal`
    pub fn tag(&self) -> &'static str {
        match self {
            MediumKind::Evento => "Evento",
            MediumKind::Invitacion => "Invitacion",
            MediumKind::Redes => "Redes",
            MediumKind::Otro => "Otro",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::all().iter().copied().find(|kind| kind.tag() == tag)
    }

    /// Name of the input carrying this alternative's payload
    pub fn payload_field(&self) -> &'static str {
        match self {
            MediumKind::Evento => "nombreEvento",
            MediumKind::Invitacion => "quienInvito",
            MediumKind::Redes => "redSocial",
            MediumKind::Otro => "otroTexto",
        }
    }

    pub fn from_payload_field(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.payload_field() == name)
    }
}

/// A populated contact medium with its payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactMedium {
    Evento(String),
    Invitacion(String),
    Redes(String),
    Otro(String),
}

impl ContactMedium {
    pub fn new(kind: MediumKind, payload: impl Into<String>) -> Self {
        let payload = payload.into();
        match kind {
            MediumKind::Evento => ContactMedium::Evento(payload),
            MediumKind::Invitacion => ContactMedium::Invitacion(payload),
            MediumKind::Redes => ContactMedium::Redes(payload),
            MediumKind::Otro => ContactMedium::Otro(payload),
        }
    }

    pub fn kind(&self) -> MediumKind {
        match self {
            ContactMedium::Evento(_) => MediumKind::Evento,
            ContactMedium::Invitacion(_) => MediumKind::Invitacion,
            ContactMedium::Redes(_) => MediumKind::Redes,
            ContactMedium::Otro(_) => MediumKind::Otro,
        }
    }

    pub fn payload(&self) -> &str {
        match self {
            ContactMedium::Evento(p)
            | ContactMedium::Invitacion(p)
            | ContactMedium::Redes(p)
            | ContactMedium::Otro(p) => p,
        }
    }

    /// Pick the medium from raw payload values.
    ///
    /// First match wins in `MediumKind::all()` order: event name, inviter,
    /// social network, free text. Payloads are trimmed; blank ones are
    /// skipped.
    pub fn resolve<'a>(lookup: impl Fn(&str) -> Option<&'a str>) -> Option<Self> {
        MediumKind::all().iter().find_map(|kind| {
            let value = lookup(kind.payload_field())?.trim();
            (!value.is_empty()).then(|| ContactMedium::new(*kind, value))
        })
    }
}

/// Exclusive state of the contact medium inputs.
///
/// Disabled and hidden flags are derived from `active` and `revealed`; no
/// other copy of the payloads exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediumSelector {
    active: Option<ContactMedium>,
    revealed: Option<MediumKind>,
}

impl MediumSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&ContactMedium> {
        self.active.as_ref()
    }

    /// Section currently shown
    pub fn revealed(&self) -> Option<MediumKind> {
        self.revealed
    }

    /// Replace the active medium, clearing every other alternative.
    ///
    /// A populated medium also becomes the only revealed section; clearing
    /// re-enables all alternatives without re-showing them.
    pub fn set(&mut self, medium: Option<ContactMedium>) {
        if let Some(ref medium) = medium {
            self.revealed = Some(medium.kind());
        }
        self.active = medium;
    }

    /// Typing into (or selecting in) one alternative's input.
    ///
    /// Returns false when the input is disabled because another alternative
    /// holds a value.
    pub fn on_input(&mut self, kind: MediumKind, value: &str) -> bool {
        if !self.is_enabled(kind) {
            tracing::debug!(medium = kind.tag(), "input ignored, medium disabled");
            return false;
        }
        // A whitespace-only payload counts as cleared, so it is not kept
        if value.trim().is_empty() {
            self.set(None);
        } else {
            self.set(Some(ContactMedium::new(kind, value)));
        }
        true
    }

    /// The `medioPrincipal` radio: show only `kind`'s section and clear all
    /// payloads
    pub fn choose(&mut self, kind: MediumKind) {
        self.active = None;
        self.revealed = Some(kind);
    }

    /// The display mirror radio. Choosing "Redes" drops a stale social
    /// network selection; other choices change nothing.
    pub fn choose_visual(&mut self, kind: MediumKind) {
        if kind == MediumKind::Redes && matches!(self.active, Some(ContactMedium::Redes(_))) {
            self.active = None;
        }
    }

    /// Current value of an alternative's input
    pub fn value(&self, kind: MediumKind) -> &str {
        match self.active {
            Some(ref medium) if medium.kind() == kind => medium.payload(),
            _ => "",
        }
    }

    pub fn is_enabled(&self, kind: MediumKind) -> bool {
        self.active
            .as_ref()
            .map_or(true, |medium| medium.kind() == kind)
    }

    pub fn is_hidden(&self, kind: MediumKind) -> bool {
        self.revealed != Some(kind)
    }

    /// Option checked in the mirror radio
    pub fn visual(&self) -> Option<MediumKind> {
        self.active.as_ref().map(ContactMedium::kind)
    }

    pub fn clear(&mut self) {
        self.active = None;
        self.revealed = None;
    }
}
