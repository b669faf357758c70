//! Settings slots and the persisted slot -> font bindings.

use serde::{Deserialize, Serialize};

/// Named semantic font roles a site binds to one font id each.
///
/// Slot names are reserved: a font definition may not reuse one as its
/// id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Primary,
    Secondary,
    Accent,
    Heading,
    Ui,
}

impl Slot {
    pub const ALL: [Slot; 5] = [
        Slot::Primary,
        Slot::Secondary,
        Slot::Accent,
        Slot::Heading,
        Slot::Ui,
    ];

    pub fn parse(raw: &str) -> Option<Slot> {
        match raw {
            "primary" => Some(Slot::Primary),
            "secondary" => Some(Slot::Secondary),
            "accent" => Some(Slot::Accent),
            "heading" => Some(Slot::Heading),
            "ui" => Some(Slot::Ui),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Slot::Primary => "primary",
            Slot::Secondary => "secondary",
            Slot::Accent => "accent",
            Slot::Heading => "heading",
            Slot::Ui => "ui",
        }
    }

    /// Display label for listings and forms.
    pub fn label(self) -> &'static str {
        match self {
            Slot::Primary => "Primary",
            Slot::Secondary => "Secondary",
            Slot::Accent => "Accent",
            Slot::Heading => "Heading",
            Slot::Ui => "UI",
        }
    }

    /// The CSS custom property carrying this slot's font-family.
    pub fn css_variable(self) -> String {
        format!("--font-{}-family", self.as_str())
    }
}

/// Persisted `slot -> font id` bindings.
///
/// Storage is owned by the host configuration system; the core only
/// reads the mapping during emission. Unbound slots stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotBindings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui: Option<String>,
}

impl SlotBindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(mut self, slot: Slot, font_id: impl Into<String>) -> Self {
        *self.slot_mut(slot) = Some(font_id.into());
        self
    }

    /// The font id bound to a slot, if any.
    pub fn value(&self, slot: Slot) -> Option<&str> {
        match slot {
            Slot::Primary => self.primary.as_deref(),
            Slot::Secondary => self.secondary.as_deref(),
            Slot::Accent => self.accent.as_deref(),
            Slot::Heading => self.heading.as_deref(),
            Slot::Ui => self.ui.as_deref(),
        }
    }

    /// Slots currently bound to the given font id.
    pub fn slots_for(&self, font_id: &str) -> Vec<Slot> {
        Slot::ALL
            .into_iter()
            .filter(|&slot| self.value(slot) == Some(font_id))
            .collect()
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut Option<String> {
        match slot {
            Slot::Primary => &mut self.primary,
            Slot::Secondary => &mut self.secondary,
            Slot::Accent => &mut self.accent,
            Slot::Heading => &mut self.heading,
            Slot::Ui => &mut self.ui,
        }
    }
}
