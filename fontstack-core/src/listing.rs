//! Read-only listing of definitions grouped by type, for administration
//! views. Definitions are code-defined; nothing here mutates.

use serde::Serialize;

use crate::definition::{FontPreview, FontType};
use crate::registry::FontRegistry;

/// All definitions of one type, in registry (label) order.
#[derive(Debug, Clone, Serialize)]
pub struct FontGroup {
    #[serde(rename = "type")]
    pub font_type: FontType,
    pub label: &'static str,
    pub entries: Vec<FontEntrySummary>,
}

/// One row in a listing.
#[derive(Debug, Clone, Serialize)]
pub struct FontEntrySummary {
    pub id: String,
    pub label: String,
    /// Full class selector, `.font-<selector>`.
    pub selector: String,
    pub property_value: String,
    pub preview: FontPreview,
}

/// Group every definition by type, skipping types with no entries.
/// Groups follow the supported-types order; entries keep registry order.
pub fn listing(registry: &FontRegistry) -> Vec<FontGroup> {
    FontType::ALL
        .into_iter()
        .filter_map(|font_type| {
            let entries: Vec<FontEntrySummary> = registry
                .by_type(font_type)
                .map(|definition| FontEntrySummary {
                    id: definition.id.clone(),
                    label: definition.label.clone(),
                    selector: format!(".font-{}", definition.selector),
                    property_value: definition.css_property_value(),
                    preview: definition.preview(),
                })
                .collect();

            if entries.is_empty() {
                None
            } else {
                Some(FontGroup {
                    font_type,
                    label: font_type.label(),
                    entries,
                })
            }
        })
        .collect()
}
