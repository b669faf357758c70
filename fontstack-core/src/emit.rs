//! Build-pipeline and inline-CSS emission.
//!
//! Pure functions the host pipeline calls with the registry and the
//! active slot bindings. Nothing here registers itself anywhere; the
//! host decides when to emit and where the output goes.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::definition::FontFaceRule;
use crate::registry::FontRegistry;
use crate::settings::SlotBindings;

/// Cache-invalidation tag tied to the settings configuration. Attached
/// to inline output so the host drops it when bindings change.
pub const SETTINGS_CACHE_TAG: &str = "config:fontstack.settings";

/// A `fontFamily` entry in the build config: either a concrete font
/// stack or a reference to a slot variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FontFamilyValue {
    Stack(Vec<String>),
    Var(String),
}

/// Everything the font registry contributes to the external build
/// config: theme font-family entries plus `@font-face` descriptors.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ThemePatch {
    #[serde(rename = "fontFamily")]
    pub font_family: BTreeMap<String, FontFamilyValue>,
    #[serde(rename = "@font-face")]
    pub font_faces: Vec<FontFaceRule>,
}

impl ThemePatch {
    /// The patch in the `theme` / `base` shape the build pipeline merges
    /// into its own config.
    pub fn to_config_value(&self) -> serde_json::Value {
        serde_json::json!({
            "theme": { "fontFamily": self.font_family },
            "base": { "@font-face": self.font_faces },
        })
    }
}

/// Inline CSS emitted ahead of a full build so fonts apply immediately.
#[derive(Debug, Clone, Serialize)]
pub struct InlineCss {
    pub css: String,
    pub cache_tags: Vec<String>,
}

/// Build the config contribution for every definition: a font stack per
/// selector, a `var(--font-<slot>-family)` entry per bound slot, and all
/// `@font-face` descriptors.
pub fn theme_patch(registry: &FontRegistry, bindings: &SlotBindings) -> ThemePatch {
    let mut patch = ThemePatch::default();

    for definition in registry.definitions() {
        let stack: Vec<String> = definition
            .css_property_value()
            .split(", ")
            .map(str::to_string)
            .collect();
        patch
            .font_family
            .insert(definition.selector.clone(), FontFamilyValue::Stack(stack));

        for slot in bindings.slots_for(&definition.id) {
            patch.font_family.insert(
                slot.as_str().to_string(),
                FontFamilyValue::Var(format!("var({})", slot.css_variable())),
            );
        }

        patch.font_faces.extend(definition.font_face_rules());
    }

    patch
}

/// Emit CSS directly: slot custom properties on `:root`, a
/// `.font-<selector>` rule per definition, and raw `@font-face` blocks.
pub fn inline_css(registry: &FontRegistry, bindings: &SlotBindings) -> InlineCss {
    let mut variables = Vec::new();
    let mut rules = String::new();

    for definition in registry.definitions() {
        let value = definition.css_property_value();

        for slot in bindings.slots_for(&definition.id) {
            variables.push(format!("  {}: {value};\n", slot.css_variable()));
        }

        rules.push_str(&format!(
            ".font-{} {{ font-family: {value}; }}\n",
            definition.selector
        ));
        for rule in definition.font_face_rules() {
            rules.push_str(&rule.to_css());
        }
    }

    let mut css = String::new();
    if !variables.is_empty() {
        css.push_str(":root {\n");
        for variable in variables {
            css.push_str(&variable);
        }
        css.push_str("}\n");
    }
    css.push_str(&rules);

    InlineCss {
        css,
        cache_tags: vec![SETTINGS_CACHE_TAG.to_string()],
    }
}
