//! Font definition model and the CSS values derived from it.

use serde::{Deserialize, Serialize};

/// Weights rendered in a font preview, one sample span per weight.
pub const PREVIEW_WEIGHTS: [u16; 10] = [100, 200, 300, 400, 500, 600, 700, 800, 900, 1000];

/// Supported font definition kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontType {
    /// Font files shipped by a provider and served from its public path.
    Local,
    /// Google-hosted font loaded through the css2 endpoint.
    Google,
    /// A bare generic family keyword (`sans`, `serif`, ...).
    Generic,
}

impl FontType {
    pub const ALL: [FontType; 3] = [FontType::Local, FontType::Google, FontType::Generic];

    pub fn parse(raw: &str) -> Option<FontType> {
        match raw {
            "local" => Some(FontType::Local),
            "google" => Some(FontType::Google),
            "generic" => Some(FontType::Generic),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FontType::Local => "local",
            FontType::Google => "google",
            FontType::Generic => "generic",
        }
    }

    /// Display label for listings and forms.
    pub fn label(self) -> &'static str {
        match self {
            FontType::Local => "Local",
            FontType::Google => "Google",
            FontType::Generic => "Generic",
        }
    }
}

/// One raw font face as written in a definition file, pre-validation.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFontFace {
    /// Path to the font file, relative to the provider root.
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub format: String,
    #[serde(default, deserialize_with = "stringy")]
    pub weight: String,
    #[serde(default)]
    pub style: String,
    /// font-display value.
    #[serde(default = "default_swap")]
    pub swap: String,
    /// unicode-range value.
    #[serde(default)]
    pub unicode: String,
}

impl Default for RawFontFace {
    fn default() -> Self {
        RawFontFace {
            src: String::new(),
            format: String::new(),
            weight: String::new(),
            style: String::new(),
            swap: default_swap(),
            unicode: String::new(),
        }
    }
}

/// One raw definition as written in a definition file, pre-validation.
///
/// Keys are loose on purpose: validation and defaulting happen in the
/// registry so that every failure carries the definition id.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFontDefinition {
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type", default)]
    pub font_type: String,
    #[serde(default)]
    pub family: String,
    /// Generic fallback keyword, or another definition's id. An empty
    /// string suppresses the fallback entirely.
    #[serde(default = "default_generic")]
    pub generic: String,
    #[serde(default)]
    pub selector: String,
    #[serde(default)]
    pub faces: Vec<RawFontFace>,
    /// Google variant suffix appended after the family name.
    #[serde(default, deserialize_with = "stringy")]
    pub spec: String,
}

impl Default for RawFontDefinition {
    fn default() -> Self {
        RawFontDefinition {
            label: String::new(),
            font_type: String::new(),
            family: String::new(),
            generic: default_generic(),
            selector: String::new(),
            faces: Vec::new(),
            spec: String::new(),
        }
    }
}

fn default_generic() -> String {
    "sans".to_string()
}

fn default_swap() -> String {
    "swap".to_string()
}

/// Accept YAML scalars like `weight: 400` where a string is expected.
fn stringy<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Str(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Str(s) => s,
        Scalar::Int(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
    })
}

/// A validated font face with its source resolved to a public URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontFace {
    pub src: String,
    pub format: Option<String>,
    pub weight: Option<String>,
    pub style: Option<String>,
    /// font-display value, `swap` unless overridden.
    pub swap: String,
    pub unicode: Option<String>,
}

/// A validated, immutable font definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontDefinition {
    /// Unique slug derived from the definition key (underscores become
    /// hyphens).
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub font_type: FontType,
    pub family: String,
    /// Generic fallback keyword after one-hop resolution.
    pub generic: Option<String>,
    /// CSS class / variable suffix.
    pub selector: String,
    /// Name of the provider that supplied the definition.
    pub provider: String,
    /// Only populated for `local` definitions.
    pub faces: Vec<FontFace>,
    /// Only populated for `google` definitions.
    pub spec: Option<String>,
}

impl FontDefinition {
    /// The `font-family` property value: `'<family>'[, <generic>]`.
    ///
    /// The family is treated as `name[:modifiers]` and truncated at the
    /// first `:` so Google variant suffixes never leak into CSS.
    pub fn css_property_value(&self) -> String {
        let mut values = Vec::new();
        if !self.family.is_empty() {
            let family = self.family.split(':').next().unwrap_or(&self.family);
            values.push(format!("'{family}'"));
        }
        if let Some(generic) = &self.generic {
            values.push(generic.clone());
        }
        values.join(", ")
    }

    /// One `@font-face` rule per face, in declaration order.
    pub fn font_face_rules(&self) -> Vec<FontFaceRule> {
        self.faces
            .iter()
            .map(|face| {
                let src = match &face.format {
                    Some(format) => format!("url('{}') format(\"{format}\")", face.src),
                    None => format!("url('{}')", face.src),
                };
                FontFaceRule {
                    font_family: format!("'{}'", self.family),
                    src,
                    font_weight: face.weight.clone(),
                    font_style: face.style.clone(),
                    font_display: face.swap.clone(),
                    unicode_range: face.unicode.clone(),
                }
            })
            .collect()
    }

    /// Sample markup rendered once per preview weight, classed with the
    /// definition's selector. Opaque to the core; the host renders it.
    pub fn preview(&self) -> FontPreview {
        let mut text =
            String::from("The <em>brown fox</em> jumped over the <strong>orange cow</strong>.");
        for weight in PREVIEW_WEIGHTS {
            text.push_str(&format!(
                " <span style=\"font-weight:{weight};\">{weight}</span>"
            ));
        }
        FontPreview {
            class: format!("font-{}", self.selector),
            html: format!("<div>{text}</div>"),
        }
    }
}

/// A single `@font-face` descriptor set.
///
/// Serializes with CSS property names as keys, omitting absent
/// properties, in the order font-family, src, font-weight, font-style,
/// font-display, unicode-range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontFaceRule {
    #[serde(rename = "font-family")]
    pub font_family: String,
    pub src: String,
    #[serde(rename = "font-weight", default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(rename = "font-style", default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
    #[serde(rename = "font-display")]
    pub font_display: String,
    #[serde(rename = "unicode-range", default, skip_serializing_if = "Option::is_none")]
    pub unicode_range: Option<String>,
}

impl FontFaceRule {
    /// Present properties in declaration order.
    pub fn properties(&self) -> Vec<(&'static str, &str)> {
        let mut props: Vec<(&'static str, &str)> = vec![
            ("font-family", &self.font_family),
            ("src", &self.src),
        ];
        if let Some(weight) = &self.font_weight {
            props.push(("font-weight", weight));
        }
        if let Some(style) = &self.font_style {
            props.push(("font-style", style));
        }
        props.push(("font-display", &self.font_display));
        if let Some(range) = &self.unicode_range {
            props.push(("unicode-range", range));
        }
        props
    }

    /// Render a raw `@font-face` block.
    pub fn to_css(&self) -> String {
        let mut css = String::from("@font-face {\n");
        for (property, value) in self.properties() {
            css.push_str(&format!("  {property}: {value};\n"));
        }
        css.push_str("}\n");
        css
    }
}

/// Preview payload for one definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontPreview {
    /// CSS class applied to the sample, `font-<selector>`.
    pub class: String,
    pub html: String,
}
