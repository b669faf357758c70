//! The font registry: discovery, validation, resolution, ordering.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::iter::Peekable;
use std::str::Chars;

use log::info;

use crate::definition::{FontDefinition, FontFace, FontType, RawFontFace};
use crate::discovery::{DefinitionDiscovery, DiscoveredDefinition, Provider};
use crate::error::{FontError, Result};
use crate::settings::Slot;

const GOOGLE_FONTS_ENDPOINT: &str = "https://fonts.googleapis.com/css2?";

/// Validated font definitions, sorted by label and cached until
/// [`FontRegistry::reload`].
///
/// The registry is an owned value: hosts construct one per build or
/// request scope and pass it to consumers. There is no global instance;
/// cache invalidation is the host's job and comes down to calling
/// `reload` (or dropping the registry) when source definitions change.
pub struct FontRegistry {
    discovery: Box<dyn DefinitionDiscovery>,
    definitions: Vec<FontDefinition>,
    index: HashMap<String, usize>,
}

impl FontRegistry {
    /// Discover, validate and cache all definitions.
    ///
    /// Any invalid definition aborts the load; no partial registry is
    /// ever produced.
    pub fn load(discovery: impl DefinitionDiscovery + 'static) -> Result<Self> {
        let mut registry = Self {
            discovery: Box::new(discovery),
            definitions: Vec::new(),
            index: HashMap::new(),
        };
        registry.reload()?;
        Ok(registry)
    }

    /// Re-run discovery and validation. On error the previously loaded
    /// definitions are left untouched.
    pub fn reload(&mut self) -> Result<()> {
        let discovered = self.discovery.discover()?;

        let mut definitions = Vec::with_capacity(discovered.len());
        for item in discovered {
            definitions.push(validate(item)?);
        }

        let mut seen = HashSet::with_capacity(definitions.len());
        for definition in &definitions {
            if !seen.insert(definition.id.as_str()) {
                return Err(FontError::validation(
                    &definition.id,
                    "definition `id` is already in use",
                ));
            }
        }

        resolve_generics(&mut definitions);
        definitions.sort_by(|a, b| natcasecmp(&a.label, &b.label));

        let index = definitions
            .iter()
            .enumerate()
            .map(|(i, d)| (d.id.clone(), i))
            .collect();

        info!("font registry loaded {} definitions", definitions.len());
        self.definitions = definitions;
        self.index = index;
        Ok(())
    }

    /// All definitions, sorted by label (natural, case-insensitive).
    pub fn definitions(&self) -> &[FontDefinition] {
        &self.definitions
    }

    pub fn get(&self, id: &str) -> Result<&FontDefinition> {
        self.index
            .get(id)
            .map(|&i| &self.definitions[i])
            .ok_or_else(|| FontError::NotFound(id.to_string()))
    }

    pub fn by_type(&self, font_type: FontType) -> impl Iterator<Item = &FontDefinition> {
        self.definitions
            .iter()
            .filter(move |d| d.font_type == font_type)
    }

    /// Supported definition types with display labels.
    pub fn supported_types() -> [(FontType, &'static str); 3] {
        [
            (FontType::Local, FontType::Local.label()),
            (FontType::Google, FontType::Google.label()),
            (FontType::Generic, FontType::Generic.label()),
        ]
    }

    /// Settings slots with display labels.
    pub fn setting_slots() -> [(Slot, &'static str); 5] {
        [
            (Slot::Primary, Slot::Primary.label()),
            (Slot::Secondary, Slot::Secondary.label()),
            (Slot::Accent, Slot::Accent.label()),
            (Slot::Heading, Slot::Heading.label()),
            (Slot::Ui, Slot::Ui.label()),
        ]
    }

    /// Combined css2 URL covering every `google` definition, or `None`
    /// when there are none. The URL is constructed, never fetched.
    pub fn google_fonts_url(&self) -> Option<String> {
        let mut families = Vec::new();
        for definition in self.by_type(FontType::Google) {
            let mut value = definition.family.replace(' ', "+");
            if let Some(spec) = &definition.spec {
                value.push(':');
                value.push_str(spec);
            }
            families.push(format!("family={value}"));
        }

        if families.is_empty() {
            return None;
        }

        Some(format!(
            "{GOOGLE_FONTS_ENDPOINT}{}&display=swap",
            families.join("&")
        ))
    }
}

impl std::fmt::Debug for FontRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontRegistry")
            .field("definitions", &self.definitions)
            .finish_non_exhaustive()
    }
}

/// Apply defaults and validate one discovered definition.
///
/// Checks run in a fixed order so the first failure reported is stable:
/// missing family, missing type, unsupported type, slot-name collision,
/// then local face checks.
fn validate(item: DiscoveredDefinition) -> Result<FontDefinition> {
    let DiscoveredDefinition { key, provider, raw } = item;
    let id = key.replace('_', "-");

    if raw.family.is_empty() {
        return Err(FontError::validation(&id, "definition `family` is required"));
    }
    if raw.font_type.is_empty() {
        return Err(FontError::validation(&id, "definition `type` is required"));
    }
    let font_type = FontType::parse(&raw.font_type).ok_or_else(|| {
        FontError::validation(
            &id,
            format!("definition `type` `{}` is not supported", raw.font_type),
        )
    })?;
    if Slot::parse(&id).is_some() {
        return Err(FontError::validation(
            &id,
            "definition `id` conflicts with a settings slot",
        ));
    }

    let label = if raw.label.is_empty() {
        raw.family.clone()
    } else {
        raw.label
    };
    let selector = if raw.selector.is_empty() {
        id.clone()
    } else {
        raw.selector
    };
    let generic = non_empty(raw.generic);

    let faces = match font_type {
        FontType::Local => resolve_faces(&id, &provider, raw.faces)?,
        _ => Vec::new(),
    };
    let spec = match font_type {
        FontType::Google => non_empty(raw.spec),
        _ => None,
    };

    Ok(FontDefinition {
        id,
        label,
        font_type,
        family: raw.family,
        generic,
        selector,
        provider: provider.name().to_string(),
        faces,
        spec,
    })
}

/// Check every local face source against the provider root and rewrite
/// it to a public URL.
fn resolve_faces(id: &str, provider: &Provider, faces: Vec<RawFontFace>) -> Result<Vec<FontFace>> {
    if faces.is_empty() {
        return Err(FontError::validation(
            id,
            "definition `faces` is required for local fonts",
        ));
    }

    let mut resolved = Vec::with_capacity(faces.len());
    for face in faces {
        if face.src.is_empty() {
            return Err(FontError::validation(id, "definition `faces.*.src` is required"));
        }
        let path = provider.root().join(&face.src);
        if !path.is_file() {
            return Err(FontError::validation(
                id,
                format!("font file `{}` does not exist", path.display()),
            ));
        }
        resolved.push(FontFace {
            src: format!("{}/{}", provider.url_prefix(), face.src),
            format: non_empty(face.format),
            weight: non_empty(face.weight),
            style: non_empty(face.style),
            swap: if face.swap.is_empty() {
                "swap".to_string()
            } else {
                face.swap
            },
            unicode: non_empty(face.unicode),
        });
    }

    Ok(resolved)
}

/// Replace a non-generic definition's `generic` with the generic value
/// of the definition it names. A single dictionary lookup per entry, in
/// insertion order: chains resolve one hop at a time, never recursively.
fn resolve_generics(definitions: &mut [FontDefinition]) {
    for i in 0..definitions.len() {
        if definitions[i].font_type == FontType::Generic {
            continue;
        }
        let target = match &definitions[i].generic {
            Some(generic) => generic.clone(),
            None => continue,
        };
        if let Some(pos) = definitions.iter().position(|d| d.id == target) {
            if pos != i {
                definitions[i].generic = definitions[pos].generic.clone();
            }
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Natural, case-insensitive ordering: digit runs compare numerically,
/// everything else byte-wise after ASCII lowercasing.
fn natcasecmp(a: &str, b: &str) -> Ordering {
    let mut ai = a.chars().peekable();
    let mut bi = b.chars().peekable();

    loop {
        match (ai.peek().copied(), bi.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let na = take_number(&mut ai);
                let nb = take_number(&mut bi);
                match na.cmp(&nb) {
                    Ordering::Equal => {}
                    other => return other,
                }
            }
            (Some(x), Some(y)) => {
                match x.to_ascii_lowercase().cmp(&y.to_ascii_lowercase()) {
                    Ordering::Equal => {
                        ai.next();
                        bi.next();
                    }
                    other => return other,
                }
            }
        }
    }
}

fn take_number(chars: &mut Peekable<Chars>) -> u64 {
    let mut value: u64 = 0;
    while let Some(c) = chars.peek().copied() {
        if !c.is_ascii_digit() {
            break;
        }
        value = value
            .saturating_mul(10)
            .saturating_add(u64::from(c) - u64::from('0'));
        chars.next();
    }
    value
}
