//! fontstack-core: a declarative font registry for site builds.
//!
//! Modules and themes declare fonts in `*.fonts.yml` files under their
//! own directories. The registry discovers those definitions, validates
//! them fail-fast, resolves generic-family indirection, sorts by label
//! and caches the result for the rest of the build. Consumers then
//! derive CSS from entries: `font-family` property values, `@font-face`
//! descriptors, a combined Google Fonts URL, preview markup, and the
//! patches handed to the external CSS/Tailwind pipeline.
//!
//! The registry is an explicitly owned value with a single `reload`
//! entry point; the host framework decides when sources changed. All
//! fonts are developer-authored, so every validation failure is a hard
//! error fixed at the source, never recovered at runtime.
//!
//! ```rust,no_run
//! use fontstack_core::discovery::{Provider, YamlDiscovery};
//! use fontstack_core::emit::{inline_css, theme_patch};
//! use fontstack_core::registry::FontRegistry;
//! use fontstack_core::settings::{Slot, SlotBindings};
//!
//! let discovery = YamlDiscovery::new([
//!     Provider::new("theme", "web/themes/custom/theme"),
//!     Provider::new("base", "web/modules/custom/base"),
//! ]);
//! let registry = FontRegistry::load(discovery)?;
//!
//! let bindings = SlotBindings::new().bind(Slot::Primary, "inter");
//! let patch = theme_patch(&registry, &bindings);
//! let inline = inline_css(&registry, &bindings);
//!
//! if let Some(url) = registry.google_fonts_url() {
//!     println!("<link rel=\"stylesheet\" href=\"{url}\">");
//! }
//! # Ok::<(), fontstack_core::error::FontError>(())
//! ```

pub mod definition;
pub mod discovery;
pub mod emit;
pub mod error;
pub mod listing;
pub mod registry;
pub mod settings;
