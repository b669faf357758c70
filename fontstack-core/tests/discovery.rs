use std::fs;
use std::path::Path;

use fontstack_core::discovery::{DefinitionDiscovery, Provider, YamlDiscovery};
use fontstack_core::error::FontError;
use fontstack_core::registry::FontRegistry;

fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("mkdir");
    }
    fs::write(path, contents).expect("write");
}

const INTER_YML: &str = "\
inter:
  label: Inter
  type: local
  family: Inter
  faces:
    - src: fonts/Inter.woff2
      format: woff2
      weight: 100 900
";

#[test]
fn discovers_definition_files_recursively() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();

    write(&root.join("theme.fonts.yml"), INTER_YML);
    write(
        &root.join("nested/extra.fonts.yml"),
        "lora:\n  type: google\n  family: Lora\n",
    );
    write(&root.join("fonts/Inter.woff2"), "");

    let discovery = YamlDiscovery::new([Provider::new("theme", root)]);
    let discovered = discovery.discover().expect("discover");

    let keys: Vec<&str> = discovered.iter().map(|d| d.key.as_str()).collect();
    assert!(keys.contains(&"inter"));
    assert!(keys.contains(&"lora"));
}

#[test]
fn local_faces_resolve_to_public_urls() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();

    write(&root.join("theme.fonts.yml"), INTER_YML);
    write(&root.join("fonts/Inter.woff2"), "");

    let discovery = YamlDiscovery::new([Provider::new("theme", root)]);
    let registry = FontRegistry::load(discovery).expect("load");
    let definition = registry.get("inter").expect("get");

    assert_eq!(definition.faces.len(), 1);
    assert_eq!(definition.faces[0].src, "/theme/fonts/Inter.woff2");
    assert_eq!(definition.faces[0].format.as_deref(), Some("woff2"));
    assert_eq!(definition.faces[0].weight.as_deref(), Some("100 900"));
    assert_eq!(definition.faces[0].swap, "swap");
}

#[test]
fn provider_base_url_overrides_the_default_prefix() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();

    write(&root.join("theme.fonts.yml"), INTER_YML);
    write(&root.join("fonts/Inter.woff2"), "");

    let provider = Provider::new("theme", root).base_url("/themes/custom/theme/");
    let registry = FontRegistry::load(YamlDiscovery::new([provider])).expect("load");

    assert_eq!(
        registry.get("inter").expect("get").faces[0].src,
        "/themes/custom/theme/fonts/Inter.woff2"
    );
}

#[test]
fn missing_font_file_fails_the_whole_load() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();

    // Valid google definition next to a local one whose file is absent:
    // nothing must load.
    write(
        &root.join("theme.fonts.yml"),
        "lora:\n  type: google\n  family: Lora\n",
    );
    write(&root.join("broken.fonts.yml"), INTER_YML);

    let discovery = YamlDiscovery::new([Provider::new("theme", root)]);
    let err = FontRegistry::load(discovery).expect_err("load must fail");

    match err {
        FontError::Validation { id, reason } => {
            assert_eq!(id, "inter");
            assert!(reason.contains("does not exist"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn local_definition_without_faces_fails_the_load() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();

    write(
        &root.join("theme.fonts.yml"),
        "inter:\n  type: local\n  family: Inter\n",
    );

    let discovery = YamlDiscovery::new([Provider::new("theme", root)]);
    let err = FontRegistry::load(discovery).expect_err("load must fail");

    match err {
        FontError::Validation { reason, .. } => assert!(reason.contains("`faces`")),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn invalid_yaml_is_a_parse_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();

    write(&root.join("theme.fonts.yml"), "inter: [not: a mapping");

    let discovery = YamlDiscovery::new([Provider::new("theme", root)]);
    let err = FontRegistry::load(discovery).expect_err("load must fail");

    assert!(matches!(err, FontError::Parse { .. }));
}

#[test]
fn missing_provider_root_is_an_io_error() {
    let discovery = YamlDiscovery::new([Provider::new("theme", "/nonexistent/fontstack-theme")]);
    let err = FontRegistry::load(discovery).expect_err("load must fail");

    assert!(matches!(err, FontError::Io { .. }));
}

#[test]
fn reload_picks_up_new_definitions() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();

    write(
        &root.join("theme.fonts.yml"),
        "lora:\n  type: google\n  family: Lora\n",
    );

    let discovery = YamlDiscovery::new([Provider::new("theme", root)]);
    let mut registry = FontRegistry::load(discovery).expect("load");
    assert_eq!(registry.definitions().len(), 1);

    write(
        &root.join("extra.fonts.yml"),
        "open_sans:\n  type: google\n  family: Open Sans\n",
    );
    registry.reload().expect("reload");

    assert_eq!(registry.definitions().len(), 2);
    assert!(registry.get("open-sans").is_ok());
}

#[test]
fn failed_reload_keeps_the_previous_registry() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();

    write(
        &root.join("theme.fonts.yml"),
        "lora:\n  type: google\n  family: Lora\n",
    );

    let discovery = YamlDiscovery::new([Provider::new("theme", root)]);
    let mut registry = FontRegistry::load(discovery).expect("load");

    // A definition that cannot validate must not wipe the cache.
    write(&root.join("broken.fonts.yml"), "inter:\n  type: local\n");
    registry.reload().expect_err("reload must fail");

    assert_eq!(registry.definitions().len(), 1);
    assert!(registry.get("lora").is_ok());
}
