use crate::theme::ThemeRegistry;
use crate::*;
use serde_json::json;

#[test]
fn empty_overrides_keep_the_defaults() {
    let overrides = ConfigOverrides::default();
    assert_eq!(overrides.layout_config().unwrap(), LayoutConfig::default());
    let registry = ThemeRegistry::builtin();
    assert_eq!(
        &overrides.theme(&registry, "forest").unwrap(),
        registry.resolve("forest")
    );
}

#[test]
fn assignments_build_nested_overrides() {
    let mut overrides = ConfigOverrides::default();
    overrides.set_assignment("layout.node_width=180").unwrap();
    overrides.set_assignment("theme.colors.line = #123456").unwrap();
    overrides.set_assignment("theme.radius=3.5").unwrap();
    assert_eq!(
        overrides.as_value(),
        &json!({
            "layout": {"node_width": 180},
            "theme": {"colors": {"line": "#123456"}, "radius": 3.5}
        })
    );

    let layout = overrides.layout_config().unwrap();
    assert_eq!(layout.node_width, 180.0);
    assert_eq!(layout.node_height, 44.0);

    let theme = overrides.theme(&ThemeRegistry::builtin(), "paper").unwrap();
    assert_eq!(theme.colors.line, "#123456");
    assert_eq!(theme.colors.stroke, "#000000");
    assert_eq!(theme.radius, 3.5);
}

#[test]
fn malformed_assignments_are_rejected() {
    let mut overrides = ConfigOverrides::default();
    assert!(overrides.set_assignment("layout.node_width").is_err());
    assert!(overrides.set_assignment("layout..node_width=1").is_err());
    assert!(overrides.set_assignment("=1").is_err());
}

#[test]
fn yaml_documents_merge_deeply() {
    let mut overrides = ConfigOverrides::from_yaml_str(
        r##"
layout:
  primary_step: 100
theme:
  colors:
    fill_node: "#FAFAFA"
"##,
    )
    .unwrap();
    overrides.deep_merge(&json!({"layout": {"column_gap": 40}}));

    let layout = overrides.layout_config().unwrap();
    assert_eq!(layout.primary_step, 100.0);
    assert_eq!(layout.column_gap, 40.0);

    let theme = overrides.theme(&ThemeRegistry::builtin(), "dark").unwrap();
    assert_eq!(theme.colors.fill_node, "#FAFAFA");
    assert_eq!(theme.name, "dark");
}

#[test]
fn empty_yaml_document_is_no_override() {
    let overrides = ConfigOverrides::from_yaml_str("").unwrap();
    assert_eq!(overrides, ConfigOverrides::empty_object());
}

#[test]
fn invalid_overrides_are_config_errors() {
    assert!(matches!(
        ConfigOverrides::from_yaml_str("- 1\n- 2\n"),
        Err(Error::InvalidConfig { .. })
    ));

    let overrides = ConfigOverrides::from_value(json!({"layout": {"node_width": "wide"}}));
    assert!(matches!(
        overrides.layout_config(),
        Err(Error::InvalidConfig { .. })
    ));

    let overrides = ConfigOverrides::from_value(json!({"layout": {"lane_top": -5}}));
    let err = overrides.layout_config().unwrap_err();
    assert!(err.to_string().contains("lane_top"), "{err}");

    let overrides = ConfigOverrides::from_value(json!({"theme": "dark"}));
    assert!(
        overrides
            .theme(&ThemeRegistry::builtin(), "paper")
            .is_err()
    );
}

#[test]
fn render_format_parses_names_and_aliases() {
    assert_eq!("svg".parse::<RenderFormat>().unwrap(), RenderFormat::Svg);
    assert_eq!("Mermaid".parse::<RenderFormat>().unwrap(), RenderFormat::Mermaid);
    assert_eq!("mmd".parse::<RenderFormat>().unwrap(), RenderFormat::Mermaid);
    assert!("png".parse::<RenderFormat>().is_err());
    assert_eq!(RenderFormat::Mermaid.extension(), "mmd");
}
