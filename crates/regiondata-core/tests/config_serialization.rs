use regiondata_core::{DatasetKind, GeneratorConfig, TargetRule, TextEncoding, validate_config};
use schemars::schema_for;

#[test]
fn default_config_roundtrip_toml() {
    let config = GeneratorConfig::default();
    let encoded = toml::to_string_pretty(&config).expect("serialize toml");
    let decoded: GeneratorConfig = toml::from_str(&encoded).expect("deserialize toml");

    assert_eq!(config, decoded);
    validate_config(&decoded).expect("default config is valid");
}

#[test]
fn default_config_roundtrip_json() {
    let config = GeneratorConfig::default();
    let json = serde_json::to_string(&config).expect("serialize json");
    let decoded: GeneratorConfig = serde_json::from_str(&json).expect("deserialize json");

    assert_eq!(config, decoded);
}

#[test]
fn encodings_use_kebab_case_names() {
    let json = serde_json::to_value(TextEncoding::Utf8Bom).expect("serialize encoding");
    assert_eq!(json, serde_json::Value::String("utf8-bom".to_string()));
}

#[test]
fn target_rules_are_tagged_by_kind() {
    let rule: TargetRule = serde_json::from_value(serde_json::json!({
        "kind": "numbered",
        "template": "la route RP-{n}",
        "min": 1000,
        "max": 9999
    }))
    .expect("parse numbered rule");

    assert_eq!(
        rule,
        TargetRule::Numbered {
            template: "la route RP-{n}".to_string(),
            min: 1000,
            max: 9999,
        }
    );
}

#[test]
fn json_schema_covers_both_datasets() {
    let schema = serde_json::to_value(schema_for!(GeneratorConfig)).expect("serialize schema");
    let properties = schema
        .get("properties")
        .and_then(|value| value.as_object())
        .expect("schema properties");

    for kind in DatasetKind::ALL {
        assert!(properties.contains_key(kind.key()), "missing {kind}");
    }
}
