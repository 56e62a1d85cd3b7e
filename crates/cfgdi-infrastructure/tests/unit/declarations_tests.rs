//! Declaration reader tests

use cfgdi_domain::Lifetime;
use cfgdi_infrastructure::{ConfigRoot, read_declarations};
use serde_json::json;

#[test]
fn test_missing_section_yields_no_declarations() {
    let root = ConfigRoot::new(json!({"Other": []}));
    assert!(read_declarations(&root, "Services").unwrap().is_empty());

    let root = ConfigRoot::new(json!({"Services": null}));
    assert!(read_declarations(&root, "Services").unwrap().is_empty());
}

#[test]
fn test_section_must_be_a_list() {
    let root = ConfigRoot::new(json!({"Services": {"Implementation": "X"}}));
    assert!(read_declarations(&root, "Services").is_err());
}

#[test]
fn test_reads_every_field() {
    let root = ConfigRoot::new(json!({
        "Services": [
            {
                "Service": "Greeter",
                "Implementation": "ConfiguredGreeter",
                "Lifetime": "Scoped",
                "Options": {
                    "Implementation": "GreeterOptions",
                    "Value": {"Name": "World"}
                }
            },
            {"Implementation": "PlainGreeter"}
        ]
    }));

    let declarations = read_declarations(&root, "Services").unwrap();
    assert_eq!(declarations.len(), 2);

    let first = &declarations[0];
    assert_eq!(first.contract(), Some("Greeter"));
    assert_eq!(first.implementation(), Some("ConfiguredGreeter"));
    assert_eq!(first.lifetime, Lifetime::Scoped);
    let settings = first.settings.as_ref().unwrap();
    assert_eq!(settings.type_name(), Some("GreeterOptions"));
    let subtree = settings.existing_subtree().unwrap();
    assert_eq!(subtree.path(), "Services:0:Options:Value");
    assert_eq!(subtree.value(), Some(json!({"Name": "World"})));

    let second = &declarations[1];
    assert_eq!(second.contract(), None);
    assert_eq!(second.lifetime, Lifetime::Singleton);
    assert!(second.settings.is_none());
}

#[test]
fn test_lowercase_keys_and_lifetimes() {
    let root = ConfigRoot::new(json!({
        "Services": [{"implementation": "PlainGreeter", "lifetime": "transient"}]
    }));

    let declarations = read_declarations(&root, "Services").unwrap();
    assert_eq!(declarations[0].implementation(), Some("PlainGreeter"));
    assert_eq!(declarations[0].lifetime, Lifetime::Transient);
}

#[test]
fn test_options_without_value_have_no_existing_subtree() {
    let root = ConfigRoot::new(json!({
        "Services": [{"Implementation": "PlainGreeter", "Options": {"Implementation": "GreeterOptions"}}]
    }));

    let declarations = read_declarations(&root, "Services").unwrap();
    let settings = declarations[0].settings.as_ref().unwrap();
    assert!(settings.existing_subtree().is_none());
}

#[test]
fn test_subtree_follows_replacements() {
    let root = ConfigRoot::new(json!({
        "Services": [{"Implementation": "X", "Options": {"Value": {"Name": "World"}}}]
    }));
    let declarations = read_declarations(&root, "Services").unwrap();
    let subtree = declarations[0]
        .settings
        .as_ref()
        .and_then(|s| s.config_subtree.clone())
        .unwrap();

    root.replace(json!({
        "Services": [{"Implementation": "X", "Options": {"Value": {"Name": "Mars"}}}]
    }));

    assert_eq!(subtree.value(), Some(json!({"Name": "Mars"})));
}

#[test]
fn test_invalid_lifetime_is_a_configuration_error() {
    let root = ConfigRoot::new(json!({
        "Services": [{"Implementation": "PlainGreeter", "Lifetime": "Forever"}]
    }));

    let err = read_declarations(&root, "Services").unwrap_err();
    assert!(err.to_string().contains("Services[0]"));
}
