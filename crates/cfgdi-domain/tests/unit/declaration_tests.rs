//! Tests for service declarations and lifetimes

use std::sync::Arc;

use cfgdi_domain::{
    ChangeCallback, ConfigNode, Lifetime, ServiceDeclaration, SettingsDeclaration, Subscription,
};
use serde_json::{Value, json};

struct FixedNode(Option<Value>);

impl ConfigNode for FixedNode {
    fn path(&self) -> &str {
        "Services:0:Options:Value"
    }

    fn exists(&self) -> bool {
        self.0.as_ref().is_some_and(|v| !v.is_null())
    }

    fn value(&self) -> Option<Value> {
        self.0.clone()
    }

    fn on_change(&self, _callback: ChangeCallback) -> Subscription {
        Subscription::inert()
    }
}

#[test]
fn test_blank_names_are_absent() {
    let declaration = ServiceDeclaration::new("   ").with_contract("");
    assert_eq!(declaration.implementation(), None);
    assert_eq!(declaration.contract(), None);

    let declaration = ServiceDeclaration::new(" GreetingService ").with_contract("Greeter");
    assert_eq!(declaration.implementation(), Some("GreetingService"));
    assert_eq!(declaration.contract(), Some("Greeter"));
}

#[test]
fn test_default_lifetime_is_singleton() {
    assert_eq!(ServiceDeclaration::default().lifetime, Lifetime::Singleton);
    assert_eq!(Lifetime::default(), Lifetime::Singleton);
}

#[test]
fn test_lifetime_parsing() {
    assert_eq!("Scoped".parse::<Lifetime>().unwrap(), Lifetime::Scoped);
    assert_eq!(" transient ".parse::<Lifetime>().unwrap(), Lifetime::Transient);
    assert!("Forever".parse::<Lifetime>().is_err());

    let parsed: Lifetime = serde_json::from_value(json!("Transient")).unwrap();
    assert_eq!(parsed, Lifetime::Transient);
    let parsed: Lifetime = serde_json::from_value(json!("scoped")).unwrap();
    assert_eq!(parsed, Lifetime::Scoped);
    assert_eq!(Lifetime::Singleton.to_string(), "Singleton");
}

#[test]
fn test_existing_subtree_requires_non_null_value() {
    let present = SettingsDeclaration::new("Opts", Arc::new(FixedNode(Some(json!({})))));
    assert!(present.existing_subtree().is_some());

    let null = SettingsDeclaration::new("Opts", Arc::new(FixedNode(Some(Value::Null))));
    assert!(null.existing_subtree().is_none());

    let missing = SettingsDeclaration::new("Opts", Arc::new(FixedNode(None)));
    assert!(missing.existing_subtree().is_none());

    let no_subtree = SettingsDeclaration {
        settings_type_name: Some("Opts".to_string()),
        config_subtree: None,
    };
    assert!(no_subtree.existing_subtree().is_none());
    assert_eq!(no_subtree.type_name(), Some("Opts"));
}
