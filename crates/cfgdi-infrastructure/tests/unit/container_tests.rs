//! Service container tests

use std::sync::Arc;
use std::thread;

use cfgdi_domain::{Error, Lifetime, ServiceKey, ServiceRegistry, ServiceResolver, ServiceResolverExt};
use cfgdi_infrastructure::ServiceCollection;

use crate::test_utils::{Greeter, PlainGreeter, Tracked};

#[test]
fn test_singleton_is_shared_across_scopes() {
    let mut services = ServiceCollection::new();
    services.add_singleton::<Tracked>();
    let provider = services.build();

    let a = provider.resolve::<Tracked>().unwrap();
    let b = provider.create_scope().resolve::<Tracked>().unwrap();
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn test_scoped_is_shared_within_a_scope_only() {
    let mut services = ServiceCollection::new();
    services.add_scoped::<Tracked>();
    let provider = services.build();

    let scope = provider.create_scope();
    let a = scope.resolve::<Tracked>().unwrap();
    let b = scope.resolve::<Tracked>().unwrap();
    let other = provider.create_scope().resolve::<Tracked>().unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert!(!Arc::ptr_eq(&a, &other));

    // The root provider acts as its own scope
    let root_a = provider.resolve::<Tracked>().unwrap();
    let root_b = provider.resolve::<Tracked>().unwrap();
    assert!(Arc::ptr_eq(&root_a, &root_b));
    assert!(!Arc::ptr_eq(&root_a, &a));
}

#[test]
fn test_transient_is_built_every_time() {
    let mut services = ServiceCollection::new();
    services.add_transient::<Tracked>();
    let provider = services.build();

    let a = provider.resolve::<Tracked>().unwrap();
    let b = provider.resolve::<Tracked>().unwrap();
    assert_ne!(a.serial, b.serial);
}

#[test]
fn test_trait_object_factory() {
    let mut services = ServiceCollection::new();
    services.add_factory::<dyn Greeter, _>(Lifetime::Singleton, |_| {
        Ok(Arc::new(PlainGreeter) as Arc<dyn Greeter>)
    });
    let provider = services.build();

    assert_eq!(provider.resolve::<dyn Greeter>().unwrap().greet(), "Hello, World!");
}

#[test]
fn test_instances_and_last_registration_wins() {
    let mut services = ServiceCollection::new();
    services.add_instance(Arc::new(String::from("first")));
    services.add_instance(Arc::new(String::from("second")));
    assert_eq!(services.len(), 1);

    services.add_transient::<Tracked>();
    services.add_instance(Arc::new(Tracked { serial: 999 }));
    let provider = services.build();

    assert_eq!(*provider.resolve::<String>().unwrap(), "second");
    assert_eq!(provider.resolve::<Tracked>().unwrap().serial, 999);
}

#[test]
fn test_binding_replaces_instance() {
    let mut services = ServiceCollection::new();
    services.add_instance(Arc::new(Tracked { serial: 999 }));
    services.add_singleton::<Tracked>();
    let provider = services.build();

    assert_ne!(provider.resolve::<Tracked>().unwrap().serial, 999);
}

#[test]
fn test_unregistered_service() {
    let provider = ServiceCollection::new().build();

    let err = provider.resolve::<Tracked>().unwrap_err();
    assert!(matches!(err, Error::ServiceNotRegistered { .. }));
    assert!(provider.try_resolve::<Tracked>().unwrap().is_none());
    assert!(!provider.contains(ServiceKey::of::<Tracked>()));
}

#[test]
fn test_registry_port_writes() {
    let mut services = ServiceCollection::new();
    let registry: &mut dyn ServiceRegistry = &mut services;
    registry.add_singleton_instance(cfgdi_domain::ErasedService::new(Arc::new(7_u32)));

    let provider = services.build();
    assert_eq!(*provider.resolve::<u32>().unwrap(), 7);
}

#[test]
fn test_concurrent_singleton_resolution_builds_once() {
    let mut services = ServiceCollection::new();
    services.add_singleton::<Tracked>();
    let provider = services.build();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let provider = provider.clone();
            thread::spawn(move || provider.resolve::<Tracked>().unwrap())
        })
        .collect();
    let instances: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert!(instances.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
}
