//! Tests for type descriptors and the resolver port's default method

use std::sync::Arc;

use cfgdi_domain::{
    ContractCast, ErasedService, Error, Result, ServiceKey, ServiceResolver, TypeCategory,
    TypeDescriptor, TypeResolver,
};

trait Shape: Send + Sync {
    fn sides(&self) -> u32;
}

struct Square;

impl Shape for Square {
    fn sides(&self) -> u32 {
        4
    }
}

fn construct_square(_: &dyn ServiceResolver) -> Result<ErasedService> {
    Ok(ErasedService::new(Arc::new(Square)))
}

static SQUARE: TypeDescriptor = TypeDescriptor::implementation(
    "Square",
    "A square",
    ServiceKey::of::<Square>,
    construct_square,
    SQUARE_CONTRACTS,
);

const SQUARE_CONTRACTS: &[ContractCast] = &[ContractCast {
    contract: ServiceKey::of::<dyn Shape>,
    cast: |service| {
        service
            .downcast::<Square>()
            .map(|square| ErasedService::new::<dyn Shape>(square))
    },
}];

static SHAPE: TypeDescriptor =
    TypeDescriptor::contract("Shape", "Anything with sides", ServiceKey::of::<dyn Shape>);

struct Universe;

impl TypeResolver for Universe {
    fn find(&self, name: &str) -> Option<TypeDescriptor> {
        [SQUARE, SHAPE].into_iter().find(|d| d.matches(name))
    }

    fn known_types(&self) -> Vec<TypeDescriptor> {
        vec![SQUARE, SHAPE]
    }
}

#[test]
fn test_matches_registered_name_and_type_path() {
    assert!(SQUARE.matches("Square"));
    assert!(SQUARE.matches(std::any::type_name::<Square>()));
    assert!(!SQUARE.matches("Circle"));
    assert_eq!(SQUARE.category(), TypeCategory::Implementation);
    assert_eq!(SHAPE.category(), TypeCategory::Contract);
}

#[test]
fn test_cast_to_declared_contract() {
    let cast = SQUARE
        .cast_to(ServiceKey::of::<dyn Shape>())
        .expect("Square provides Shape");
    let erased = ErasedService::new(Arc::new(Square));
    let shape = cast(erased)
        .and_then(|s| s.downcast::<dyn Shape>())
        .expect("cast succeeds");
    assert_eq!(shape.sides(), 4);

    assert!(SQUARE.cast_to(ServiceKey::of::<Square>()).is_none());
    assert!(SHAPE.cast_to(ServiceKey::of::<dyn Shape>()).is_none());
}

#[test]
fn test_resolve_checks_category() {
    let universe = Universe;
    assert!(universe.resolve("Square", TypeCategory::Implementation).is_ok());

    let err = universe
        .resolve("Shape", TypeCategory::Implementation)
        .unwrap_err();
    assert!(matches!(err, Error::TypeResolution { ref reason, .. } if reason.contains("contract")));

    let err = universe.resolve("Circle", TypeCategory::Contract).unwrap_err();
    assert!(matches!(err, Error::TypeResolution { ref name, .. } if name == "Circle"));
}

#[test]
fn test_resolve_is_idempotent() {
    let universe = Universe;
    let a = universe.resolve("Square", TypeCategory::Implementation).unwrap();
    let b = universe.resolve("Square", TypeCategory::Implementation).unwrap();
    assert_eq!(a.key(), b.key());
    assert_eq!(a.name(), b.name());
}
