use activitypub_model::{
    Collection, EntityKind, Image, KindDescriptor, Link, Object, RegistryError, TypeRegistry,
};
use pretty_assertions::assert_eq;

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

// ── Global registry ───────────────────────────────────────────────

#[test]
fn global_registry_holds_builtin_kinds_in_order() {
    let registry = TypeRegistry::global();
    assert_eq!(registry.len(), 5);
    assert_eq!(
        registry.kinds().collect::<Vec<_>>(),
        vec![
            EntityKind::Object,
            EntityKind::Link,
            EntityKind::Collection,
            EntityKind::Image,
            EntityKind::Activity,
        ]
    );
}

#[test]
fn global_registry_is_shared() {
    let a = TypeRegistry::global();
    let b = TypeRegistry::global();
    assert!(std::sync::Arc::ptr_eq(&a, &b));
}

#[test]
fn tags_come_from_fresh_instances() {
    let registry = TypeRegistry::global();
    for kind in EntityKind::ALL {
        let expected: Vec<String> = kind.default_types().iter().map(|t| t.to_string()).collect();
        assert_eq!(registry.tags_for(kind), Some(expected.as_slice()), "{kind}");
    }
}

// ── Building ──────────────────────────────────────────────────────

#[test]
fn duplicate_kind_is_rejected() {
    let err = TypeRegistry::register_all([
        KindDescriptor::of::<Object>(),
        KindDescriptor::of::<Link>(),
        KindDescriptor::of::<Object>(),
    ])
    .unwrap_err();
    assert_eq!(err, RegistryError::DuplicateKind(EntityKind::Object));
}

#[test]
fn empty_registry_resolves_nothing() {
    let registry = TypeRegistry::register_all(Vec::<KindDescriptor>::new()).unwrap();
    assert!(registry.is_empty());
    assert!(registry.resolve(&tags(&["Object"])).is_none());
    assert!(!registry.contains(EntityKind::Object));
}

#[test]
fn subset_registry_knows_only_its_kinds() {
    let registry =
        TypeRegistry::register_all([KindDescriptor::of::<Link>(), KindDescriptor::of::<Image>()])
            .unwrap();
    assert!(registry.contains(EntityKind::Image));
    assert!(!registry.contains(EntityKind::Collection));
    assert_eq!(registry.tags_for(EntityKind::Collection), None);
}

// ── Resolution ────────────────────────────────────────────────────

#[test]
fn resolve_picks_the_matching_kind() {
    let registry = TypeRegistry::global();
    let resolved = registry.resolve(&tags(&["Collection"])).unwrap();
    assert_eq!(resolved.kind(), EntityKind::Collection);
}

#[test]
fn resolve_returns_none_for_unknown_tags() {
    let registry = TypeRegistry::global();
    assert!(registry.resolve(&tags(&["Note", "Person"])).is_none());
    assert!(registry.resolve(&[]).is_none());
}

#[test]
fn last_registered_match_wins() {
    let registry = TypeRegistry::global();
    let resolved = registry.resolve(&tags(&["Image", "Collection"])).unwrap();
    assert_eq!(resolved.kind(), EntityKind::Image);

    let reversed = TypeRegistry::register_all([
        KindDescriptor::of::<Image>(),
        KindDescriptor::of::<Collection>(),
    ])
    .unwrap();
    let resolved = reversed.resolve(&tags(&["Image", "Collection"])).unwrap();
    assert_eq!(resolved.kind(), EntityKind::Collection);
}

// ── Descriptors ───────────────────────────────────────────────────

#[test]
fn descriptor_instantiates_its_kind() {
    for descriptor in TypeRegistry::builtin_kinds() {
        assert_eq!(descriptor.instantiate().kind(), descriptor.kind());
    }
}

#[test]
fn descriptor_decodes_without_dispatch() {
    let descriptor = KindDescriptor::of::<Image>();
    let entity = descriptor.decode(r#"{"type": "Collection"}"#).unwrap();
    assert_eq!(entity.kind(), EntityKind::Image);
    assert_eq!(entity.types(), &["Collection".to_string()]);

    assert!(descriptor.decode("[]").is_err());
}
