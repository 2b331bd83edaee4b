use activitypub_model::{
    Collection, EncodeOptions, Entity, EntityKind, EntityType, Image, Link, Object,
    ValidationError, decode_as, decode_entity, encode_entity,
};
use chrono::{DateTime, TimeDelta, Utc};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn encode_value(entity: impl Into<Entity>) -> Value {
    let text = encode_entity(&entity.into(), &EncodeOptions::compact()).unwrap();
    serde_json::from_str(&text).unwrap()
}

fn link(href: &str) -> Entity {
    Entity::link(href)
}

// ── Construction ──────────────────────────────────────────────────

#[test]
fn each_kind_starts_with_its_default_tags() {
    assert_eq!(Object::new().types.as_slice(), &["Object".to_string()]);
    assert_eq!(Link::default().types.as_slice(), &["Link".to_string()]);
    assert_eq!(Collection::new().types.as_slice(), &["Collection".to_string()]);
    assert_eq!(Image::new().types.as_slice(), &["Image".to_string()]);
    for kind in EntityKind::ALL {
        assert!(!kind.default_types().is_empty(), "{kind}");
    }
}

#[test]
fn entity_reports_runtime_kind_and_core() {
    let mut image = Image::new();
    image.id = Some("https://example.com/i".into());
    let entity = Entity::from(image);

    assert_eq!(entity.kind(), EntityKind::Image);
    assert_eq!(entity.default_types(), &["Image"]);
    assert_eq!(entity.id(), Some("https://example.com/i"));
    assert!(entity.as_object().is_some());
    assert!(entity.as_link().is_none());
}

#[test]
fn try_from_round_trips_the_variant() {
    let entity = Entity::from(Collection::with_items([link("a")]));
    let back = Collection::try_from(entity.clone()).unwrap();
    assert_eq!(back.items.len(), 1);

    let not_a_link = Link::try_from(entity.clone()).unwrap_err();
    assert_eq!(not_a_link, entity);
}

#[test]
fn core_accessors_work_through_the_trait() {
    let mut object = Object::new();
    object.core_mut().id = Some("x".into());
    assert_eq!(EntityType::core(&object).id.as_deref(), Some("x"));
    assert_eq!(<Object as EntityType>::KIND, EntityKind::Object);
}

// ── Singular/plural accessors ─────────────────────────────────────

#[test]
fn singular_write_inserts_at_front() {
    let mut object = Object::new();
    object.set_attachment(Some(link("b")));
    object.set_attachment(Some(link("a")));

    assert_eq!(object.attachment(), Some(&link("a")));
    assert_eq!(object.attachments.as_slice(), &[link("a"), link("b")]);
}

#[test]
fn singular_write_none_clears_relation() {
    let mut object = Object::new();
    object.tags.extend([link("a"), link("b")]);
    object.set_tag(None);
    assert!(object.tags.is_empty());
    assert_eq!(object.tag(), None);
}

#[test]
fn every_relation_pair_shares_one_rule() {
    let mut object = Object::new();
    object.set_attribution(Some(link("1")));
    object.set_audience(Some(link("2")));
    object.set_primary_to(Some(link("3")));
    object.set_primary_bto(Some(link("4")));
    object.set_primary_cc(Some(link("5")));
    object.set_primary_bcc(Some(link("6")));
    object.set_generator(Some(link("7")));
    object.set_primary_in_reply_to(Some(link("8")));
    object.set_location(Some(link("9")));
    object.set_url(Some(Link::new("10")));

    assert_eq!(object.attribution(), Some(&link("1")));
    assert_eq!(object.audience(), Some(&link("2")));
    assert_eq!(object.primary_to(), Some(&link("3")));
    assert_eq!(object.primary_bto(), Some(&link("4")));
    assert_eq!(object.primary_cc(), Some(&link("5")));
    assert_eq!(object.primary_bcc(), Some(&link("6")));
    assert_eq!(object.generator(), Some(&link("7")));
    assert_eq!(object.primary_in_reply_to(), Some(&link("8")));
    assert_eq!(object.location(), Some(&link("9")));
    assert_eq!(object.url().map(|l| l.href.as_str()), Some("10"));
}

#[test]
fn context_and_type_follow_the_same_rule() {
    let mut object = Object::new();
    object.set_type(Some("Note".into()));
    assert_eq!(object.types.as_slice(), &["Note".to_string(), "Object".to_string()]);
    assert_eq!(object.primary_type(), Some("Note"));

    object.add_types(["Article"]);
    assert_eq!(object.types.len(), 3);

    object.set_context(Some(link("https://www.w3.org/ns/activitystreams")));
    object.add_contexts([link("https://w3id.org/security/v1")]);
    assert_eq!(object.context(), Some(&link("https://www.w3.org/ns/activitystreams")));
    assert_eq!(object.contexts.len(), 2);
}

#[test]
fn preview_relation() {
    let mut link_entity = Link::new("https://example.com/video");
    link_entity.set_preview(Some(Image::with_url("https://example.com/thumb.png").into()));
    assert_eq!(link_entity.preview().map(Entity::kind), Some(EntityKind::Image));
    assert!(!link_entity.is_shorthand());
}

// ── Restricted relations ──────────────────────────────────────────

#[test]
fn icon_accepts_link_and_image() {
    let mut object = Object::new();
    object.set_icon(Some(link("https://example.com/a.png"))).unwrap();
    object.set_icon(Some(Image::new().into())).unwrap();
    assert_eq!(object.icons.len(), 2);
    assert_eq!(object.icon().map(Entity::kind), Some(EntityKind::Image));
}

#[test]
fn icon_rejects_other_kinds_and_stays_unchanged() {
    let mut object = Object::new();
    object.set_icon(Some(link("https://example.com/a.png"))).unwrap();

    let err = object.set_icon(Some(Object::new().into())).unwrap_err();
    assert!(matches!(err, ValidationError::DisallowedKind { .. }));
    assert!(object.icons.add(Collection::new().into()).is_err());
    assert_eq!(object.icons.as_slice(), &[link("https://example.com/a.png")]);
}

#[test]
fn image_relation_is_restricted_too() {
    let mut object = Object::new();
    assert!(object.set_image(Some(Object::new().into())).is_err());
    assert!(object.image().is_none());
    object.set_image(None).unwrap();
}

#[test]
fn disallowed_icon_in_document_fails_decode() {
    assert!(decode_entity(r#"{"type": "Object", "icon": {"type": "Object"}}"#).is_err());
    assert!(decode_entity(r#"{"type": "Object", "icon": [{"type": "Image"}, "https://x/i.png"]}"#).is_ok());
}

#[test]
fn empty_restricted_list_is_omitted() {
    let mut object = Object::new();
    object.set_icon(Some(link("x"))).unwrap();
    object.icons.clear();
    assert_eq!(encode_value(object), json!({"type": "Object"}));
}

// ── Link ──────────────────────────────────────────────────────────

#[test]
fn negative_width_is_rejected() {
    let mut link = Link::new("https://example.com");
    let err = link.set_width(Some(-1.0)).unwrap_err();
    assert_eq!(err, ValidationError::Negative { field: "width", value: -1.0 });
    assert_eq!(link.width(), None);
}

#[test]
fn zero_width_is_accepted() {
    let mut link = Link::new("https://example.com");
    link.set_width(Some(0.0)).unwrap();
    assert_eq!(link.width(), Some(0.0));
}

#[test]
fn non_finite_height_is_rejected() {
    let mut link = Link::new("https://example.com");
    assert_eq!(
        link.set_height(Some(f64::NAN)).unwrap_err(),
        ValidationError::NotFinite { field: "height" }
    );
    link.set_height(Some(120.0)).unwrap();
    link.set_height(None).unwrap();
    assert_eq!(link.height(), None);
}

#[test]
fn negative_dimension_in_document_fails_decode() {
    assert!(decode_as::<Link>(r#"{"type": "Link", "href": "h", "height": -4}"#).is_err());
}

#[test]
fn link_with_extra_fields_encodes_as_object() {
    let mut link = Link::new("https://example.com/p");
    link.set_rel(Some("canonical".into()));
    link.href_lang = Some("en".into());
    link.set_width(Some(640.0)).unwrap();

    assert_eq!(
        encode_value(link),
        json!({
            "type": "Link",
            "href": "https://example.com/p",
            "rel": "canonical",
            "hreflang": "en",
            "width": 640.0
        })
    );
}

#[test]
fn each_extra_field_disables_shorthand() {
    let base = Link::new("h");
    assert!(base.is_shorthand());

    let mut named = base.clone();
    named.set_name(Some("n".into()));
    assert!(!named.is_shorthand());

    let mut with_id = base.clone();
    with_id.id = Some("i".into());
    assert!(!with_id.is_shorthand());

    let mut typed = base.clone();
    typed.add_types(["Mention"]);
    assert!(!typed.is_shorthand());

    let mut media = base;
    media.media_type = "image/png".into();
    assert!(!media.is_shorthand());
}

#[test]
fn link_map_form_decodes() {
    let link: Link = decode_as(
        r#"{"type": "Link", "href": "https://example.com", "rel": ["a", "b"], "height": 10}"#,
    )
    .unwrap();
    assert_eq!(link.rels.as_slice(), &["a".to_string(), "b".to_string()]);
    assert_eq!(link.rel().map(String::as_str), Some("a"));
    assert_eq!(link.height(), Some(10.0));
    assert!(link.context().is_none());
}

// ── Language fields ───────────────────────────────────────────────

#[test]
fn default_language_only_name_encodes_as_plain_name() {
    let mut object = Object::new();
    object.set_name(Some("Hello".into()));
    assert_eq!(encode_value(object), json!({"type": "Object", "name": "Hello"}));
}

#[test]
fn multilingual_name_encodes_map_and_default() {
    let mut object = Object::new();
    object.set_name(Some("Hello".into()));
    object.names.insert("fr", "Bonjour".to_string());

    assert_eq!(
        encode_value(object),
        json!({
            "type": "Object",
            "nameMap": {"en": "Hello", "fr": "Bonjour"},
            "name": "Hello"
        })
    );
}

#[test]
fn name_and_name_map_merge_on_decode() {
    let object: Object =
        decode_as(r#"{"type": "Object", "name": "Hello", "nameMap": {"de": "Hallo"}}"#).unwrap();
    assert_eq!(object.name(), Some("Hello"));
    assert_eq!(object.names.get("de").map(String::as_str), Some("Hallo"));
    assert_eq!(object.names.len(), 2);
}

#[test]
fn set_name_touches_only_default_slot() {
    let mut object = Object::new();
    object.names.insert("fr", "Bonjour".to_string());
    object.set_name(Some("Hello".into()));
    assert_eq!(object.names.len(), 2);

    object.set_name(None);
    assert!(object.names.is_empty());
}

#[test]
fn summary_and_content() {
    let mut object = Object::new();
    object.set_summary(Some("short".into()));
    object.set_content(Some(link("<p>long</p>")));

    assert_eq!(object.summary(), Some("short"));
    assert_eq!(
        encode_value(object.clone()),
        json!({"type": "Object", "summary": "short", "content": "<p>long</p>"})
    );

    let decoded: Object = decode_as(&encode_entity(&object.into(), &EncodeOptions::compact()).unwrap()).unwrap();
    assert_eq!(decoded.content(), Some(&link("<p>long</p>")));
}

#[test]
fn null_language_fields_are_ignored() {
    let object: Object = decode_as(r#"{"type": "Object", "name": null, "summaryMap": null}"#).unwrap();
    assert!(object.names.is_empty());
    assert!(object.summaries.is_empty());
}

// ── Scalars ───────────────────────────────────────────────────────

#[test]
fn timestamps_use_rfc3339() {
    let object: Object = decode_as(
        r#"{"type": "Object", "published": "2024-05-01T12:00:00Z", "updated": "2024-05-01T14:30:00+02:00"}"#,
    )
    .unwrap();

    let published: DateTime<Utc> = "2024-05-01T12:00:00Z".parse().unwrap();
    assert_eq!(object.published, Some(published));
    assert_eq!(object.updated, Some(published + TimeDelta::minutes(30)));
    assert_eq!(encode_value(object)["published"], json!("2024-05-01T12:00:00Z"));
}

#[test]
fn duration_uses_iso8601() {
    let object: Object = decode_as(r#"{"type": "Object", "duration": "PT2H30M"}"#).unwrap();
    assert_eq!(object.duration, Some(TimeDelta::minutes(150)));
    assert_eq!(encode_value(object)["duration"], json!("PT2H30M"));

    assert!(decode_entity(r#"{"type": "Object", "duration": "P1M"}"#).is_err());
}

#[test]
fn replies_decode_as_collection() {
    let object: Object = decode_as(
        r#"{"type": "Object", "replies": {"type": "Collection", "totalItems": 1, "items": "https://example.com/r/1"}}"#,
    )
    .unwrap();
    let replies = object.replies.as_deref().unwrap();
    assert_eq!(replies.total_items, Some(1));
    assert_eq!(replies.item(), Some(&link("https://example.com/r/1")));
}

// ── Collection ────────────────────────────────────────────────────

#[test]
fn with_items_keeps_entries_in_order() {
    let collection = Collection::with_items([link("a"), link("b")]);
    assert_eq!(collection.items.as_slice(), &[link("a"), link("b")]);
    assert_eq!(
        encode_value(collection),
        json!({"type": "Collection", "items": ["a", "b"]})
    );
}
