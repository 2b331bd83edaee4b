//! Installs process-wide settings, so it runs as its own test binary.

use activitypub_model::{
    ConfigError, EncodeOptions, Entity, Link, Object, Settings, encode_entity,
};
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::io::Write;
use std::sync::{Once, OnceLock};

const AS_CONTEXT: &str = "https://www.w3.org/ns/activitystreams";

static INSTALL: Once = Once::new();
static BUILT_BEFORE_INSTALL: OnceLock<Object> = OnceLock::new();

fn install() {
    INSTALL.call_once(|| {
        assert_eq!(Settings::current().default_language, "en");
        BUILT_BEFORE_INSTALL.get_or_init(Object::new);

        Settings::default()
            .with_default_language("fr")
            .with_default_context(Link::new(AS_CONTEXT))
            .install()
            .unwrap();
    });
}

// ── Installed settings ────────────────────────────────────────────

#[test]
fn installed_settings_are_current() {
    install();
    assert!(Settings::is_installed());
    assert_eq!(Settings::current().default_language, "fr");
}

#[test]
fn reading_defaults_does_not_block_install() {
    install();
    assert!(Settings::is_installed());
    let early = BUILT_BEFORE_INSTALL.get().unwrap();
    assert!(early.contexts.is_empty());
    assert!(Object::new().context().is_some());
}

#[test]
fn object_family_gets_default_context() {
    install();
    let object = Object::new();
    assert_eq!(object.context(), Some(&Entity::link(AS_CONTEXT)));
}

#[test]
fn links_stay_context_free() {
    install();
    let link = Link::new("https://example.com");
    assert!(link.contexts.is_empty());
    assert!(link.is_shorthand());
}

#[test]
fn set_name_writes_configured_language() {
    install();
    let mut object = Object::new();
    object.set_name(Some("Bonjour".into()));
    assert_eq!(object.names.get("fr").map(String::as_str), Some("Bonjour"));
    assert_eq!(object.name(), Some("Bonjour"));
}

#[test]
fn encoded_object_carries_context() {
    install();
    let text = encode_entity(&Object::new().into(), &EncodeOptions::compact()).unwrap();
    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["@context"], Value::String(AS_CONTEXT.into()));
}

#[test]
fn second_install_fails() {
    install();
    let err = Settings::default().install().unwrap_err();
    assert!(matches!(err, ConfigError::AlreadyInitialized));
    assert_eq!(Settings::current().default_language, "fr");
}

// ── Loading ───────────────────────────────────────────────────────

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::load_from(&dir.path().join("absent.json"));
    assert_eq!(settings, Settings::default());
}

#[test]
fn valid_file_is_parsed() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"default_language": "de", "default_context": "{AS_CONTEXT}"}}"#
    )
    .unwrap();

    let settings = Settings::load_from(file.path());
    assert_eq!(settings.default_language, "de");
    assert_eq!(settings.default_context, Some(Entity::link(AS_CONTEXT)));
}

#[test]
fn invalid_file_falls_back_to_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"{not json").unwrap();

    assert_eq!(Settings::load_from(file.path()), Settings::default());
    assert!(matches!(
        Settings::read_from(file.path()),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn from_json_fills_missing_fields() {
    let settings = Settings::from_json("{}").unwrap();
    assert_eq!(settings.default_language, "en");
    assert!(settings.default_context.is_none());
}
