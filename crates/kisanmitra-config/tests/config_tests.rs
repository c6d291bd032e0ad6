// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the KisanMitra configuration system.

use kisanmitra_config::diagnostic::ConfigError;
use kisanmitra_config::{
    StorageBackend, load_and_validate_path, load_and_validate_str, load_config_from_path,
    load_config_from_str,
};
use miette::Diagnostic;
use rust_decimal::Decimal;
use serial_test::serial;

#[test]
fn valid_toml_deserializes_into_kisan_config() {
    let toml = r#"
[storage]
backend = "memory"
database_path = "/tmp/kisan.db"
key_prefix = "km_"
cart_key = "cart"
orders_key = "orders"

[activity]
max_entries = 25

[stats]
active_treatment_window_days = 14

[cart]
free_delivery_threshold = 999.5
delivery_fee = 60
order_id_prefix = "KM"
delivery_window_hours = 48

[logging]
level = "debug"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.storage.backend, StorageBackend::Memory);
    assert_eq!(config.storage.database_path, "/tmp/kisan.db");
    assert_eq!(config.storage.key_prefix, "km_");
    assert_eq!(config.storage.cart_key, "cart");
    assert_eq!(config.storage.orders_key, "orders");
    assert_eq!(config.activity.max_entries, 25);
    assert_eq!(config.stats.active_treatment_window_days, 14);
    assert_eq!(config.cart.free_delivery_threshold, Decimal::new(9995, 1));
    assert_eq!(config.cart.delivery_fee, Decimal::from(60));
    assert_eq!(config.cart.order_id_prefix, "KM");
    assert_eq!(config.cart.delivery_window_hours, 48);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn defaults_match_the_mobile_app() {
    let config = load_config_from_str("").expect("empty TOML uses defaults");
    assert_eq!(config.storage.backend, StorageBackend::Sqlite);
    assert_eq!(config.storage.key_prefix, "kisanmitra_");
    assert_eq!(config.storage.cart_key, "hariyali_mitra_cart");
    assert_eq!(config.storage.orders_key, "hariyali_mitra_orders");
    assert!(config.storage.database_path.ends_with("kisanmitra.db"));
    assert_eq!(config.activity.max_entries, 100);
    assert_eq!(config.stats.active_treatment_window_days, 30);
    assert_eq!(config.cart.free_delivery_threshold, Decimal::from(500));
    assert_eq!(config.cart.delivery_fee, Decimal::from(40));
    assert_eq!(config.cart.order_id_prefix, "ORD");
    assert_eq!(config.cart.delivery_window_hours, 24);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn unknown_key_is_rejected_with_suggestion() {
    let toml = r#"
[cart]
delivery_fe = 10
"#;

    let errors = load_and_validate_str(toml).expect_err("unknown key should fail");
    let unknown = errors
        .iter()
        .find(|e| matches!(e, ConfigError::UnknownKey { .. }))
        .expect("should report an unknown key");
    let help = unknown.help().expect("should carry help").to_string();
    assert!(
        help.contains("did you mean `delivery_fee`"),
        "help should suggest the right key, got: {help}"
    );
}

#[test]
fn unknown_key_points_at_inline_source() {
    let toml = "[storage]\nbackend = \"memory\"\n\n[cart]\ndelivery_fe = 10\n";
    let errors = load_and_validate_str(toml).expect_err("unknown key should fail");
    let Some(ConfigError::UnknownKey { span, src, .. }) = errors.first() else {
        panic!("expected an unknown key, got {errors:?}");
    };
    let span = span.expect("span located");
    assert_eq!(&toml[span.offset()..span.offset() + span.len()], "delivery_fe");
    assert!(src.is_some());
}

#[test]
fn unknown_section_is_rejected() {
    let errors = load_and_validate_str("[weather]\napi_key = \"x\"\n")
        .expect_err("unknown section should fail");
    assert!(!errors.is_empty());
}

#[test]
fn invalid_type_is_reported() {
    let errors = load_and_validate_str("[activity]\nmax_entries = \"lots\"\n")
        .expect_err("string for integer should fail");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::WrongType { key, .. } if key.contains("max_entries")))
    );
}

#[test]
fn invalid_backend_name_fails() {
    assert!(load_and_validate_str("[storage]\nbackend = \"redis\"\n").is_err());
}

#[test]
fn validation_errors_surface_from_str_loader() {
    let toml = r#"
[storage]
cart_key = "same"
orders_key = "same"

[logging]
level = "loud"
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    let validation_count = errors
        .iter()
        .filter(|e| matches!(e, ConfigError::Validation { .. }))
        .count();
    assert_eq!(validation_count, 2);
}

#[test]
fn config_error_renders_with_miette() {
    use miette::GraphicalReportHandler;

    let error = ConfigError::UnknownKey {
        key: "max_entires".to_string(),
        suggestion: Some("max_entries".to_string()),
        valid_keys: "max_entries".to_string(),
        span: None,
        src: None,
    };

    assert!(error.code().is_some());
    let mut buf = String::new();
    GraphicalReportHandler::new()
        .render_report(&mut buf, &error)
        .expect("should render without error");
    assert!(buf.contains("max_entires"));
}

#[test]
#[serial]
fn file_and_env_layers_merge() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "custom.toml",
            r#"
[storage]
backend = "memory"

[cart]
delivery_fee = 25
"#,
        )?;
        jail.set_env("KISANMITRA_CART_ORDER_ID_PREFIX", "KM");
        jail.set_env("KISANMITRA_STORAGE_KEY_PREFIX", "env_");
        jail.set_env("KISANMITRA_ACTIVITY_MAX_ENTRIES", "7");

        let config = load_config_from_path(std::path::Path::new("custom.toml"))?;
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.cart.delivery_fee, Decimal::from(25));
        assert_eq!(config.cart.order_id_prefix, "KM");
        assert_eq!(config.storage.key_prefix, "env_");
        assert_eq!(config.activity.max_entries, 7);
        Ok(())
    });
}

#[test]
#[serial]
fn env_override_beats_file_value() {
    figment::Jail::expect_with(|jail| {
        jail.create_file("kisan.toml", "[logging]\nlevel = \"warn\"\n")?;
        jail.set_env("KISANMITRA_LOGGING_LEVEL", "debug");

        let config = load_config_from_path(std::path::Path::new("kisan.toml"))?;
        assert_eq!(config.logging.level, "debug");
        Ok(())
    });
}

#[test]
#[serial]
fn path_loader_reports_validation_errors() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[activity]\nmax_entries = 0\n").expect("write config");

    let errors = load_and_validate_path(&path).expect_err("zero cap should fail");
    assert!(
        errors
            .iter()
            .any(|e| e.to_string().contains("activity.max_entries"))
    );
}
