//! Integration tests for configuration-driven cart contexts.
//!
//! Run with: cargo test -p pinaka-integration-tests

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;

use pinaka_core::CurrencyCode;
use pinaka_integration_tests::product;
use pinaka_storefront::{CartContext, FileStorage, StorefrontConfig};

fn config_for(dir: &std::path::Path, extra: &[(&str, &str)]) -> StorefrontConfig {
    let mut vars: HashMap<String, String> = extra
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    vars.insert(
        "PINAKA_CART_DIR".to_string(),
        dir.to_string_lossy().into_owned(),
    );
    StorefrontConfig::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

#[test]
fn test_context_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path(), &[("PINAKA_CART_KEY", "session-7")]);

    let ctx = CartContext::<FileStorage>::from_config(config.clone()).unwrap();
    ctx.add_item(product("A", 100, 5, 2)).unwrap();
    ctx.toggle_cart();
    assert!(dir.path().join("session-7.json").exists());

    let restarted = CartContext::<FileStorage>::from_config(config).unwrap();
    assert_eq!(restarted.items(), ctx.items());
    assert!(!restarted.is_open());
}

#[test]
fn test_summary_uses_configured_currency() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path(), &[("PINAKA_CURRENCY", "USD")]);
    assert_eq!(config.currency, CurrencyCode::USD);

    let ctx = CartContext::<FileStorage>::from_config(config).unwrap();
    ctx.add_item(product("A", 1234, 5, 2)).unwrap();
    assert_eq!(ctx.summary().subtotal, "$2,468.00");
}

#[test]
fn test_context_clones_share_state() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = CartContext::<FileStorage>::from_config(config_for(dir.path(), &[])).unwrap();
    let badge = ctx.clone();

    ctx.add_item(product("A", 100, 5, 2)).unwrap();
    ctx.add_item(product("B", 100, 5, 1)).unwrap();
    assert_eq!(badge.total_items(), 3);

    badge.clear_cart().unwrap();
    assert!(ctx.items().is_empty());
}

#[test]
fn test_unreadable_cart_file_fails_to_open() {
    let dir = tempfile::tempdir().unwrap();
    // A directory where the record should be cannot be read as a file.
    std::fs::create_dir(dir.path().join("pinaka-cart-storage.json")).unwrap();

    let result = CartContext::<FileStorage>::from_config(config_for(dir.path(), &[]));
    assert!(result.is_err());
}
