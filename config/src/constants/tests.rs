//! Tests for the cache configuration builder.

use super::*;

/// Ensures the default configuration carries a positive budget.
#[test]
fn default_config_is_bounded() {
    let cfg = CacheConfig::default();
    assert_eq!(cfg.soft_limit_vertices, Some(DEFAULT_SOFT_LIMIT_VERTICES));
}

#[test]
fn new_rejects_zero_budget() {
    assert_eq!(
        CacheConfig::new(Some(0)).unwrap_err(),
        ConfigError::InvalidSoftLimit(0)
    );
}

#[test]
fn new_accepts_unbounded() {
    let cfg = CacheConfig::new(None).unwrap();
    assert_eq!(cfg, CacheConfig::unbounded());
}

#[test]
fn config_error_display() {
    let message = ConfigError::InvalidSoftLimit(0).to_string();
    assert!(message.contains("soft_limit_vertices"));
}
