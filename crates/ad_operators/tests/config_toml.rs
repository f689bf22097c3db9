//! `ParallelConfig` as read from TOML configuration files.

#![cfg(feature = "serde")]

use ad_operators::parallel::{DEFAULT_CHUNK_SIZE, DEFAULT_PARALLEL_THRESHOLD};
use ad_operators::ParallelConfig;

#[test]
fn test_full_table() {
    let config: ParallelConfig = toml::from_str(
        r#"
        chunk_size = 256
        parallel_threshold = 10000
        "#,
    )
    .unwrap();
    assert_eq!(config, ParallelConfig::new(256, 10_000));
}

#[test]
fn test_missing_keys_use_defaults() {
    let config: ParallelConfig = toml::from_str("chunk_size = 32").unwrap();
    assert_eq!(config.chunk_size, 32);
    assert_eq!(config.parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);

    let empty: ParallelConfig = toml::from_str("").unwrap();
    assert_eq!(empty.chunk_size, DEFAULT_CHUNK_SIZE);
}

#[test]
fn test_round_trip() {
    let config = ParallelConfig::default().with_parallel_threshold(1);
    let text = toml::to_string(&config).unwrap();
    let back: ParallelConfig = toml::from_str(&text).unwrap();
    assert_eq!(config, back);
}
