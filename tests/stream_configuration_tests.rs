use logstream::error::StreamError;
use logstream::stream_configuration::{CompressionType, CorrelationConfig, FileConfig};
use std::path::PathBuf;

#[test]
fn test_file_config_defaults() {
    let config = FileConfig::default();
    assert_eq!(config.files, None);
    assert_eq!(config.buffer_size, 8192);
    assert_eq!(config.compression, None);
    assert!(config.detect_compression);
}

#[test]
fn test_file_config_builder() {
    let config = FileConfig::new()
        .files(["a.log", "b.log.gz"])
        .buffer_size(1024)
        .compression(CompressionType::Gzip)
        .detect_compression(false);

    assert_eq!(
        config.files,
        Some(vec![PathBuf::from("a.log"), PathBuf::from("b.log.gz")])
    );
    assert_eq!(config.buffer_size, 1024);
    assert_eq!(config.compression, Some(CompressionType::Gzip));
    assert!(!config.detect_compression);
}

#[test]
fn test_file_config_from_json() {
    let config = FileConfig::from_json(
        r#"{ "files": ["/var/log/app.log", "/var/log/app.log.1"], "compression": "deflate" }"#,
    )
    .unwrap();
    assert_eq!(config.files.as_ref().map(Vec::len), Some(2));
    assert_eq!(config.compression, Some(CompressionType::Deflate));
    // Unlisted fields fall back to their defaults
    assert_eq!(config.buffer_size, 8192);
    assert!(config.detect_compression);
}

#[test]
fn test_file_config_json_round_trip() {
    let config = FileConfig::new().files(["x.log"]).compression(CompressionType::Gzip);
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("\"gzip\""));
    assert_eq!(FileConfig::from_json(&json).unwrap(), config);
}

#[test]
fn test_bad_json_is_invalid_argument() {
    let result = FileConfig::from_json(r#"{ "compression": "zip" }"#);
    assert!(matches!(result, Err(StreamError::InvalidArgument(_))));
}

#[test]
fn test_correlation_config() {
    assert_eq!(CorrelationConfig::default().lookahead, 100);
    assert_eq!(CorrelationConfig::new().lookahead(7).lookahead, 7);
    assert_eq!(
        CorrelationConfig::from_json(r#"{ "lookahead": 25 }"#).unwrap(),
        CorrelationConfig { lookahead: 25 }
    );
}
