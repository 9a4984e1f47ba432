use crate::{AppConfig, DatabaseConfig, LogFormat, ServerConfig, TelemetryConfig, DATABASE_PORT};
use secrecy::{ExposeSecret, Secret};

#[test]
fn test_secret_redaction() {
    let secret = Secret::new("my_secret_password".to_string());
    let debug_output = format!("{:?}", secret);
    assert!(debug_output.contains("Secret([REDACTED"));
    assert!(!debug_output.contains("my_secret_password"));
}

#[test]
fn test_config_struct_redaction() {
    let config = DatabaseConfig {
        password: Secret::new("hunter2".to_string()),
        ..Default::default()
    };
    let debug_output = format!("{:?}", config);
    assert!(!debug_output.contains("hunter2"));
    assert!(debug_output.contains("Secret([REDACTED"));
}

#[test]
fn test_database_defaults() {
    let config = DatabaseConfig::default();
    assert_eq!(config.host, "postgres");
    assert_eq!(config.user, "admin");
    assert_eq!(config.password.expose_secret(), "secret");
    assert_eq!(config.database, "policies_db");
    assert_eq!(config.port(), DATABASE_PORT);
    assert_eq!(config.port(), 5432);
}

#[test]
fn test_server_is_fixed() {
    let server = ServerConfig::default();
    assert_eq!(server.port, 8080);
    assert_eq!(server.bind_addr(), "0.0.0.0:8080");
}

#[test]
fn test_json_logs() {
    let mut config = AppConfig {
        app_name: "policy-service".to_string(),
        database: DatabaseConfig::default(),
        server: ServerConfig::default(),
        telemetry: TelemetryConfig::default(),
    };
    assert!(!config.json_logs());

    config.telemetry.log_format = LogFormat::Json;
    assert!(config.json_logs());
}
