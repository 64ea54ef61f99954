use super::*;

#[test]
fn defaults_apply_when_nothing_is_configured() {
    let settings = Settings::from_raw(RawSettings::default()).expect("defaults are valid");

    assert_eq!(
        settings.server.addr,
        "127.0.0.1:8000".parse::<SocketAddr>().unwrap()
    );
    assert_eq!(settings.server.graceful_shutdown, Duration::from_secs(30));
    assert_eq!(settings.logging.level, LevelFilter::INFO);
    assert!(matches!(settings.logging.format, LogFormat::Compact));
    assert!(settings.database.url.is_none());
    assert_eq!(settings.database.max_connections.get(), 8);
}

#[test]
fn serve_overrides_beat_raw_values() {
    let mut raw = RawSettings::default();
    raw.server.host = Some("0.0.0.0".to_string());
    raw.server.port = Some(3000);
    raw.logging.level = Some("warn".to_string());

    let overrides = ServeOverrides {
        server_host: Some("127.0.0.1".to_string()),
        server_port: Some(9000),
        log_level: Some("debug".to_string()),
        log_json: Some(true),
        database_url: Some("postgres://localhost/twine".to_string()),
        database_max_connections: Some(2),
        ..ServeOverrides::default()
    };
    raw.apply_serve_overrides(&overrides);

    let settings = Settings::from_raw(raw).expect("overrides are valid");
    assert_eq!(
        settings.server.addr,
        "127.0.0.1:9000".parse::<SocketAddr>().unwrap()
    );
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
    assert!(matches!(settings.logging.format, LogFormat::Json));
    assert_eq!(
        settings.database.url.as_deref(),
        Some("postgres://localhost/twine")
    );
    assert_eq!(settings.database.max_connections.get(), 2);
}

#[test]
fn zero_port_is_rejected() {
    let mut raw = RawSettings::default();
    raw.server.port = Some(0);

    let result = Settings::from_raw(raw);
    assert!(matches!(
        result,
        Err(LoadError::Invalid {
            key: "server.port",
            ..
        })
    ));
}

#[test]
fn zero_pool_size_is_rejected() {
    let mut raw = RawSettings::default();
    raw.database.max_connections = Some(0);

    let result = Settings::from_raw(raw);
    assert!(matches!(
        result,
        Err(LoadError::Invalid {
            key: "database.max_connections",
            ..
        })
    ));
}

#[test]
fn blank_database_url_counts_as_unset() {
    let mut raw = RawSettings::default();
    raw.database.url = Some("   ".to_string());

    let settings = Settings::from_raw(raw).expect("blank url is valid");
    assert!(settings.database.url.is_none());
}

#[test]
fn unparseable_log_level_is_rejected() {
    let mut raw = RawSettings::default();
    raw.logging.level = Some("shouting".to_string());

    let result = Settings::from_raw(raw);
    assert!(matches!(
        result,
        Err(LoadError::Invalid {
            key: "logging.level",
            ..
        })
    ));
}
