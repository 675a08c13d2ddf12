use figment::Jail;
use tcc_config::TccConfig;

#[test]
fn prefixed_env_sets_nested_fields() {
    Jail::expect_with(|jail| {
        jail.set_env("TCC_AUTH__JWT_SECRET", "env-secret");
        jail.set_env("TCC_SERVER__PORT", "7000");
        jail.set_env("TCC_CLIENT__STORAGE_KEY", "admin_token");

        let config = TccConfig::load().expect("config loads");
        assert_eq!(config.auth.jwt_secret, "env-secret");
        assert_eq!(config.server.port, 7000);
        assert_eq!(config.client.storage_key, "admin_token");
        Ok(())
    });
}

#[test]
fn env_beats_toml() {
    Jail::expect_with(|jail| {
        jail.create_file("tcc.toml", "[server]\nport = 8080\n")?;
        jail.set_env("TCC_SERVER__PORT", "9090");

        let config = TccConfig::load().expect("config loads");
        assert_eq!(config.server.port, 9090);
        Ok(())
    });
}

#[test]
fn legacy_port_and_mongo_uri_are_honoured() {
    Jail::expect_with(|jail| {
        jail.set_env("PORT", "5050");
        jail.set_env("MONGO_URI", "file:legacy.db");

        let config = TccConfig::load().expect("config loads");
        assert_eq!(config.server.port, 5050);
        assert_eq!(config.database.url, "file:legacy.db");
        Ok(())
    });
}

#[test]
fn prefixed_env_beats_legacy_alias() {
    Jail::expect_with(|jail| {
        jail.set_env("PORT", "5050");
        jail.set_env("TCC_SERVER__PORT", "6060");

        let config = TccConfig::load().expect("config loads");
        assert_eq!(config.server.port, 6060);
        Ok(())
    });
}

#[test]
fn unparseable_port_fails() {
    Jail::expect_with(|jail| {
        jail.set_env("TCC_SERVER__PORT", "not-a-port");
        assert!(TccConfig::load().is_err());
        Ok(())
    });
}
