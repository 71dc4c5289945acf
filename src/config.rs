use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub focus: FocusConfig,
    pub injection: InjectionConfig,
    pub backend: BackendConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Файл журнала; без него логи идут в stderr
    pub file: Option<PathBuf>,
}

/// Параметры цикла фокусировки окна
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FocusConfig {
    pub max_attempts: u32,
    pub poll_interval_ms: u64,
    pub confirm_timeout_ms: u64,
    pub retry_delay_ms: u64,
    pub final_check_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InjectionConfig {
    pub key_delay_ms: u64,
    /// Отпускать удерживаемые модификаторы, если последовательность прервана
    /// неизвестной клавишей. По умолчанию выключено: модификаторы остаются нажатыми.
    pub release_modifiers_on_abort: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendConfig {
    pub mode: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:9000".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            poll_interval_ms: 25,
            confirm_timeout_ms: 350,
            retry_delay_ms: 75,
            final_check_ms: 100,
        }
    }
}

impl Default for InjectionConfig {
    fn default() -> Self {
        Self {
            key_delay_ms: 50,
            release_modifiers_on_abort: false,
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            mode: "auto".to_string(),
        }
    }
}

impl FocusConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn confirm_timeout(&self) -> Duration {
        Duration::from_millis(self.confirm_timeout_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn final_check(&self) -> Duration {
        Duration::from_millis(self.final_check_ms)
    }
}

impl InjectionConfig {
    pub fn key_delay(&self) -> Duration {
        Duration::from_millis(self.key_delay_ms)
    }
}

impl Config {
    /// Загрузка: значения по умолчанию <- TOML (если файл есть) <- TCPKB_* переменные
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("TCPKB_").split("__"));

        let config: Config = figment
            .extract()
            .with_context(|| format!("Не удалось загрузить конфигурацию из {:?}", config_path))?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Неверный уровень логирования: {}", self.logging.level),
        }

        self.bind_addr()?;

        if self.focus.max_attempts == 0 {
            anyhow::bail!("focus.max_attempts должно быть больше 0");
        }

        if self.focus.poll_interval_ms == 0 {
            anyhow::bail!("focus.poll_interval_ms должно быть больше 0");
        }

        match self.backend.mode.as_str() {
            "auto" | "dry-run" => {}
            _ => anyhow::bail!("Неизвестный режим оконной системы: {}", self.backend.mode),
        }

        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.server
            .bind
            .parse()
            .with_context(|| format!("Неверный адрес для прослушивания: {}", self.server.bind))
    }

    pub fn is_dry_run(&self) -> bool {
        self.backend.mode == "dry-run"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bind_addr().unwrap().port(), 9000);
        assert!(!config.is_dry_run());
    }

    #[test]
    fn test_default_timings() {
        let config = Config::default();
        assert_eq!(config.focus.max_attempts, 5);
        assert_eq!(config.focus.poll_interval(), Duration::from_millis(25));
        assert_eq!(config.focus.confirm_timeout(), Duration::from_millis(350));
        assert_eq!(config.focus.retry_delay(), Duration::from_millis(75));
        assert_eq!(config.focus.final_check(), Duration::from_millis(100));
        assert_eq!(config.injection.key_delay(), Duration::from_millis(50));
        assert!(!config.injection.release_modifiers_on_abort);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.server.bind = "not-an-address".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.focus.max_attempts = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.backend.mode = "wayland".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_merges_toml_over_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "tcp-keyboard.toml",
                r#"
                [server]
                bind = "127.0.0.1:9100"

                [injection]
                key_delay_ms = 10
                "#,
            )?;
            jail.set_env("TCPKB_BACKEND__MODE", "dry-run");

            let config = Config::load("tcp-keyboard.toml").expect("config should load");
            assert_eq!(config.server.bind, "127.0.0.1:9100");
            assert_eq!(config.injection.key_delay_ms, 10);
            assert_eq!(config.focus.max_attempts, 5);
            assert!(config.is_dry_run());
            Ok(())
        });
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        figment::Jail::expect_with(|_jail| {
            let config = Config::load("absent.toml").expect("defaults should load");
            assert_eq!(config.server.bind, "0.0.0.0:9000");
            Ok(())
        });
    }
}
