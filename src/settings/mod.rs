use std::{env, fs, path::Path};
use serde::Deserialize;

mod error;
pub mod logging;
pub mod matcher;

pub use error::SettingsError;
pub use logging::{LogFormat, LogOutput, LogSettings};
pub use matcher::MatcherSettings;

pub type Result<T> = std::result::Result<T, SettingsError>;

/// 환경 변수를 읽어 파싱합니다. 변수가 없으면 기본값을 씁니다.
pub fn parse_env_var<T: std::str::FromStr, F: FnOnce() -> T>(
    name: &str,
    default: F,
) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(val) => val.parse().map_err(|e: T::Err| SettingsError::EnvVarInvalid {
            var_name: name.to_string(),
            value: val,
            reason: e.to_string(),
        }),
        Err(env::VarError::NotPresent) => Ok(default()),
        Err(e) => Err(SettingsError::EnvVarInvalid {
            var_name: name.to_string(),
            value: "".to_string(),
            reason: e.to_string(),
        }),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 매처 설정
    #[serde(default)]
    pub matcher: MatcherSettings,

    /// 로깅 설정
    #[serde(default)]
    pub logging: LogSettings,
}

impl Settings {
    pub fn load() -> Result<Self> {
        if let Ok(config_path) = env::var("PROXY_CONFIG_FILE") {
            Self::from_toml_file(&config_path)
        } else {
            Self::from_env()
        }
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).map_err(|e| SettingsError::FileError {
            path: path.as_ref().to_string_lossy().to_string(),
            error: e,
        })?;

        let settings: Self = toml::from_str(&content)
            .map_err(|e| SettingsError::ParseError { source: e })?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn from_env() -> Result<Self> {
        let settings = Self {
            matcher: MatcherSettings::from_env()?,
            logging: LogSettings::from_env()?,
        };

        // 생성 시점에 바로 검증
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.matcher.validate()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            matcher: MatcherSettings::default(),
            logging: LogSettings::default(),
        }
    }
}
