use serde::Deserialize;

use super::{parse_env_var, SettingsError};
use crate::matcher::{DEFAULT_LARGE_THRESHOLD, LABEL_HOSTS};

pub type Result<T> = std::result::Result<T, SettingsError>;

#[derive(Debug, Clone, Deserialize)]
pub struct MatcherSettings {
    /// 컨테이너 라벨 접두사
    #[serde(default = "default_label_prefix")]
    pub label_prefix: String,

    /// 대형 매처 분류 임계값
    ///
    /// 패턴 수가 이 값을 넘는 호스트 매처는 프로비저닝 때 정렬되어 이진
    /// 탐색 빠른 경로를 탑니다.
    #[serde(default = "default_large_threshold")]
    pub large_threshold: usize,
}

impl MatcherSettings {
    pub fn from_env() -> Result<Self> {
        let label_prefix = parse_env_var("PROXY_LABEL_PREFIX", default_label_prefix)?;
        let large_threshold =
            parse_env_var("PROXY_MATCHER_LARGE_THRESHOLD", default_large_threshold)?;

        let settings = Self {
            label_prefix,
            large_threshold,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        // 라벨 접두사 길이 제한
        if self.label_prefix.len() > 100 {
            return Err(SettingsError::EnvVarInvalid {
                var_name: "PROXY_LABEL_PREFIX".to_string(),
                value: self.label_prefix.clone(),
                reason: "라벨 접두사가 너무 깁니다 (최대 100자)".to_string(),
            });
        }

        // 라벨 접두사 검증: 빈 접두사도 여기서 걸러진다
        if !self.label_prefix.ends_with('.') {
            return Err(SettingsError::EnvVarInvalid {
                var_name: "PROXY_LABEL_PREFIX".to_string(),
                value: self.label_prefix.clone(),
                reason: "라벨 접두사는 '.'으로 끝나야 합니다".to_string(),
            });
        }

        Ok(())
    }

    /// 호스트 매칭 라벨의 전체 키 (예: `rproxy.hosts`)
    pub fn hosts_label(&self) -> String {
        format!("{}{}", self.label_prefix, LABEL_HOSTS)
    }
}

impl Default for MatcherSettings {
    fn default() -> Self {
        Self {
            label_prefix: default_label_prefix(),
            large_threshold: default_large_threshold(),
        }
    }
}

fn default_label_prefix() -> String {
    "rproxy.".to_string()
}

fn default_large_threshold() -> usize {
    DEFAULT_LARGE_THRESHOLD
}
