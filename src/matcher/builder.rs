use std::collections::HashMap;

use tracing::{debug, error};

use crate::matcher::error::MatcherError;
use crate::matcher::host::HostMatcher;
use crate::matcher::set::MatcherSet;
use crate::matcher::traits::RequestMatcher;
use crate::settings::MatcherSettings;

/// 호스트 매칭 라벨의 접두사 뒤 이름입니다.
/// 전체 키는 [`MatcherSettings::hosts_label`]이 만듭니다.
pub const LABEL_HOSTS: &str = "hosts";

/// 라벨 값 하나를 매처로 만드는 생산자입니다.
pub type MatcherProducer =
    fn(&MatcherSettings, &str) -> Result<Box<dyn RequestMatcher>, MatcherError>;

/// `hosts` 라벨 값에서 호스트 매처를 만듭니다.
pub fn produce_host_matcher(
    settings: &MatcherSettings,
    value: &str,
) -> Result<Box<dyn RequestMatcher>, MatcherError> {
    debug!(value = %value, "호스트 매처 생성");
    let matcher =
        HostMatcher::from_label_value(value).with_large_threshold(settings.large_threshold);
    Ok(Box::new(matcher))
}

/// 컨테이너 라벨에서 매처 묶음을 만드는 빌더입니다.
///
/// 생산자 목록은 생성 시점에 명시적으로 구성됩니다. 기본으로 호스트
/// 매처 생산자가 등록되어 있고, [`register`](MatcherBuilder::register)로
/// 다른 매처 종류를 추가할 수 있습니다. 전역 상태는 없으므로 빌더마다
/// 독립적인 생산자 목록을 가집니다.
pub struct MatcherBuilder {
    settings: MatcherSettings,
    producers: Vec<(String, MatcherProducer)>,
}

impl MatcherBuilder {
    pub fn new(settings: MatcherSettings) -> Self {
        let producers = vec![(settings.hosts_label(), produce_host_matcher as MatcherProducer)];
        Self {
            settings,
            producers,
        }
    }

    /// 라벨 키 하나를 담당하는 생산자를 등록합니다.
    /// 키는 접두사를 포함한 전체 라벨 이름이어야 합니다.
    pub fn register(&mut self, label: impl Into<String>, producer: MatcherProducer) -> &mut Self {
        self.producers.push((label.into(), producer));
        self
    }

    pub fn settings(&self) -> &MatcherSettings {
        &self.settings
    }

    /// 라벨 맵을 훑어 매처 묶음을 만듭니다.
    ///
    /// 등록된 순서대로 생산자를 돌면서 해당 라벨이 있으면 매처를 만들고
    /// 프로비저닝합니다. 매처 하나가 실패해도 빌드 전체를 멈추지 않습니다.
    /// 실패한 매처는 로그를 남기고 건너뛰므로, 라벨 하나가 깨져도 나머지
    /// 매처는 정상 동작합니다.
    pub fn build(&self, labels: &HashMap<String, String>) -> MatcherSet {
        let mut set = MatcherSet::new();

        for (key, producer) in &self.producers {
            let value = match labels.get(key) {
                Some(value) => value,
                None => continue,
            };

            let mut matcher = match producer(&self.settings, value) {
                Ok(matcher) => matcher,
                Err(e) => {
                    error!(label = %key, value = %value, error = %e, "매처를 만들 수 없음");
                    continue;
                }
            };

            // 프로비저닝은 항상 호출한다. 준비할 것이 없는 매처는
            // 기본 구현이 아무것도 하지 않는다.
            if let Err(e) = matcher.provision() {
                error!(label = %key, value = %value, error = %e, "매처를 프로비저닝할 수 없음");
                continue;
            }

            set.push(matcher);
        }

        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_has_hosts_producer() {
        let builder = MatcherBuilder::new(MatcherSettings::default());
        assert_eq!(builder.producers.len(), 1);
        assert_eq!(builder.producers[0].0, "rproxy.hosts");
    }

    #[test]
    fn test_register_appends_in_order() {
        fn noop_producer(
            _settings: &MatcherSettings,
            _value: &str,
        ) -> Result<Box<dyn RequestMatcher>, MatcherError> {
            Err(MatcherError::Provision {
                reason: "미구현".to_string(),
            })
        }

        let mut builder = MatcherBuilder::new(MatcherSettings::default());
        builder.register("rproxy.paths", noop_producer);

        let keys: Vec<&str> = builder.producers.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["rproxy.hosts", "rproxy.paths"]);
    }
}
