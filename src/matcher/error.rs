use std::fmt;

/// 매처 구성과 프로비저닝 과정의 에러를 표현하는 열거형입니다.
#[derive(Debug, Clone, PartialEq)]
pub enum MatcherError {
    /// 라벨 값을 매처로 해석할 수 없음 (설정 오류, 해당 매처만 건너뜀)
    InvalidValue {
        key: String,
        reason: String,
    },
    /// 프로비저닝 중 발견된 중복 패턴 (검증 오류, 해당 매처는 설치되지 않음)
    DuplicatePattern {
        first_index: usize,
        index: usize,
        pattern: String,
    },
    /// 그 외 프로비저닝 실패
    Provision {
        reason: String,
    },
}

impl fmt::Display for MatcherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatcherError::InvalidValue { key, reason } =>
                write!(f, "라벨 {} 값을 해석할 수 없음: {}", key, reason),
            MatcherError::DuplicatePattern { first_index, index, pattern } =>
                write!(f, "인덱스 {}의 호스트가 인덱스 {}에서 반복됨: {}", first_index, index, pattern),
            MatcherError::Provision { reason } =>
                write!(f, "매처 프로비저닝 실패: {}", reason),
        }
    }
}

impl std::error::Error for MatcherError {}
