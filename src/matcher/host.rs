use std::cmp::Ordering;
use std::collections::HashMap;

use crate::matcher::error::MatcherError;
use crate::matcher::traits::{MatchRequest, RequestMatcher};
use crate::replacer::{NoopReplacer, Replacer};

/// 패턴 수가 이 값을 넘으면 매처를 "대형"으로 분류합니다.
///
/// 대형 매처는 프로비저닝 때 정렬되어 평가 때 이진 탐색 빠른 경로를
/// 사용합니다. 작은 목록은 정렬해도 이득이 줄어들어 원래 순서를 유지합니다.
/// 라벨 설정의 `large_threshold`로 바꿀 수 있습니다.
pub const DEFAULT_LARGE_THRESHOLD: usize = 100;

/// 요청의 Host 값을 패턴 목록과 비교하는 매처입니다.
///
/// 패턴은 대소문자를 구분하지 않는 호스트 이름이며 세 종류가 있습니다.
///
/// * 정확한 이름: `example.com`
/// * 와일드카드 세그먼트: `*.example.com`. `*`는 점으로 구분된 라벨
///   정확히 하나와 일치합니다 (`api.example.com`은 되고 `a.b.example.com`은 안 됨)
/// * 플레이스홀더: `{env.HOST}`. 평가 시점에 치환기가 요청 문맥으로 해석
///
/// 와일드카드나 플레이스홀더가 든 패턴은 *퍼지* 패턴, 나머지는 *정확한*
/// 패턴입니다. 대형 매처는 프로비저닝 때 퍼지 패턴을 앞쪽 영역에, 정확한
/// 패턴을 뒤쪽 영역에 모아 각각 사전순으로 정렬합니다. 정확한 영역이
/// 정렬되어 있어야 평가의 이진 탐색이 유효합니다.
///
/// # 수명
///
/// 설정 로드마다 새로 만들어 [`provision`](HostMatcher::provision)을 정확히
/// 한 번 호출한 뒤 사용합니다. 프로비저닝 이후에는 불변이므로 여러 요청
/// 스레드에서 잠금 없이 동시에 평가해도 안전합니다. 설정이 바뀌면 기존
/// 매처를 고치지 않고 통째로 교체합니다.
///
/// # 예제
///
/// ```
/// use rproxy_matchers::matcher::HostMatcher;
/// use rproxy_matchers::replacer::NoopReplacer;
///
/// let mut matcher = HostMatcher::from_label_value("a.com,b.com,*.c.com");
/// matcher.provision().unwrap();
///
/// assert!(matcher.match_host("b.com", &NoopReplacer));
/// assert!(matcher.match_host("x.c.com", &NoopReplacer));
/// assert!(!matcher.match_host("y.com", &NoopReplacer));
/// ```
#[derive(Debug, Clone)]
pub struct HostMatcher {
    patterns: Vec<String>,
    large_threshold: usize,
    // 프로비저닝이 두 영역 정렬을 마쳤는지. 빠른 경로와 조기 종료는
    // 임계값이 아니라 실제 정렬 상태에 기댄다.
    sorted: bool,
}

impl HostMatcher {
    /// 패턴 목록으로 매처를 만듭니다. 평가 전에 반드시 `provision`을 호출해야 합니다.
    pub fn new(patterns: Vec<String>) -> Self {
        Self {
            patterns,
            large_threshold: DEFAULT_LARGE_THRESHOLD,
            sorted: false,
        }
    }

    /// 쉼표로 구분된 라벨 값에서 매처를 만듭니다.
    ///
    /// 값은 다듬지 않고 그대로 자릅니다. 쉼표 외의 구분자나 이스케이프는
    /// 지원하지 않으므로 패턴 하나에 쉼표가 들어갈 수 없습니다.
    pub fn from_label_value(value: &str) -> Self {
        Self::new(value.split(',').map(str::to_string).collect())
    }

    /// 대형 분류 임계값을 바꿉니다. 기본값은 [`DEFAULT_LARGE_THRESHOLD`]입니다.
    ///
    /// 프로비저닝 전에 호출해야 합니다. 이미 프로비저닝된 매처의 임계값을
    /// 바꿔도 평가 경로는 프로비저닝 때 정해진 순서를 그대로 따릅니다.
    pub fn with_large_threshold(mut self, threshold: usize) -> Self {
        self.large_threshold = threshold;
        self
    }

    /// 현재 패턴 목록입니다. 프로비저닝 후에는 정렬된 순서가 보입니다.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// 호스트 이름에 와일드카드나 플레이스홀더가 들어 있으면 true (퍼지 패턴).
    fn is_fuzzy(pattern: &str) -> bool {
        pattern.contains('*') || pattern.contains('{')
    }

    /// 패턴 수가 임계값을 넘으면 true.
    fn is_large(&self) -> bool {
        self.patterns.len() > self.large_threshold
    }

    /// 매처를 검증하고 대형 목록을 최적화합니다.
    ///
    /// ASCII 소문자로 접었을 때 같은 패턴이 두 번 나오면
    /// [`MatcherError::DuplicatePattern`]으로 실패합니다. 중복을 조용히
    /// 제거하지 않는 것은 잘못된 설정임을 운영자가 알아야 하기 때문입니다.
    ///
    /// 대형 매처는 퍼지 패턴을 앞쪽에 모으고 두 영역을 각각 사전순으로
    /// 정렬합니다. 이미 정렬된 매처에 다시 호출해도 해가 없지만 필요하지도
    /// 않습니다. 프로비저닝 이후 패턴 순서를 바꾸는 코드 경로가 있어서는
    /// 안 됩니다. 평가의 조기 종료가 이 순서에 기대고 있습니다.
    pub fn provision(&mut self) -> Result<(), MatcherError> {
        // 중복 검사는 ASCII 소문자 접기 기준. 전송되는 호스트 이름은 ASCII이고
        // (국제화 도메인은 퓨니코드로 도착) 저장된 패턴은 원래 대소문자를 유지한다.
        let mut seen: HashMap<String, usize> = HashMap::new();
        for (index, pattern) in self.patterns.iter().enumerate() {
            let folded = pattern.to_ascii_lowercase();
            if let Some(&first_index) = seen.get(&folded) {
                return Err(MatcherError::DuplicatePattern {
                    first_index,
                    index,
                    pattern: folded,
                });
            }
            seen.insert(folded, index);
        }

        if self.is_large() {
            // 대형 목록에서 가장 흔한 값은 정확한 패턴이므로 이진 탐색으로 찾고,
            // 퍼지 패턴은 앞쪽에 몰아 두어 선형 탐색이 일찍 끝나게 한다.
            self.patterns.sort_by(|a, b| {
                match (Self::is_fuzzy(a), Self::is_fuzzy(b)) {
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                    _ => a.cmp(b),
                }
            });
        }
        self.sorted = self.is_large();

        Ok(())
    }

    /// 요청 호스트가 패턴 목록과 일치하면 true를 반환합니다.
    ///
    /// 프로비저닝된 매처는 불변이므로 동시에 호출해도 안전합니다.
    /// 플레이스홀더는 호출할 때마다 치환기로 해석하므로 재프로비저닝 없이
    /// 요청마다 다른 값으로 평가될 수 있습니다.
    pub fn match_host(&self, req_host: &str, replacer: &dyn Replacer) -> bool {
        if self.sorted {
            // 빠른 경로: 정확한 패턴 영역을 이진 탐색한다. 퍼지 패턴은 전부
            // 정확한 패턴 앞에 정렬되어 있으므로 비교기에서 항상 앞쪽으로 취급한다.
            let found = self
                .patterns
                .binary_search_by(|pattern| {
                    if Self::is_fuzzy(pattern) {
                        Ordering::Less
                    } else {
                        pattern.as_str().cmp(req_host)
                    }
                })
                .is_ok();
            if found {
                return true;
            }
        }

        'outer: for pattern in &self.patterns {
            // 정렬된 매처는 정확한 일치가 없다는 사실을 위에서 이미 확인했다.
            // 퍼지 패턴은 목록 앞쪽에 몰려 있으므로 퍼지가 아닌 패턴을 만나면
            // 더 볼 것이 없다.
            if self.sorted && !Self::is_fuzzy(pattern) {
                break;
            }

            let resolved = replacer.replace_all(pattern);
            if resolved.contains('*') {
                let pattern_labels: Vec<&str> = resolved.split('.').collect();
                let host_labels: Vec<&str> = req_host.split('.').collect();
                // 와일드카드는 라벨 하나와만 일치하므로 세그먼트 수가 다르면 탈락
                if pattern_labels.len() != host_labels.len() {
                    continue;
                }
                for (pattern_label, host_label) in pattern_labels.iter().zip(&host_labels) {
                    if *pattern_label == "*" {
                        continue;
                    }
                    if !pattern_label.eq_ignore_ascii_case(host_label) {
                        continue 'outer;
                    }
                }
                return true;
            } else if req_host.eq_ignore_ascii_case(&resolved) {
                return true;
            }
        }

        false
    }
}

impl RequestMatcher for HostMatcher {
    fn matches(&self, req: &MatchRequest<'_>) -> bool {
        let req_host = match req.host() {
            Some(host) => host,
            // Host가 없는 요청은 어떤 패턴과도 일치하지 않는다
            None => return false,
        };

        match req.replacer() {
            Some(replacer) => self.match_host(req_host, replacer.as_ref()),
            None => self.match_host(req_host, &NoopReplacer),
        }
    }

    fn provision(&mut self) -> Result<(), MatcherError> {
        HostMatcher::provision(self)
    }
}
