use crate::matcher::error::MatcherError;
use crate::matcher::traits::{MatchRequest, RequestMatcher};

/// 매처 묶음입니다. 모든 매처가 일치해야 요청이 일치합니다 (AND).
///
/// 빈 묶음은 모든 요청과 일치합니다. 매칭 라벨이 하나도 없는 컨테이너는
/// 제한 없이 트래픽을 받는다는 뜻입니다.
#[derive(Default)]
pub struct MatcherSet {
    matchers: Vec<Box<dyn RequestMatcher>>,
}

impl MatcherSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, matcher: Box<dyn RequestMatcher>) {
        self.matchers.push(matcher);
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    pub fn matches(&self, req: &MatchRequest<'_>) -> bool {
        self.matchers.iter().all(|matcher| matcher.matches(req))
    }
}

impl std::fmt::Debug for MatcherSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatcherSet")
            .field("len", &self.matchers.len())
            .finish()
    }
}

// 묶음 자체도 매처이므로 중첩해서 조합할 수 있다
impl RequestMatcher for MatcherSet {
    fn matches(&self, req: &MatchRequest<'_>) -> bool {
        MatcherSet::matches(self, req)
    }

    fn provision(&mut self) -> Result<(), MatcherError> {
        for matcher in &mut self.matchers {
            matcher.provision()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::Request;

    struct FixedMatcher(bool);

    impl RequestMatcher for FixedMatcher {
        fn matches(&self, _req: &MatchRequest<'_>) -> bool {
            self.0
        }
    }

    fn empty_request() -> Request<()> {
        Request::builder().uri("/").body(()).unwrap()
    }

    #[test]
    fn test_empty_set_matches_everything() {
        let set = MatcherSet::new();
        let req = empty_request();
        assert!(set.matches(&MatchRequest::new(&req)));
    }

    #[test]
    fn test_all_matchers_must_agree() {
        let req = empty_request();

        let mut set = MatcherSet::new();
        set.push(Box::new(FixedMatcher(true)));
        set.push(Box::new(FixedMatcher(true)));
        assert!(set.matches(&MatchRequest::new(&req)));

        set.push(Box::new(FixedMatcher(false)));
        assert!(!set.matches(&MatchRequest::new(&req)));
    }
}
