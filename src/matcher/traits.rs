use hyper::http::request::Parts;
use hyper::http::Extensions;
use hyper::{header, HeaderMap, Request, Uri};

use crate::matcher::error::MatcherError;
use crate::replacer::SharedReplacer;

/// 매처가 보는 요청의 모습입니다.
///
/// 매처는 바디를 읽지 않으므로 바디 타입에 무관하게 헤더, URI, 확장만
/// 빌려서 들고 다닙니다. [`Request`]나 [`Parts`] 어느 쪽에서도 만들 수
/// 있습니다.
#[derive(Debug, Clone, Copy)]
pub struct MatchRequest<'a> {
    headers: &'a HeaderMap,
    uri: &'a Uri,
    extensions: &'a Extensions,
}

impl<'a> MatchRequest<'a> {
    pub fn new<B>(req: &'a Request<B>) -> Self {
        Self {
            headers: req.headers(),
            uri: req.uri(),
            extensions: req.extensions(),
        }
    }

    pub fn from_parts(parts: &'a Parts) -> Self {
        Self {
            headers: &parts.headers,
            uri: &parts.uri,
            extensions: &parts.extensions,
        }
    }

    pub fn headers(&self) -> &'a HeaderMap {
        self.headers
    }

    pub fn uri(&self) -> &'a Uri {
        self.uri
    }

    /// 요청의 호스트 이름입니다.
    ///
    /// Host 헤더를 먼저 보고, 없으면 요청 URI의 authority(절대 형식 요청과
    /// HTTP/2의 `:authority`)를 그대로 씁니다. 포트는 떼지 않고 받은
    /// 그대로 돌려줍니다. `example.com:8080`을 받으려면 패턴에도 포트를
    /// 적어야 합니다. 둘 다 없으면 `None`입니다.
    pub fn host(&self) -> Option<&'a str> {
        self.headers
            .get(header::HOST)
            .and_then(|value| value.to_str().ok())
            .or_else(|| self.uri.authority().map(|authority| authority.as_str()))
    }

    /// 요청 확장에 심어 둔 치환기입니다. 업스트림 설정 단계에서
    /// [`SharedReplacer`]를 넣어 두면 매처가 플레이스홀더 해석에 씁니다.
    pub fn replacer(&self) -> Option<&'a SharedReplacer> {
        self.extensions.get::<SharedReplacer>()
    }
}

/// 요청을 받아들일지 결정하는 매처입니다.
///
/// 구현체는 생성 후 [`provision`](RequestMatcher::provision)을 한 번 거친
/// 뒤에는 불변이어야 하며, 그래야 여러 요청을 동시에 평가할 수 있습니다.
pub trait RequestMatcher: Send + Sync {
    /// 요청이 이 매처와 일치하면 true를 반환합니다.
    fn matches(&self, req: &MatchRequest<'_>) -> bool;

    /// 평가 전에 매처를 검증하고 준비합니다. 기본 구현은 아무것도 하지
    /// 않으므로 준비할 것이 없는 매처는 그대로 두면 됩니다.
    fn provision(&mut self) -> Result<(), MatcherError> {
        Ok(())
    }
}
