//! 패턴 문자열 안의 `{...}` 플레이스홀더 토큰을 치환하는 서비스를 정의합니다.
//!
//! 매처는 평가할 때마다 치환기를 호출하므로 구현은 동기적이고 부수 효과가
//! 없어야 합니다. 해석할 수 없는 토큰은 빈 문자열로 바뀌고, 닫히지 않은
//! `{`는 문자 그대로 남습니다.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

/// 플레이스홀더 치환 서비스입니다.
///
/// 프록시 프레임워크가 요청 문맥(헤더, 환경 등)으로 구현해 요청 확장에
/// 실어 보내는 것이 일반적입니다. 매처 입장에서는 불투명한 서비스입니다.
pub trait Replacer: Send + Sync {
    /// 입력의 모든 `{...}` 토큰을 치환한 문자열을 반환합니다.
    ///
    /// 토큰이 하나도 없으면 입력을 빌려 그대로 돌려줘도 됩니다.
    fn replace_all<'a>(&self, input: &'a str) -> Cow<'a, str>;
}

/// 요청 확장(Extensions)에 실어 나르는 공유 치환기 타입입니다.
pub type SharedReplacer = Arc<dyn Replacer>;

/// 아무것도 치환하지 않는 치환기입니다.
///
/// 치환기가 실리지 않은 요청의 기본값으로 쓰입니다. 플레이스홀더 패턴은
/// 문자 그대로 비교되므로 실제 호스트와는 일치하지 않게 됩니다.
#[derive(Debug, Clone, Default)]
pub struct NoopReplacer;

impl Replacer for NoopReplacer {
    fn replace_all<'a>(&self, input: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(input)
    }
}

/// 키/값 테이블 기반 치환기입니다.
#[derive(Debug, Clone, Default)]
pub struct TableReplacer {
    values: HashMap<String, String>,
}

impl TableReplacer {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// 토큰 값을 등록합니다. 같은 키는 덮어씁니다.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

impl Replacer for TableReplacer {
    fn replace_all<'a>(&self, input: &'a str) -> Cow<'a, str> {
        replace_tokens(input, |key| self.values.get(key).cloned())
    }
}

/// `{env.VAR}` 토큰을 프로세스 환경 변수로 치환하는 치환기입니다.
#[derive(Debug, Clone, Default)]
pub struct EnvReplacer;

impl Replacer for EnvReplacer {
    fn replace_all<'a>(&self, input: &'a str) -> Cow<'a, str> {
        replace_tokens(input, |key| {
            key.strip_prefix("env.")
                .and_then(|name| std::env::var(name).ok())
        })
    }
}

/// `{...}` 토큰을 왼쪽부터 스캔하며 resolve 결과로 치환합니다.
///
/// 토큰이 없으면 할당 없이 입력을 빌려 돌려줍니다.
fn replace_tokens<'a, F>(input: &'a str, resolve: F) -> Cow<'a, str>
where
    F: Fn(&str) -> Option<String>,
{
    if !input.contains('{') {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        match rest[start..].find('}') {
            Some(offset) => {
                let key = &rest[start + 1..start + offset];
                // 알 수 없는 토큰은 빈 문자열로 대체
                if let Some(value) = resolve(key) {
                    out.push_str(&value);
                }
                rest = &rest[start + offset + 1..];
            }
            None => {
                // 닫히지 않은 중괄호는 그대로 남긴다
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}
