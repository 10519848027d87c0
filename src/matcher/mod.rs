//! 요청 매칭을 위한 핵심 기능을 제공하는 모듈입니다.

mod builder;
mod error;
mod host;
mod set;
mod traits;

pub use builder::{produce_host_matcher, MatcherBuilder, MatcherProducer, LABEL_HOSTS};
pub use error::MatcherError;
pub use host::{HostMatcher, DEFAULT_LARGE_THRESHOLD};
pub use set::MatcherSet;
pub use traits::{MatchRequest, RequestMatcher};
