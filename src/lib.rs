//! Rproxy Matchers는 컨테이너 라벨로 선언한 호스트 매칭 규칙을 평가하는 라이브러리입니다.
//!
//! # 주요 기능
//!
//! - 정확한 이름, `*` 와일드카드 세그먼트, `{...}` 플레이스홀더 호스트 패턴
//! - 패턴이 많은 매처의 이진 탐색 빠른 경로
//! - 라벨 맵에서 매처 묶음을 만드는 빌더
//!
//! # 예제
//!
//! ```
//! use std::collections::HashMap;
//! use rproxy_matchers::matcher::{MatcherBuilder, MatchRequest};
//! use rproxy_matchers::settings::MatcherSettings;
//!
//! let builder = MatcherBuilder::new(MatcherSettings::default());
//!
//! let mut labels = HashMap::new();
//! labels.insert(
//!     "rproxy.hosts".to_string(),
//!     "example.com,*.api.example.com".to_string(),
//! );
//! let matchers = builder.build(&labels);
//!
//! let req = hyper::Request::builder()
//!     .uri("/")
//!     .header("Host", "v1.api.example.com")
//!     .body(())
//!     .unwrap();
//! assert!(matchers.matches(&MatchRequest::new(&req)));
//! ```
//!
//! # 플레이스홀더
//!
//! 패턴의 `{...}` 토큰은 평가할 때마다 치환기로 해석되므로 재시작 없이
//! 요청 문맥에 따라 다른 호스트와 일치할 수 있습니다.
//!
//! ```
//! use rproxy_matchers::matcher::HostMatcher;
//! use rproxy_matchers::replacer::TableReplacer;
//!
//! let mut matcher = HostMatcher::from_label_value("{vhost.primary}");
//! matcher.provision().unwrap();
//!
//! let mut replacer = TableReplacer::new();
//! replacer.set("vhost.primary", "shop.example.com");
//!
//! assert!(matcher.match_host("shop.example.com", &replacer));
//! assert!(!matcher.match_host("other.example.com", &replacer));
//! ```

pub mod logging;
pub mod matcher;
pub mod replacer;
pub mod settings;
