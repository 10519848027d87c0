use std::path::Path;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

use crate::settings::{LogFormat, LogOutput, LogSettings};

/// 설정에 따라 전역 구독자를 초기화합니다.
///
/// 파일 출력은 비동기로 기록하므로 반환된 가드를 프로세스가 끝날 때까지
/// 잡고 있어야 남은 버퍼가 파일에 쓰입니다. stdout 출력이면 `None`입니다.
/// 프로세스당 한 번만 호출할 수 있습니다.
pub fn init_logging(settings: &LogSettings) -> Option<WorkerGuard> {
    let filter = EnvFilter::from_default_env().add_directive(settings.level.into());
    let timer = UtcTime::rfc_3339();

    match (&settings.format, &settings.output) {
        (LogFormat::Text, LogOutput::Stdout) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_timer(timer)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .init();
            None
        }
        (LogFormat::Json, LogOutput::Stdout) => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_timer(timer)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .init();
            None
        }
        (LogFormat::Text, LogOutput::File(path)) => {
            let (writer, guard) = file_writer(path);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_timer(timer)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        (LogFormat::Json, LogOutput::File(path)) => {
            let (writer, guard) = file_writer(path);
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_timer(timer)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_writer(writer)
                .init();
            Some(guard)
        }
    }
}

fn file_writer(path: &str) -> (NonBlocking, WorkerGuard) {
    let path = Path::new(path);
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().unwrap_or_else(|| "proxy.log".as_ref());
    tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name))
}
