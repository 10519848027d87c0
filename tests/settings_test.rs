use rproxy_matchers::settings::Settings;
use std::sync::Once;

#[cfg(test)]
mod tests {
    use super::*;
    use rproxy_matchers::settings::{LogFormat, LogOutput, SettingsError};
    use serial_test::serial;  // 테스트 격리를 위해 추가

    static INIT: Once = Once::new();

    fn setup() {
        INIT.call_once(|| {
            cleanup_env();
        });
    }

    fn teardown() {
        cleanup_env();
    }

    // 테스트 전후 환경변수 초기화를 위한 헬퍼 함수
    fn cleanup_env() {
        std::env::remove_var("PROXY_LABEL_PREFIX");
        std::env::remove_var("PROXY_MATCHER_LARGE_THRESHOLD");
        std::env::remove_var("PROXY_LOG_FORMAT");
        std::env::remove_var("PROXY_LOG_LEVEL");
        std::env::remove_var("PROXY_LOG_OUTPUT");
        std::env::remove_var("PROXY_CONFIG_FILE");
    }

    // 테스트용 임시 TOML 파일 생성 헬퍼
    fn create_test_toml(content: &str) -> (String, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("test_config.toml");
        std::fs::write(&file_path, content).unwrap();
        (file_path.to_str().unwrap().to_string(), dir)
    }

    #[test]
    #[serial]
    fn test_settings_defaults() {
        setup();

        let settings = Settings::from_env().unwrap();

        assert_eq!(settings.matcher.label_prefix, "rproxy.");
        assert_eq!(settings.matcher.large_threshold, 100);
        assert_eq!(settings.matcher.hosts_label(), "rproxy.hosts");
        assert_eq!(settings.logging.level, tracing::Level::INFO);
        assert_eq!(settings.logging.format, LogFormat::Text);
        assert_eq!(settings.logging.output, LogOutput::Stdout);
        teardown();
    }

    #[test]
    #[serial]
    fn test_settings_from_env() {
        setup();

        // 환경변수 설정
        std::env::set_var("PROXY_LABEL_PREFIX", "custom.");
        std::env::set_var("PROXY_MATCHER_LARGE_THRESHOLD", "250");
        std::env::set_var("PROXY_LOG_FORMAT", "json");
        std::env::set_var("PROXY_LOG_LEVEL", "debug");
        std::env::set_var("PROXY_LOG_OUTPUT", "/var/log/proxy.log");

        // 설정 로드 및 검증
        let settings = Settings::from_env().unwrap();

        assert_eq!(settings.matcher.label_prefix, "custom.");
        assert_eq!(settings.matcher.large_threshold, 250);
        assert_eq!(settings.matcher.hosts_label(), "custom.hosts");
        assert_eq!(settings.logging.format, LogFormat::Json);
        assert_eq!(settings.logging.level, tracing::Level::DEBUG);
        assert_eq!(
            settings.logging.output,
            LogOutput::File("/var/log/proxy.log".to_string())
        );

        teardown();
    }

    #[test]
    #[serial]
    fn test_settings_validation() {
        setup();

        // 1. '.'으로 끝나지 않는 라벨 접두사
        std::env::set_var("PROXY_LABEL_PREFIX", "invalid-prefix");
        let result = Settings::from_env();
        assert!(result.is_err());
        if let Err(e) = result {
            assert!(e.to_string().contains("라벨 접두사는 '.'으로 끝나야 합니다"));
        }
        teardown();

        // 2. 너무 긴 라벨 접두사
        std::env::set_var("PROXY_LABEL_PREFIX", "a".repeat(1000) + ".");
        let result = Settings::from_env();
        assert!(result.is_err(), "너무 긴 라벨 접두사는 허용되지 않아야 함");
        teardown();

        // 3. 숫자가 아닌 임계값
        std::env::set_var("PROXY_MATCHER_LARGE_THRESHOLD", "many");
        let result = Settings::from_env();
        assert!(result.is_err(), "임계값은 숫자여야 함");
        teardown();

        // 4. 음수 임계값
        std::env::set_var("PROXY_MATCHER_LARGE_THRESHOLD", "-1");
        let result = Settings::from_env();
        assert!(result.is_err(), "음수 임계값은 허용되지 않아야 함");
        teardown();

        // 5. 잘못된 로그 레벨
        std::env::set_var("PROXY_LOG_LEVEL", "invalid_level");
        let result = Settings::from_env();
        assert!(result.is_err());
        teardown();
    }

    #[test]
    #[serial]
    fn test_threshold_zero_is_allowed() {
        setup();

        // 0이면 모든 매처가 대형으로 분류된다
        std::env::set_var("PROXY_MATCHER_LARGE_THRESHOLD", "0");
        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.matcher.large_threshold, 0);

        teardown();
    }

    #[test]
    #[serial]
    fn test_settings_from_toml() {
        setup();

        let toml_content = r#"
            [matcher]
            label_prefix = "test."
            large_threshold = 50

            [logging]
            format = "json"
            level = "debug"
            output = "/tmp/test.log"
        "#;

        let (file_path, _temp_dir) = create_test_toml(toml_content);
        let settings = Settings::from_toml_file(&file_path).unwrap();

        assert_eq!(settings.matcher.label_prefix, "test.");
        assert_eq!(settings.matcher.large_threshold, 50);
        assert_eq!(settings.logging.format, LogFormat::Json);
        assert_eq!(settings.logging.level, tracing::Level::DEBUG);
        assert_eq!(
            settings.logging.output,
            LogOutput::File("/tmp/test.log".to_string())
        );
        teardown();
    }

    #[test]
    #[serial]
    fn test_toml_missing_sections_use_defaults() {
        setup();

        let (file_path, _temp_dir) = create_test_toml("");
        let settings = Settings::from_toml_file(&file_path).unwrap();

        assert_eq!(settings.matcher.label_prefix, "rproxy.");
        assert_eq!(settings.matcher.large_threshold, 100);
        assert_eq!(settings.logging.output, LogOutput::Stdout);
        teardown();
    }

    #[test]
    #[serial]
    fn test_toml_is_validated() {
        setup();

        let toml_content = r#"
            [matcher]
            label_prefix = "noperiod"
        "#;

        let (file_path, _temp_dir) = create_test_toml(toml_content);
        let result = Settings::from_toml_file(&file_path);
        assert!(result.is_err(), "파일 설정도 검증을 거쳐야 함");
        teardown();
    }

    #[test]
    #[serial]
    fn test_load_prefers_config_file() {
        setup();

        let toml_content = r#"
            [matcher]
            label_prefix = "file."
        "#;
        let (file_path, _temp_dir) = create_test_toml(toml_content);

        // 파일과 환경변수가 모두 있으면 파일이 이긴다
        std::env::set_var("PROXY_CONFIG_FILE", &file_path);
        std::env::set_var("PROXY_LABEL_PREFIX", "env.");

        let settings = Settings::load().unwrap();
        assert_eq!(settings.matcher.label_prefix, "file.");
        teardown();
    }

    #[test]
    #[serial]
    fn test_missing_config_file() {
        setup();

        std::env::set_var("PROXY_CONFIG_FILE", "/nonexistent/config.toml");
        let result = Settings::load();

        assert!(matches!(
            result.unwrap_err(),
            SettingsError::FileError { .. }
        ));
        teardown();
    }

    #[test]
    #[serial]
    fn test_invalid_toml_syntax() {
        setup();

        let (file_path, _temp_dir) = create_test_toml("matcher = [ broken");
        let result = Settings::from_toml_file(&file_path);

        assert!(matches!(
            result.unwrap_err(),
            SettingsError::ParseError { .. }
        ));
        teardown();
    }
}
