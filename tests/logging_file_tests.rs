use loggable::{Context, LineFormat, LogCategory, LogFileNamer, RetentionSweeper, Severity};
use serde::Deserialize;
use std::fs::File;
use time::macros::date;

fn touch(dir: &std::path::Path, name: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    File::create(&path).expect("create file");
    path
}

#[test]
fn test_sweep_deletes_only_files_before_cutoff() {
    let dir = tempfile::tempdir().expect("tempdir");
    let category = LogCategory::new(dir.path(), "app", "app");

    let deleted = touch(dir.path(), "app-2024-06-03.log");
    let kept = [
        touch(dir.path(), "app-2024-06-05.log"),
        touch(dir.path(), "app-2024-06-09.log"),
        touch(dir.path(), "other-2024-06-01.log"),
        touch(dir.path(), "notes.txt"),
    ];

    let report = RetentionSweeper::new(&category)
        .sweep_with_report(date!(2024 - 06 - 10))
        .expect("sweep");

    assert_eq!(report.deleted, vec![deleted.clone()]);
    assert!(!deleted.exists());
    for path in &kept {
        assert!(path.exists(), "{} should survive", path.display());
    }

    // Nothing left to do on a second pass
    let again = RetentionSweeper::new(&category)
        .sweep(date!(2024 - 06 - 10))
        .expect("sweep");
    assert_eq!(again, 0);
}

#[test]
fn test_sweep_over_a_month_of_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let category = LogCategory::new(dir.path(), "access", "http").with_max_log_days(7);
    let namer = LogFileNamer::new(&category);
    let today = date!(2024 - 03 - 05);

    let mut day = date!(2024 - 02 - 01);
    while day <= today {
        File::create(namer.file_path(day).unwrap()).unwrap();
        day = day.next_day().unwrap();
    }

    let sweeper = RetentionSweeper::new(&category);
    let cutoff = sweeper.cutoff(today);
    assert_eq!(cutoff, date!(2024 - 02 - 27));

    let report = sweeper.sweep_with_report(today).expect("sweep");
    // 2024 is a leap year: Feb 1..=26 is 26 days
    assert_eq!(report.deleted_count(), 26);

    let mut remaining: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    remaining.sort();
    assert_eq!(remaining.first().unwrap(), "access-2024-02-27.log");
    assert_eq!(remaining.last().unwrap(), "access-2024-03-05.log");
    assert_eq!(remaining.len(), 8);
}

#[test]
fn test_logger_writes_to_todays_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let category = LogCategory::new(dir.path(), "errors", "errors");

    let logger = category.logger().expect("logger");
    logger.error("file-logging-test: no-ansi");
    logger.log(
        Severity::Critical,
        "db down",
        &Context::new().with("error_code", 500),
    );

    let expected = LogFileNamer::new(&category).today_path().unwrap();
    assert_eq!(logger.path().unwrap(), expected);

    let content = std::fs::read_to_string(&expected).expect("read log file");
    assert!(content.contains("errors.ERROR: file-logging-test: no-ansi"));
    assert!(content.contains("errors.CRITICAL: db down {error_code=500}"));
    assert!(!content.contains("\x1b"), "ANSI escape found in log file");
}

#[test]
fn test_independent_loggers_append_to_same_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let category = LogCategory::new(dir.path(), "app", "app").with_format(LineFormat {
        timestamp: false,
        ..LineFormat::default()
    });

    let first = category.logger().expect("first logger");
    let second = category.logger().expect("second logger");
    first.info("one");
    second.info("two");
    first.info("three");

    let content = std::fs::read_to_string(first.path().unwrap()).unwrap();
    assert_eq!(content, "app.INFO: one\napp.INFO: two\napp.INFO: three\n");
}

#[test]
fn test_sweep_never_removes_todays_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let category = LogCategory::new(dir.path(), "app", "app").with_max_log_days(0);

    let logger = category.logger().expect("logger");
    logger.info("still here");
    let old = touch(dir.path(), "app-2001-01-01.log");

    assert_eq!(category.clear_old_logs().expect("sweep"), 1);
    assert!(!old.exists());
    assert!(logger.path().unwrap().exists());

    logger.info("and writable");
    let content = std::fs::read_to_string(logger.path().unwrap()).unwrap();
    assert!(content.contains("and writable"));
}

#[test]
fn test_categories_from_toml() {
    #[derive(Deserialize)]
    struct Config {
        categories: Vec<LogCategory>,
    }

    let dir = tempfile::tempdir().expect("tempdir");
    let toml = format!(
        r#"
[[categories]]
directory = {dir:?}
file_prefix = "errors"
logger_name = "errors"
max_log_days = 30

[[categories]]
directory = {dir:?}
file_prefix = "access"
extension = "txt"
logger_name = "http"
"#,
        dir = dir.path().to_str().unwrap()
    );

    let config: Config = toml::from_str(&toml).expect("parse config");
    assert_eq!(config.categories.len(), 2);

    for category in &config.categories {
        category.log("notice", "configured").expect("log");
    }

    let errors = LogFileNamer::new(&config.categories[0]).today_path().unwrap();
    let access = LogFileNamer::new(&config.categories[1]).today_path().unwrap();
    assert!(errors.to_str().unwrap().ends_with(".log"));
    assert!(access.to_str().unwrap().ends_with(".txt"));
    assert!(std::fs::read_to_string(&errors).unwrap().contains("errors.NOTICE: configured"));
    assert!(std::fs::read_to_string(&access).unwrap().contains("http.NOTICE: configured"));
}
