use scrape_monitor::common::api::client::ScraperClient;
use scrape_monitor::common::api::models::task::{TaskSnapshot, TaskState};
use scrape_monitor::common::logger::Notifier;
use scrape_monitor::common::prefs::{PREFS_FILE, Prefs};
use scrape_monitor::common::utils;
use scrape_monitor::monitor::TaskMonitor;
use scrape_monitor::monitor::display::status_message;

fn create_test_client() -> ScraperClient {
    // 指向一个不存在的本地端口，测试里不会真的发请求
    ScraperClient::new("http://127.0.0.1:9").unwrap()
}

fn create_test_monitor() -> TaskMonitor {
    TaskMonitor::new(create_test_client(), Notifier::new(false))
}

fn snapshot(status: &str, progress: u32) -> TaskSnapshot {
    TaskSnapshot {
        status: status.to_string(),
        progress,
        ..Default::default()
    }
}

#[test]
fn test_progress_position_matches_snapshot() {
    let mut monitor = create_test_monitor();
    monitor.show_progress("web_1754300000");

    // 0 到 100 范围内，进度条位置和快照里的数值一致
    for progress in [0u32, 1, 47, 99, 100] {
        monitor.update_progress(&snapshot("running", progress));
        assert_eq!(monitor.progress_position(), Some(progress as u64));
    }

    // 超出范围的值收敛到 100
    monitor.update_progress(&snapshot("running", 250));
    assert_eq!(monitor.progress_position(), Some(100));

    monitor.hide_progress();
    println!("✅ 进度条位置与快照一致");
}

#[test]
fn test_status_presentations() {
    // 完成态是成功样式，错误态是失败样式
    assert!(status_message(TaskState::Completed, 100).contains("下载完成"));
    assert!(status_message(TaskState::Error, 30).contains("下载出错"));
    assert!(status_message(TaskState::Running, 47).contains("47%"));

    // 没见过的状态一律退回等待文案
    assert_eq!(TaskState::parse("not_found"), TaskState::Unknown);
    assert_eq!(status_message(TaskState::Unknown, 0), "等待中...");
    assert_eq!(status_message(TaskState::Pending, 0), "等待中...");

    assert!(TaskState::Completed.is_terminal());
    assert!(TaskState::Error.is_terminal());
    assert!(!TaskState::Running.is_terminal());
}

#[test]
fn test_elapsed_time_formatting() {
    assert_eq!(utils::format_elapsed_secs(45), "45s");
    assert_eq!(utils::format_elapsed_secs(125), "2m 5s");
    assert_eq!(utils::format_elapsed_secs(3725), "1h 2m");

    // 负数按 0 处理
    assert_eq!(utils::format_elapsed_secs(-3), "0s");
}

#[tokio::test]
async fn test_cancel_without_active_task() {
    let mut monitor = create_test_monitor();

    // 没有进行中的任务时不发网络请求，面板也保持收起
    monitor.cancel_current().await;

    assert!(monitor.current_task_id().is_none());
    assert!(!monitor.is_showing());
    assert!(monitor.is_ready());
    println!("✅ 无任务时取消不发请求");
}

#[tokio::test]
async fn test_completion_resets_state() {
    let mut monitor = create_test_monitor();
    monitor.show_progress("youtube_1754300000");
    assert_eq!(monitor.current_task_id(), Some("youtube_1754300000"));
    assert!(monitor.is_showing());
    assert!(!monitor.is_ready());

    let done = TaskSnapshot {
        status: "completed".to_string(),
        progress: 100,
        files_count: Some(3),
        url: Some("https://example.com".to_string()),
        completed_at: Some("2026-08-05T10:30:00.123456".to_string()),
        ..Default::default()
    };
    monitor.show_completion("youtube_1754300000", &done);

    // 收尾后任务标识清空，两个提交入口都恢复可用
    assert!(monitor.current_task_id().is_none());
    assert!(!monitor.is_showing());
    assert!(monitor.is_ready());
    println!("✅ 完成收尾后状态复位");
}

#[test]
fn test_dark_mode_toggle_and_persistence() {
    let dir = std::env::temp_dir().join(format!("scrapemon_prefs_test_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let mut prefs = Prefs::load(&dir);
    let original = prefs.dark_mode;

    // 连续切换两次回到原状
    prefs.toggle_dark_mode(&dir).unwrap();
    prefs.toggle_dark_mode(&dir).unwrap();
    assert_eq!(prefs.dark_mode, original);

    // 文件里存了 true，重新加载后仍然是暗色模式
    std::fs::write(dir.join(PREFS_FILE), r#"{"dark_mode": true}"#).unwrap();
    let reloaded = Prefs::load(&dir);
    assert!(reloaded.dark_mode);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_url_helpers() {
    // 缺少协议时默认补 https
    let url = utils::validate_url("example.com/page").unwrap();
    assert_eq!(url.scheme(), "https");
    assert_eq!(url.host_str(), Some("example.com"));

    assert!(utils::validate_url("").is_err());

    let youtube = utils::validate_url("https://www.youtube.com/watch?v=abc123").unwrap();
    assert!(utils::is_youtube_url(&youtube));
    let short = utils::validate_url("https://youtu.be/abc123").unwrap();
    assert!(utils::is_youtube_url(&short));
    let plain = utils::validate_url("https://example.com").unwrap();
    assert!(!utils::is_youtube_url(&plain));

    assert_eq!(
        utils::extract_youtube_id("https://youtu.be/dQw4w9WgXcQ"),
        Some("dQw4w9WgXcQ".to_string())
    );
    assert_eq!(
        utils::extract_youtube_id("https://www.youtube.com/embed/dQw4w9WgXcQ"),
        Some("dQw4w9WgXcQ".to_string())
    );
    assert_eq!(utils::extract_youtube_id("https://example.com"), None);
}

#[test]
fn test_format_helpers() {
    assert_eq!(utils::format_file_size(0), "0 B");
    assert_eq!(utils::format_file_size(1536), "1.5 KB");

    // 时间戳缺失或无法解析时显示 N/A
    assert_eq!(utils::format_timestamp(None), "N/A");
    assert_eq!(utils::format_timestamp(Some("垃圾数据")), "N/A");
    assert_eq!(
        utils::format_timestamp(Some("2026-08-05T10:30:00.123456")),
        "2026-08-05 10:30"
    );

    assert_eq!(utils::elapsed_since(None, chrono::Local::now()), "N/A");
}

#[test]
fn test_snapshot_field_defaults() {
    // progress 缺失时默认 0，其余可选字段默认 None
    let parsed: TaskSnapshot = serde_json::from_str(r#"{"status": "running"}"#).unwrap();
    assert_eq!(parsed.progress, 0);
    assert_eq!(parsed.files_count, None);
    assert_eq!(parsed.state(), TaskState::Running);

    // 服务端查不到任务时给出 not_found，按未知状态处理
    let missing: TaskSnapshot = serde_json::from_str(r#"{"status": "not_found"}"#).unwrap();
    assert_eq!(missing.state(), TaskState::Unknown);
}
