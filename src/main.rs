use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use tracing::{error, info, warn};

use scrape_monitor::cli::Cli;
use scrape_monitor::common::api::client::ScraperClient;
use scrape_monitor::common::api::models::task::{MediaOptions, ScrapeOptions};
use scrape_monitor::common::logger::{AlertKind, Notifier};
use scrape_monitor::common::prefs::Prefs;
use scrape_monitor::common::utils;
use scrape_monitor::monitor::error::MonitorError;
use scrape_monitor::monitor::{MonitorOutcome, TaskMonitor};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

// 兜底的崩溃处理，保证用户至少能看到一条提示
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        default_hook(info);
        eprintln!("{} 发生意外错误，程序即将退出", "✗".red().bold());
    }));
}

/// 提交任务并监控到结束
async fn run(args: &Cli, raw_url: &str, notifier: &Notifier) -> std::result::Result<(), MonitorError> {
    let url = utils::validate_url(raw_url)
        .map_err(|e| MonitorError::InvalidUrl(format!("{} ({})", raw_url, e)))?;

    let client = ScraperClient::new(&args.server)?;
    let mut monitor = TaskMonitor::new(client.clone(), notifier.clone());

    // YouTube 链接走视频下载入口，其余走网页抓取入口
    let started = if utils::is_youtube_url(&url) {
        let options = MediaOptions {
            quality: args.quality.clone(),
            audio_only: args.audio_only,
            is_playlist: args.playlist,
        };
        client.start_media_download(url.as_str(), &options).await?
    } else {
        let options = ScrapeOptions {
            max_pages: args.max_pages,
            download_images: args.download_images,
            download_css: args.download_css,
            download_js: args.download_js,
            follow_external_links: args.follow_external_links,
        };
        client.start_web_scraping(url.as_str(), &options).await?
    };

    info!("任务已创建: {}", started.task_id);
    notifier.toast(AlertKind::Info, format!("任务已提交: {}", started.task_id));

    let outcome = monitor
        .run(&client, &started.task_id, Duration::from_secs(args.poll_interval))
        .await?;

    // 任务成功结束后按需把结果拉回本地
    if outcome == MonitorOutcome::Completed && args.fetch {
        let (path, size) = client.fetch_artifact(&started.task_id, &args.output_dir).await?;
        notifier.success(format!(
            "结果已保存到 {} ({})",
            path.display(),
            utils::format_file_size(size)
        ));
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    install_panic_hook();

    let args = Cli::parse();

    // 偏好在启动时读取一次
    let mut prefs = Prefs::load(&args.prefs_dir);
    let mut theme_switched = None;
    if args.toggle_theme {
        theme_switched = Some(prefs.toggle_dark_mode(&args.prefs_dir)?);
    }

    let notifier = Notifier::new(prefs.dark_mode);
    if let Some(dark) = theme_switched {
        notifier.info(if dark {
            "已切换为暗色模式"
        } else {
            "已切换为亮色模式"
        });
    }

    let Some(raw_url) = args.url.as_deref() else {
        if !args.toggle_theme {
            warn!("未提供链接，无事可做");
        }
        return Ok(());
    };

    info!("开始监控任务: {}", raw_url);

    // 这里的失败都不算致命，给一条通用提示后退出
    if let Err(e) = run(&args, raw_url, &notifier).await {
        error!("运行失败: {}", e);
        notifier.error("发生意外错误，请稍后重试");
        std::process::exit(1);
    }

    Ok(())
}
