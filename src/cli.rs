use clap::Parser;
use std::path::PathBuf;

/// 抓取任务进度监控器
#[derive(Parser, Debug)]
#[command(name = "scrapemon")]
#[command(version = "0.1.0")]
#[command(about = "一个简单的抓取与下载任务进度监控工具", long_about = None)]
pub struct Cli {
    /// 目标链接 (YouTube 链接走视频下载，其余走网页抓取)
    #[arg(long, value_name = "URL")]
    #[arg(value_hint = clap::ValueHint::Url)]
    pub url: Option<String>,

    /// 服务端地址
    #[arg(long, value_name = "SERVER")]
    #[arg(default_value = "http://127.0.0.1:5000")]
    pub server: String,

    /// 状态轮询间隔 (秒)
    #[arg(long, value_name = "SECONDS")]
    #[arg(default_value_t = 2)]
    pub poll_interval: u64,

    /// 抓取的最大页面数
    #[arg(long, value_name = "PAGES")]
    #[arg(default_value_t = 10)]
    pub max_pages: u32,

    #[arg(long, value_name = "是否抓取图片", default_value_t = true)]
    pub download_images: bool,
    #[arg(long, value_name = "是否抓取样式表", default_value_t = true)]
    pub download_css: bool,
    #[arg(long, value_name = "是否抓取脚本", default_value_t = true)]
    pub download_js: bool,
    #[arg(long, value_name = "是否跟随站外链接", default_value_t = false)]
    pub follow_external_links: bool,

    /// 视频质量 (best/worst 或具体清晰度)
    #[arg(long, value_name = "QUALITY")]
    #[arg(default_value = "best")]
    pub quality: String,

    #[arg(long, value_name = "只下载音频", default_value_t = false)]
    pub audio_only: bool,
    #[arg(long, value_name = "按播放列表下载", default_value_t = false)]
    pub playlist: bool,

    /// 任务完成后把结果拉取到本地
    #[arg(long)]
    pub fetch: bool,

    /// 结果保存目录
    #[arg(long, value_name = "DIR")]
    #[arg(default_value = ".")]
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub output_dir: PathBuf,

    /// 偏好设置目录
    #[arg(long, value_name = "DIR")]
    #[arg(default_value = ".")]
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub prefs_dir: PathBuf,

    /// 切换暗色模式并保存
    #[arg(long)]
    pub toggle_theme: bool,
}
