use serde::{Deserialize, Serialize};

/// 服务端上报的任务状态快照，字段缺失时取默认值
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskSnapshot {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub progress: u32,
    pub files_count: Option<u64>,
    pub started_at: Option<String>,
    pub completed_at: Option<String>,
    pub url: Option<String>,
    pub error: Option<String>,
}

impl TaskSnapshot {
    pub fn state(&self) -> TaskState {
        TaskState::parse(&self.status)
    }
}

/// 任务生命周期状态，服务端给出未识别的值时退回 Unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    Running,
    Completed,
    Error,
    Unknown,
}

impl TaskState {
    pub fn parse(s: &str) -> Self {
        match s {
            "pending" => TaskState::Pending,
            "running" => TaskState::Running,
            "completed" => TaskState::Completed,
            "error" => TaskState::Error,
            _ => TaskState::Unknown,
        }
    }

    /// 终态之后不会再有进度更新
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskState::Completed | TaskState::Error)
    }
}

// --------------------------------------------------------------------

/// 网页抓取选项，随启动请求一起提交
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeOptions {
    pub max_pages: u32,
    pub download_images: bool,
    pub download_css: bool,
    pub download_js: bool,
    pub follow_external_links: bool,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            max_pages: 10,
            download_images: true,
            download_css: true,
            download_js: true,
            follow_external_links: false,
        }
    }
}

/// 视频下载选项
#[derive(Debug, Clone, Serialize)]
pub struct MediaOptions {
    pub quality: String,
    pub audio_only: bool,
    pub is_playlist: bool,
}

impl Default for MediaOptions {
    fn default() -> Self {
        Self {
            quality: "best".to_string(),
            audio_only: false,
            is_playlist: false,
        }
    }
}

/// 启动任务的请求体
#[derive(Debug, Serialize)]
pub struct StartTaskRequest<'a, T: Serialize> {
    pub url: &'a str,
    pub options: &'a T,
}

/// 启动任务的应答
#[derive(Debug, Clone, Deserialize)]
pub struct StartTaskResponse {
    pub task_id: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}

/// 取消任务的应答
#[derive(Debug, Clone, Deserialize)]
pub struct CancelResponse {
    pub success: bool,
}
