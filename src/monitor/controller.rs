use std::time::Duration;

use tracing::{error, info, warn};

use crate::common::api::client::ScraperClient;
use crate::common::api::models::task::{TaskSnapshot, TaskState};
use crate::common::logger::{AlertKind, Notifier};
use crate::common::utils;
use crate::monitor::display::ProgressPanel;
use crate::monitor::error::MonitorError;
use crate::monitor::poller::StatusSource;

/// 一次监控流程的终态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorOutcome {
    Completed,
    Errored,
    Cancelled,
}

/// 任务监控器。把服务端的状态快照映射到终端界面，
/// 处理取消和收尾。同一时刻最多跟踪一个任务
pub struct TaskMonitor {
    client: ScraperClient,
    notifier: Notifier,
    panel: ProgressPanel,
    current_task_id: Option<String>,
    scrape_ready: bool,
    media_ready: bool,
}

impl TaskMonitor {
    pub fn new(client: ScraperClient, notifier: Notifier) -> Self {
        let panel = ProgressPanel::new(notifier.area().clone());
        Self {
            client,
            notifier,
            panel,
            current_task_id: None,
            scrape_ready: true,
            media_ready: true,
        }
    }

    pub fn current_task_id(&self) -> Option<&str> {
        self.current_task_id.as_deref()
    }

    pub fn is_showing(&self) -> bool {
        self.panel.is_visible()
    }

    /// 两个提交入口是否都已恢复可用
    pub fn is_ready(&self) -> bool {
        self.scrape_ready && self.media_ready
    }

    pub fn progress_position(&self) -> Option<u64> {
        self.panel.position()
    }

    /// 显示进度面板并记下当前任务
    pub fn show_progress(&mut self, task_id: &str) {
        self.scrape_ready = false;
        self.media_ready = false;
        self.current_task_id = Some(task_id.to_string());
        self.panel.show();
    }

    /// 按快照刷新面板
    pub fn update_progress(&self, snapshot: &TaskSnapshot) {
        self.panel.update(snapshot);
    }

    /// 成功收尾：收起面板、提示结果、打印摘要和下载链接
    pub fn show_completion(&mut self, task_id: &str, snapshot: &TaskSnapshot) {
        self.hide_progress();

        let count = snapshot.files_count.unwrap_or(0);
        self.notifier
            .alert(AlertKind::Success, format!("下载完成！共 {} 个文件。", count));

        self.notifier.separator();
        self.notifier.println(format!(
            "  链接: {}",
            snapshot.url.as_deref().unwrap_or("N/A")
        ));
        self.notifier.println(format!("  文件数: {}", count));
        self.notifier.println(format!(
            "  完成时间: {}",
            utils::format_timestamp(snapshot.completed_at.as_deref())
        ));
        self.notifier
            .println(format!("  结果下载: {}", self.client.download_link(task_id)));
        self.notifier.separator();

        self.reset_actions();
    }

    /// 取消当前任务。没有进行中的任务时不发请求，但面板照样收起。
    /// 取消请求失败只记日志，界面一样复位
    pub async fn cancel_current(&mut self) {
        if let Some(task_id) = self.current_task_id.clone() {
            match self.client.cancel_task(&task_id).await {
                Ok(resp) if resp.success => {
                    self.notifier.alert(AlertKind::Warning, "任务已取消");
                }
                Ok(_) => {}
                Err(e) => {
                    error!("取消任务失败: {}", e);
                }
            }
        }

        self.hide_progress();
        self.reset_actions();
    }

    /// 收起面板并丢弃任务标识。任务身份只在这里清除
    pub fn hide_progress(&mut self) {
        self.panel.hide();
        self.current_task_id = None;
    }

    fn reset_actions(&mut self) {
        self.scrape_ready = true;
        self.media_ready = true;
    }

    /// 轮询循环：按固定间隔拉快照刷新界面，到终态或 Ctrl+C 为止
    pub async fn run<S: StatusSource>(
        &mut self,
        source: &S,
        task_id: &str,
        interval: Duration,
    ) -> Result<MonitorOutcome, MonitorError> {
        // 连续失败这么多次就认为服务端已经不可达
        const MAX_POLL_FAILURES: u32 = 10;

        self.show_progress(task_id);
        let mut ticker = tokio::time::interval(interval);
        let mut failures = 0u32;

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("收到中断信号，取消当前任务");
                    self.cancel_current().await;
                    return Ok(MonitorOutcome::Cancelled);
                }
                _ = ticker.tick() => {
                    let snapshot = match source.fetch_status(task_id).await {
                        Ok(s) => {
                            failures = 0;
                            s
                        }
                        Err(e) => {
                            failures += 1;
                            if failures >= MAX_POLL_FAILURES {
                                self.hide_progress();
                                self.reset_actions();
                                return Err(MonitorError::Api(e));
                            }
                            // 单次查询失败不致命，下一轮接着查
                            warn!("获取任务状态失败: {}", e);
                            continue;
                        }
                    };

                    self.update_progress(&snapshot);

                    match snapshot.state() {
                        TaskState::Completed => {
                            self.show_completion(task_id, &snapshot);
                            return Ok(MonitorOutcome::Completed);
                        }
                        TaskState::Error => {
                            let message = snapshot
                                .error
                                .clone()
                                .unwrap_or_else(|| "任务执行失败".to_string());
                            self.notifier.alert(AlertKind::Danger, message);
                            self.hide_progress();
                            self.reset_actions();
                            return Ok(MonitorOutcome::Errored);
                        }
                        _ => {}
                    }
                }
            }
        }
    }
}
