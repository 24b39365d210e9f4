use std::time::Duration;

use chrono::Local;
use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::common::api::models::task::{TaskSnapshot, TaskState};
use crate::common::utils;

/// 进度面板：一条 0 到 100 的主进度条，下面跟一行统计信息
pub struct ProgressPanel {
    area: MultiProgress,
    bar: Option<ProgressBar>,
    stats: Option<ProgressBar>,
}

impl ProgressPanel {
    pub fn new(area: MultiProgress) -> Self {
        Self {
            area,
            bar: None,
            stats: None,
        }
    }

    /// 显示面板，进度归零，统计清空。重复调用效果相同
    pub fn show(&mut self) {
        self.hide();

        let bar = self.area.add(ProgressBar::new(100));
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}%")
                .unwrap()
                .progress_chars("#>-"),
        );
        bar.set_position(0);
        bar.set_message("初始化...".to_string());
        bar.enable_steady_tick(Duration::from_millis(100));

        let stats = self.area.add(ProgressBar::new(1));
        stats.set_style(ProgressStyle::with_template("{msg}").unwrap());
        stats.set_message("");

        self.bar = Some(bar);
        self.stats = Some(stats);
    }

    /// 按快照刷新进度条位置、状态文案和统计行
    pub fn update(&self, snapshot: &TaskSnapshot) {
        let Some(bar) = &self.bar else {
            return;
        };

        let progress = snapshot.progress.min(100);
        bar.set_position(progress as u64);
        bar.set_message(status_message(snapshot.state(), progress));

        if let Some(stats) = &self.stats {
            if let Some(count) = snapshot.files_count {
                let elapsed = utils::elapsed_since(snapshot.started_at.as_deref(), Local::now());
                stats.set_message(format!(
                    "已下载文件: {}    耗时: {}",
                    count, elapsed
                ));
            }
        }
    }

    /// 收起面板，清掉所有行
    pub fn hide(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
        if let Some(stats) = self.stats.take() {
            stats.finish_and_clear();
        }
    }

    pub fn is_visible(&self) -> bool {
        self.bar.is_some()
    }

    pub fn position(&self) -> Option<u64> {
        self.bar.as_ref().map(|b| b.position())
    }
}

/// 四种固定状态对应四种文案，没见过的状态一律按等待处理
pub fn status_message(state: TaskState, progress: u32) -> String {
    match state {
        TaskState::Running => format!("{} 下载进行中... ({}%)", "↻".cyan(), progress),
        TaskState::Completed => format!("{} 下载完成！", "✓".green()),
        TaskState::Error => format!("{} 下载出错", "✗".red()),
        TaskState::Pending | TaskState::Unknown => "等待中...".to_string(),
    }
}
