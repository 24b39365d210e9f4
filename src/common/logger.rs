use std::time::Duration;

use colored::{ColoredString, Colorize};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

/// 通知级别，决定图标和颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Info,
    Warning,
    Danger,
}

impl AlertKind {
    pub fn icon(self) -> &'static str {
        match self {
            AlertKind::Success => "✓",
            AlertKind::Info => "ℹ",
            AlertKind::Warning => "⚠",
            AlertKind::Danger => "✗",
        }
    }

    // 暗色模式下用高亮色，亮色模式下用普通色
    fn paint(self, text: &str, dark_mode: bool) -> ColoredString {
        match (self, dark_mode) {
            (AlertKind::Success, false) => text.green(),
            (AlertKind::Success, true) => text.bright_green(),
            (AlertKind::Info, false) => text.blue(),
            (AlertKind::Info, true) => text.bright_blue(),
            (AlertKind::Warning, false) => text.yellow(),
            (AlertKind::Warning, true) => text.bright_yellow(),
            (AlertKind::Danger, false) => text.red(),
            (AlertKind::Danger, true) => text.bright_red(),
        }
    }
}

/// 瞬时提示在屏幕上停留的时间
pub const TOAST_DURATION: Duration = Duration::from_secs(5);

/// 终端通知输出。所有通知都经过同一个进度区域，
/// 这样提示行不会把正在刷新的进度条冲乱
#[derive(Clone)]
pub struct Notifier {
    area: MultiProgress,
    dark_mode: bool,
}

impl Notifier {
    pub fn new(dark_mode: bool) -> Self {
        Self {
            area: MultiProgress::new(),
            dark_mode,
        }
    }

    pub fn area(&self) -> &MultiProgress {
        &self.area
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// 显示一条通知
    pub fn alert(&self, kind: AlertKind, message: impl AsRef<str>) {
        let line = format!(
            "{} {}",
            kind.paint(kind.icon(), self.dark_mode).bold(),
            message.as_ref()
        );
        self.area.println(line).ok();
    }

    /// 显示一条瞬时提示，5 秒后自动消失
    pub fn toast(&self, kind: AlertKind, message: impl AsRef<str>) {
        let line = format!(
            "{} {}",
            kind.paint(kind.icon(), self.dark_mode).bold(),
            message.as_ref()
        );
        let bar = self.area.add(ProgressBar::new(1));
        bar.set_style(ProgressStyle::with_template("{msg}").unwrap());
        bar.set_message(line);

        tokio::spawn(async move {
            tokio::time::sleep(TOAST_DURATION).await;
            bar.finish_and_clear();
        });
    }

    pub fn success(&self, message: impl AsRef<str>) {
        self.alert(AlertKind::Success, message);
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.alert(AlertKind::Info, message);
    }

    pub fn warning(&self, message: impl AsRef<str>) {
        self.alert(AlertKind::Warning, message);
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.alert(AlertKind::Danger, message);
    }

    /// 输出一行原样文本
    pub fn println(&self, line: impl AsRef<str>) {
        self.area.println(line.as_ref()).ok();
    }

    /// 显示分割线
    pub fn separator(&self) {
        self.area.println("─".repeat(50).bright_black().to_string()).ok();
    }
}
