use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// 偏好文件名，固定不变
pub const PREFS_FILE: &str = "scrapemon_prefs.json";

/// 持久化的界面偏好，目前只有暗色模式一个开关
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prefs {
    #[serde(default)]
    pub dark_mode: bool,
}

impl Prefs {
    /// 启动时读取一次，读不到或格式不对就退回默认值
    pub fn load(dir: &Path) -> Self {
        match std::fs::read_to_string(dir.join(PREFS_FILE)) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_default(),
            Err(_) => Prefs::default(),
        }
    }

    pub fn save(&self, dir: &Path) -> Result<()> {
        std::fs::write(dir.join(PREFS_FILE), serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// 切换暗色模式并立即写回
    pub fn toggle_dark_mode(&mut self, dir: &Path) -> Result<bool> {
        self.dark_mode = !self.dark_mode;
        self.save(dir)?;
        Ok(self.dark_mode)
    }
}
