use chrono::{DateTime, Local, NaiveDateTime};
use regex::Regex;
use url::Url;

/// 服务端时间戳的格式，ISO-8601 不带时区
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// 校验并规范化链接，缺少协议时默认补 https
pub fn validate_url(input: &str) -> Result<Url, url::ParseError> {
    let trimmed = input.trim();
    let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    Url::parse(&candidate)
}

/// 判断是否为 YouTube 链接
pub fn is_youtube_url(url: &Url) -> bool {
    matches!(
        url.host_str(),
        Some("youtube.com" | "www.youtube.com" | "m.youtube.com" | "youtu.be")
    )
}

/// 从 YouTube 链接中提取视频 ID
pub fn extract_youtube_id(url: &str) -> Option<String> {
    let patterns = [
        r"(?:youtube\.com/watch\?v=|youtu\.be/)([A-Za-z0-9_-]+)",
        r"youtube\.com/embed/([A-Za-z0-9_-]+)",
        r"youtube\.com/v/([A-Za-z0-9_-]+)",
    ];

    for pattern in patterns {
        let re = Regex::new(pattern).unwrap();
        if let Some(caps) = re.captures(url) {
            return Some(caps[1].to_string());
        }
    }

    None
}

/// 秒数格式化为人类可读的耗时。
/// 60 秒以内显示秒，1 小时以内显示分+秒，再往上显示时+分
pub fn format_elapsed_secs(diff: i64) -> String {
    let diff = diff.max(0);
    if diff < 60 {
        format!("{}s", diff)
    } else if diff < 3600 {
        format!("{}m {}s", diff / 60, diff % 60)
    } else {
        format!("{}h {}m", diff / 3600, (diff % 3600) / 60)
    }
}

/// 计算从开始时间到现在的耗时文案，开始时间缺失或无法解析时显示 N/A
pub fn elapsed_since(started_at: Option<&str>, now: DateTime<Local>) -> String {
    let Some(raw) = started_at else {
        return "N/A".to_string();
    };

    match NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT) {
        Ok(start) => format_elapsed_secs((now.naive_local() - start).num_seconds()),
        Err(_) => "N/A".to_string(),
    }
}

/// 时间戳格式化为固定样式，缺失时显示 N/A
pub fn format_timestamp(ts: Option<&str>) -> String {
    let Some(raw) = ts else {
        return "N/A".to_string();
    };

    match NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT) {
        Ok(t) => t.format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => "N/A".to_string(),
    }
}

/// 字节数格式化为人类可读的大小
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    format!("{:.1} {}", size, UNITS[unit])
}
