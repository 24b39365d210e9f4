use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::header::{ACCEPT, CONTENT_DISPOSITION, USER_AGENT};
use reqwest::{Client, ClientBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error};

use super::error::ApiError;
use super::models::task::{
    CancelResponse, MediaOptions, ScrapeOptions, StartTaskRequest, StartTaskResponse, TaskSnapshot,
};

// 面向抓取服务端的客户端，持有基地址和默认请求头
#[derive(Debug, Clone)]
pub struct ScraperClient {
    pub inner: Client,
    base_url: String,
}

impl ScraperClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let inner = ClientBuilder::new()
            .timeout(Duration::from_secs(30))
            .default_headers(Self::get_default_headers())
            .build()?;

        Ok(Self {
            inner,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn get_default_headers() -> reqwest::header::HeaderMap {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(ACCEPT, reqwest::header::HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, reqwest::header::HeaderValue::from_static("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"));

        headers
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    // 通用 GET 请求
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let resp = self
            .inner
            .get(self.endpoint(path))
            .send()
            .await
            .map_err(|e| {
                error!("请求失败: {}", e);
                ApiError::Reqwest(e)
            })?;

        Self::handle_response::<T>(resp).await
    }

    // 通用 POST 请求，请求体序列化为 JSON
    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let resp = self
            .inner
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await?;

        Self::handle_response::<T>(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        let status = resp.status();
        if status.is_server_error() {
            return Err(ApiError::RetryLater);
        }

        let text = resp.text().await?;
        let json_value: Value = match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(_) => {
                return Err(ApiError::InvalidResponse(text));
            }
        };

        // 服务端的错误返回格式是 {"error": "..."}
        if !status.is_success() {
            let message = json_value
                .get("error")
                .and_then(|v| v.as_str())
                .unwrap_or("Unknown error")
                .to_string();
            return Err(ApiError::ServerError(message));
        }

        serde_json::from_value::<T>(json_value)
            .map_err(|e| ApiError::InvalidResponse(format!("解析响应失败: {}. 原始响应: {}", e, text)))
    }

    /// 提交网页抓取任务
    pub async fn start_web_scraping(
        &self,
        url: &str,
        options: &ScrapeOptions,
    ) -> Result<StartTaskResponse, ApiError> {
        debug!("提交网页抓取任务: {}", url);
        self.post_json("/start-web-scraping", &StartTaskRequest { url, options })
            .await
    }

    /// 提交视频下载任务
    pub async fn start_media_download(
        &self,
        url: &str,
        options: &MediaOptions,
    ) -> Result<StartTaskResponse, ApiError> {
        debug!("提交视频下载任务: {}", url);
        self.post_json("/start-youtube-download", &StartTaskRequest { url, options })
            .await
    }

    /// 查询任务状态快照
    pub async fn task_status(&self, task_id: &str) -> Result<TaskSnapshot, ApiError> {
        self.get(&format!("/task-status/{}", task_id)).await
    }

    /// 请求取消服务端任务。只取消远端任务，不中断本地已发出的请求
    pub async fn cancel_task(&self, task_id: &str) -> Result<CancelResponse, ApiError> {
        self.post_json(&format!("/cancel-task/{}", task_id), &Value::Null)
            .await
    }

    /// 任务结果的下载链接
    pub fn download_link(&self, task_id: &str) -> String {
        self.endpoint(&format!("/download/{}", task_id))
    }

    /// 把任务结果拉取到本地目录，流式写盘并显示字节进度
    pub async fn fetch_artifact(
        &self,
        task_id: &str,
        dest_dir: &Path,
    ) -> Result<(PathBuf, u64), ApiError> {
        let resp = self.inner.get(self.download_link(task_id)).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::ServerError(format!("结果下载失败: HTTP {}", status)));
        }

        let file_name = resp
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(attachment_file_name)
            .unwrap_or_else(|| format!("{}.zip", task_id));
        let total_size = resp.content_length().unwrap_or(0);

        let pb = ProgressBar::new(total_size);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                .unwrap()
                .progress_chars("#>-"),
        );

        tokio::fs::create_dir_all(dest_dir).await?;
        let path = dest_dir.join(file_name);
        let mut file = tokio::fs::File::create(&path).await?;
        let mut stream = resp.bytes_stream();

        let mut downloaded = 0u64;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;
            pb.set_position(downloaded);
        }
        file.flush().await?;

        pb.finish_and_clear();
        Ok((path, downloaded))
    }
}

// 从 Content-Disposition 里取出附件文件名
fn attachment_file_name(header: &str) -> Option<String> {
    let (_, name) = header.split_once("filename=")?;
    let name = name.trim().trim_matches('"').trim_end_matches(';').trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
