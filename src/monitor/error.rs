use thiserror::Error;

use crate::common::api::error::ApiError;

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("无效的链接: {0}")]
    InvalidUrl(String),

    #[error("接口调用失败: {0}")]
    Api(#[from] ApiError),

    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),
}
