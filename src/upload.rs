//! 图片上传流程（核心逻辑）
//!
//! 不依赖 DOM：MIME 校验、上传编排与变更回调都在这里，
//! 组件层只负责取文件与展示。校验不通过绝不触网。

use std::fmt;

use async_trait::async_trait;

use crate::api::ApiError;

/// 允许上传的图片类型
pub const ACCEPTED_IMAGE_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

pub fn is_accepted_image(mime: &str) -> bool {
    ACCEPTED_IMAGE_TYPES.contains(&mime)
}

/// 上传通道抽象；`Source` 在浏览器里是 `web_sys::File`
#[async_trait(?Send)]
pub trait ImageUploader {
    type Source;

    async fn upload(&self, source: Self::Source) -> Result<String, ApiError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    /// 文件类型不在允许列表内，未发起网络调用
    UnsupportedType(String),
    /// 上传调用失败
    Failed(ApiError),
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::UnsupportedType(mime) => {
                write!(f, "unsupported file type {mime:?}, expected JPEG or PNG")
            }
            UploadError::Failed(e) => write!(f, "{}", e),
        }
    }
}

/// 选择文件后的完整流程：校验 -> 上传 -> 通知变更
///
/// 成功时以新 URL 调用 `on_change` 并返回该 URL；
/// 任何失败都不会调用 `on_change`，组件保持"空"状态。
pub async fn select_image<U: ImageUploader>(
    uploader: &U,
    source: U::Source,
    mime: &str,
    on_change: &dyn Fn(String),
) -> Result<String, UploadError> {
    if !is_accepted_image(mime) {
        return Err(UploadError::UnsupportedType(mime.to_string()));
    }

    let url = uploader
        .upload(source)
        .await
        .map_err(UploadError::Failed)?;
    on_change(url.clone());
    Ok(url)
}

/// 移除已上传的图片：以空字符串通知变更
pub fn clear_image(on_change: &dyn Fn(String)) {
    on_change(String::new());
}
