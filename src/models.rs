//! 领域模型
//!
//! 与远端 API 交换的数据结构，线上格式统一为 camelCase JSON。

use std::fmt;

use serde::{Deserialize, Serialize};

// =========================================================
// 常量定义
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";

// =========================================================
// 领域模型
// =========================================================

/// 已登录用户记录，登录成功后整体持久化到本地存储
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub login: String,
    pub token: String,
}

/// 帖子作者（API 返回的嵌套结构）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostAuthor {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// 单条帖子，列表在每次成功取数后整体替换
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub description: String,
    pub image_url: String,
    pub created_at: String,
    pub user: PostAuthor,
}

// =========================================================
// 请求/响应结构
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub login: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub description: String,
    pub image_url: String,
}

/// 表单校验失败，不触网，直接反馈给用户
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewPostError {
    MissingImage,
}

impl fmt::Display for NewPostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NewPostError::MissingImage => write!(f, "Choose an image first"),
        }
    }
}

impl CreatePostRequest {
    /// 组装发帖请求；没有图片时在本地直接失败
    pub fn new(description: &str, image_url: &str) -> Result<Self, NewPostError> {
        if image_url.is_empty() {
            return Err(NewPostError::MissingImage);
        }
        Ok(Self {
            description: description.to_string(),
            image_url: image_url.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub file_url: String,
}
