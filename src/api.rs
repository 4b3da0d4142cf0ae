//! 远端 API 客户端
//!
//! 所有持久化与业务规则都在远端服务上，这里只负责携带
//! Bearer 令牌发起 HTTP 调用并解析响应。

use std::fmt;

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use web_sys::FormData;

use crate::controller::FeedGateway;
use crate::models::{
    CreatePostRequest, Credentials, HEADER_AUTHORIZATION, Post, RegisterRequest, UploadResponse,
    User,
};
use crate::upload::ImageUploader;

// =========================================================
// 错误类型
// =========================================================

/// API 调用错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 请求构建失败
    BuildFailed(String),
    /// 网络请求失败
    Network(String),
    /// 服务端返回非 2xx 状态
    Status(u16),
    /// 响应解析失败
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BuildFailed(msg) => write!(f, "failed to build request: {}", msg),
            ApiError::Network(msg) => write!(f, "network error: {}", msg),
            ApiError::Status(code) => write!(f, "server responded with status {}", code),
            ApiError::Decode(msg) => write!(f, "failed to decode response: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

// =========================================================
// 客户端
// =========================================================

#[derive(Clone, Debug, PartialEq)]
pub struct PicStreamApi {
    pub base_url: String,
}

impl PicStreamApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_bearer(builder: RequestBuilder, bearer: Option<&str>) -> RequestBuilder {
        match bearer {
            Some(value) => builder.header(HEADER_AUTHORIZATION, value),
            None => builder,
        }
    }

    async fn decode<T: DeserializeOwned>(res: Response) -> Result<T, ApiError> {
        if !res.ok() {
            return Err(ApiError::Status(res.status()));
        }
        res.json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// 获取信息流
    pub async fn get_posts(&self, bearer: Option<&str>) -> Result<Vec<Post>, ApiError> {
        let builder = Request::get(&self.url("/posts"));
        let res = Self::with_bearer(builder, bearer)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(res).await
    }

    /// 获取某个用户的帖子
    pub async fn get_user_posts(
        &self,
        user_id: &str,
        bearer: Option<&str>,
    ) -> Result<Vec<Post>, ApiError> {
        let builder = Request::get(&self.url(&format!("/users/{user_id}/posts")));
        let res = Self::with_bearer(builder, bearer)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(res).await
    }

    /// 登录
    pub async fn login(&self, credentials: &Credentials) -> Result<User, ApiError> {
        let res = Request::post(&self.url("/api/user/login"))
            .json(credentials)
            .map_err(|e| ApiError::BuildFailed(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(res).await
    }

    /// 注册新用户
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        let res = Request::post(&self.url("/api/user"))
            .json(request)
            .map_err(|e| ApiError::BuildFailed(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(res).await
    }

    /// 发布新帖
    pub async fn create_post(
        &self,
        request: &CreatePostRequest,
        bearer: &str,
    ) -> Result<Post, ApiError> {
        let res = Request::post(&self.url("/posts"))
            .header(HEADER_AUTHORIZATION, bearer)
            .json(request)
            .map_err(|e| ApiError::BuildFailed(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(res).await
    }

    /// 上传图片（multipart 表单，字段名 file）
    pub async fn upload_image(
        &self,
        file: &web_sys::File,
        bearer: Option<&str>,
    ) -> Result<UploadResponse, ApiError> {
        let form = FormData::new().map_err(|e| ApiError::BuildFailed(format!("{e:?}")))?;
        form.append_with_blob("file", file)
            .map_err(|e| ApiError::BuildFailed(format!("{e:?}")))?;

        let builder = Request::post(&self.url("/api/upload"));
        let res = Self::with_bearer(builder, bearer)
            .body(form)
            .map_err(|e| ApiError::BuildFailed(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(res).await
    }

    /// 刷新用户令牌
    pub async fn refresh_user(&self, bearer: &str) -> Result<User, ApiError> {
        let res = Request::post(&self.url("/api/user/refresh"))
            .header(HEADER_AUTHORIZATION, bearer)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(res).await
    }
}

#[async_trait(?Send)]
impl FeedGateway for PicStreamApi {
    async fn fetch_posts(&self, bearer: Option<&str>) -> Result<Vec<Post>, ApiError> {
        self.get_posts(bearer).await
    }

    async fn fetch_user_posts(
        &self,
        user_id: &str,
        bearer: Option<&str>,
    ) -> Result<Vec<Post>, ApiError> {
        self.get_user_posts(user_id, bearer).await
    }

    async fn create_post(&self, request: &CreatePostRequest, bearer: &str) -> Result<Post, ApiError> {
        self.create_post(request, bearer).await
    }

    async fn refresh_user(&self, bearer: &str) -> Result<User, ApiError> {
        self.refresh_user(bearer).await
    }
}

/// 绑定了当前令牌的上传器，供上传组件使用
#[derive(Clone)]
pub struct AuthedUploader {
    pub api: PicStreamApi,
    pub bearer: Option<String>,
}

#[async_trait(?Send)]
impl ImageUploader for AuthedUploader {
    type Source = web_sys::File;

    async fn upload(&self, source: Self::Source) -> Result<String, ApiError> {
        self.api
            .upload_image(&source, self.bearer.as_deref())
            .await
            .map(|res| res.file_url)
    }
}
