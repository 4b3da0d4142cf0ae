//! 页面切换引擎
//!
//! 实现"请求 -> 验证(Guard) -> 取数 -> 发布"的导航流程。
//! 状态只在这里派生与提交，每次提交都把完整快照交给发布钩子，
//! 由视图层整树重建。途中抵达的过期响应同样会发布（不做取消）。

use std::cell::RefCell;
use std::fmt;

use async_trait::async_trait;

use crate::api::ApiError;
use crate::auth::UserStore;
use crate::models::{CreatePostRequest, Post, User};
use crate::page::Page;
use crate::state::AppState;
use crate::web::dialog;
use crate::web::log::{log_error, log_info};

// =========================================================
// 远端取数抽象
// =========================================================

/// 控制器对远端 API 的依赖面，测试用 mock 替换
#[async_trait(?Send)]
pub trait FeedGateway {
    async fn fetch_posts(&self, bearer: Option<&str>) -> Result<Vec<Post>, ApiError>;

    async fn fetch_user_posts(
        &self,
        user_id: &str,
        bearer: Option<&str>,
    ) -> Result<Vec<Post>, ApiError>;

    async fn create_post(&self, request: &CreatePostRequest, bearer: &str)
    -> Result<Post, ApiError>;

    async fn refresh_user(&self, bearer: &str) -> Result<User, ApiError>;
}

// =========================================================
// 导航错误
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    /// 目标页面不存在；可见状态保持原样
    UnknownPage(String),
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavError::UnknownPage(path) => write!(f, "page {path:?} does not exist"),
        }
    }
}

impl std::error::Error for NavError {}

// =========================================================
// 控制器
// =========================================================

pub struct Controller<G, S> {
    api: G,
    store: S,
    state: RefCell<AppState>,
    publish: Box<dyn Fn(AppState)>,
}

impl<G, S> Controller<G, S>
where
    G: FeedGateway,
    S: UserStore,
{
    pub fn new(api: G, store: S, initial: AppState, publish: impl Fn(AppState) + 'static) -> Self {
        Self {
            api,
            store,
            state: RefCell::new(initial),
            publish: Box::new(publish),
        }
    }

    fn snapshot(&self) -> AppState {
        self.state.borrow().clone()
    }

    /// 更新内部状态但不发布；紧接着的导航会负责发布
    fn stage(&self, next: AppState) {
        *self.state.borrow_mut() = next;
    }

    /// 更新内部状态并整体发布给视图层
    fn commit(&self, next: AppState) {
        *self.state.borrow_mut() = next.clone();
        (self.publish)(next);
    }

    /// 按 URL path 导航；未知地址报错且不改动任何可见状态
    pub async fn go_to_path(&self, path: &str) -> Result<(), NavError> {
        match Page::from_path(path) {
            Some(page) => {
                self.go_to_page(page).await;
                Ok(())
            }
            None => Err(NavError::UnknownPage(path.to_string())),
        }
    }

    /// **核心方法：导航与守卫**
    pub async fn go_to_page(&self, target: Page) {
        let current = self.snapshot();

        // --- Step 1: 认证守卫 ---
        let target = if target.requires_auth() && !current.is_authenticated() {
            log_info!("[nav] access denied, redirecting to the auth page");
            Page::auth_failure_redirect()
        } else {
            target
        };

        // --- Step 2: 取数并发布 ---
        match target {
            Page::Posts => {
                self.commit(current.at(Page::Loading));

                let bearer = current.bearer();
                match self.fetch_posts_with_retry(bearer.as_deref()).await {
                    Some(posts) => {
                        let state = self.snapshot();
                        self.commit(state.with_posts(Page::Posts, posts));
                    }
                    None => {
                        dialog::alert("Failed to load the feed. Try again later.");
                        let state = self.snapshot();
                        self.commit(state.at(Page::Posts));
                    }
                }
            }
            Page::UserPosts { user_id } => {
                // 先带空列表进入页面，加载页只用于信息流
                self.commit(current.with_posts(
                    Page::UserPosts {
                        user_id: user_id.clone(),
                    },
                    Vec::new(),
                ));

                let bearer = self.snapshot().bearer();
                match self.api.fetch_user_posts(&user_id, bearer.as_deref()).await {
                    Ok(posts) => {
                        let state = self.snapshot();
                        self.commit(state.with_posts(Page::UserPosts { user_id }, posts));
                    }
                    Err(e) => {
                        log_error!("[nav] user posts fetch failed: {}", e);
                        dialog::alert("Failed to load the user's posts. Try again later.");
                    }
                }
            }
            other => self.commit(current.at(other)),
        }
    }

    /// 信息流取数，失败后重试一次；两次都失败返回 None
    async fn fetch_posts_with_retry(&self, bearer: Option<&str>) -> Option<Vec<Post>> {
        match self.api.fetch_posts(bearer).await {
            Ok(posts) => Some(posts),
            Err(e) => {
                log_error!("[nav] feed fetch failed: {}, retrying once", e);
                match self.api.fetch_posts(bearer).await {
                    Ok(posts) => Some(posts),
                    Err(e) => {
                        log_error!("[nav] feed fetch failed again: {}", e);
                        None
                    }
                }
            }
        }
    }

    /// 登录成功：持久化用户记录并进入信息流
    pub async fn login(&self, user: User) {
        if !self.store.save(&user) {
            log_error!("[auth] failed to persist the user record");
        }
        let state = self.snapshot().with_user(Some(user));
        self.stage(state);
        self.go_to_page(Page::Posts).await;
    }

    /// 登出：清除用户记录并回到信息流
    pub async fn logout(&self) {
        self.store.clear();
        let state = self.snapshot().with_user(None);
        self.stage(state);
        self.go_to_page(Page::Posts).await;
    }

    /// 发布新帖；成功后回到信息流
    pub async fn add_post(&self, request: CreatePostRequest) {
        let Some(bearer) = self.snapshot().bearer() else {
            dialog::alert("You need to sign in first.");
            return;
        };

        match self.api.create_post(&request, &bearer).await {
            Ok(_) => self.go_to_page(Page::Posts).await,
            Err(e) => {
                log_error!("[posts] create failed: {}", e);
                dialog::alert("Failed to publish the post. Try again later.");
            }
        }
    }

    /// 刷新令牌；失败则登出
    pub async fn refresh_user(&self) {
        let Some(bearer) = self.snapshot().bearer() else {
            return;
        };

        match self.api.refresh_user(&bearer).await {
            Ok(user) => {
                if !self.store.save(&user) {
                    log_error!("[auth] failed to persist the refreshed user record");
                }
                let state = self.snapshot().with_user(Some(user));
                self.commit(state);
            }
            Err(e) => {
                log_error!("[auth] token refresh failed: {}, logging out", e);
                self.logout().await;
            }
        }
    }
}

#[cfg(test)]
mod tests;
