//! 应用状态
//!
//! 页面、用户与帖子列表的单一快照。控制器不在原地修改共享变量，
//! 而是基于当前值派生出新快照并整体发布给视图层。

use crate::models::{Post, User};
use crate::page::Page;

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub page: Page,
    pub user: Option<User>,
    pub posts: Vec<Post>,
}

impl AppState {
    /// 初始状态：首个导航完成前停留在加载页
    pub fn new(user: Option<User>) -> Self {
        Self {
            page: Page::Loading,
            user,
            posts: Vec::new(),
        }
    }

    /// 切换页面，帖子与用户保持不变
    pub fn at(&self, page: Page) -> Self {
        Self {
            page,
            user: self.user.clone(),
            posts: self.posts.clone(),
        }
    }

    /// 切换页面并整体替换帖子列表
    pub fn with_posts(&self, page: Page, posts: Vec<Post>) -> Self {
        Self {
            page,
            user: self.user.clone(),
            posts,
        }
    }

    /// 替换用户记录，其余保持不变
    pub fn with_user(&self, user: Option<User>) -> Self {
        Self {
            page: self.page.clone(),
            user,
            posts: self.posts.clone(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Authorization 头的取值；未登录时为 None
    pub fn bearer(&self) -> Option<String> {
        self.user.as_ref().map(|u| format!("Bearer {}", u.token))
    }
}
