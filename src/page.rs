//! 页面领域模型
//!
//! 纯粹的业务逻辑层，不依赖 DOM 或 web_sys。
//! 同一时刻只有一个页面处于激活状态。

/// 应用页面枚举
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    /// 信息流（默认页面）
    Posts,
    /// 登录/注册
    Auth,
    /// 发布新帖（需要认证）
    AddPost,
    /// 某个用户的帖子列表
    UserPosts { user_id: String },
    /// 过渡状态，仅在进入信息流的途中出现
    Loading,
}

impl Page {
    /// 将 URL path 解析为页面；未知地址返回 None，调用方据此报错
    pub fn from_path(path: &str) -> Option<Page> {
        match path {
            "/" | "/posts" => Some(Page::Posts),
            "/auth" => Some(Page::Auth),
            "/add-post" => Some(Page::AddPost),
            _ => {
                let user_id = path.strip_prefix("/users/")?;
                if user_id.is_empty() || user_id.contains('/') {
                    return None;
                }
                Some(Page::UserPosts {
                    user_id: user_id.to_string(),
                })
            }
        }
    }

    /// 页面对应的 URL path；过渡状态不落地址栏
    pub fn path(&self) -> Option<String> {
        match self {
            Page::Posts => Some("/".to_string()),
            Page::Auth => Some("/auth".to_string()),
            Page::AddPost => Some("/add-post".to_string()),
            Page::UserPosts { user_id } => Some(format!("/users/{user_id}")),
            Page::Loading => None,
        }
    }

    /// **核心守卫逻辑：该页面是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(self, Page::AddPost)
    }

    /// 认证守卫未通过时的重定向目标
    pub fn auth_failure_redirect() -> Page {
        Page::Auth
    }
}

#[cfg(test)]
mod tests;
