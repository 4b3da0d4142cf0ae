use leptos::prelude::*;

use crate::components::header::Header;
use crate::components::posts_page::PostList;
use crate::models::{Post, User};

/// 单个用户的帖子页面
#[component]
pub fn UserPostsPage(user: Option<User>, user_id: String, posts: Vec<Post>) -> impl IntoView {
    // 列表尚未抵达时退化为用户 id
    let title = posts
        .first()
        .map(|p| p.user.name.clone())
        .unwrap_or_else(|| format!("User {user_id}"));

    view! {
        <Header user=user />
        <section class="max-w-2xl mx-auto p-4 space-y-6">
            <h2 class="text-2xl font-bold">{title}</h2>
            <PostList posts=posts />
        </section>
    }
}
