use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::header::Header;
use crate::models::{Post, User};
use crate::page::Page;
use crate::use_controller;

/// 信息流页面
#[component]
pub fn PostsPage(user: Option<User>, posts: Vec<Post>) -> impl IntoView {
    view! {
        <Header user=user />
        <section class="max-w-2xl mx-auto p-4 space-y-6">
            <PostList posts=posts />
        </section>
    }
}

/// 帖子列表；信息流与用户页共用
///
/// 点击作者名进入该用户的帖子页。
#[component]
pub fn PostList(posts: Vec<Post>) -> impl IntoView {
    let controller = use_controller();

    if posts.is_empty() {
        return view! {
            <p class="text-center text-base-content/60 py-12">"No posts yet."</p>
        }
        .into_any();
    }

    posts
        .into_iter()
        .map(|post| {
            let author_id = post.user.id.clone();
            let on_author = move |_| {
                let controller = controller.get();
                let user_id = author_id.clone();
                spawn_local(async move {
                    controller.go_to_page(Page::UserPosts { user_id }).await;
                });
            };

            view! {
                <article class="card bg-base-100 shadow">
                    <figure>
                        <img class="w-full object-cover" src=post.image_url alt="Photo" />
                    </figure>
                    <div class="card-body gap-1">
                        <button
                            class="btn btn-link btn-sm px-0 justify-start text-base"
                            on:click=on_author
                        >
                            {post.user.name}
                        </button>
                        <p>{post.description}</p>
                        <span class="text-sm text-base-content/50">{post.created_at}</span>
                    </div>
                </article>
            }
        })
        .collect_view()
        .into_any()
}
