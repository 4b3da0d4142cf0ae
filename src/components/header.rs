use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::icons::{Camera, Plus};
use crate::models::User;
use crate::page::Page;
use crate::use_controller;

/// 页面顶栏：标题回到信息流，右侧是发帖与登录/登出动作
#[component]
pub fn Header(user: Option<User>) -> impl IntoView {
    let controller = use_controller();

    let on_home = move |_| {
        let controller = controller.get();
        spawn_local(async move { controller.go_to_page(Page::Posts).await });
    };
    let on_add = move |_| {
        let controller = controller.get();
        spawn_local(async move { controller.go_to_page(Page::AddPost).await });
    };
    let on_auth = move |_| {
        let controller = controller.get();
        spawn_local(async move { controller.go_to_page(Page::Auth).await });
    };
    let on_logout = move |_| {
        let controller = controller.get();
        spawn_local(async move { controller.logout().await });
    };

    let actions = match user {
        Some(user) => view! {
            <button class="btn btn-primary btn-sm gap-1" on:click=on_add>
                <Plus attr:class="h-4 w-4" /> "Add post"
            </button>
            <span class="px-2 text-sm font-medium">{user.name}</span>
            <button class="btn btn-ghost btn-sm" on:click=on_logout>"Log out"</button>
        }
        .into_any(),
        None => view! {
            <button class="btn btn-primary btn-sm" on:click=on_auth>"Sign in"</button>
        }
        .into_any(),
    };

    view! {
        <header class="navbar bg-base-100 shadow sticky top-0 z-10">
            <div class="flex-1">
                <button class="btn btn-ghost text-xl gap-2" on:click=on_home>
                    <Camera attr:class="h-6 w-6 text-primary" /> "PicStream"
                </button>
            </div>
            <div class="flex-none items-center gap-2">{actions}</div>
        </header>
    }
}
