//! PicStream 前端应用
//!
//! 图片分享服务的单页客户端，所有持久化与业务规则都在远端 HTTP API 上。
//! 采用"控制器 + 全量发布"的架构：
//! - `page`: 页面领域模型（纯逻辑，不依赖 DOM）
//! - `state`: 应用状态快照，每次切换整体派生、整体发布
//! - `controller`: 页面切换引擎，负责守卫、取数与状态发布
//! - `api`: 远端 API 客户端
//! - `components`: UI 组件层，每次发布后整棵子树重建

pub mod api;
mod auth;
mod components {
    pub mod add_post_page;
    pub mod auth_page;
    pub mod header;
    mod icons;
    pub mod loading;
    pub mod posts_page;
    pub mod upload_image;
    pub mod user_posts_page;
}
mod config;
mod controller;
mod models;
mod page;
mod serde_helper;
mod state;
mod upload;

// 原生 Web API 封装模块
// 对浏览器 API 的轻量级封装，替代 gloo-* 系列 crate 以减小 WASM 体积。
pub(crate) mod web {
    pub mod dialog;
    pub mod history;
    pub mod log;
    mod storage;
    pub mod timer;

    pub use storage::LocalStorage;
}

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::PicStreamApi;
use crate::auth::{LocalUserStore, UserStore};
use crate::components::add_post_page::AddPostPage;
use crate::components::auth_page::AuthPage;
use crate::components::loading::LoadingPage;
use crate::components::posts_page::PostsPage;
use crate::components::user_posts_page::UserPostsPage;
use crate::controller::Controller;
use crate::page::Page;
use crate::state::AppState;
use crate::web::log::log_info;

/// 应用实际使用的控制器类型（真实 API + 浏览器本地存储）
pub(crate) type AppController = Controller<PicStreamApi, LocalUserStore>;

/// 控制器上下文，供组件层通过 Context 取用
///
/// 控制器持有 Rc 与发布闭包，本身不是 Send；借助线程本地的
/// StoredValue 存放，视图层只捕获这个 Copy 句柄，
/// 在事件回调内再取出实例。
#[derive(Clone, Copy)]
pub(crate) struct ControllerContext(StoredValue<Rc<AppController>, LocalStorage>);

impl ControllerContext {
    pub fn get(&self) -> Rc<AppController> {
        self.0.get_value()
    }
}

pub(crate) fn use_controller() -> ControllerContext {
    use_context::<ControllerContext>().expect("ControllerContext should be provided")
}

pub(crate) fn use_app_state() -> ReadSignal<AppState> {
    use_context::<ReadSignal<AppState>>().expect("AppState signal should be provided")
}

/// 页面匹配函数
///
/// 根据当前状态返回对应的视图组件。任何状态变化都会重新执行，
/// 整棵页面子树从新状态完整重建，不保留局部渲染结果。
fn render_page(state: &AppState) -> AnyView {
    match &state.page {
        Page::Loading => view! { <LoadingPage /> }.into_any(),
        Page::Auth => view! { <AuthPage /> }.into_any(),
        Page::Posts => {
            view! { <PostsPage user=state.user.clone() posts=state.posts.clone() /> }.into_any()
        }
        Page::AddPost => view! { <AddPostPage user=state.user.clone() /> }.into_any(),
        Page::UserPosts { user_id } => view! {
            <UserPostsPage
                user=state.user.clone()
                user_id=user_id.clone()
                posts=state.posts.clone()
            />
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    let api = PicStreamApi::new(config::API_BASE);
    let store = LocalUserStore;

    // 1. 从本地存储恢复用户记录，构造初始状态
    let initial = AppState::new(store.load());
    let (state, set_state) = signal(initial.clone());

    // 2. 发布钩子：把新状态同步到地址栏并触发整树重建
    let publish = move |next: AppState| {
        if let Some(path) = next.page.path() {
            web::history::replace(&path);
        }
        set_state.set(next);
    };
    let controller = Rc::new(Controller::new(api.clone(), store, initial, publish));

    provide_context(api);
    provide_context(state);
    provide_context(ControllerContext(StoredValue::new_local(Rc::clone(
        &controller,
    ))));

    // 3. 首次加载：按当前地址进入，未知地址回退到信息流
    {
        let controller = Rc::clone(&controller);
        spawn_local(async move {
            let path = web::history::current_path();
            if let Err(e) = controller.go_to_path(&path).await {
                log_info!("[nav] {}, falling back to the feed", e);
                controller.go_to_page(Page::Posts).await;
            }
        });
    }

    // 4. 浏览器后退/前进：固定回到信息流
    {
        let controller = Rc::clone(&controller);
        web::history::on_popstate(move || {
            let controller = Rc::clone(&controller);
            spawn_local(async move { controller.go_to_page(Page::Posts).await });
        });
    }

    // 5. 周期性刷新令牌，刷新失败会自动登出
    {
        let controller = Rc::clone(&controller);
        let interval = web::timer::Interval::new(config::TOKEN_REFRESH_INTERVAL_MS, move || {
            let controller = Rc::clone(&controller);
            spawn_local(async move { controller.refresh_user().await });
        });
        interval.forget();
    }

    view! {
        <main class="min-h-screen bg-base-200">
            {move || render_page(&state.get())}
        </main>
    }
}
