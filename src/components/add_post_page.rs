use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::header::Header;
use crate::components::upload_image::UploadImage;
use crate::models::{CreatePostRequest, User};
use crate::use_controller;
use crate::web::dialog;

/// 发帖页面：描述 + 上传组件
#[component]
pub fn AddPostPage(user: Option<User>) -> impl IntoView {
    let controller = use_controller();

    let (description, set_description) = signal(String::new());
    let (image_url, set_image_url) = signal(String::new());

    let on_image_url_change = Callback::new(move |url: String| set_image_url.set(url));

    let on_add = move |_| {
        // 没有图片属于本地校验错误，不触网、不回调
        match CreatePostRequest::new(&description.get(), &image_url.get()) {
            Ok(request) => {
                let controller = controller.get();
                spawn_local(async move { controller.add_post(request).await });
            }
            Err(e) => dialog::alert(&e.to_string()),
        }
    };

    view! {
        <Header user=user />
        <section class="max-w-xl mx-auto p-4">
            <div class="card bg-base-100 shadow">
                <div class="card-body gap-4">
                    <h2 class="card-title">"New post"</h2>
                    <UploadImage on_image_url_change=on_image_url_change />
                    <textarea
                        class="textarea textarea-bordered"
                        placeholder="Description..."
                        prop:value=description
                        on:input=move |ev| set_description.set(event_target_value(&ev))
                    ></textarea>
                    <button class="btn btn-primary" on:click=on_add>"Publish"</button>
                </div>
            </div>
        </section>
    }
}
