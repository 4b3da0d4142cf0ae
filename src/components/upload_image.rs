use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{AuthedUploader, PicStreamApi};
use crate::upload::{self, UploadError};
use crate::use_app_state;
use crate::web::dialog;
use crate::web::log::log_error;

/// 图片上传组件
///
/// 两个状态："空"（显示文件选择）与"已有图片"（预览 + 替换按钮）。
/// 每次变化都会重建组件子树；URL 变更通过 `on_image_url_change` 通知父级。
#[component]
pub fn UploadImage(#[prop(into)] on_image_url_change: Callback<String>) -> impl IntoView {
    let api = use_context::<PicStreamApi>().expect("PicStreamApi should be provided");
    let state = use_app_state();

    let (image_url, set_image_url) = signal(String::new());
    let (is_uploading, set_is_uploading) = signal(false);
    let input_ref = NodeRef::<leptos::html::Input>::new();

    let on_file_change = move |_ev: web_sys::Event| {
        let Some(input) = input_ref.get() else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        // 清空 input，同一个文件可以再次选择
        input.set_value("");

        let mime = file.type_();
        let uploader = AuthedUploader {
            api: api.clone(),
            bearer: state.get_untracked().bearer(),
        };

        set_is_uploading.set(true);
        spawn_local(async move {
            let notify = |url: String| on_image_url_change.run(url);
            match upload::select_image(&uploader, file, &mime, &notify).await {
                Ok(url) => set_image_url.set(url),
                Err(e @ UploadError::UnsupportedType(_)) => {
                    dialog::alert(&format!("Upload failed: {e}"));
                }
                Err(e) => {
                    log_error!("[upload] {}", e);
                    dialog::alert("Upload failed. Try again later.");
                }
            }
            set_is_uploading.set(false);
        });
    };

    let on_remove = move |_| {
        set_image_url.set(String::new());
        upload::clear_image(&|url| on_image_url_change.run(url));
    };

    view! {
        <div class="flex flex-col items-center gap-2">
            <Show
                when=move || !image_url.get().is_empty()
                fallback=move || {
                    let on_file_change = on_file_change.clone();
                    view! {
                        <label
                            class="btn btn-outline"
                            class:btn-disabled=move || is_uploading.get()
                        >
                            <input
                                type="file"
                                accept="image/jpeg,image/png"
                                class="hidden"
                                node_ref=input_ref
                                prop:disabled=move || is_uploading.get()
                                on:change=on_file_change
                            />
                            {move || if is_uploading.get() {
                                "Uploading..."
                            } else {
                                "Choose a photo"
                            }}
                        </label>
                        <p class="text-sm text-base-content/60">"JPEG or PNG only"</p>
                    }
                }
            >
                <img
                    class="max-h-64 rounded-lg"
                    src=move || image_url.get()
                    alt="Uploaded preview"
                />
                <button class="btn btn-ghost btn-sm" on:click=on_remove>
                    "Replace photo"
                </button>
            </Show>
        </div>
    }
}
