use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::PicStreamApi;
use crate::components::header::Header;
use crate::models::{Credentials, RegisterRequest};
use crate::use_controller;
use crate::web::dialog;
use crate::web::log::log_error;

/// 登录/注册页面
///
/// 字段为空属于本地校验错误，直接提示，不发请求。
#[component]
pub fn AuthPage() -> impl IntoView {
    let api = use_context::<PicStreamApi>().expect("PicStreamApi should be provided");
    let controller = use_controller();

    let (is_register, set_is_register) = signal(false);
    let (name, set_name) = signal(String::new());
    let (login, set_login) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let login_value = login.get();
        let password_value = password.get();
        if login_value.trim().is_empty() || password_value.trim().is_empty() {
            dialog::alert("Enter both login and password.");
            return;
        }
        let name_value = name.get();
        let register = is_register.get();
        if register && name_value.trim().is_empty() {
            dialog::alert("Enter your name.");
            return;
        }

        set_is_submitting.set(true);
        let api = api.clone();
        let controller = controller.get();
        spawn_local(async move {
            let result = if register {
                api.register(&RegisterRequest {
                    name: name_value,
                    login: login_value,
                    password: password_value,
                })
                .await
            } else {
                api.login(&Credentials {
                    login: login_value,
                    password: password_value,
                })
                .await
            };

            match result {
                Ok(user) => controller.login(user).await,
                Err(e) => {
                    log_error!("[auth] sign-in failed: {}", e);
                    dialog::alert("Sign-in failed. Check your credentials and try again.");
                }
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <Header user=None />
        <div class="hero py-12">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <div role="tablist" class="tabs tabs-boxed">
                            <a
                                role="tab"
                                class="tab"
                                class:tab-active=move || !is_register.get()
                                on:click=move |_| set_is_register.set(false)
                            >
                                "Sign in"
                            </a>
                            <a
                                role="tab"
                                class="tab"
                                class:tab-active=move || is_register.get()
                                on:click=move |_| set_is_register.set(true)
                            >
                                "Sign up"
                            </a>
                        </div>

                        <Show when=move || is_register.get()>
                            <div class="form-control">
                                <label class="label" for="name">
                                    <span class="label-text">"Name"</span>
                                </label>
                                <input
                                    id="name"
                                    type="text"
                                    placeholder="Ada"
                                    on:input=move |ev| set_name.set(event_target_value(&ev))
                                    prop:value=name
                                    class="input input-bordered"
                                />
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="login">
                                <span class="label-text">"Login"</span>
                            </label>
                            <input
                                id="login"
                                type="text"
                                placeholder="ada"
                                on:input=move |ev| set_login.set(event_target_value(&ev))
                                prop:value=login
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! {
                                        <span class="loading loading-spinner"></span>
                                        "Connecting..."
                                    }
                                    .into_any()
                                } else if is_register.get() {
                                    "Create account".into_any()
                                } else {
                                    "Sign in".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
