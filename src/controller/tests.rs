use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;

use super::*;
use crate::models::PostAuthor;

// =========================================================
// Shared mock components
// =========================================================

struct TestContext {
    /// Operation log to verify calls and their order
    log: RefCell<Vec<String>>,
    /// Snapshots the controller has published, in order
    published: RefCell<Vec<AppState>>,
    /// User record held by the mock store
    stored_user: RefCell<Option<User>>,
    /// How many upcoming feed fetches should fail
    feed_failures: Cell<u32>,
    /// Result of the next user-posts fetch
    user_posts_result: RefCell<Result<Vec<Post>, ApiError>>,
    /// Result of the next create-post call
    create_result: RefCell<Result<(), ApiError>>,
    /// Result of the next refresh call
    refresh_result: RefCell<Result<User, ApiError>>,
}

impl TestContext {
    fn new() -> Rc<Self> {
        Rc::new(Self {
            log: RefCell::new(Vec::new()),
            published: RefCell::new(Vec::new()),
            stored_user: RefCell::new(None),
            feed_failures: Cell::new(0),
            user_posts_result: RefCell::new(Ok(vec![post("up1", "u7")])),
            create_result: RefCell::new(Ok(())),
            refresh_result: RefCell::new(Ok(user("refreshed"))),
        })
    }

    fn push_log(&self, msg: String) {
        self.log.borrow_mut().push(msg);
    }

    fn pages(&self) -> Vec<Page> {
        self.published
            .borrow()
            .iter()
            .map(|s| s.page.clone())
            .collect()
    }

    fn last_published(&self) -> AppState {
        self.published
            .borrow()
            .last()
            .cloned()
            .expect("at least one published snapshot")
    }
}

fn bearer_label(bearer: Option<&str>) -> String {
    bearer.unwrap_or("anonymous").to_string()
}

struct MockApi {
    ctx: Rc<TestContext>,
}

#[async_trait(?Send)]
impl FeedGateway for MockApi {
    async fn fetch_posts(&self, bearer: Option<&str>) -> Result<Vec<Post>, ApiError> {
        self.ctx
            .push_log(format!("posts:fetch:{}", bearer_label(bearer)));
        if self.ctx.feed_failures.get() > 0 {
            self.ctx.feed_failures.set(self.ctx.feed_failures.get() - 1);
            return Err(ApiError::Status(502));
        }
        Ok(vec![post("p1", "u1"), post("p2", "u2")])
    }

    async fn fetch_user_posts(
        &self,
        user_id: &str,
        bearer: Option<&str>,
    ) -> Result<Vec<Post>, ApiError> {
        self.ctx.push_log(format!(
            "user_posts:fetch:{}:{}",
            user_id,
            bearer_label(bearer)
        ));
        self.ctx.user_posts_result.borrow().clone()
    }

    async fn create_post(
        &self,
        request: &CreatePostRequest,
        bearer: &str,
    ) -> Result<Post, ApiError> {
        self.ctx
            .push_log(format!("posts:create:{}:{}", request.description, bearer));
        self.ctx
            .create_result
            .borrow()
            .clone()
            .map(|_| post("created", "u1"))
    }

    async fn refresh_user(&self, bearer: &str) -> Result<User, ApiError> {
        self.ctx.push_log(format!("user:refresh:{}", bearer));
        self.ctx.refresh_result.borrow().clone()
    }
}

struct MockStore {
    ctx: Rc<TestContext>,
}

impl UserStore for MockStore {
    fn load(&self) -> Option<User> {
        self.ctx.stored_user.borrow().clone()
    }

    fn save(&self, user: &User) -> bool {
        self.ctx.push_log(format!("store:save:{}", user.token));
        *self.ctx.stored_user.borrow_mut() = Some(user.clone());
        true
    }

    fn clear(&self) -> bool {
        self.ctx.push_log("store:clear".to_string());
        self.ctx.stored_user.borrow_mut().take().is_some()
    }
}

// =========================================================
// Fixtures
// =========================================================

fn user(token: &str) -> User {
    User {
        id: "u1".to_string(),
        name: "Ada".to_string(),
        login: "ada".to_string(),
        token: token.to_string(),
    }
}

fn post(id: &str, author_id: &str) -> Post {
    Post {
        id: id.to_string(),
        description: format!("post {id}"),
        image_url: format!("https://cdn.test/{id}.jpg"),
        created_at: "2026-08-01T10:00:00Z".to_string(),
        user: PostAuthor {
            id: author_id.to_string(),
            name: format!("author {author_id}"),
            image_url: None,
        },
    }
}

fn controller(ctx: &Rc<TestContext>, initial_user: Option<User>) -> Controller<MockApi, MockStore> {
    *ctx.stored_user.borrow_mut() = initial_user.clone();
    let publish = {
        let ctx = Rc::clone(ctx);
        move |state: AppState| ctx.published.borrow_mut().push(state)
    };
    Controller::new(
        MockApi {
            ctx: Rc::clone(ctx),
        },
        MockStore {
            ctx: Rc::clone(ctx),
        },
        AppState::new(initial_user),
        publish,
    )
}

// =========================================================
// Navigation
// =========================================================

#[tokio::test]
async fn unknown_page_fails_without_touching_state() {
    let ctx = TestContext::new();
    let controller = controller(&ctx, None);

    let result = controller.go_to_path("/bogus").await;

    assert_eq!(result, Err(NavError::UnknownPage("/bogus".to_string())));
    assert!(ctx.published.borrow().is_empty());
    assert!(ctx.log.borrow().is_empty());
}

#[tokio::test]
async fn add_post_page_redirects_unauthenticated_users_to_auth() {
    let ctx = TestContext::new();
    let controller = controller(&ctx, None);

    controller.go_to_page(Page::AddPost).await;

    assert_eq!(ctx.pages(), vec![Page::Auth]);
    assert!(ctx.log.borrow().is_empty());
}

#[tokio::test]
async fn add_post_page_opens_for_authenticated_users() {
    let ctx = TestContext::new();
    let controller = controller(&ctx, Some(user("t")));

    controller.go_to_page(Page::AddPost).await;

    assert_eq!(ctx.pages(), vec![Page::AddPost]);
}

#[tokio::test]
async fn feed_navigation_goes_through_the_loading_state() {
    let ctx = TestContext::new();
    let controller = controller(&ctx, None);

    controller.go_to_page(Page::Posts).await;

    assert_eq!(ctx.pages(), vec![Page::Loading, Page::Posts]);
    assert_eq!(*ctx.log.borrow(), ["posts:fetch:anonymous"]);
    assert_eq!(ctx.last_published().posts.len(), 2);
}

#[tokio::test]
async fn feed_fetch_recovers_after_a_single_retry() {
    let ctx = TestContext::new();
    ctx.feed_failures.set(1);
    let controller = controller(&ctx, None);

    controller.go_to_page(Page::Posts).await;

    assert_eq!(
        *ctx.log.borrow(),
        ["posts:fetch:anonymous", "posts:fetch:anonymous"]
    );
    assert_eq!(ctx.last_published().page, Page::Posts);
    assert_eq!(ctx.last_published().posts.len(), 2);
}

#[tokio::test]
async fn feed_fetch_gives_up_after_the_second_failure() {
    let ctx = TestContext::new();
    ctx.feed_failures.set(2);
    let controller = controller(&ctx, None);

    controller.go_to_page(Page::Posts).await;

    // 不再无限重试：两次失败后带着原有列表回到信息流
    assert_eq!(ctx.log.borrow().len(), 2);
    assert_eq!(ctx.pages(), vec![Page::Loading, Page::Posts]);
    assert!(ctx.last_published().posts.is_empty());
}

#[tokio::test]
async fn user_posts_page_publishes_empty_then_filled() {
    let ctx = TestContext::new();
    let controller = controller(&ctx, Some(user("t0ken")));

    controller
        .go_to_page(Page::UserPosts {
            user_id: "u7".to_string(),
        })
        .await;

    let pages = ctx.pages();
    assert_eq!(pages.len(), 2);
    assert!(
        pages
            .iter()
            .all(|p| *p == Page::UserPosts {
                user_id: "u7".to_string()
            })
    );
    assert!(ctx.published.borrow()[0].posts.is_empty());
    assert_eq!(ctx.last_published().posts.len(), 1);
    assert_eq!(*ctx.log.borrow(), ["user_posts:fetch:u7:Bearer t0ken"]);
}

#[tokio::test]
async fn user_posts_fetch_failure_keeps_the_empty_page() {
    let ctx = TestContext::new();
    *ctx.user_posts_result.borrow_mut() = Err(ApiError::Status(500));
    let controller = controller(&ctx, None);

    controller
        .go_to_page(Page::UserPosts {
            user_id: "u7".to_string(),
        })
        .await;

    assert_eq!(ctx.pages().len(), 1);
    assert!(ctx.last_published().posts.is_empty());
}

// =========================================================
// Auth lifecycle
// =========================================================

#[tokio::test]
async fn login_persists_the_user_and_loads_the_feed_with_its_token() {
    let ctx = TestContext::new();
    let controller = controller(&ctx, None);

    controller.login(user("t0ken")).await;

    // 记录已持久化
    assert_eq!(
        ctx.stored_user.borrow().as_ref().map(|u| u.token.as_str()),
        Some("t0ken")
    );
    // 经过加载页进入信息流，取数带上了派生自用户记录的令牌
    assert_eq!(ctx.pages(), vec![Page::Loading, Page::Posts]);
    assert!(
        ctx.log
            .borrow()
            .contains(&"posts:fetch:Bearer t0ken".to_string())
    );
    assert!(ctx.last_published().is_authenticated());
}

#[tokio::test]
async fn logout_clears_the_record_and_reloads_anonymously() {
    let ctx = TestContext::new();
    let controller = controller(&ctx, Some(user("t0ken")));

    controller.logout().await;

    assert!(ctx.stored_user.borrow().is_none());
    assert!(ctx.log.borrow().contains(&"store:clear".to_string()));
    assert!(
        ctx.log
            .borrow()
            .contains(&"posts:fetch:anonymous".to_string())
    );
    assert!(!ctx.last_published().is_authenticated());
}

#[tokio::test]
async fn refresh_success_republishes_the_new_record() {
    let ctx = TestContext::new();
    let controller = controller(&ctx, Some(user("t0ken")));

    controller.refresh_user().await;

    assert!(ctx.log.borrow().contains(&"store:save:refreshed".to_string()));
    let last = ctx.last_published();
    assert_eq!(last.user.as_ref().map(|u| u.token.as_str()), Some("refreshed"));
    // 刷新不切换页面
    assert_eq!(last.page, Page::Loading);
}

#[tokio::test]
async fn refresh_failure_logs_the_user_out() {
    let ctx = TestContext::new();
    *ctx.refresh_result.borrow_mut() = Err(ApiError::Status(401));
    let controller = controller(&ctx, Some(user("t0ken")));

    controller.refresh_user().await;

    assert!(ctx.stored_user.borrow().is_none());
    assert_eq!(ctx.last_published().page, Page::Posts);
    assert!(!ctx.last_published().is_authenticated());
}

#[tokio::test]
async fn refresh_is_a_no_op_when_anonymous() {
    let ctx = TestContext::new();
    let controller = controller(&ctx, None);

    controller.refresh_user().await;

    assert!(ctx.log.borrow().is_empty());
    assert!(ctx.published.borrow().is_empty());
}

// =========================================================
// Posting
// =========================================================

#[tokio::test]
async fn add_post_requires_a_token() {
    let ctx = TestContext::new();
    let controller = controller(&ctx, None);

    controller
        .add_post(CreatePostRequest {
            description: "hello".to_string(),
            image_url: "https://cdn.test/x.png".to_string(),
        })
        .await;

    assert!(ctx.log.borrow().is_empty());
    assert!(ctx.published.borrow().is_empty());
}

#[tokio::test]
async fn add_post_publishes_and_returns_to_the_feed() {
    let ctx = TestContext::new();
    let controller = controller(&ctx, Some(user("t0ken")));

    controller
        .add_post(CreatePostRequest {
            description: "hello".to_string(),
            image_url: "https://cdn.test/x.png".to_string(),
        })
        .await;

    assert_eq!(
        ctx.log.borrow().first().map(String::as_str),
        Some("posts:create:hello:Bearer t0ken")
    );
    assert_eq!(ctx.pages(), vec![Page::Loading, Page::Posts]);
}

#[tokio::test]
async fn failed_add_post_stays_on_the_form() {
    let ctx = TestContext::new();
    *ctx.create_result.borrow_mut() = Err(ApiError::Status(400));
    let controller = controller(&ctx, Some(user("t0ken")));

    controller
        .add_post(CreatePostRequest {
            description: "hello".to_string(),
            image_url: "https://cdn.test/x.png".to_string(),
        })
        .await;

    // 创建失败不触发导航
    assert_eq!(ctx.log.borrow().len(), 1);
    assert!(ctx.published.borrow().is_empty());
}
