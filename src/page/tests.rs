use super::*;

#[test]
fn known_paths_parse() {
    assert_eq!(Page::from_path("/"), Some(Page::Posts));
    assert_eq!(Page::from_path("/posts"), Some(Page::Posts));
    assert_eq!(Page::from_path("/auth"), Some(Page::Auth));
    assert_eq!(Page::from_path("/add-post"), Some(Page::AddPost));
    assert_eq!(
        Page::from_path("/users/u42"),
        Some(Page::UserPosts {
            user_id: "u42".to_string()
        })
    );
}

#[test]
fn unknown_paths_do_not_parse() {
    assert_eq!(Page::from_path("/nope"), None);
    assert_eq!(Page::from_path("/users/"), None);
    assert_eq!(Page::from_path("/users/u42/extra"), None);
    assert_eq!(Page::from_path(""), None);
}

#[test]
fn path_round_trips_for_addressable_pages() {
    for page in [
        Page::Posts,
        Page::Auth,
        Page::AddPost,
        Page::UserPosts {
            user_id: "u1".to_string(),
        },
    ] {
        let path = page.path().expect("addressable page");
        assert_eq!(Page::from_path(&path), Some(page));
    }
}

#[test]
fn loading_is_not_addressable() {
    assert_eq!(Page::Loading.path(), None);
}

#[test]
fn only_add_post_requires_auth() {
    assert!(Page::AddPost.requires_auth());
    assert!(!Page::Posts.requires_auth());
    assert!(!Page::Auth.requires_auth());
    assert!(!Page::Loading.requires_auth());
    assert!(
        !Page::UserPosts {
            user_id: "u1".to_string()
        }
        .requires_auth()
    );
}
