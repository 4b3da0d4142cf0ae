//! 认证与用户记录持久化
//!
//! 用户记录以 JSON 字符串的形式整体存入 LocalStorage，
//! 登出时删除。控制器通过 `UserStore` 抽象访问存储，方便测试替换。

use crate::models::User;
use crate::serde_helper;
use crate::web::LocalStorage;
use crate::web::log::log_error;

const STORAGE_USER_KEY: &str = "picstream_user";

/// 用户记录存储抽象
pub trait UserStore {
    fn load(&self) -> Option<User>;
    fn save(&self, user: &User) -> bool;
    fn clear(&self) -> bool;
}

/// 基于浏览器 LocalStorage 的实现
pub struct LocalUserStore;

impl UserStore for LocalUserStore {
    fn load(&self) -> Option<User> {
        let raw = LocalStorage::get(STORAGE_USER_KEY)?;
        match serde_helper::from_json_string(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                // 损坏的记录当作未登录处理，同时清掉避免反复报错
                log_error!("[auth] stored user record is unreadable: {}", e);
                LocalStorage::delete(STORAGE_USER_KEY);
                None
            }
        }
    }

    fn save(&self, user: &User) -> bool {
        match serde_helper::to_json_string(user) {
            Ok(raw) => LocalStorage::set(STORAGE_USER_KEY, &raw),
            Err(e) => {
                log_error!("[auth] failed to serialize user record: {}", e);
                false
            }
        }
    }

    fn clear(&self) -> bool {
        LocalStorage::delete(STORAGE_USER_KEY)
    }
}
