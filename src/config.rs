//! 应用配置
//!
//! 远端 API 地址与客户端侧的固定参数。

/// 远端 API 基础地址
pub const API_BASE: &str = "https://api.picstream.app";

/// 令牌刷新间隔（毫秒）
pub const TOKEN_REFRESH_INTERVAL_MS: u32 = 10 * 60 * 1000;
