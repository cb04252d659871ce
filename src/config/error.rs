// ==========================================
// PC 组装套餐系统 - 配置模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置读取失败 ({source_name}): {message}")]
    ReadFailed { source_name: String, message: String },

    #[error("配置 JSON 格式错误: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },

    #[error("数据库错误: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("锁获取失败: {0}")]
    LockPoisoned(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
