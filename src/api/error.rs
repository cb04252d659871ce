// ==========================================
// PC 组装套餐系统 - API层错误类型
// ==========================================
// 职责: 汇总各层错误,转换为操作员可读的错误消息
// ==========================================

use crate::config::ConfigError;
use crate::engine::EngineError;
use crate::exporter::ExportError;
use crate::importer::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 会话状态错误
    // ==========================================
    #[error("尚未导入库存数据")]
    NoInventoryLoaded,

    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    /// 覆写被拒绝,原选择保持不变
    #[error("选择被拒绝: {0}")]
    SelectionRejected(String),

    // ==========================================
    // 导入 / 导出错误
    // ==========================================
    #[error("文件导入失败: {0}")]
    ImportError(String),

    #[error("缺少必需列: {0}")]
    MissingColumns(String),

    #[error("文件导出失败: {0}")]
    ExportError(String),

    // ==========================================
    // 配置错误
    // ==========================================
    #[error("配置错误: {0}")]
    ConfigError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从各层错误转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::MissingRequiredColumn(cols) => ApiError::MissingColumns(cols),
            ImportError::InternalError(msg) => ApiError::InternalError(msg),
            ImportError::Other(err) => ApiError::Other(err),
            other => ApiError::ImportError(other.to_string()),
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::OverrideOutOfRange { .. } | EngineError::SlotNotActive { .. } => {
                ApiError::SelectionRejected(err.to_string())
            }
            EngineError::InvalidRulePattern { .. } | EngineError::Regex(_) => {
                ApiError::ConfigError(err.to_string())
            }
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        ApiError::ExportError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
