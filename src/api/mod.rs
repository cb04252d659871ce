// ==========================================
// PC 组装套餐系统 - API 层
// ==========================================
// 职责: 面向展示层的会话接口
// 展示层只负责采集操作员意图（分级、覆写索引、VGA 选入）并转发
// ==========================================

pub mod bundle_api;
pub mod error;

pub use bundle_api::{BundleApi, CandidateView, ExportPaths, InventoryLoadResponse};
pub use error::{ApiError, ApiResult};
