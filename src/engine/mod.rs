// ==========================================
// PC 组装套餐系统 - 引擎层
// ==========================================
// 职责: 商品分级 + 库存/分级过滤 + 套餐装配
// 红线: 引擎不做 I/O, 所有分级规则必须输出 reason
// ==========================================

pub mod assembler;
pub mod classifier;
pub mod classifier_core;
pub mod error;
pub mod session;
pub mod tier_filter;

// 重导出核心引擎
pub use assembler::{conditional_state, Activation, BundleAssembler};
pub use classifier::Classifier;
pub use classifier_core::{ClassifierCore, RuleOutcome};
pub use error::{EngineError, EngineResult};
pub use session::AssemblySession;
pub use tier_filter::{cheapest_first, TierFilter};
