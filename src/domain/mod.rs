// ==========================================
// PC 组装套餐系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod bundle;
pub mod part;
pub mod types;

// 重导出核心类型
pub use bundle::{
    Bundle, BundleSummary, SelectionSource, Selections, SlotNote, SlotResolution, SlotStatus,
    SummaryRow,
};
pub use part::{Part, RawPartRecord};
pub use types::{Category, ConditionalSlotState, Slot, Tier, TierSet};
