// ==========================================
// PC 组装套餐系统 - 核心库
// ==========================================
// 系统定位: 库存分级 + 套餐装配的决策辅助（操作员最终选择）
// 流程: 导入 → 库存过滤 → 分级 → 按分级装配 → 汇总 / 导出
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "id");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 分级与装配规则
pub mod engine;

// 导入层 - 外部库存表
pub mod importer;

// 导出层 - 表格与 CSV
pub mod exporter;

// 配置层 - 分级规则
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 会话接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{Category, ConditionalSlotState, Slot, Tier, TierSet};

// 领域实体
pub use domain::{Bundle, BundleSummary, Part, Selections, SlotResolution};

// 引擎
pub use engine::{AssemblySession, BundleAssembler, Classifier, TierFilter};

// 配置
pub use config::{ClassifierRules, ConfigManager};

// 导入 / 导出
pub use exporter::{CsvExporter, Table};
pub use importer::{ImportReport, PartImporter};

// API
pub use api::BundleApi;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "PC 组装套餐系统";
