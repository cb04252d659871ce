// ==========================================
// PC 组装套餐系统 - 配置层
// ==========================================
// 职责: 分级规则配置管理,支持 config_kv 覆写与 JSON 文件加载
// 存储: config_kv 表
// ==========================================

pub mod classifier_rules;
pub mod config_manager;
pub mod error;
pub mod rules_config_trait;

// 重导出核心配置类型
pub use classifier_rules::{
    CapacityRange, CasingRules, ClassifierRules, MemoryRules, MotherboardRules, PowerSupplyRules,
    ProcessorRules, VgaRules,
};
pub use config_manager::{config_keys, ConfigManager};
pub use error::{ConfigError, ConfigResult};
pub use rules_config_trait::{RulesConfigReader, StaticRulesReader};
