// ==========================================
// PC 组装套餐系统 - 分级规则读取 Trait
// ==========================================
// 职责: 定义分级引擎所需的规则读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::classifier_rules::ClassifierRules;
use crate::config::error::ConfigResult;
use std::path::Path;

// ==========================================
// RulesConfigReader Trait
// ==========================================
// 实现者: ConfigManager（config_kv 表）、StaticRulesReader（内存 / JSON 文件）
pub trait RulesConfigReader {
    /// 读取当前生效的分级规则
    ///
    /// # 返回
    /// - Ok(ClassifierRules): 未配置的项取默认值
    /// - Err: 存储读取失败或配置值格式错误
    fn classifier_rules(&self) -> ConfigResult<ClassifierRules>;
}

// ==========================================
// StaticRulesReader - 固定规则
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct StaticRulesReader {
    rules: ClassifierRules,
}

impl StaticRulesReader {
    pub fn new(rules: ClassifierRules) -> Self {
        Self { rules }
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        Ok(Self::new(ClassifierRules::from_json_file(path)?))
    }
}

impl RulesConfigReader for StaticRulesReader {
    fn classifier_rules(&self) -> ConfigResult<ClassifierRules> {
        Ok(self.rules.clone())
    }
}
