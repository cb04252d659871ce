// ==========================================
// PC 组装套餐系统 - 分级引擎
// ==========================================
// 职责: 库存商品 → 带分级标志的商品（同长度、同顺序）
// 红线: 纯映射,不修改输入,不做 I/O
// 输入: 已按库存过滤的商品
// 输出: tiers / requires_discrete_gpu / has_built_in_psu / reasons
// ==========================================

use crate::config::{ClassifierRules, RulesConfigReader};
use crate::domain::part::Part;
use crate::domain::types::Category;
use crate::engine::classifier_core::{ClassifierCore, RuleOutcome};
use crate::engine::error::{EngineError, EngineResult};
use regex::Regex;
use tracing::{debug, info, instrument};

// ==========================================
// Classifier - 分级引擎
// ==========================================
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: ClassifierRules,
    discrete_gpu: Regex,
    memory_strip: Regex,
    memory_capacity: Regex,
}

impl Classifier {
    /// 编译规则中的正则
    ///
    /// # 错误
    /// - InvalidRulePattern: 正则无法编译
    pub fn new(rules: ClassifierRules) -> EngineResult<Self> {
        let discrete_gpu = compile("processor.discrete_gpu_pattern", &rules.processor.discrete_gpu_pattern)?;
        let memory_strip = compile("memory.strip_pattern", &rules.memory.strip_pattern)?;
        let memory_capacity = compile("memory.capacity_pattern", &rules.memory.capacity_pattern)?;

        Ok(Self {
            rules,
            discrete_gpu,
            memory_strip,
            memory_capacity,
        })
    }

    /// 使用默认规则
    pub fn with_default_rules() -> EngineResult<Self> {
        Self::new(ClassifierRules::default())
    }

    /// 从配置读取器加载规则
    pub fn from_reader<R: RulesConfigReader + ?Sized>(reader: &R) -> Result<Self, Box<dyn std::error::Error>> {
        let rules = reader.classifier_rules()?;
        Ok(Self::new(rules)?)
    }

    pub fn rules(&self) -> &ClassifierRules {
        &self.rules
    }

    /// 批量分级
    ///
    /// # 返回
    /// - 与输入同长度、同顺序的新商品序列
    #[instrument(skip(self, rows), fields(total_rows = rows.len()))]
    pub fn classify(&self, rows: &[Part]) -> Vec<Part> {
        let classified: Vec<Part> = rows.iter().map(|part| self.classify_part(part)).collect();

        let unmatched = classified.iter().filter(|p| p.tiers.is_empty()).count();
        info!(
            total = classified.len(),
            unmatched = unmatched,
            "商品分级完成"
        );
        classified
    }

    /// 单个商品分级（派生字段先清零,重复分级结果一致）
    pub fn classify_part(&self, part: &Part) -> Part {
        let outcome = self.evaluate(part);

        if outcome.tiers.is_empty() {
            debug!(sku = %part.sku, category = %part.category_label, "未命中任何分级");
        }

        Part {
            tiers: outcome.tiers,
            requires_discrete_gpu: outcome.requires_discrete_gpu,
            has_built_in_psu: outcome.has_built_in_psu,
            reasons: outcome.reasons,
            ..part.clone()
        }
    }

    fn evaluate(&self, part: &Part) -> RuleOutcome {
        let name = part.name.to_uppercase();
        let rules = &self.rules;

        match part.category {
            Some(Category::Processor) => {
                ClassifierCore::classify_processor(&name, &rules.processor, &self.discrete_gpu)
            }
            Some(Category::Motherboard) => {
                ClassifierCore::classify_motherboard(&name, part.price, &rules.motherboard)
            }
            Some(Category::MemoryRam) => {
                let capacity = ClassifierCore::parse_memory_capacity_gb(
                    &name,
                    &self.memory_strip,
                    &self.memory_capacity,
                );
                ClassifierCore::classify_memory(capacity, &rules.memory)
            }
            Some(Category::SsdInternal) => ClassifierCore::classify_ssd(),
            Some(Category::Vga) => ClassifierCore::classify_vga(&name, &rules.vga),
            Some(Category::CasingPc) => ClassifierCore::classify_casing(&name, &rules.casing),
            Some(Category::PowerSupply) => {
                ClassifierCore::classify_power_supply(&name, part.price, &rules.power_supply)
            }
            // 未知类目原样透传,不参与分级
            None => RuleOutcome::default(),
        }
    }
}

fn compile(rule: &str, pattern: &str) -> EngineResult<Regex> {
    Regex::new(pattern).map_err(|e| EngineError::InvalidRulePattern {
        rule: rule.to_string(),
        message: e.to_string(),
    })
}
