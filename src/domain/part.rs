// ==========================================
// PC 组装套餐系统 - 库存商品领域模型
// ==========================================
// 用途: 导入层写入基础字段,分级引擎写入派生字段,装配引擎只读
// ==========================================

use crate::domain::types::{Category, Tier, TierSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// 源数据列名
// ==========================================
pub mod columns {
    pub const SKU: &str = "SKU";
    pub const CATEGORY: &str = "Kategori";
    pub const BRAND: &str = "Brand";
    pub const NAME: &str = "Nama Accurate";
    pub const PRICE: &str = "Web";
    pub const STOCK_TOTAL: &str = "Stock Total";
    pub const CURRENT_SO: &str = "Current SO";
    pub const ABC_CATEGORY: &str = "ABC Category";

    /// 导入必需列
    pub const REQUIRED: [&str; 7] = [SKU, CATEGORY, BRAND, NAME, PRICE, STOCK_TOTAL, CURRENT_SO];
}

// ==========================================
// RawPartRecord - 导入中间结构体
// ==========================================
// 生命周期: 仅在导入流程内（文件解析 → 字段映射 → 此结构 → 清洗）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPartRecord {
    pub sku: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub name: Option<String>,
    pub price: Option<String>,
    pub stock_total: Option<String>,
    pub current_so: Option<String>,

    // 其余列原样透传
    pub extra: BTreeMap<String, String>,

    // 元信息
    pub row_number: usize,
}

// ==========================================
// Part - 库存商品
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    // ===== 源字段 =====
    pub sku: String,
    pub category_label: String,       // 源类目标签（原样）
    pub category: Option<Category>,   // 已知类目（未知类目不参与分级）
    pub brand: String,
    pub name: String,
    pub price: f64,                   // 非数值已强制为 0
    pub stock_total: i64,
    pub current_so: i64,
    pub extra: BTreeMap<String, String>,
    pub row_number: usize,

    // ===== 派生字段（仅分级引擎写入）=====
    pub tiers: TierSet,
    pub requires_discrete_gpu: bool, // 仅 Processor 有意义
    pub has_built_in_psu: bool,      // 仅 Casing PC 有意义
    pub reasons: Vec<String>,        // 命中规则说明

    // ===== 会话字段（仅 AssemblySession 写入）=====
    pub entry_id: usize, // 会话内唯一序号,覆写以此定位商品（SKU 可能重复或为空）
}

impl Part {
    /// 构造未分级的商品
    pub fn new(
        sku: impl Into<String>,
        category_label: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        stock_total: i64,
    ) -> Self {
        let category_label = category_label.into();
        Self {
            sku: sku.into(),
            category: Category::from_source_label(&category_label),
            category_label,
            brand: String::new(),
            name: name.into(),
            price,
            stock_total,
            current_so: 0,
            extra: BTreeMap::new(),
            row_number: 0,
            tiers: TierSet::empty(),
            requires_discrete_gpu: false,
            has_built_in_psu: false,
            reasons: Vec::new(),
            entry_id: 0,
        }
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    pub fn in_stock(&self) -> bool {
        self.stock_total > 0
    }

    /// 是否可进入指定分级的装配
    pub fn is_eligible_for(&self, tier: Tier) -> bool {
        self.in_stock() && self.tiers.contains(tier)
    }

    /// 按列名读取任意字段（导出使用）
    pub fn column_value(&self, column: &str) -> Option<String> {
        match column {
            columns::SKU => Some(self.sku.clone()),
            columns::CATEGORY => Some(self.category_label.clone()),
            columns::BRAND => Some(self.brand.clone()),
            columns::NAME => Some(self.name.clone()),
            columns::PRICE => Some(format_number(self.price)),
            columns::STOCK_TOTAL => Some(self.stock_total.to_string()),
            columns::CURRENT_SO => Some(self.current_so.to_string()),
            _ => self.extra.get(column).cloned(),
        }
    }
}

/// 整数值不带小数点输出
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_new_resolves_category() {
        let part = Part::new("SKU1", "Memory RAM", "8GB DDR4", 350_000.0, 3);
        assert_eq!(part.category, Some(Category::MemoryRam));

        let unknown = Part::new("SKU2", "Monitor", "24 inch", 1_000_000.0, 1);
        assert_eq!(unknown.category, None);
        assert_eq!(unknown.category_label, "Monitor");
    }

    #[test]
    fn test_part_eligibility_requires_stock() {
        let mut part = Part::new("SKU1", "SSD Internal", "512GB NVMe", 500_000.0, 0);
        part.tiers = TierSet::all();
        assert!(!part.is_eligible_for(Tier::Office));

        part.stock_total = 2;
        assert!(part.is_eligible_for(Tier::Office));
    }

    #[test]
    fn test_column_value_reads_extra() {
        let mut part = Part::new("SKU1", "VGA", "RTX4060", 5_000_000.0, 1);
        part.extra.insert("ABC Category".to_string(), "A".to_string());

        assert_eq!(part.column_value("Web"), Some("5000000".to_string()));
        assert_eq!(part.column_value("ABC Category"), Some("A".to_string()));
        assert_eq!(part.column_value("Missing"), None);
    }
}
