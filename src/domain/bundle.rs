// ==========================================
// PC 组装套餐系统 - 套餐领域模型
// ==========================================
// 生命周期: 每次装配会话内重算,不持久化
// 红线: 套餐只读取分级结果,不回写商品
// ==========================================

use crate::domain::part::Part;
use crate::domain::types::{ConditionalSlotState, Slot, Tier};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// 选择来源
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionSource {
    CheapestDefault, // 最低价候选（默认策略）
    Override,        // 操作员覆写
}

// ==========================================
// 槽位结果状态
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotStatus {
    Resolved,   // 已选定商品,计入汇总
    Unresolved, // 需要但无候选（套餐不完整）
    Omitted,    // 不计入套餐（条件未触发 / 未选入）
}

// ==========================================
// 槽位提示（展示层负责本地化）
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotNote {
    NoStock,                // 当前分级下无库存
    DiscreteGpuRequired,    // 处理器无核显,必须配独显
    IntegratedGpuAvailable, // 处理器带核显,独显可选
    PsuIncludedInCasing,    // 机箱自带电源
}

impl SlotNote {
    pub fn i18n_key(&self) -> &'static str {
        match self {
            SlotNote::NoStock => "note.no_stock",
            SlotNote::DiscreteGpuRequired => "note.discrete_gpu_required",
            SlotNote::IntegratedGpuAvailable => "note.integrated_gpu_available",
            SlotNote::PsuIncludedInCasing => "note.psu_included",
        }
    }
}

// ==========================================
// Selections - 操作员意图
// ==========================================
// 覆写按 Part::entry_id 记录（索引只是界面层编码）
// 最终结果只取决于覆写集合本身,与设置顺序无关
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selections {
    pub overrides: BTreeMap<Slot, usize>,
    pub vga_opt_in: bool,
}

impl Selections {
    pub fn override_for(&self, slot: Slot) -> Option<usize> {
        self.overrides.get(&slot).copied()
    }
}

// ==========================================
// SlotResolution - 单个槽位的装配结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotResolution {
    pub slot: Slot,
    pub candidates: Vec<Part>,                         // 最低价优先
    pub selected_index: Option<usize>,                 // 指向 candidates
    pub source: Option<SelectionSource>,
    pub status: SlotStatus,
    pub conditional_state: Option<ConditionalSlotState>, // 仅 VGA / PSU
    pub notes: Vec<SlotNote>,
}

impl SlotResolution {
    pub fn selected(&self) -> Option<&Part> {
        match self.status {
            SlotStatus::Resolved => self.selected_index.and_then(|i| self.candidates.get(i)),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.status == SlotStatus::Resolved
    }
}

// ==========================================
// Bundle - 套餐
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bundle {
    pub tier: Tier,
    pub slots: Vec<SlotResolution>, // 固定顺序,覆盖全部 7 个槽位
}

impl Bundle {
    pub fn slot(&self, slot: Slot) -> Option<&SlotResolution> {
        self.slots.iter().find(|s| s.slot == slot)
    }

    pub fn selected(&self, slot: Slot) -> Option<&Part> {
        self.slot(slot).and_then(SlotResolution::selected)
    }

    /// 计入套餐的 (槽位, 商品)，按装配顺序
    pub fn resolved_parts(&self) -> impl Iterator<Item = (Slot, &Part)> + '_ {
        self.slots
            .iter()
            .filter_map(|s| s.selected().map(|part| (s.slot, part)))
    }

    /// 总价 = 所有已解析槽位价格之和
    pub fn total_price(&self) -> f64 {
        self.resolved_parts().map(|(_, part)| part.price).sum()
    }

    /// 需要但未解析的槽位
    pub fn unresolved_slots(&self) -> Vec<Slot> {
        self.slots
            .iter()
            .filter(|s| s.status == SlotStatus::Unresolved)
            .map(|s| s.slot)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.unresolved_slots().is_empty()
    }

    pub fn summary(&self) -> BundleSummary {
        let rows = self
            .resolved_parts()
            .map(|(slot, part)| SummaryRow {
                component: slot.component_name().to_string(),
                product_name: part.name.clone(),
                brand: if part.brand.trim().is_empty() {
                    "-".to_string()
                } else {
                    part.brand.clone()
                },
                price: part.price,
                sku: part.sku.clone(),
            })
            .collect();

        BundleSummary {
            tier: self.tier,
            rows,
            total_price: self.total_price(),
            complete: self.is_complete(),
            unresolved: self.unresolved_slots(),
        }
    }
}

// ==========================================
// 汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub component: String,
    pub product_name: String,
    pub brand: String,
    pub price: f64,
    pub sku: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleSummary {
    pub tier: Tier,
    pub rows: Vec<SummaryRow>,
    pub total_price: f64,
    pub complete: bool,
    pub unresolved: Vec<Slot>,
}
