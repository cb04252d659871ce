// ==========================================
// PC 组装套餐系统 - 套餐装配引擎
// ==========================================
// 职责: 按固定槽位顺序解析选择,处理 VGA / PSU 条件槽位
// 输入: 分级 + 已分级商品 + 操作员意图
// 输出: Bundle（每个槽位的候选、选中项、状态、提示）
// 红线: 不修改分级结果,只读取派生标志
// ==========================================
// 流程:
// 1. 按分级过滤 + 库存过滤 + 价格升序
// 2. 必选槽位: 覆写优先,否则最低价
// 3. VGA: Processor 解析后按 requires_discrete_gpu 决定必选 / 可选
// 4. PSU: Casing 解析后按 has_built_in_psu 决定省略 / 必选
// ==========================================

use crate::domain::bundle::{
    Bundle, SelectionSource, Selections, SlotNote, SlotResolution, SlotStatus,
};
use crate::domain::part::Part;
use crate::domain::types::{ConditionalSlotState, Slot, Tier};
use crate::engine::tier_filter::TierFilter;
use tracing::{debug, instrument, warn};

// ==========================================
// 条件槽位状态机
// ==========================================
/// 上游槽位解析后的激活信号
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    UpstreamUnresolved,
    Mandatory,
    Optional,
    Suppressed,
}

/// 条件槽位状态转换
///
/// # 规则
/// - 上游未解析 → NotApplicable
/// - Suppressed（机箱自带电源）→ NotApplicable
/// - Mandatory → 有候选 MandatoryResolved / 无候选 MandatoryUnresolved
/// - Optional → 未选入 OptionalUnselected / 选入且有候选 OptionalSelected
pub fn conditional_state(
    activation: Activation,
    opted_in: bool,
    has_candidates: bool,
) -> ConditionalSlotState {
    match activation {
        Activation::UpstreamUnresolved | Activation::Suppressed => {
            ConditionalSlotState::NotApplicable
        }
        Activation::Mandatory if has_candidates => ConditionalSlotState::MandatoryResolved,
        Activation::Mandatory => ConditionalSlotState::MandatoryUnresolved,
        Activation::Optional if opted_in && has_candidates => {
            ConditionalSlotState::OptionalSelected
        }
        Activation::Optional => ConditionalSlotState::OptionalUnselected,
    }
}

// ==========================================
// BundleAssembler - 套餐装配引擎
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct BundleAssembler;

impl BundleAssembler {
    pub fn new() -> Self {
        Self
    }

    /// 装配套餐
    ///
    /// # 参数
    /// - tier: 目标分级
    /// - parts: 已分级商品（库存为 0 的商品在此也会被排除）
    /// - selections: 操作员覆写 / VGA 选入
    #[instrument(skip(self, parts, selections), fields(tier = %tier, total_parts = parts.len()))]
    pub fn assemble(&self, tier: Tier, parts: &[Part], selections: &Selections) -> Bundle {
        let eligible = TierFilter::for_tier(parts, tier);
        debug!(eligible = eligible.len(), "分级过滤完成");

        let mut slots: Vec<SlotResolution> = Vec::with_capacity(Slot::ORDER.len());
        for slot in Slot::ORDER {
            let candidates = TierFilter::candidates(&eligible, slot.category());
            let resolution = match slot {
                Slot::Vga | Slot::Psu => {
                    let activation = Self::activation_for(slot, &slots);
                    Self::resolve_conditional(slot, candidates, activation, selections)
                }
                _ => Self::resolve_mandatory(slot, candidates, selections),
            };
            slots.push(resolution);
        }

        let bundle = Bundle { tier, slots };
        if !bundle.is_complete() {
            warn!(unresolved = ?bundle.unresolved_slots(), "套餐不完整");
        }
        bundle
    }

    /// 根据已解析的上游槽位计算激活信号
    pub fn activation_for(slot: Slot, resolved: &[SlotResolution]) -> Activation {
        let upstream = slot
            .upstream()
            .and_then(|up| resolved.iter().find(|r| r.slot == up))
            .and_then(SlotResolution::selected);

        match (slot, upstream) {
            (_, None) => Activation::UpstreamUnresolved,
            (Slot::Vga, Some(processor)) if processor.requires_discrete_gpu => Activation::Mandatory,
            (Slot::Vga, Some(_)) => Activation::Optional,
            (Slot::Psu, Some(casing)) if casing.has_built_in_psu => Activation::Suppressed,
            (_, Some(_)) => Activation::Mandatory,
        }
    }

    fn resolve_mandatory(slot: Slot, candidates: Vec<Part>, selections: &Selections) -> SlotResolution {
        if candidates.is_empty() {
            debug!(slot = %slot, "槽位无库存");
            return SlotResolution {
                slot,
                candidates,
                selected_index: None,
                source: None,
                status: SlotStatus::Unresolved,
                conditional_state: None,
                notes: vec![SlotNote::NoStock],
            };
        }

        let (index, source) = Self::pick(slot, &candidates, selections);
        SlotResolution {
            slot,
            candidates,
            selected_index: Some(index),
            source: Some(source),
            status: SlotStatus::Resolved,
            conditional_state: None,
            notes: Vec::new(),
        }
    }

    fn resolve_conditional(
        slot: Slot,
        candidates: Vec<Part>,
        activation: Activation,
        selections: &Selections,
    ) -> SlotResolution {
        let opted_in = slot == Slot::Vga && selections.vga_opt_in;
        let state = conditional_state(activation, opted_in, !candidates.is_empty());

        let mut notes = Vec::new();
        match (slot, activation) {
            (Slot::Vga, Activation::Mandatory) => notes.push(SlotNote::DiscreteGpuRequired),
            (Slot::Vga, Activation::Optional) => notes.push(SlotNote::IntegratedGpuAvailable),
            (Slot::Psu, Activation::Suppressed) => notes.push(SlotNote::PsuIncludedInCasing),
            _ => {}
        }
        let wants_part = matches!(activation, Activation::Mandatory)
            || (matches!(activation, Activation::Optional) && opted_in);
        if wants_part && candidates.is_empty() {
            notes.push(SlotNote::NoStock);
        }

        let (selected_index, source, status) = if state.is_included() {
            let (index, source) = Self::pick(slot, &candidates, selections);
            (Some(index), Some(source), SlotStatus::Resolved)
        } else if state.blocks_completion() {
            (None, None, SlotStatus::Unresolved)
        } else {
            (None, None, SlotStatus::Omitted)
        };

        SlotResolution {
            slot,
            candidates,
            selected_index,
            source,
            status,
            conditional_state: Some(state),
            notes,
        }
    }

    /// 覆写优先；覆写指向的商品不在候选中时回退到最低价
    ///
    /// 调用方保证 candidates 非空
    fn pick(slot: Slot, candidates: &[Part], selections: &Selections) -> (usize, SelectionSource) {
        if let Some(entry_id) = selections.override_for(slot) {
            if let Some(index) = candidates.iter().position(|p| p.entry_id == entry_id) {
                return (index, SelectionSource::Override);
            }
            warn!(slot = %slot, entry_id = entry_id, "覆写商品不在候选列表中，回退为最低价");
        }
        (0, SelectionSource::CheapestDefault)
    }
}
