// ==========================================
// PC 组装套餐系统 - 装配会话
// ==========================================
// 职责: 持有一次装配会话的操作员意图,每次操作后全量重算套餐
// 红线: 商品集合在会话内只读；会话之间不共享状态
// ==========================================
// 操作:
// - set_tier: 切换分级,丢弃新分级下不再是候选的覆写
// - override_slot: 按候选索引覆写（先校验,失败时保持原结果）
// - clear_override / set_vga_opt_in
// ==========================================

use crate::domain::bundle::{Bundle, SlotResolution, Selections};
use crate::domain::part::Part;
use crate::domain::types::{ConditionalSlotState, Slot, Tier};
use crate::engine::assembler::BundleAssembler;
use crate::engine::error::{EngineError, EngineResult};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct AssemblySession {
    session_id: String,
    parts: Vec<Part>,
    tier: Tier,
    selections: Selections,
    assembler: BundleAssembler,
    bundle: Bundle,
}

impl AssemblySession {
    /// 创建会话（parts 应为已分级商品）
    ///
    /// 按输入顺序重新编号 entry_id
    pub fn new(mut parts: Vec<Part>, tier: Tier) -> Self {
        for (entry_id, part) in parts.iter_mut().enumerate() {
            part.entry_id = entry_id;
        }
        let assembler = BundleAssembler::new();
        let selections = Selections::default();
        let bundle = assembler.assemble(tier, &parts, &selections);
        let session_id = Uuid::new_v4().to_string();

        info!(session_id = %session_id, tier = %tier, parts = parts.len(), "装配会话创建");

        Self {
            session_id,
            parts,
            tier,
            selections,
            assembler,
            bundle,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    pub fn bundle(&self) -> &Bundle {
        &self.bundle
    }

    /// 槽位当前的候选与选中情况
    pub fn slot(&self, slot: Slot) -> Option<&SlotResolution> {
        self.bundle.slot(slot)
    }

    /// 切换分级
    ///
    /// 保留仍在新分级候选中的覆写,其余丢弃
    pub fn set_tier(&mut self, tier: Tier) {
        if tier == self.tier {
            return;
        }

        let parts = &self.parts;
        let before = self.selections.overrides.len();
        self.selections.overrides.retain(|slot, entry_id| {
            parts.get(*entry_id).is_some_and(|p| {
                p.category == Some(slot.category()) && p.is_eligible_for(tier)
            })
        });
        let dropped = before - self.selections.overrides.len();

        info!(
            session_id = %self.session_id,
            from = %self.tier,
            to = %tier,
            dropped_overrides = dropped,
            "切换分级"
        );
        self.tier = tier;
        self.recompute();
    }

    /// 覆写槽位选择
    ///
    /// # 错误
    /// - SlotNotActive: 条件槽位当前不计入套餐（VGA 需先选入）
    /// - OverrideOutOfRange: 索引超出当前候选列表
    pub fn override_slot(&mut self, slot: Slot, index: usize) -> EngineResult<()> {
        let resolution = self.bundle.slot(slot).ok_or(EngineError::OverrideOutOfRange {
            slot,
            index,
            candidates: 0,
        })?;

        if let Some(state) = resolution.conditional_state {
            if matches!(
                state,
                ConditionalSlotState::NotApplicable | ConditionalSlotState::OptionalUnselected
            ) {
                return Err(EngineError::SlotNotActive { slot, state });
            }
        }

        let part = resolution
            .candidates
            .get(index)
            .ok_or(EngineError::OverrideOutOfRange {
                slot,
                index,
                candidates: resolution.candidates.len(),
            })?;

        debug!(slot = %slot, index = index, sku = %part.sku, entry_id = part.entry_id, "槽位覆写");
        self.selections.overrides.insert(slot, part.entry_id);
        self.recompute();
        Ok(())
    }

    /// 清除覆写,恢复最低价默认
    pub fn clear_override(&mut self, slot: Slot) {
        if self.selections.overrides.remove(&slot).is_some() {
            self.recompute();
        }
    }

    /// VGA 选入开关（处理器带核显时生效）
    pub fn set_vga_opt_in(&mut self, opt_in: bool) {
        if self.selections.vga_opt_in != opt_in {
            self.selections.vga_opt_in = opt_in;
            self.recompute();
        }
    }

    fn recompute(&mut self) {
        self.bundle = self
            .assembler
            .assemble(self.tier, &self.parts, &self.selections);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bundle::SelectionSource;
    use crate::domain::types::TierSet;

    fn part(sku: &str, category: &str, price: f64, tiers: &[Tier]) -> Part {
        let mut p = Part::new(sku, category, sku, price, 1);
        p.tiers = TierSet::of(tiers);
        p
    }

    fn inventory() -> Vec<Part> {
        let all = [Tier::Office, Tier::Standard, Tier::Advanced];
        let mut cpu_f = part("CPU-F", "Processor", 1_800_000.0, &[Tier::Standard]);
        cpu_f.requires_discrete_gpu = true;
        vec![
            part("CPU-1", "Processor", 1_200_000.0, &[Tier::Office, Tier::Standard]),
            cpu_f,
            part("MB-1", "Motherboard", 900_000.0, &[Tier::Office, Tier::Standard]),
            part("RAM-1", "Memory RAM", 400_000.0, &[Tier::Office, Tier::Standard]),
            part("RAM-2", "Memory RAM", 700_000.0, &[Tier::Standard]),
            part("SSD-1", "SSD Internal", 500_000.0, &all),
            part("VGA-1", "VGA", 3_000_000.0, &[Tier::Standard]),
            part("CASE-1", "Casing PC", 350_000.0, &[Tier::Standard, Tier::Advanced]),
            part("PSU-1", "Power Supply", 450_000.0, &[Tier::Office]),
            part("PSU-2", "Power Supply", 650_000.0, &[Tier::Standard]),
        ]
    }

    #[test]
    fn test_override_and_clear() {
        let mut session = AssemblySession::new(inventory(), Tier::Standard);
        assert_eq!(session.bundle().selected(Slot::Ram).unwrap().sku, "RAM-1");

        session.override_slot(Slot::Ram, 1).unwrap();
        let ram = session.slot(Slot::Ram).unwrap();
        assert_eq!(ram.selected().unwrap().sku, "RAM-2");
        assert_eq!(ram.source, Some(SelectionSource::Override));

        session.clear_override(Slot::Ram);
        assert_eq!(session.bundle().selected(Slot::Ram).unwrap().sku, "RAM-1");
    }

    #[test]
    fn test_out_of_range_override_keeps_prior_state() {
        let mut session = AssemblySession::new(inventory(), Tier::Standard);
        session.override_slot(Slot::Ram, 1).unwrap();

        let err = session.override_slot(Slot::Ram, 5).unwrap_err();
        assert!(matches!(err, EngineError::OverrideOutOfRange { index: 5, candidates: 2, .. }));
        assert_eq!(session.bundle().selected(Slot::Ram).unwrap().sku, "RAM-2");
    }

    #[test]
    fn test_processor_override_activates_vga() {
        let mut session = AssemblySession::new(inventory(), Tier::Standard);
        assert_eq!(
            session.slot(Slot::Vga).unwrap().conditional_state,
            Some(ConditionalSlotState::OptionalUnselected)
        );
        assert!(matches!(
            session.override_slot(Slot::Vga, 0),
            Err(EngineError::SlotNotActive { .. })
        ));

        session.override_slot(Slot::Processor, 1).unwrap();
        assert_eq!(
            session.slot(Slot::Vga).unwrap().conditional_state,
            Some(ConditionalSlotState::MandatoryResolved)
        );
        assert_eq!(session.bundle().selected(Slot::Vga).unwrap().sku, "VGA-1");
    }

    #[test]
    fn test_tier_change_drops_ineligible_overrides() {
        let mut session = AssemblySession::new(inventory(), Tier::Standard);
        session.override_slot(Slot::Ram, 1).unwrap();
        session.override_slot(Slot::Ssd, 0).unwrap();

        session.set_tier(Tier::Office);
        assert_eq!(session.selections().override_for(Slot::Ram), None);
        let ssd = session.selections().override_for(Slot::Ssd).unwrap();
        assert_eq!(session.parts()[ssd].sku, "SSD-1");
        assert_eq!(session.bundle().selected(Slot::Ram).unwrap().sku, "RAM-1");
    }

    #[test]
    fn test_final_state_independent_of_override_order() {
        let mut a = AssemblySession::new(inventory(), Tier::Standard);
        a.override_slot(Slot::Ram, 1).unwrap();
        a.override_slot(Slot::Processor, 1).unwrap();

        let mut b = AssemblySession::new(inventory(), Tier::Standard);
        b.override_slot(Slot::Processor, 1).unwrap();
        b.override_slot(Slot::Ram, 1).unwrap();

        assert_eq!(a.selections(), b.selections());
        assert_eq!(a.bundle().summary(), b.bundle().summary());
        assert_eq!(a.bundle().total_price(), 1_800_000.0 + 900_000.0 + 700_000.0 + 500_000.0 + 3_000_000.0 + 350_000.0 + 650_000.0);
    }

    #[test]
    fn test_override_with_duplicate_blank_skus() {
        let mut parts = inventory();
        parts.retain(|p| p.category_label != "Memory RAM");
        parts.push(part("", "Memory RAM", 300_000.0, &[Tier::Standard]));
        parts.push(part("", "Memory RAM", 600_000.0, &[Tier::Standard]));
        let last = parts.len() - 1;
        parts[last].name = "16GB DDR4".to_string();

        let mut session = AssemblySession::new(parts, Tier::Standard);
        session.override_slot(Slot::Ram, 1).unwrap();

        let ram = session.slot(Slot::Ram).unwrap();
        assert_eq!(ram.selected_index, Some(1));
        assert_eq!(ram.selected().unwrap().name, "16GB DDR4");
        assert_eq!(ram.selected().unwrap().price, 600_000.0);
    }

    #[test]
    fn test_entry_ids_follow_input_order() {
        let session = AssemblySession::new(inventory(), Tier::Office);
        for (i, part) in session.parts().iter().enumerate() {
            assert_eq!(part.entry_id, i);
        }
    }
}
