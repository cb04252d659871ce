// ==========================================
// PC 组装套餐系统 - 领域类型定义
// ==========================================
// 职责: 用途分级 / 商品类目 / 套餐槽位 / 条件槽位状态
// 红线: 分级是集合,不是评分 (一个商品可同时属于多个分级)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 用途分级 (Tier)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    Office,   // 办公
    Standard, // 标准游戏 / 2D 设计
    Advanced, // 高阶游戏 / 3D 设计
}

impl Tier {
    /// 全部分级（固定顺序）
    pub const ALL: [Tier; 3] = [Tier::Office, Tier::Standard, Tier::Advanced];

    /// 分级列名（与导出表的标志列一致）
    pub fn column_key(&self) -> &'static str {
        match self {
            Tier::Office => "Office",
            Tier::Standard => "Std/2D",
            Tier::Advanced => "Adv/3D",
        }
    }

    /// 文件名安全的分级标识
    pub fn file_key(&self) -> &'static str {
        match self {
            Tier::Office => "Office",
            Tier::Standard => "Std_2D",
            Tier::Advanced => "Adv_3D",
        }
    }

    /// 操作员看到的分级名称
    pub fn display_label(&self) -> &'static str {
        match self {
            Tier::Office => "Office",
            Tier::Standard => "Gaming Standard / Design 2D",
            Tier::Advanced => "Gaming Advanced / Design 3D",
        }
    }

    /// i18n 键
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Tier::Office => "tier.office",
            Tier::Standard => "tier.standard",
            Tier::Advanced => "tier.advanced",
        }
    }

    /// 从字符串解析分级
    ///
    /// 接受: 列名 (Office / Std/2D / Adv/3D)、显示名称、
    /// 或 office / standard / advanced（不区分大小写）
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase();
        Tier::ALL.into_iter().find(|tier| {
            normalized == tier.column_key().to_lowercase()
                || normalized == tier.display_label().to_lowercase()
                || normalized == tier.to_string().to_lowercase()
        })
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tier::parse(s).ok_or_else(|| format!("未知分级: {}", s))
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Office => write!(f, "OFFICE"),
            Tier::Standard => write!(f, "STANDARD"),
            Tier::Advanced => write!(f, "ADVANCED"),
        }
    }
}

// ==========================================
// 分级集合 (TierSet)
// ==========================================
// 三个标志互相独立: 0~3 个分级均合法
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSet {
    pub office: bool,
    pub standard: bool,
    pub advanced: bool,
}

impl TierSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            office: true,
            standard: true,
            advanced: true,
        }
    }

    pub fn of(tiers: &[Tier]) -> Self {
        let mut set = Self::empty();
        for tier in tiers {
            set.insert(*tier);
        }
        set
    }

    pub fn insert(&mut self, tier: Tier) {
        match tier {
            Tier::Office => self.office = true,
            Tier::Standard => self.standard = true,
            Tier::Advanced => self.advanced = true,
        }
    }

    pub fn contains(&self, tier: Tier) -> bool {
        match tier {
            Tier::Office => self.office,
            Tier::Standard => self.standard,
            Tier::Advanced => self.advanced,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.office && !self.standard && !self.advanced
    }

    pub fn iter(&self) -> impl Iterator<Item = Tier> + '_ {
        Tier::ALL.into_iter().filter(|tier| self.contains(*tier))
    }
}

// ==========================================
// 商品类目 (Category)
// ==========================================
// 源字段: Kategori（精确匹配,区分大小写前先 TRIM）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Processor,
    Motherboard,
    MemoryRam,
    SsdInternal,
    Vga,
    CasingPc,
    PowerSupply,
}

impl Category {
    /// 源数据中的类目标签
    pub fn source_label(&self) -> &'static str {
        match self {
            Category::Processor => "Processor",
            Category::Motherboard => "Motherboard",
            Category::MemoryRam => "Memory RAM",
            Category::SsdInternal => "SSD Internal",
            Category::Vga => "VGA",
            Category::CasingPc => "Casing PC",
            Category::PowerSupply => "Power Supply",
        }
    }

    /// 从源标签解析（未知类目返回 None,原样透传）
    pub fn from_source_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Processor" => Some(Category::Processor),
            "Motherboard" => Some(Category::Motherboard),
            "Memory RAM" => Some(Category::MemoryRam),
            "SSD Internal" => Some(Category::SsdInternal),
            "VGA" => Some(Category::Vga),
            "Casing PC" => Some(Category::CasingPc),
            "Power Supply" => Some(Category::PowerSupply),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source_label())
    }
}

// ==========================================
// 套餐槽位 (Component Slot)
// ==========================================
// 固定顺序: 与装配顺序、汇总表顺序一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Slot {
    Processor,
    Motherboard,
    Ram,
    Ssd,
    Vga,
    Casing,
    Psu,
}

impl Slot {
    /// 装配顺序
    pub const ORDER: [Slot; 7] = [
        Slot::Processor,
        Slot::Motherboard,
        Slot::Ram,
        Slot::Ssd,
        Slot::Vga,
        Slot::Casing,
        Slot::Psu,
    ];

    /// 必选槽位
    pub const MANDATORY: [Slot; 5] = [
        Slot::Processor,
        Slot::Motherboard,
        Slot::Ram,
        Slot::Ssd,
        Slot::Casing,
    ];

    pub fn category(&self) -> Category {
        match self {
            Slot::Processor => Category::Processor,
            Slot::Motherboard => Category::Motherboard,
            Slot::Ram => Category::MemoryRam,
            Slot::Ssd => Category::SsdInternal,
            Slot::Vga => Category::Vga,
            Slot::Casing => Category::CasingPc,
            Slot::Psu => Category::PowerSupply,
        }
    }

    /// 条件槽位: 是否启用取决于上游槽位的派生标志
    pub fn is_conditional(&self) -> bool {
        matches!(self, Slot::Vga | Slot::Psu)
    }

    /// 条件槽位的上游槽位
    pub fn upstream(&self) -> Option<Slot> {
        match self {
            Slot::Vga => Some(Slot::Processor),
            Slot::Psu => Some(Slot::Casing),
            _ => None,
        }
    }

    /// 汇总表中的组件名
    pub fn component_name(&self) -> &'static str {
        match self {
            Slot::Processor => "Processor",
            Slot::Motherboard => "Motherboard",
            Slot::Ram => "RAM",
            Slot::Ssd => "SSD",
            Slot::Vga => "VGA",
            Slot::Casing => "Casing",
            Slot::Psu => "PSU",
        }
    }

    /// i18n 键
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Slot::Processor => "slot.processor",
            Slot::Motherboard => "slot.motherboard",
            Slot::Ram => "slot.ram",
            Slot::Ssd => "slot.ssd",
            Slot::Vga => "slot.vga",
            Slot::Casing => "slot.casing",
            Slot::Psu => "slot.psu",
        }
    }

    /// 从字符串解析槽位（接受组件名或类目标签,不区分大小写）
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase();
        Slot::ORDER.into_iter().find(|slot| {
            normalized == slot.component_name().to_lowercase()
                || normalized == slot.category().source_label().to_lowercase()
        })
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.component_name())
    }
}

// ==========================================
// 条件槽位状态 (VGA / PSU)
// ==========================================
// 转换只由上游槽位的派生标志与操作员的选入/覆写驱动
// 上游未解析前,状态恒为 NotApplicable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConditionalSlotState {
    NotApplicable,       // 不适用（上游未解析 / 机箱自带电源）
    OptionalUnselected,  // 可选,未选入
    OptionalSelected,    // 可选,已选入
    MandatoryUnresolved, // 必选,无候选
    MandatoryResolved,   // 必选,已解析
}

impl ConditionalSlotState {
    /// 该状态下槽位是否计入套餐
    pub fn is_included(&self) -> bool {
        matches!(
            self,
            ConditionalSlotState::OptionalSelected | ConditionalSlotState::MandatoryResolved
        )
    }

    /// 该状态是否使套餐不完整
    pub fn blocks_completion(&self) -> bool {
        matches!(self, ConditionalSlotState::MandatoryUnresolved)
    }
}

impl fmt::Display for ConditionalSlotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionalSlotState::NotApplicable => write!(f, "NOT_APPLICABLE"),
            ConditionalSlotState::OptionalUnselected => write!(f, "OPTIONAL_UNSELECTED"),
            ConditionalSlotState::OptionalSelected => write!(f, "OPTIONAL_SELECTED"),
            ConditionalSlotState::MandatoryUnresolved => write!(f, "MANDATORY_UNRESOLVED"),
            ConditionalSlotState::MandatoryResolved => write!(f, "MANDATORY_RESOLVED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_parse_accepts_all_forms() {
        assert_eq!(Tier::parse("office"), Some(Tier::Office));
        assert_eq!(Tier::parse("Std/2D"), Some(Tier::Standard));
        assert_eq!(Tier::parse("Gaming Advanced / Design 3D"), Some(Tier::Advanced));
        assert_eq!(Tier::parse(" ADVANCED "), Some(Tier::Advanced));
        assert_eq!(Tier::parse("server"), None);
        assert_eq!("standard".parse::<Tier>(), Ok(Tier::Standard));
        assert!("server".parse::<Tier>().is_err());
    }

    #[test]
    fn test_tier_set_independent_flags() {
        let mut set = TierSet::empty();
        assert!(set.is_empty());

        set.insert(Tier::Office);
        set.insert(Tier::Advanced);
        assert!(set.contains(Tier::Office));
        assert!(!set.contains(Tier::Standard));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Tier::Office, Tier::Advanced]);
    }

    #[test]
    fn test_category_source_label_roundtrip() {
        assert_eq!(Category::from_source_label(" Memory RAM "), Some(Category::MemoryRam));
        assert_eq!(Category::from_source_label("Monitor"), None);
        assert_eq!(Category::CasingPc.source_label(), "Casing PC");
    }

    #[test]
    fn test_slot_conditional_upstream() {
        assert_eq!(Slot::Vga.upstream(), Some(Slot::Processor));
        assert_eq!(Slot::Psu.upstream(), Some(Slot::Casing));
        assert!(!Slot::Ram.is_conditional());
        assert_eq!(Slot::parse("power supply"), Some(Slot::Psu));
        assert_eq!(Slot::parse("ram"), Some(Slot::Ram));
    }

    #[test]
    fn test_conditional_state_inclusion() {
        use ConditionalSlotState::*;

        let included: Vec<_> = [NotApplicable, OptionalUnselected, OptionalSelected, MandatoryUnresolved, MandatoryResolved]
            .into_iter()
            .filter(ConditionalSlotState::is_included)
            .collect();
        assert_eq!(included, vec![OptionalSelected, MandatoryResolved]);
        assert!(MandatoryUnresolved.blocks_completion());
        assert!(!OptionalUnselected.blocks_completion());
    }
}
