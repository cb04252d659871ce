// ==========================================
// PC 组装套餐系统 - 分级规则纯函数库
// ==========================================
// 职责: 按类目判定商品的用途分级与派生标志
// 红线: 无状态、无副作用、无 I/O 操作
// 红线: 所有命中规则必须输出 reason
// 约定: name 参数均为已大写的商品名
// ==========================================

use crate::config::classifier_rules::{
    CasingRules, MemoryRules, MotherboardRules, PowerSupplyRules, ProcessorRules, VgaRules,
};
use crate::domain::types::{Tier, TierSet};
use regex::Regex;

// ==========================================
// 判定结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleOutcome {
    pub tiers: TierSet,
    pub requires_discrete_gpu: bool,
    pub has_built_in_psu: bool,
    pub reasons: Vec<String>,
}

impl RuleOutcome {
    fn grant(&mut self, tier: Tier, reason: String) {
        self.tiers.insert(tier);
        self.reasons.push(format!("{}: {}", tier, reason));
    }
}

// ==========================================
// ClassifierCore - 纯函数工具类
// ==========================================
pub struct ClassifierCore;

impl ClassifierCore {
    /// 返回第一个被名称包含的 Token（子串匹配）
    pub fn first_token_in<'a>(name: &str, tokens: &'a [String]) -> Option<&'a str> {
        tokens
            .iter()
            .map(String::as_str)
            .find(|token| !token.is_empty() && name.contains(token))
    }

    /// Processor
    ///
    /// # 规则
    /// - Office / Standard: 名称含 I3 或 I5
    /// - Advanced: 名称含 I5 / I7 / I9
    /// - requires_discrete_gpu: 名称匹配 `\d+[0-9]F\b`（如 13400F）
    pub fn classify_processor(
        name: &str,
        rules: &ProcessorRules,
        discrete_gpu: &Regex,
    ) -> RuleOutcome {
        let mut outcome = RuleOutcome::default();

        if let Some(m) = discrete_gpu.find(name) {
            outcome.requires_discrete_gpu = true;
            outcome
                .reasons
                .push(format!("NEED_VGA: model {} has no integrated GPU", m.as_str()));
        }
        if let Some(token) = Self::first_token_in(name, &rules.office_tokens) {
            outcome.grant(Tier::Office, format!("processor token {}", token));
        }
        if let Some(token) = Self::first_token_in(name, &rules.standard_tokens) {
            outcome.grant(Tier::Standard, format!("processor token {}", token));
        }
        if let Some(token) = Self::first_token_in(name, &rules.advanced_tokens) {
            outcome.grant(Tier::Advanced, format!("processor token {}", token));
        }

        outcome
    }

    /// Motherboard
    ///
    /// # 规则
    /// - Office: Intel H 系列 或 AMD A 系列
    /// - Standard: Intel B 系列且价格 < 阈值,或 AMD B 系列
    /// - Advanced: Intel B 系列且价格 >= 阈值,或 Intel Z / AMD B / AMD X 系列
    pub fn classify_motherboard(name: &str, price: f64, rules: &MotherboardRules) -> RuleOutcome {
        let mut outcome = RuleOutcome::default();

        let intel_h = Self::first_token_in(name, &rules.intel_h_tokens);
        let amd_a = Self::first_token_in(name, &rules.amd_a_tokens);
        let intel_b = Self::first_token_in(name, &rules.intel_b_tokens);
        let intel_z = Self::first_token_in(name, &rules.intel_z_tokens);
        let amd_b = Self::first_token_in(name, &rules.amd_b_tokens);
        let amd_x = Self::first_token_in(name, &rules.amd_x_tokens);
        let threshold = rules.intel_b_advanced_min_price;

        if let Some(token) = intel_h.or(amd_a) {
            outcome.grant(Tier::Office, format!("budget chipset {}", token));
        }

        match (intel_b, amd_b) {
            (Some(token), _) if price < threshold => {
                outcome.grant(
                    Tier::Standard,
                    format!("chipset {} priced below {}", token, threshold),
                );
            }
            (_, Some(token)) => {
                outcome.grant(Tier::Standard, format!("mid chipset {}", token));
            }
            _ => {}
        }

        let advanced = match intel_b {
            Some(token) if price >= threshold => {
                Some(format!("chipset {} priced at or above {}", token, threshold))
            }
            _ => intel_z
                .or(amd_b)
                .or(amd_x)
                .map(|token| format!("high chipset {}", token)),
        };
        if let Some(reason) = advanced {
            outcome.grant(Tier::Advanced, reason);
        }

        outcome
    }

    /// 从名称中解析内存容量（GB）
    ///
    /// # 规则
    /// 1. 先剔除括号内文本（如 "(KIT OF 2)"）
    /// 2. 再取第一个 `<数字> GB`
    ///
    /// # 返回
    /// - None: 无匹配或数字溢出（不视为错误）
    pub fn parse_memory_capacity_gb(name: &str, strip: &Regex, capacity: &Regex) -> Option<u32> {
        let stripped = strip.replace_all(name, "");
        capacity
            .captures(&stripped)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
    }

    /// Memory RAM
    ///
    /// 区间相互重叠: 16GB 同时属于 Office 与 Standard
    pub fn classify_memory(capacity_gb: Option<u32>, rules: &MemoryRules) -> RuleOutcome {
        let mut outcome = RuleOutcome::default();
        let Some(gb) = capacity_gb else {
            return outcome;
        };

        let bands = [
            (Tier::Office, rules.office_range),
            (Tier::Standard, rules.standard_range),
            (Tier::Advanced, rules.advanced_range),
        ];
        for (tier, range) in bands {
            if range.contains(gb) {
                outcome.grant(
                    tier,
                    format!("capacity {}GB within [{}, {}]", gb, range.min_gb, range.max_gb),
                );
            }
        }

        outcome
    }

    /// SSD Internal: 所有分级均可用
    pub fn classify_ssd() -> RuleOutcome {
        let mut outcome = RuleOutcome::default();
        for tier in Tier::ALL {
            outcome.grant(tier, "ssd fits every tier".to_string());
        }
        outcome
    }

    /// VGA
    ///
    /// Advanced 的 TI Token 与 Standard 型号可同时命中（分级重叠）
    pub fn classify_vga(name: &str, rules: &VgaRules) -> RuleOutcome {
        let mut outcome = RuleOutcome::default();

        if let Some(token) = Self::first_token_in(name, &rules.office_tokens) {
            outcome.grant(Tier::Office, format!("low-end gpu {}", token));
        }
        if let Some(token) = Self::first_token_in(name, &rules.standard_tokens) {
            outcome.grant(Tier::Standard, format!("mid-range gpu {}", token));
        }

        let suffix = rules.advanced_suffix_token.as_str();
        let advanced = Self::first_token_in(name, &rules.advanced_tokens)
            .map(|token| format!("high-end gpu {}", token))
            .or_else(|| {
                (!suffix.is_empty() && name.contains(suffix))
                    .then(|| format!("name contains {}", suffix))
            });
        if let Some(reason) = advanced {
            outcome.grant(Tier::Advanced, reason);
        }

        outcome
    }

    /// Casing PC
    ///
    /// 互斥分支: 含 PSU → 仅 Office 且自带电源；否则 → Standard + Advanced
    pub fn classify_casing(name: &str, rules: &CasingRules) -> RuleOutcome {
        let mut outcome = RuleOutcome::default();
        let token = rules.built_in_psu_token.as_str();

        if !token.is_empty() && name.contains(token) {
            outcome.has_built_in_psu = true;
            outcome.grant(Tier::Office, format!("casing bundled with {}", token));
        } else {
            outcome.grant(Tier::Standard, "casing without psu".to_string());
            outcome.grant(Tier::Advanced, "casing without psu".to_string());
        }

        outcome
    }

    /// Power Supply
    ///
    /// # 规则
    /// - Office: 价格 < 阈值
    /// - Standard: 价格 >= 阈值
    /// - Advanced: 名称含 80+ 认证 Token（与价格判定独立）
    pub fn classify_power_supply(name: &str, price: f64, rules: &PowerSupplyRules) -> RuleOutcome {
        let mut outcome = RuleOutcome::default();
        let threshold = rules.standard_min_price;

        if price < threshold {
            outcome.grant(Tier::Office, format!("price {} below {}", price, threshold));
        } else {
            outcome.grant(
                Tier::Standard,
                format!("price {} at or above {}", price, threshold),
            );
        }
        if let Some(token) = Self::first_token_in(name, &rules.certification_tokens) {
            outcome.grant(Tier::Advanced, format!("certified {}", token));
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClassifierRules;

    fn rules() -> ClassifierRules {
        ClassifierRules::default()
    }

    fn gpu_regex() -> Regex {
        Regex::new(&rules().processor.discrete_gpu_pattern).unwrap()
    }

    #[test]
    fn test_processor_f_suffix_requires_gpu() {
        let outcome =
            ClassifierCore::classify_processor("INTEL CORE I5-13400F", &rules().processor, &gpu_regex());
        assert!(outcome.requires_discrete_gpu);
        assert_eq!(outcome.tiers, TierSet::all());

        let outcome =
            ClassifierCore::classify_processor("INTEL CORE I5-13400", &rules().processor, &gpu_regex());
        assert!(!outcome.requires_discrete_gpu);
        assert_eq!(outcome.tiers, TierSet::all());
    }

    #[test]
    fn test_processor_tiers_by_family() {
        let r = rules();
        let i3 = ClassifierCore::classify_processor("CORE I3-12100", &r.processor, &gpu_regex());
        assert_eq!(i3.tiers, TierSet::of(&[Tier::Office, Tier::Standard]));

        let i7 = ClassifierCore::classify_processor("CORE I7-14700F", &r.processor, &gpu_regex());
        assert_eq!(i7.tiers, TierSet::of(&[Tier::Advanced]));
        assert!(i7.requires_discrete_gpu);

        // KF 型号: F 前不是数字,不命中
        let kf = ClassifierCore::classify_processor("CORE I7-14700KF", &r.processor, &gpu_regex());
        assert!(!kf.requires_discrete_gpu);

        let ryzen = ClassifierCore::classify_processor("RYZEN 5 5600G", &r.processor, &gpu_regex());
        assert!(ryzen.tiers.is_empty());
        assert!(ryzen.reasons.is_empty());
    }

    #[test]
    fn test_processor_f_inside_word_not_matched() {
        // "F" 后接字母不构成词边界
        let outcome =
            ClassifierCore::classify_processor("I5-12400FX", &rules().processor, &gpu_regex());
        assert!(!outcome.requires_discrete_gpu);
    }

    #[test]
    fn test_motherboard_intel_b_price_split() {
        let r = rules();
        let cheap = ClassifierCore::classify_motherboard("MSI PRO B760M-E", 1_800_000.0, &r.motherboard);
        assert_eq!(cheap.tiers, TierSet::of(&[Tier::Standard]));

        let pricey = ClassifierCore::classify_motherboard("ASUS TUF B760-PLUS", 2_500_000.0, &r.motherboard);
        assert_eq!(pricey.tiers, TierSet::of(&[Tier::Advanced]));

        let edge = ClassifierCore::classify_motherboard("B760 EDGE", 2_000_000.0, &r.motherboard);
        assert_eq!(edge.tiers, TierSet::of(&[Tier::Advanced]));
    }

    #[test]
    fn test_motherboard_families() {
        let r = rules();
        let h610 = ClassifierCore::classify_motherboard("ASROCK H610M-HVS", 1_000_000.0, &r.motherboard);
        assert_eq!(h610.tiers, TierSet::of(&[Tier::Office]));

        let a520 = ClassifierCore::classify_motherboard("MSI A520M-A PRO", 900_000.0, &r.motherboard);
        assert_eq!(a520.tiers, TierSet::of(&[Tier::Office]));

        let b550 = ClassifierCore::classify_motherboard("GIGABYTE B550M DS3H", 1_500_000.0, &r.motherboard);
        assert_eq!(b550.tiers, TierSet::of(&[Tier::Standard, Tier::Advanced]));

        let z790 = ClassifierCore::classify_motherboard("ROG STRIX Z790-E", 8_000_000.0, &r.motherboard);
        assert_eq!(z790.tiers, TierSet::of(&[Tier::Advanced]));

        let x870 = ClassifierCore::classify_motherboard("X870 AORUS", 6_000_000.0, &r.motherboard);
        assert_eq!(x870.tiers, TierSet::of(&[Tier::Advanced]));
    }

    #[test]
    fn test_memory_capacity_strips_parentheses() {
        let r = rules();
        let strip = Regex::new(&r.memory.strip_pattern).unwrap();
        let cap = Regex::new(&r.memory.capacity_pattern).unwrap();

        assert_eq!(
            ClassifierCore::parse_memory_capacity_gb("16GB (KIT OF 2) DDR4", &strip, &cap),
            Some(16)
        );
        assert_eq!(
            ClassifierCore::parse_memory_capacity_gb("DDR5 (2X16GB) 32 GB", &strip, &cap),
            Some(32)
        );
        assert_eq!(
            ClassifierCore::parse_memory_capacity_gb("DDR4 3200MHZ", &strip, &cap),
            None
        );
    }

    #[test]
    fn test_memory_overlapping_bands() {
        let r = rules();
        assert_eq!(
            ClassifierCore::classify_memory(Some(16), &r.memory).tiers,
            TierSet::of(&[Tier::Office, Tier::Standard])
        );
        assert_eq!(
            ClassifierCore::classify_memory(Some(32), &r.memory).tiers,
            TierSet::of(&[Tier::Standard, Tier::Advanced])
        );
        assert_eq!(
            ClassifierCore::classify_memory(Some(4), &r.memory).tiers,
            TierSet::empty()
        );
        assert!(ClassifierCore::classify_memory(None, &r.memory).tiers.is_empty());
    }

    #[test]
    fn test_vga_ti_overlaps_standard() {
        let r = rules();
        let ti = ClassifierCore::classify_vga("ZOTAC RTX3060 TI TWIN EDGE", &r.vga);
        assert_eq!(ti.tiers, TierSet::of(&[Tier::Standard, Tier::Advanced]));

        let low = ClassifierCore::classify_vga("GT730 2GB", &r.vga);
        assert_eq!(low.tiers, TierSet::of(&[Tier::Office]));

        let high = ClassifierCore::classify_vga("RTX5070 12GB", &r.vga);
        assert_eq!(high.tiers, TierSet::of(&[Tier::Advanced]));
    }

    #[test]
    fn test_casing_branches_exclusive() {
        let r = rules();
        let with_psu = ClassifierCore::classify_casing("ATX CASE WITH PSU 500W", &r.casing);
        assert!(with_psu.has_built_in_psu);
        assert_eq!(with_psu.tiers, TierSet::of(&[Tier::Office]));

        let plain = ClassifierCore::classify_casing("ATX CASE RGB", &r.casing);
        assert!(!plain.has_built_in_psu);
        assert_eq!(plain.tiers, TierSet::of(&[Tier::Standard, Tier::Advanced]));
    }

    #[test]
    fn test_power_supply_price_and_certification() {
        let r = rules();
        let cheap = ClassifierCore::classify_power_supply("450W STANDARD", 450_000.0, &r.power_supply);
        assert_eq!(cheap.tiers, TierSet::of(&[Tier::Office]));

        let gold = ClassifierCore::classify_power_supply("650W GOLD", 600_000.0, &r.power_supply);
        assert_eq!(gold.tiers, TierSet::of(&[Tier::Standard, Tier::Advanced]));

        let cheap_bronze = ClassifierCore::classify_power_supply("550W BRONZE", 400_000.0, &r.power_supply);
        assert_eq!(cheap_bronze.tiers, TierSet::of(&[Tier::Office, Tier::Advanced]));
    }
}
