// ==========================================
// PC 组装套餐系统 - 分级规则配置
// ==========================================
// 职责: 各类目的命名 Token / 价格阈值 / 容量区间
// 说明: 所有 Token 以大写形式与大写后的商品名做子串匹配
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn tokens(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}

// ==========================================
// Processor
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorRules {
    pub office_tokens: Vec<String>,
    pub standard_tokens: Vec<String>,
    pub advanced_tokens: Vec<String>,
    /// 无核显型号: 数字串紧跟结尾 F（词边界）
    pub discrete_gpu_pattern: String,
}

impl Default for ProcessorRules {
    fn default() -> Self {
        Self {
            office_tokens: tokens(&["I3", "I5"]),
            standard_tokens: tokens(&["I3", "I5"]),
            advanced_tokens: tokens(&["I5", "I7", "I9"]),
            discrete_gpu_pattern: r"\d+[0-9]F\b".to_string(),
        }
    }
}

// ==========================================
// Motherboard
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotherboardRules {
    pub intel_h_tokens: Vec<String>,
    pub amd_a_tokens: Vec<String>,
    pub intel_b_tokens: Vec<String>,
    pub intel_z_tokens: Vec<String>,
    pub amd_b_tokens: Vec<String>,
    pub amd_x_tokens: Vec<String>,
    /// Intel B 系列: 低于此价格归 Standard,不低于归 Advanced
    pub intel_b_advanced_min_price: f64,
}

impl Default for MotherboardRules {
    fn default() -> Self {
        Self {
            intel_h_tokens: tokens(&["H410", "H510", "H610", "H810", "H81", "H110", "H310"]),
            amd_a_tokens: tokens(&["A520", "A620"]),
            intel_b_tokens: tokens(&["B660", "B760", "B860"]),
            intel_z_tokens: tokens(&["Z790", "Z890"]),
            amd_b_tokens: tokens(&["B450", "B550", "B650", "B840", "B850"]),
            amd_x_tokens: tokens(&["X870"]),
            intel_b_advanced_min_price: 2_000_000.0,
        }
    }
}

// ==========================================
// Memory RAM
// ==========================================
/// 闭区间 [min_gb, max_gb]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityRange {
    pub min_gb: u32,
    pub max_gb: u32,
}

impl CapacityRange {
    pub const fn new(min_gb: u32, max_gb: u32) -> Self {
        Self { min_gb, max_gb }
    }

    pub fn contains(&self, gb: u32) -> bool {
        gb >= self.min_gb && gb <= self.max_gb
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryRules {
    /// 先剔除括号内容（如 "(Kit of 2)"）
    pub strip_pattern: String,
    /// 捕获组 1 为容量数字
    pub capacity_pattern: String,
    pub office_range: CapacityRange,
    pub standard_range: CapacityRange,
    pub advanced_range: CapacityRange,
}

impl Default for MemoryRules {
    fn default() -> Self {
        Self {
            strip_pattern: r"\(.*?\)".to_string(),
            capacity_pattern: r"(\d+)\s*GB".to_string(),
            office_range: CapacityRange::new(8, 16),
            standard_range: CapacityRange::new(16, 32),
            advanced_range: CapacityRange::new(32, 128),
        }
    }
}

// ==========================================
// VGA
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VgaRules {
    pub office_tokens: Vec<String>,
    pub standard_tokens: Vec<String>,
    pub advanced_tokens: Vec<String>,
    /// 名称含此 Token 也归 Advanced（与 Standard 可重叠）
    pub advanced_suffix_token: String,
}

impl Default for VgaRules {
    fn default() -> Self {
        Self {
            office_tokens: tokens(&["GT710", "GT730"]),
            standard_tokens: tokens(&["GT1030", "GTX1650", "RTX3050", "RTX3060", "RTX5050", "RTX4060"]),
            advanced_tokens: tokens(&["RTX5060", "RTX5070", "RTX5080", "RTX5090"]),
            advanced_suffix_token: "TI".to_string(),
        }
    }
}

// ==========================================
// Casing PC
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CasingRules {
    pub built_in_psu_token: String,
}

impl Default for CasingRules {
    fn default() -> Self {
        Self {
            built_in_psu_token: "PSU".to_string(),
        }
    }
}

// ==========================================
// Power Supply
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerSupplyRules {
    /// 低于此价格归 Office,不低于归 Standard
    pub standard_min_price: f64,
    pub certification_tokens: Vec<String>,
}

impl Default for PowerSupplyRules {
    fn default() -> Self {
        Self {
            standard_min_price: 500_000.0,
            certification_tokens: tokens(&["BRONZE", "SILVER", "GOLD", "PLATINUM", "TITANIUM"]),
        }
    }
}

// ==========================================
// ClassifierRules - 全量规则
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierRules {
    pub processor: ProcessorRules,
    pub motherboard: MotherboardRules,
    pub memory: MemoryRules,
    pub vga: VgaRules,
    pub casing: CasingRules,
    pub power_supply: PowerSupplyRules,
}

impl ClassifierRules {
    /// 从 JSON 文件加载（缺失字段取默认值）
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            source_name: path.display().to_string(),
            message: e.to_string(),
        })?;
        let rules: ClassifierRules = serde_json::from_str(&raw)?;
        rules.validate()?;
        Ok(rules)
    }

    /// 校验阈值与区间
    pub fn validate(&self) -> ConfigResult<()> {
        let ranges = [
            ("memory.office_range", self.memory.office_range),
            ("memory.standard_range", self.memory.standard_range),
            ("memory.advanced_range", self.memory.advanced_range),
        ];
        for (key, range) in ranges {
            if range.min_gb > range.max_gb {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: format!("{}..{}", range.min_gb, range.max_gb),
                    message: "min_gb 大于 max_gb".to_string(),
                });
            }
        }

        let prices = [
            (
                "motherboard.intel_b_advanced_min_price",
                self.motherboard.intel_b_advanced_min_price,
            ),
            (
                "power_supply.standard_min_price",
                self.power_supply.standard_min_price,
            ),
        ];
        for (key, price) in prices {
            if !price.is_finite() || price < 0.0 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: price.to_string(),
                    message: "价格阈值必须为非负数".to_string(),
                });
            }
        }

        Ok(())
    }
}
