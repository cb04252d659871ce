// ==========================================
// PC 组装套餐系统 - 配置管理器
// ==========================================
// 职责: 分级规则的加载、覆写、快照
// 存储: config_kv 表 (key-value + scope)
// 格式: Token 列表为逗号分隔,区间为 "min,max",价格为数字
// ==========================================

use crate::config::classifier_rules::{CapacityRange, ClassifierRules};
use crate::config::error::{ConfigError, ConfigResult};
use crate::config::rules_config_trait::RulesConfigReader;
use crate::db::{configure_sqlite_connection, open_sqlite_connection};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tracing::warn;

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    pub const PROCESSOR_OFFICE_TOKENS: &str = "processor_office_tokens";
    pub const PROCESSOR_STANDARD_TOKENS: &str = "processor_standard_tokens";
    pub const PROCESSOR_ADVANCED_TOKENS: &str = "processor_advanced_tokens";
    pub const PROCESSOR_DISCRETE_GPU_PATTERN: &str = "processor_discrete_gpu_pattern";

    pub const MOBO_INTEL_H_TOKENS: &str = "mobo_intel_h_tokens";
    pub const MOBO_AMD_A_TOKENS: &str = "mobo_amd_a_tokens";
    pub const MOBO_INTEL_B_TOKENS: &str = "mobo_intel_b_tokens";
    pub const MOBO_INTEL_Z_TOKENS: &str = "mobo_intel_z_tokens";
    pub const MOBO_AMD_B_TOKENS: &str = "mobo_amd_b_tokens";
    pub const MOBO_AMD_X_TOKENS: &str = "mobo_amd_x_tokens";
    pub const MOBO_INTEL_B_ADVANCED_MIN_PRICE: &str = "mobo_intel_b_advanced_min_price";

    pub const RAM_OFFICE_RANGE: &str = "ram_office_range_gb";
    pub const RAM_STANDARD_RANGE: &str = "ram_standard_range_gb";
    pub const RAM_ADVANCED_RANGE: &str = "ram_advanced_range_gb";

    pub const VGA_OFFICE_TOKENS: &str = "vga_office_tokens";
    pub const VGA_STANDARD_TOKENS: &str = "vga_standard_tokens";
    pub const VGA_ADVANCED_TOKENS: &str = "vga_advanced_tokens";
    pub const VGA_ADVANCED_SUFFIX_TOKEN: &str = "vga_advanced_suffix_token";

    pub const CASING_PSU_TOKEN: &str = "casing_psu_token";

    pub const PSU_STANDARD_MIN_PRICE: &str = "psu_standard_min_price";
    pub const PSU_CERTIFICATION_TOKENS: &str = "psu_certification_tokens";
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 打开（必要时创建）配置数据库
    pub fn new(db_path: &str) -> ConfigResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        ensure_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：会对传入连接再次应用统一 PRAGMA（幂等）并确保表存在。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> ConfigResult<Self> {
        {
            let guard = lock(&conn)?;
            configure_sqlite_connection(&guard)?;
            ensure_schema(&guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    pub fn get_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let conn = lock(&self.conn)?;

        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// 写入单个配置值（UPSERT）
    pub fn update_config(&self, key: &str, value: &str) -> ConfigResult<()> {
        let conn = lock(&self.conn)?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    /// 批量写入配置（单事务）
    pub fn batch_update_configs(&self, values: &BTreeMap<String, String>) -> ConfigResult<usize> {
        let mut conn = lock(&self.conn)?;
        let tx = conn.transaction()?;

        let mut count = 0;
        for (key, value) in values {
            count += tx.execute(
                "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
                 ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
                params![key, value],
            )?;
        }

        tx.commit()?;
        Ok(count)
    }

    /// 获取所有 global 配置的快照（JSON）
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        let conn = lock(&self.conn)?;

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut config_map: BTreeMap<String, String> = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&json!(config_map))?)
    }

    /// 从配置快照恢复（覆盖同名键）
    pub fn restore_config_from_snapshot(&self, snapshot_json: &str) -> ConfigResult<usize> {
        let config_map: BTreeMap<String, String> = serde_json::from_str(snapshot_json)?;
        self.batch_update_configs(&config_map)
    }

    /// 将整套规则写入 config_kv
    pub fn save_classifier_rules(&self, rules: &ClassifierRules) -> ConfigResult<usize> {
        rules.validate()?;
        self.batch_update_configs(&rules_to_kv(rules))
    }

    /// 读取规则: 默认值 + config_kv 覆写
    pub fn load_classifier_rules(&self) -> ConfigResult<ClassifierRules> {
        use config_keys::*;

        let mut rules = ClassifierRules::default();

        let p = &mut rules.processor;
        self.override_tokens(PROCESSOR_OFFICE_TOKENS, &mut p.office_tokens)?;
        self.override_tokens(PROCESSOR_STANDARD_TOKENS, &mut p.standard_tokens)?;
        self.override_tokens(PROCESSOR_ADVANCED_TOKENS, &mut p.advanced_tokens)?;
        self.override_text(PROCESSOR_DISCRETE_GPU_PATTERN, &mut p.discrete_gpu_pattern)?;

        let m = &mut rules.motherboard;
        self.override_tokens(MOBO_INTEL_H_TOKENS, &mut m.intel_h_tokens)?;
        self.override_tokens(MOBO_AMD_A_TOKENS, &mut m.amd_a_tokens)?;
        self.override_tokens(MOBO_INTEL_B_TOKENS, &mut m.intel_b_tokens)?;
        self.override_tokens(MOBO_INTEL_Z_TOKENS, &mut m.intel_z_tokens)?;
        self.override_tokens(MOBO_AMD_B_TOKENS, &mut m.amd_b_tokens)?;
        self.override_tokens(MOBO_AMD_X_TOKENS, &mut m.amd_x_tokens)?;
        self.override_price(MOBO_INTEL_B_ADVANCED_MIN_PRICE, &mut m.intel_b_advanced_min_price)?;

        let r = &mut rules.memory;
        self.override_range(RAM_OFFICE_RANGE, &mut r.office_range)?;
        self.override_range(RAM_STANDARD_RANGE, &mut r.standard_range)?;
        self.override_range(RAM_ADVANCED_RANGE, &mut r.advanced_range)?;

        let v = &mut rules.vga;
        self.override_tokens(VGA_OFFICE_TOKENS, &mut v.office_tokens)?;
        self.override_tokens(VGA_STANDARD_TOKENS, &mut v.standard_tokens)?;
        self.override_tokens(VGA_ADVANCED_TOKENS, &mut v.advanced_tokens)?;
        self.override_text(VGA_ADVANCED_SUFFIX_TOKEN, &mut v.advanced_suffix_token)?;

        self.override_text(CASING_PSU_TOKEN, &mut rules.casing.built_in_psu_token)?;

        let s = &mut rules.power_supply;
        self.override_price(PSU_STANDARD_MIN_PRICE, &mut s.standard_min_price)?;
        self.override_tokens(PSU_CERTIFICATION_TOKENS, &mut s.certification_tokens)?;

        rules.validate()?;
        Ok(rules)
    }

    // ===== 覆写辅助 =====

    fn override_tokens(&self, key: &str, target: &mut Vec<String>) -> ConfigResult<()> {
        if let Some(value) = self.get_config_value(key)? {
            let parsed = parse_token_list(&value);
            if parsed.is_empty() {
                warn!(config_key = key, raw_value = %value, "Token 列表为空，使用默认值");
            } else {
                *target = parsed;
            }
        }
        Ok(())
    }

    fn override_text(&self, key: &str, target: &mut String) -> ConfigResult<()> {
        if let Some(value) = self.get_config_value(key)? {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                *target = trimmed.to_string();
            }
        }
        Ok(())
    }

    fn override_price(&self, key: &str, target: &mut f64) -> ConfigResult<()> {
        if let Some(value) = self.get_config_value(key)? {
            match value.trim().parse::<f64>() {
                Ok(price) if price.is_finite() && price >= 0.0 => *target = price,
                _ => warn!(config_key = key, raw_value = %value, "价格阈值格式错误，使用默认值"),
            }
        }
        Ok(())
    }

    fn override_range(&self, key: &str, target: &mut CapacityRange) -> ConfigResult<()> {
        if let Some(value) = self.get_config_value(key)? {
            match parse_range(&value) {
                Some(range) => *target = range,
                None => warn!(config_key = key, raw_value = %value, "容量区间格式错误，使用默认值"),
            }
        }
        Ok(())
    }
}

impl RulesConfigReader for ConfigManager {
    fn classifier_rules(&self) -> ConfigResult<ClassifierRules> {
        self.load_classifier_rules()
    }
}

// ==========================================
// 内部函数
// ==========================================

fn lock(conn: &Arc<Mutex<Connection>>) -> ConfigResult<std::sync::MutexGuard<'_, Connection>> {
    conn.lock()
        .map_err(|e| ConfigError::LockPoisoned(e.to_string()))
}

fn ensure_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id TEXT NOT NULL,
            key TEXT NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (scope_id, key)
        );
        "#,
    )
}

/// 逗号分隔 → 大写 Token 列表
fn parse_token_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|t| t.trim().to_uppercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// "min,max" → CapacityRange
fn parse_range(value: &str) -> Option<CapacityRange> {
    let mut parts = value.split(',').map(|p| p.trim().parse::<u32>());
    let min = parts.next()?.ok()?;
    let max = parts.next()?.ok()?;
    if parts.next().is_some() || min > max {
        return None;
    }
    Some(CapacityRange::new(min, max))
}

fn rules_to_kv(rules: &ClassifierRules) -> BTreeMap<String, String> {
    use config_keys::*;

    let join = |list: &[String]| list.join(",");
    let range = |r: CapacityRange| format!("{},{}", r.min_gb, r.max_gb);

    let entries = [
        (PROCESSOR_OFFICE_TOKENS, join(&rules.processor.office_tokens)),
        (PROCESSOR_STANDARD_TOKENS, join(&rules.processor.standard_tokens)),
        (PROCESSOR_ADVANCED_TOKENS, join(&rules.processor.advanced_tokens)),
        (PROCESSOR_DISCRETE_GPU_PATTERN, rules.processor.discrete_gpu_pattern.clone()),
        (MOBO_INTEL_H_TOKENS, join(&rules.motherboard.intel_h_tokens)),
        (MOBO_AMD_A_TOKENS, join(&rules.motherboard.amd_a_tokens)),
        (MOBO_INTEL_B_TOKENS, join(&rules.motherboard.intel_b_tokens)),
        (MOBO_INTEL_Z_TOKENS, join(&rules.motherboard.intel_z_tokens)),
        (MOBO_AMD_B_TOKENS, join(&rules.motherboard.amd_b_tokens)),
        (MOBO_AMD_X_TOKENS, join(&rules.motherboard.amd_x_tokens)),
        (
            MOBO_INTEL_B_ADVANCED_MIN_PRICE,
            rules.motherboard.intel_b_advanced_min_price.to_string(),
        ),
        (RAM_OFFICE_RANGE, range(rules.memory.office_range)),
        (RAM_STANDARD_RANGE, range(rules.memory.standard_range)),
        (RAM_ADVANCED_RANGE, range(rules.memory.advanced_range)),
        (VGA_OFFICE_TOKENS, join(&rules.vga.office_tokens)),
        (VGA_STANDARD_TOKENS, join(&rules.vga.standard_tokens)),
        (VGA_ADVANCED_TOKENS, join(&rules.vga.advanced_tokens)),
        (VGA_ADVANCED_SUFFIX_TOKEN, rules.vga.advanced_suffix_token.clone()),
        (CASING_PSU_TOKEN, rules.casing.built_in_psu_token.clone()),
        (PSU_STANDARD_MIN_PRICE, rules.power_supply.standard_min_price.to_string()),
        (PSU_CERTIFICATION_TOKENS, join(&rules.power_supply.certification_tokens)),
    ];

    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}
