// ==========================================
// PC 组装套餐系统 - 字段映射器实现
// ==========================================
// 职责: 源列 → RawPartRecord；必需列检查；其余列原样透传
// ==========================================

use crate::domain::part::{columns, RawPartRecord};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::part_importer_trait::FieldMapper as FieldMapperTrait;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Default, Clone, Copy)]
pub struct FieldMapper;

impl FieldMapperTrait for FieldMapper {
    fn check_required_columns(&self, headers: &[String]) -> ImportResult<()> {
        let missing: Vec<&str> = columns::REQUIRED
            .iter()
            .copied()
            .filter(|required| !headers.iter().any(|h| h == required))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ImportError::MissingRequiredColumn(missing.join(", ")))
        }
    }

    fn map_to_raw_part(&self, mut row: HashMap<String, String>, row_number: usize) -> RawPartRecord {
        let mut take = |key: &str| row.remove(key);

        let sku = take(columns::SKU);
        let category = take(columns::CATEGORY);
        let brand = take(columns::BRAND);
        let name = take(columns::NAME);
        let price = take(columns::PRICE);
        let stock_total = take(columns::STOCK_TOTAL);
        let current_so = take(columns::CURRENT_SO);

        RawPartRecord {
            sku,
            category,
            brand,
            name,
            price,
            stock_total,
            current_so,
            extra: row.into_iter().collect::<BTreeMap<_, _>>(),
            row_number,
        }
    }
}
