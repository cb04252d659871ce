// ==========================================
// PC 组装套餐系统 - 数据清洗器实现
// ==========================================
// 职责: TRIM / 空值标准化 / 数值强制转换
// 规则: 数值列 (Web, Stock Total, Current SO) 无法解析时记为 0,并留下告警
// ==========================================

use crate::domain::part::{columns, Part, RawPartRecord};
use crate::importer::part_importer_trait::DataCleaner as DataCleanerTrait;
use serde::{Deserialize, Serialize};

/// 数值强制转换记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldCoercion {
    pub row_number: usize,
    pub sku: String,
    pub field: String,
    pub raw_value: String, // 空值记为 ""
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn clean_text(&self, value: Option<&str>) -> String {
        value.map(|v| v.trim().to_string()).unwrap_or_default()
    }

    fn parse_number(&self, value: Option<&str>) -> Option<f64> {
        value
            .map(str::trim)
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|n| n.is_finite())
    }
}

impl DataCleaner {
    /// RawPartRecord → 未分级 Part
    ///
    /// 强制转换产生的告警追加到 coercions
    pub fn clean_record(&self, record: RawPartRecord, coercions: &mut Vec<FieldCoercion>) -> Part {
        let sku = self.clean_text(record.sku.as_deref());
        let row_number = record.row_number;

        let mut number = |field: &str, raw: Option<&str>| -> f64 {
            match self.parse_number(raw) {
                Some(n) => n,
                None => {
                    coercions.push(FieldCoercion {
                        row_number,
                        sku: sku.clone(),
                        field: field.to_string(),
                        raw_value: raw.unwrap_or("").to_string(),
                    });
                    0.0
                }
            }
        };

        let price = number(columns::PRICE, record.price.as_deref());
        let stock_total = number(columns::STOCK_TOTAL, record.stock_total.as_deref());
        let current_so = number(columns::CURRENT_SO, record.current_so.as_deref());

        let mut part = Part::new(
            sku.clone(),
            self.clean_text(record.category.as_deref()),
            self.clean_text(record.name.as_deref()),
            price,
            stock_total as i64,
        )
        .with_brand(self.clean_text(record.brand.as_deref()));
        part.current_so = current_so as i64;
        part.extra = record.extra;
        part.row_number = row_number;
        part
    }
}
