// ==========================================
// PC 组装套餐系统 - 通用表格
// ==========================================
// 职责: 生成交给展示层 / 导出器的行列数据
// - 分级库存表: 已分级、已过滤、按价格升序
// - 套餐汇总表: 槽位顺序 + TOTAL 行
// ==========================================

use crate::domain::bundle::Bundle;
use crate::domain::part::{columns, format_number, Part};
use crate::domain::types::Tier;
use crate::engine::tier_filter::TierFilter;
use serde::{Deserialize, Serialize};

/// 分级库存表的基础列（源表存在时才输出）
const AUDIT_BASE_COLUMNS: [&str; 6] = [
    columns::SKU,
    columns::CATEGORY,
    columns::BRAND,
    columns::NAME,
    columns::CURRENT_SO,
    columns::ABC_CATEGORY,
];

/// 库存列识别关键字
const STOCK_COLUMN_MARKER: &str = "Stock";

pub const SUMMARY_HEADERS: [&str; 4] = ["Component", "Product Name", "Brand", "Price"];
pub const TOTAL_LABEL: &str = "TOTAL";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// 读取单元格
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx).map(String::as_str)
    }
}

/// 分级库存表
///
/// 列: 基础列（存在者）+ 所有名称含 "Stock" 的列 + 分级标志列
pub fn audit_table(tier: Tier, parts: &[Part], source_headers: &[String]) -> Table {
    let mut headers: Vec<String> = AUDIT_BASE_COLUMNS
        .iter()
        .filter(|col| source_headers.iter().any(|h| h == *col))
        .map(|col| col.to_string())
        .collect();
    headers.extend(
        source_headers
            .iter()
            .filter(|h| h.contains(STOCK_COLUMN_MARKER))
            .cloned(),
    );

    let flag_column = tier.column_key();
    let mut table = Table::new(headers);
    table.headers.push(flag_column.to_string());

    for part in TierFilter::for_tier(parts, tier) {
        let mut row: Vec<String> = table.headers[..table.headers.len() - 1]
            .iter()
            .map(|col| part.column_value(col).unwrap_or_default())
            .collect();
        row.push(part.tiers.contains(tier).to_string());
        table.rows.push(row);
    }
    table
}

/// 套餐汇总表（槽位顺序,末行为 TOTAL）
pub fn summary_table(bundle: &Bundle) -> Table {
    let summary = bundle.summary();
    let mut table = Table::new(SUMMARY_HEADERS.iter().map(|h| h.to_string()).collect());

    for row in &summary.rows {
        table.rows.push(vec![
            row.component.clone(),
            row.product_name.clone(),
            row.brand.clone(),
            format_number(row.price),
        ]);
    }
    table.rows.push(vec![
        TOTAL_LABEL.to_string(),
        String::new(),
        String::new(),
        format_number(summary.total_price),
    ]);
    table
}

/// 金额展示: "Rp 1,234,567"（四舍五入到整数）
pub fn format_rupiah(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{}", rounded.abs() as u64);

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("Rp -{}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}
