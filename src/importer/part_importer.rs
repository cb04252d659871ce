// ==========================================
// PC 组装套餐系统 - 库存导入器
// ==========================================
// 导入流程:
// 0. 文件读取与解析（CSV / Excel 第一个工作表）
// 1. 必需列检查 + 字段映射
// 2. 清洗与数值强制转换
// 3. 库存过滤（Stock Total > 0）
// ==========================================
// 红线: 导入器不分级,分级由引擎完成
// ==========================================

use crate::domain::part::Part;
use crate::importer::data_cleaner::{DataCleaner, FieldCoercion};
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::{RawSheet, UniversalFileParser};
use crate::importer::part_importer_trait::FieldMapper as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// 导入结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub batch_id: String,
    pub imported_at: DateTime<Utc>,
    pub source: Option<String>,
    pub headers: Vec<String>, // 源表头（原顺序）
    pub parts: Vec<Part>,     // 仅有库存的商品,未分级
    pub total_rows: usize,
    pub dropped_out_of_stock: usize,
    pub coercions: Vec<FieldCoercion>,
}

#[derive(Default)]
pub struct PartImporter {
    parser: UniversalFileParser,
    mapper: FieldMapper,
    cleaner: DataCleaner,
}

impl PartImporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从文件导入（按扩展名选择解析器）
    ///
    /// # 错误
    /// - FileNotFound / UnsupportedFormat / CsvParseError / ExcelParseError
    /// - MissingRequiredColumn
    #[instrument(skip(self, file_path), fields(batch_id))]
    pub fn import_file<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<ImportReport> {
        let path = file_path.as_ref();
        let sheet = self.parser.parse(path)?;
        info!(file = %path.display(), total_rows = sheet.rows.len(), "文件解析完成");

        let mut report = self.import_records(sheet)?;
        report.source = Some(path.display().to_string());
        Ok(report)
    }

    /// 从内存表导入
    pub fn import_records(&self, sheet: RawSheet) -> ImportResult<ImportReport> {
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());

        self.mapper.check_required_columns(&sheet.headers)?;

        let total_rows = sheet.rows.len();
        let mut coercions = Vec::new();
        let cleaned: Vec<Part> = sheet
            .rows
            .into_iter()
            .map(|row| {
                let record = self.mapper.map_to_raw_part(row.values, row.row_number);
                self.cleaner.clean_record(record, &mut coercions)
            })
            .collect();

        if !coercions.is_empty() {
            warn!(batch_id = %batch_id, count = coercions.len(), "数值字段无法解析，已记为 0");
        }

        let (parts, dropped): (Vec<Part>, Vec<Part>) =
            cleaned.into_iter().partition(Part::in_stock);

        info!(
            batch_id = %batch_id,
            total_rows = total_rows,
            in_stock = parts.len(),
            dropped_out_of_stock = dropped.len(),
            "库存导入完成"
        );

        Ok(ImportReport {
            batch_id,
            imported_at: Utc::now(),
            source: None,
            headers: sheet.headers,
            parts,
            total_rows,
            dropped_out_of_stock: dropped.len(),
            coercions,
        })
    }
}
