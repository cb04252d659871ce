// ==========================================
// PC 组装套餐系统 - 库存导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// ==========================================

use crate::domain::part::RawPartRecord;
use crate::importer::error::ImportResult;
use crate::importer::file_parser::RawSheet;
use std::collections::HashMap;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为表头 + 原始行记录
    ///
    /// # 返回
    /// - Ok(RawSheet): 表头（保持原顺序）与非空行
    /// - Err: 文件读取错误、格式错误
    fn parse_to_raw_sheet(&self, file_path: &Path) -> ImportResult<RawSheet>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 字段映射接口（阶段 1）
// 实现者: FieldMapper
pub trait FieldMapper: Send + Sync {
    /// 检查必需列是否齐全
    fn check_required_columns(&self, headers: &[String]) -> ImportResult<()>;

    /// 将原始行记录映射为 RawPartRecord（未知列进入 extra）
    fn map_to_raw_part(&self, row: HashMap<String, String>, row_number: usize) -> RawPartRecord;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 数据清洗接口（阶段 2）
// 实现者: DataCleaner
pub trait DataCleaner: Send + Sync {
    /// 清洗文本字段（TRIM,空值 → 空串）
    fn clean_text(&self, value: Option<&str>) -> String;

    /// 数值强制转换（无法解析 → None,由调用方记为 0）
    fn parse_number(&self, value: Option<&str>) -> Option<f64>;
}
