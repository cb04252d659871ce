// ==========================================
// PC 组装套餐系统 - 导出层
// ==========================================
// 职责: 分级库存表 / 套餐汇总表 → 通用表格 → CSV 文件
// ==========================================

pub mod csv_exporter;
pub mod error;
pub mod table;

pub use csv_exporter::CsvExporter;
pub use error::{ExportError, ExportResult};
pub use table::{audit_table, format_rupiah, summary_table, Table};
