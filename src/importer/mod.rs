// ==========================================
// PC 组装套餐系统 - 导入层
// ==========================================
// 职责: 外部库存表导入,生成未分级的商品
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod part_importer;
pub mod part_importer_trait;

// 重导出核心类型
pub use data_cleaner::{DataCleaner as DataCleanerImpl, FieldCoercion};
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper as FieldMapperImpl;
pub use file_parser::{CsvParser, ExcelParser, RawRow, RawSheet, UniversalFileParser};
pub use part_importer::{ImportReport, PartImporter};

// 重导出 Trait 接口
pub use part_importer_trait::{DataCleaner, FieldMapper, FileParser};
