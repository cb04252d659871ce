// ==========================================
// PC 组装套餐系统 - CSV 导出器
// ==========================================
// 文件名: data_stok_<分级>.csv / rakitan_<分级>.csv
// ==========================================

use crate::domain::types::Tier;
use crate::exporter::error::{ExportError, ExportResult};
use crate::exporter::table::Table;
use csv::Writer;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter;

impl CsvExporter {
    pub fn new() -> Self {
        Self
    }

    /// 分级库存表文件名
    pub fn audit_file_name(tier: Tier) -> String {
        format!("data_stok_{}.csv", tier.file_key())
    }

    /// 套餐汇总表文件名
    pub fn summary_file_name(tier: Tier) -> String {
        format!("rakitan_{}.csv", tier.file_key())
    }

    /// 写出表格（覆盖同名文件）
    pub fn write_table(&self, table: &Table, path: &Path) -> ExportResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ExportError::DirectoryCreateFailed {
                path: parent.display().to_string(),
                message: e.to_string(),
            })?;
        }

        let mut writer = Writer::from_path(path)?;
        writer.write_record(&table.headers)?;
        for row in &table.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;

        info!(path = %path.display(), rows = table.rows.len(), "CSV 导出完成");
        Ok(())
    }

    /// 写入目录,返回文件路径
    pub fn write_into(&self, table: &Table, dir: &Path, file_name: &str) -> ExportResult<PathBuf> {
        let path = dir.join(file_name);
        self.write_table(table, &path)?;
        Ok(path)
    }
}
