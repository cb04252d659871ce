// ==========================================
// PC 组装套餐系统 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// 规则: 表头去除首尾空白；完全空白的行跳过
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::part_importer_trait::FileParser;
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// 单行原始记录
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub row_number: usize, // 源文件行号（表头为第 1 行）
    pub values: HashMap<String, String>,
}

/// 解析结果: 表头 + 数据行
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSheet {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawSheet {
    fn push_row(&mut self, row_number: usize, cells: impl Iterator<Item = String>) {
        let mut values = HashMap::new();
        for (col_idx, value) in cells.enumerate() {
            if let Some(header) = self.headers.get(col_idx) {
                values.insert(header.clone(), value.trim().to_string());
            }
        }

        // 跳过完全空白的行
        if values.values().all(|v| v.is_empty()) {
            return;
        }
        self.rows.push(RawRow { row_number, values });
    }
}

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

// ==========================================
// CSV Parser 实现
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_sheet(&self, file_path: &Path) -> ImportResult<RawSheet> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let mut sheet = RawSheet {
            headers: reader
                .headers()?
                .iter()
                .map(|h| h.trim().to_string())
                .collect(),
            rows: Vec::new(),
        };

        for (row_idx, result) in reader.records().enumerate() {
            let record = result?;
            sheet.push_row(row_idx + 2, record.iter().map(str::to_string));
        }

        Ok(sheet)
    }
}

// ==========================================
// Excel Parser 实现（只读第一个工作表）
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_raw_sheet(&self, file_path: &Path) -> ImportResult<RawSheet> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(file_path)?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;
        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无数据行".to_string()))?;

        let mut sheet = RawSheet {
            headers: header_row
                .iter()
                .map(|cell| cell.to_string().trim().to_string())
                .collect(),
            rows: Vec::new(),
        };

        for (row_idx, data_row) in rows.enumerate() {
            sheet.push_row(row_idx + 2, data_row.iter().map(|cell| cell.to_string()));
        }

        Ok(sheet)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<RawSheet> {
        let path = file_path.as_ref();

        match extension_of(path).as_str() {
            "csv" => CsvParser.parse_to_raw_sheet(path),
            "xlsx" | "xls" => ExcelParser.parse_to_raw_sheet(path),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }
}
