// ==========================================
// SKU 映射系统 - 文件解析器实现
// ==========================================
// 支持: CSV (.csv) / Excel (.xlsx/.xls) / JSON (.json)
// 规则: 表头 TRIM; 单元格保留原值（SKU 校验依赖原始值）
//       空单元格 → Empty; 完全空白的行跳过
// ==========================================

use crate::domain::record::{CellValue, InventoryRecord, RecordTable};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser_trait::FileParser;
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

// 检查文件存在及扩展名
fn check_file(path: &Path, allowed: &[&str]) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    // 无扩展名的文件（例如临时文件）交由调用方决定
    if let Some(ext) = path.extension() {
        let ext = ext.to_string_lossy().to_lowercase();
        if !allowed.contains(&ext.as_str()) {
            return Err(ImportError::UnsupportedFormat(ext));
        }
    }
    Ok(())
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse(&self, file_path: &Path) -> ImportResult<RecordTable> {
        check_file(file_path, &["csv"])?;

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut table = RecordTable::new(headers.iter().filter(|h| !h.is_empty()).cloned());
        for result in reader.records() {
            let record = result?;
            let mut row = InventoryRecord::new();

            for (header, value) in headers.iter().zip(record.iter()) {
                if header.is_empty() {
                    continue;
                }
                let cell = if value.is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::Text(value.to_string())
                };
                row.set(header.clone(), cell);
            }

            // 跳过完全空白的行
            if row.is_blank() {
                continue;
            }
            table.push(row);
        }

        debug!(file = %file_path.display(), rows = table.len(), "CSV 解析完成");
        Ok(table)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse(&self, file_path: &Path) -> ImportResult<RecordTable> {
        check_file(file_path, &["xlsx", "xls"])?;

        let mut workbook = open_workbook_auto(file_path)?;

        // 读取第一个 sheet
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
        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut table = RecordTable::new(headers.iter().filter(|h| !h.is_empty()).cloned());
        for data_row in rows {
            let mut row = InventoryRecord::new();
            for (header, cell) in headers.iter().zip(data_row.iter()) {
                if header.is_empty() {
                    continue;
                }
                row.set(header.clone(), cell_from_excel(cell));
            }

            if row.is_blank() {
                continue;
            }
            table.push(row);
        }

        debug!(file = %file_path.display(), sheet = %sheet_name, rows = table.len(), "Excel 解析完成");
        Ok(table)
    }
}

fn cell_from_excel(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(n) => CellValue::Number(*n),
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        // 日期 / 错误值按展示文本保留
        other => CellValue::Text(other.to_string()),
    }
}

// ==========================================
// JSON Parser 实现
// ==========================================
// 格式: 对象数组 [{"SKU": "...", "Quantity": 1}, ...]
pub struct JsonParser;

impl FileParser for JsonParser {
    fn parse(&self, file_path: &Path) -> ImportResult<RecordTable> {
        check_file(file_path, &["json"])?;

        let reader = BufReader::new(File::open(file_path)?);
        let value: Value = serde_json::from_reader(reader)?;
        let items = value
            .as_array()
            .ok_or_else(|| ImportError::JsonParseError("顶层必须是对象数组".to_string()))?;

        let mut table = RecordTable::default();
        for (idx, item) in items.iter().enumerate() {
            let object = item.as_object().ok_or_else(|| {
                ImportError::JsonParseError(format!("第 {} 个元素不是对象", idx + 1))
            })?;

            let row = InventoryRecord::from_pairs(
                object
                    .iter()
                    .map(|(key, value)| (key.trim().to_string(), cell_from_json(value))),
            );
            if row.is_blank() {
                continue;
            }
            table.push(row);
        }

        debug!(file = %file_path.display(), rows = table.len(), "JSON 解析完成");
        Ok(table)
    }
}

fn cell_from_json(value: &Value) -> CellValue {
    match value {
        Value::Null => CellValue::Empty,
        Value::Bool(b) => CellValue::Bool(*b),
        Value::Number(n) => n
            .as_f64()
            .map(CellValue::Number)
            .unwrap_or_else(|| CellValue::Text(n.to_string())),
        Value::String(s) if s.is_empty() => CellValue::Empty,
        Value::String(s) => CellValue::Text(s.clone()),
        other => CellValue::Text(other.to_string()),
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<RecordTable> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse(path),
            "xlsx" | "xls" => ExcelParser.parse(path),
            "json" => JsonParser.parse(path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
