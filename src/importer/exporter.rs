// ==========================================
// SKU 映射系统 - 结果导出
// ==========================================
// 支持: CSV / JSON / Excel (.xlsx)
// 输出: 富化记录（原列 + MSKU / Inventory_Type / SKU_Valid）
//       影响汇总（MSKU / Quantity / Inventory_Type [/ Warehouse / Warehouse_Quantity]）
// ==========================================

use crate::domain::columns;
use crate::domain::enriched::EnrichedTable;
use crate::domain::error_log::Operation;
use crate::domain::impact::ImpactRow;
use crate::domain::record::CellValue;
use crate::engine::inventory_processor::InventoryProcessor;
use crate::importer::error::{ImportError, ImportResult};
use rust_xlsxwriter::{Format, Workbook};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::{error, info};

// ==========================================
// ExportFormat - 导出格式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Excel,
}

impl ExportFormat {
    /// 解析格式名（大小写不敏感）
    pub fn parse(format: &str) -> ImportResult<Self> {
        match format.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            other => Err(ImportError::UnsupportedExportFormat(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Excel => "excel",
        }
    }

    /// 按文件扩展名推断格式
    pub fn from_path(path: &Path) -> ImportResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        Self::parse(ext)
    }
}

// 待写出的二维表
struct Grid {
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

/// 导出富化记录
///
/// # 返回
/// - Ok(usize): 写出的数据行数
pub fn export_enriched(table: &EnrichedTable, path: &Path, format: ExportFormat) -> ImportResult<usize> {
    let headers = table.output_columns();
    let rows = table
        .records()
        .iter()
        .map(|record| headers.iter().map(|c| record.output_value(c)).collect())
        .collect();

    write_grid(&Grid { headers, rows }, path, format)
}

/// 导出影响汇总; 任一行带仓库维度时追加 Warehouse / Warehouse_Quantity 列
pub fn export_impact(rows: &[ImpactRow], path: &Path, format: ExportFormat) -> ImportResult<usize> {
    let with_warehouse = rows.iter().any(|r| r.warehouse.is_some());

    let mut headers = vec![
        columns::MSKU.to_string(),
        columns::QUANTITY.to_string(),
        columns::INVENTORY_TYPE.to_string(),
    ];
    if with_warehouse {
        headers.push(columns::WAREHOUSE.to_string());
        headers.push(columns::WAREHOUSE_QUANTITY.to_string());
    }

    let rows = rows
        .iter()
        .map(|row| {
            let mut cells = vec![
                CellValue::Text(row.canonical_id.clone()),
                CellValue::Number(row.quantity),
                CellValue::Text(row.inventory_type_label().to_string()),
            ];
            if with_warehouse {
                cells.push(row.warehouse.clone().map(CellValue::Text).unwrap_or(CellValue::Empty));
                cells.push(row.warehouse_quantity.map(CellValue::Number).unwrap_or(CellValue::Empty));
            }
            cells
        })
        .collect();

    write_grid(&Grid { headers, rows }, path, format)
}

/// 导出处理结果; 失败记入处理器错误日志
///
/// # 参数
/// - format: "csv" / "json" / "excel"
///
/// # 返回
/// - true: 导出成功
/// - false: 导出失败（错误已记录）
pub fn export_processed_data(
    processor: &mut InventoryProcessor,
    table: &EnrichedTable,
    path: &Path,
    format: &str,
) -> bool {
    let result = ExportFormat::parse(format).and_then(|f| export_enriched(table, path, f));
    match result {
        Ok(count) => {
            info!(path = %path.display(), rows = count, "导出完成");
            true
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "导出失败");
            processor.record_error(Operation::ExportProcessedData, e.to_string());
            false
        }
    }
}

fn write_grid(grid: &Grid, path: &Path, format: ExportFormat) -> ImportResult<usize> {
    match format {
        ExportFormat::Csv => write_csv(grid, path)?,
        ExportFormat::Json => write_json(grid, path)?,
        ExportFormat::Excel => write_excel(grid, path)?,
    }
    Ok(grid.rows.len())
}

fn write_csv(grid: &Grid, path: &Path) -> ImportResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&grid.headers)?;
    for row in &grid.rows {
        writer.write_record(row.iter().map(CellValue::display))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_json(grid: &Grid, path: &Path) -> ImportResult<()> {
    let mut objects = Vec::with_capacity(grid.rows.len());
    for row in &grid.rows {
        let mut object = Map::new();
        for (header, cell) in grid.headers.iter().zip(row) {
            object.insert(header.clone(), serde_json::to_value(cell)?);
        }
        objects.push(Value::Object(object));
    }

    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, &objects)?;
    Ok(())
}

fn write_excel(grid: &Grid, path: &Path) -> ImportResult<()> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();

    for (col, header) in grid.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, header, &header_format)?;
    }

    for (idx, row) in grid.rows.iter().enumerate() {
        let row_num = (idx + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                CellValue::Empty => {}
                CellValue::Bool(b) => {
                    worksheet.write_boolean(row_num, col, *b)?;
                }
                CellValue::Number(n) => {
                    worksheet.write_number(row_num, col, *n)?;
                }
                CellValue::Text(s) => {
                    worksheet.write_string(row_num, col, s)?;
                }
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}
