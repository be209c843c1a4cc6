// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的临时文件、映射表与库存数据构造
// ==========================================

#![allow(dead_code)]

use sku_mapper::domain::{CellValue, InventoryRecord, RecordTable};
use sku_mapper::engine::MappingTable;
use std::error::Error;
use std::io::Write;
use tempfile::NamedTempFile;

/// 标准映射文件内容（CSV）
pub const MAPPING_CSV: &str = "\
SKU,MSKU,Type,Marketplace,Components,Warehouse
ABC-123,MSKU-001,product,amazon,,W1
DEF-456,MSKU-002,product,flipkart,,W2
KIT-001,MSKU-KIT,combo,amazon,ABC-123|DEF-456,W1
";

/// 创建带扩展名的临时文件并写入内容
///
/// # 返回
/// - NamedTempFile: 临时文件（需要保持存活）
pub fn write_temp_file(suffix: &str, content: &str) -> Result<NamedTempFile, Box<dyn Error>> {
    let mut temp_file = tempfile::Builder::new().suffix(suffix).tempfile()?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.flush()?;
    Ok(temp_file)
}

/// 构造映射参考表: (SKU, MSKU, Type)
pub fn mapping_source(rows: &[(&str, &str, &str)]) -> RecordTable {
    let mut table = RecordTable::new(["SKU", "MSKU", "Type"]);
    for (sku, msku, ty) in rows {
        table.push(InventoryRecord::from_pairs([
            ("SKU", *sku),
            ("MSKU", *msku),
            ("Type", *ty),
        ]));
    }
    table
}

/// 标准两条映射: ABC-123 → MSKU-001, DEF-456 → MSKU-002
pub fn standard_mapping() -> MappingTable {
    let source = mapping_source(&[
        ("ABC-123", "MSKU-001", "product"),
        ("DEF-456", "MSKU-002", "product"),
    ]);
    MappingTable::with_source(Some(&source))
}

/// 构造库存表: (SKU, Quantity)
pub fn inventory(rows: &[(&str, f64)]) -> RecordTable {
    let mut table = RecordTable::new(["SKU", "Quantity"]);
    for (sku, qty) in rows {
        table.push(InventoryRecord::from_pairs([
            ("SKU", CellValue::from(*sku)),
            ("Quantity", CellValue::from(*qty)),
        ]));
    }
    table
}

/// 构造带仓库列的库存表: (SKU, Warehouse, Quantity)
pub fn inventory_with_warehouse(rows: &[(&str, &str, f64)]) -> RecordTable {
    let mut table = RecordTable::new(["SKU", "Warehouse", "Quantity"]);
    for (sku, warehouse, qty) in rows {
        table.push(InventoryRecord::from_pairs([
            ("SKU", CellValue::from(*sku)),
            ("Warehouse", CellValue::from(*warehouse)),
            ("Quantity", CellValue::from(*qty)),
        ]));
    }
    table
}
