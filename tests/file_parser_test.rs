// ==========================================
// SKU 映射系统 - 文件解析集成测试
// ==========================================

mod test_helpers;

use rust_xlsxwriter::Workbook;
use sku_mapper::domain::{CellValue, InventoryType};
use sku_mapper::engine::MappingTable;
use sku_mapper::importer::{ExcelParser, FileParser, ImportError, UniversalFileParser};
use std::path::Path;
use test_helpers::write_temp_file;

#[test]
fn test_mapping_from_json_file() {
    let file = write_temp_file(
        ".json",
        r#"[
            {"SKU": "ABC-123", "MSKU": "MSKU-001", "Type": "Product"},
            {"SKU": "BOX-01", "MSKU": "MSKU-BOX", "Type": "packaging", "Packaging": "carton"},
            {"SKU": "ODD-1", "MSKU": "MSKU-ODD", "Type": "bundle"}
        ]"#,
    )
    .unwrap();

    let source = UniversalFileParser.parse(file.path()).unwrap();
    let table = MappingTable::with_source(Some(&source));

    assert_eq!(table.len(), 3);
    assert_eq!(table.lookup("ABC-123").unwrap().inventory_type, InventoryType::Product);
    assert_eq!(table.lookup("BOX-01").unwrap().packaging.as_deref(), Some("carton"));
    // 未知类型原样保留
    assert_eq!(
        table.lookup("ODD-1").unwrap().inventory_type,
        InventoryType::Other("bundle".to_string())
    );
}

#[test]
fn test_excel_first_sheet_typed_cells() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, " SKU ").unwrap();
    sheet.write_string(0, 1, "Quantity").unwrap();
    sheet.write_string(1, 0, "ABC-123").unwrap();
    sheet.write_number(1, 1, 12.0).unwrap();
    sheet.write_string(3, 0, "DEF-456").unwrap();
    sheet.write_number(3, 1, 2.5).unwrap();
    workbook.save(&path).unwrap();

    let table = ExcelParser.parse(&path).unwrap();

    assert_eq!(table.columns(), &["SKU", "Quantity"]);
    // 空白行被跳过
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows()[0].get("Quantity"), Some(&CellValue::Number(12.0)));
    assert_eq!(table.rows()[1].text("SKU"), "DEF-456");
}

#[test]
fn test_missing_file() {
    let result = UniversalFileParser.parse(Path::new("/nonexistent/inventory.xlsx"));
    assert!(matches!(result, Err(ImportError::FileNotFound(_))));
}
