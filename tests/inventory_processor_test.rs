// ==========================================
// SKU 映射系统 - InventoryProcessor 集成测试
// ==========================================
// 覆盖: 映射查询、格式校验、富化、未知 SKU 累积、影响汇总扇出、错误日志
// ==========================================

mod test_helpers;

use sku_mapper::domain::{InventoryType, Operation};
use sku_mapper::engine::{
    validate_format, EngineError, InventoryProcessor, MappingTable, DEFAULT_SKU_PATTERN,
};
use sku_mapper::logging;
use test_helpers::{inventory, inventory_with_warehouse, mapping_source, standard_mapping};

// ==========================================
// 映射查询
// ==========================================

#[test]
fn test_lookup_returns_loaded_canonical_id() {
    logging::init_test();
    let rows = [
        ("ABC-123", "MSKU-001", "product"),
        ("  DEF-456", "MSKU-002  ", "combo"),
        ("GHI-789 ", " MSKU-003", "packaging"),
    ];
    let mut table = MappingTable::new();
    let outcome = table.load(&mapping_source(&rows));

    assert!(outcome.success);
    assert_eq!(outcome.count, 3);
    for (sku, msku, _) in rows {
        assert_eq!(table.lookup(sku.trim()).unwrap().canonical_id, msku.trim());
    }
    assert!(table.lookup("NEVER-SEEN").is_none());
}

#[test]
fn test_schema_error_keeps_previous_entries() {
    let mut processor = InventoryProcessor::new(standard_mapping());
    let mut broken = sku_mapper::domain::RecordTable::new(["SKU", "MSKU"]);
    broken.push(sku_mapper::domain::InventoryRecord::from_pairs([
        ("SKU", "NEW-1"),
        ("MSKU", "MSKU-NEW"),
    ]));

    let outcome = processor.load_mapping(&broken);

    assert!(!outcome.success);
    assert!(outcome.error.as_deref().unwrap_or("").contains("Type"));
    assert_eq!(processor.mapping().len(), 2);
    assert_eq!(processor.map_identifier("ABC-123").as_deref(), Some("MSKU-001"));
    assert_eq!(processor.error_log()[0].operation, Operation::LoadMappings);
}

// ==========================================
// 格式校验
// ==========================================

#[test]
fn test_validate_format_examples() {
    assert!(validate_format("ABC-123", DEFAULT_SKU_PATTERN).unwrap());
    assert!(!validate_format("abc-123", DEFAULT_SKU_PATTERN).unwrap());
    assert!(!validate_format("AB!123", DEFAULT_SKU_PATTERN).unwrap());
    assert!(!validate_format("", DEFAULT_SKU_PATTERN).unwrap());
}

// ==========================================
// 富化
// ==========================================

#[test]
fn test_enrich_scenario() {
    let mut processor = InventoryProcessor::new(standard_mapping());
    let input = inventory(&[("ABC-123", 10.0), ("DEF-456", 5.0), ("XYZ-789", 1.0)]);

    let enriched = processor.enrich_records(&input, "SKU", None).unwrap();

    let records = enriched.records();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].canonical_id, "MSKU-001");
    assert_eq!(records[1].canonical_id, "MSKU-002");
    assert_eq!(records[2].canonical_id, "");
    assert!(records[2].is_unknown());
    assert!(records.iter().all(|r| r.identifier_valid));
    assert_eq!(records[0].inventory_type, Some(InventoryType::Product));

    // 原始输入不变
    assert!(!input.has_column("MSKU"));

    let impact = processor.compute_impact(&enriched, "Quantity", None).unwrap();
    let summary: Vec<(&str, f64)> = impact
        .iter()
        .map(|r| (r.canonical_id.as_str(), r.quantity))
        .collect();
    assert_eq!(summary, vec![("MSKU-001", 10.0), ("MSKU-002", 5.0), ("", 1.0)]);
}

#[test]
fn test_enrich_is_idempotent() {
    let mut processor = InventoryProcessor::new(standard_mapping());
    let input = inventory(&[("ABC-123", 10.0), ("bad sku", 2.0), ("XYZ-789", 1.0)]);

    let first = processor.enrich_records(&input, "SKU", None).unwrap();
    let second = processor.enrich_records(&input, "SKU", None).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_enrich_missing_identifier_column() {
    let mut processor = InventoryProcessor::new(standard_mapping());
    let input = inventory(&[("ABC-123", 10.0)]);

    let err = processor.enrich_records(&input, "Missing", None).unwrap_err();

    assert!(matches!(err, EngineError::ColumnError { ref column, .. } if column == "Missing"));
    assert_eq!(processor.error_log().len(), 1);
    assert_eq!(processor.error_log()[0].operation, Operation::ProcessInventoryData);
}

#[test]
fn test_unknown_identifiers_accumulate_across_batches() {
    let mut processor = InventoryProcessor::new(standard_mapping());

    processor
        .enrich_records(&inventory(&[("X-1", 1.0), ("ABC-123", 1.0)]), "SKU", None)
        .unwrap();
    processor
        .enrich_records(&inventory(&[("X-1", 2.0), ("Y-2", 1.0)]), "SKU", None)
        .unwrap();

    let unknown = processor.unknown_identifiers();
    assert_eq!(unknown.iter().filter(|s| s.as_str() == "X-1").count(), 1);
    assert_eq!(unknown, vec!["X-1", "Y-2"]);
}

#[test]
fn test_blank_identifier_is_invalid_and_reported_unknown() {
    let mut processor = InventoryProcessor::new(standard_mapping());

    let enriched = processor
        .enrich_records(&inventory(&[("", 1.0), ("ABC-123", 2.0)]), "SKU", None)
        .unwrap();

    assert!(!enriched.records()[0].identifier_valid);
    assert_eq!(enriched.records()[0].canonical_id, "");
    assert_eq!(processor.unknown_identifiers(), vec![""]);
    assert_eq!(processor.error_log().len(), 1);

    // 未解析的行同时出现在汇总与未知集合中
    let impact = processor.compute_impact(&enriched, "Quantity", None).unwrap();
    let summary: Vec<(&str, f64)> = impact
        .iter()
        .map(|r| (r.canonical_id.as_str(), r.quantity))
        .collect();
    assert_eq!(summary, vec![("", 1.0), ("MSKU-001", 2.0)]);
}

// ==========================================
// 库存影响汇总
// ==========================================

#[test]
fn test_compute_impact_warehouse_fan_out() {
    let source = mapping_source(&[("SKU-A", "M1", "product")]);
    let mut processor = InventoryProcessor::new(MappingTable::with_source(Some(&source)));
    let input = inventory_with_warehouse(&[("SKU-A", "W1", 5.0), ("SKU-A", "W2", 3.0)]);

    let enriched = processor.enrich_records(&input, "SKU", None).unwrap();
    let impact = processor
        .compute_impact(&enriched, "Quantity", Some("Warehouse"))
        .unwrap();

    assert_eq!(impact.len(), 2);
    assert_eq!(impact[0].canonical_id, "M1");
    assert_eq!(impact[0].quantity, 8.0);
    assert_eq!(impact[0].warehouse.as_deref(), Some("W1"));
    assert_eq!(impact[0].warehouse_quantity, Some(5.0));
    assert_eq!(impact[1].canonical_id, "M1");
    assert_eq!(impact[1].quantity, 8.0);
    assert_eq!(impact[1].warehouse.as_deref(), Some("W2"));
    assert_eq!(impact[1].warehouse_quantity, Some(3.0));
}

#[test]
fn test_compute_impact_missing_quantity_column() {
    let mut processor = InventoryProcessor::new(standard_mapping());
    let enriched = processor
        .enrich_records(&inventory(&[("ABC-123", 1.0)]), "SKU", None)
        .unwrap();

    let err = processor.compute_impact(&enriched, "Qty", None).unwrap_err();

    assert!(matches!(err, EngineError::ColumnError { ref column, .. } if column == "Qty"));
    assert_eq!(
        processor.error_log().last().unwrap().operation,
        Operation::CalculateInventoryImpact
    );
}

#[test]
fn test_compute_impact_requires_enriched_table() {
    let mut processor = InventoryProcessor::new(standard_mapping());

    let err = processor
        .compute_impact_from_table(&inventory(&[("ABC-123", 1.0)]), "SKU", "Quantity", None)
        .unwrap_err();

    assert!(matches!(err, EngineError::ColumnError { ref column, .. } if column == "MSKU"));
}
