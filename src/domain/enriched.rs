// ==========================================
// SKU 映射系统 - 富化记录
// ==========================================
// 用途: 富化产物（原始行 + MSKU / 库存类型 / SKU 合法标记）
// 生命周期: 每次富化调用产出新集合,原始输入不变
// ==========================================

use crate::domain::columns;
use crate::domain::record::{CellValue, InventoryRecord};
use crate::domain::types::InventoryType;
use serde::{Deserialize, Serialize};

// ==========================================
// EnrichedRecord - 富化记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    pub record: InventoryRecord,                // 原始行（只读副本）
    pub raw_identifier: String,                 // SKU 原始展示值（未 TRIM）
    pub canonical_id: String,                   // MSKU; 空字符串 = 未知
    pub inventory_type: Option<InventoryType>,  // 未匹配为 None
    pub identifier_valid: bool,                 // SKU 格式是否合法
    pub marketplace: Option<String>,            // 平台列透传
}

impl EnrichedRecord {
    /// 是否为未知 SKU（MSKU 为空字符串）
    pub fn is_unknown(&self) -> bool {
        self.canonical_id.is_empty()
    }

    /// 库存类型文本（未匹配为空字符串）
    pub fn inventory_type_label(&self) -> &str {
        self.inventory_type
            .as_ref()
            .map(InventoryType::as_str)
            .unwrap_or("")
    }

    /// 输出列取值: 派生列取富化结果,其余取原始值
    pub fn output_value(&self, column: &str) -> CellValue {
        match column {
            columns::MSKU => CellValue::Text(self.canonical_id.clone()),
            columns::INVENTORY_TYPE => CellValue::Text(self.inventory_type_label().to_string()),
            columns::SKU_VALID => CellValue::Bool(self.identifier_valid),
            _ => self.record.get(column).cloned().unwrap_or(CellValue::Empty),
        }
    }
}

// ==========================================
// EnrichedTable - 富化记录表
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrichedTable {
    columns: Vec<String>,         // 输入 schema
    records: Vec<EnrichedRecord>,
}

impl EnrichedTable {
    pub fn new(columns: Vec<String>, records: Vec<EnrichedRecord>) -> Self {
        Self { columns, records }
    }

    /// 输入 schema（不含派生列）
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn records(&self) -> &[EnrichedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 输出列: 输入列（剔除同名派生列）+ 派生列
    pub fn output_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| !columns::ENRICHED_DERIVED.contains(&c.as_str()))
            .cloned()
            .chain(columns::ENRICHED_DERIVED.iter().map(|c| c.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enriched(sku: &str, msku: &str) -> EnrichedRecord {
        EnrichedRecord {
            record: InventoryRecord::from_pairs([("SKU", sku), ("MSKU", "stale")]),
            raw_identifier: sku.to_string(),
            canonical_id: msku.to_string(),
            inventory_type: None,
            identifier_valid: true,
            marketplace: None,
        }
    }

    #[test]
    fn test_unknown_sentinel_is_empty_string() {
        assert!(enriched("XYZ-789", "").is_unknown());
        assert!(!enriched("ABC-123", "MSKU-001").is_unknown());
        assert_eq!(enriched("XYZ-789", "").inventory_type_label(), "");
    }

    #[test]
    fn test_output_columns_replace_derived() {
        let table = EnrichedTable::new(
            vec!["SKU".to_string(), "MSKU".to_string(), "Quantity".to_string()],
            vec![enriched("ABC-123", "MSKU-001")],
        );

        assert_eq!(
            table.output_columns(),
            vec!["SKU", "Quantity", "MSKU", "Inventory_Type", "SKU_Valid"]
        );
        let record = &table.records()[0];
        assert_eq!(record.output_value("MSKU"), CellValue::from("MSKU-001"));
        assert_eq!(record.output_value("SKU_Valid"), CellValue::Bool(true));
        assert_eq!(record.output_value("Quantity"), CellValue::Empty);
    }
}
