// ==========================================
// SKU 映射系统 - 库存影响汇总
// ==========================================
// 职责: 按 MSKU 分组求和,可选按 (MSKU, 仓库) 二级分组并左连接
// 红线: 无状态,纯函数; 输出顺序 = MSKU 首次出现顺序（不排序）
// ==========================================

use crate::domain::columns;
use crate::domain::enriched::{EnrichedRecord, EnrichedTable};
use crate::domain::impact::ImpactRow;
use crate::domain::record::{CellValue, RecordTable};
use crate::domain::types::InventoryType;
use crate::engine::error::{EngineError, EngineResult};
use std::collections::HashMap;

// 一级分组（MSKU）
struct PrimaryGroup {
    canonical_id: String,
    quantity: f64,
    inventory_type: Option<InventoryType>,
    warehouses: Vec<(String, f64)>, // 二级分组,按首次出现顺序
}

/// 汇总结果
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateOutput {
    pub rows: Vec<ImpactRow>,
    pub coerced_to_zero: usize, // 数量缺失或非数值、按 0 计入的记录数
}

/// 计算库存影响
///
/// # 参数
/// - records: 富化记录
/// - quantity_column: 数量列
/// - warehouse_column: 仓库列（None 表示不按仓库拆分）
///
/// # 规则
/// - 数量缺失或非数值按 0 计
/// - 类型取该 MSKU 首条记录的类型
/// - 仓库为空的记录不参与二级分组
/// - 同一 MSKU 多个仓库 → 多行,每行携带 MSKU 总量
pub fn aggregate_impact(
    records: &[EnrichedRecord],
    quantity_column: &str,
    warehouse_column: Option<&str>,
) -> AggregateOutput {
    let mut groups: Vec<PrimaryGroup> = Vec::new();
    let mut group_index: HashMap<String, usize> = HashMap::new();
    let mut warehouse_index: HashMap<(usize, String), usize> = HashMap::new();
    let mut coerced_to_zero = 0;

    for record in records {
        let quantity = match record.record.number(quantity_column) {
            Some(q) => q,
            None => {
                coerced_to_zero += 1;
                0.0
            }
        };

        let idx = *group_index
            .entry(record.canonical_id.clone())
            .or_insert_with(|| {
                groups.push(PrimaryGroup {
                    canonical_id: record.canonical_id.clone(),
                    quantity: 0.0,
                    inventory_type: record.inventory_type.clone(),
                    warehouses: Vec::new(),
                });
                groups.len() - 1
            });
        groups[idx].quantity += quantity;

        let Some(column) = warehouse_column else {
            continue;
        };
        let warehouse = match record.record.get(column) {
            Some(value) if !value.is_blank() => value.display(),
            _ => continue,
        };
        let group = &mut groups[idx];
        let slot = *warehouse_index
            .entry((idx, warehouse.clone()))
            .or_insert_with(|| {
                group.warehouses.push((warehouse, 0.0));
                group.warehouses.len() - 1
            });
        group.warehouses[slot].1 += quantity;
    }

    let mut rows = Vec::with_capacity(groups.len());
    for group in groups {
        if group.warehouses.is_empty() {
            rows.push(ImpactRow {
                canonical_id: group.canonical_id,
                quantity: group.quantity,
                inventory_type: group.inventory_type,
                warehouse: None,
                warehouse_quantity: None,
            });
            continue;
        }
        for (warehouse, warehouse_quantity) in group.warehouses {
            rows.push(ImpactRow {
                canonical_id: group.canonical_id.clone(),
                quantity: group.quantity,
                inventory_type: group.inventory_type.clone(),
                warehouse: Some(warehouse),
                warehouse_quantity: Some(warehouse_quantity),
            });
        }
    }

    AggregateOutput {
        rows,
        coerced_to_zero,
    }
}

/// 由已含 MSKU 列的记录表（例如重新导入的富化导出文件）还原富化记录
///
/// # 返回
/// - Err(ColumnError): 缺少 MSKU 列（未经富化）
pub fn restore_enriched(table: &RecordTable, identifier_column: &str) -> EngineResult<EnrichedTable> {
    if !table.has_column(columns::MSKU) {
        return Err(EngineError::column(
            "calculate_inventory_impact",
            columns::MSKU,
        ));
    }

    let records = table
        .rows()
        .iter()
        .map(|row| {
            let inventory_type = row
                .get(columns::INVENTORY_TYPE)
                .filter(|v| !v.is_blank())
                .map(|v| InventoryType::parse(&v.display()));
            let identifier_valid = match row.get(columns::SKU_VALID) {
                Some(CellValue::Bool(b)) => *b,
                Some(CellValue::Text(s)) => !s.trim().eq_ignore_ascii_case("false"),
                _ => true,
            };
            EnrichedRecord {
                record: row.clone(),
                raw_identifier: row.text(identifier_column),
                canonical_id: row.text(columns::MSKU).trim().to_string(),
                inventory_type,
                identifier_valid,
                marketplace: None,
            }
        })
        .collect();

    let input_columns = table
        .columns()
        .iter()
        .filter(|c| !columns::ENRICHED_DERIVED.contains(&c.as_str()))
        .cloned()
        .collect();

    Ok(EnrichedTable::new(input_columns, records))
}
