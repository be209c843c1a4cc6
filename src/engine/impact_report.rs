// ==========================================
// SKU 映射系统 - 库存影响报告
// ==========================================
// 职责: 看板总览指标 + 预警（低库存 / 仓库容量 / 组合商品复核）
// 输入: 富化结果 + 影响汇总行 + 映射表
// 红线: 无状态,纯函数
// ==========================================

use crate::config::ProcessorConfigReader;
use crate::domain::enriched::EnrichedTable;
use crate::domain::impact::{
    ComboReviewItem, ImpactReport, ImpactRow, InventoryOverview, LowStockAlert, WarehouseTotal,
};
use crate::domain::types::InventoryType;
use crate::engine::mapping_table::MappingTable;
use std::collections::{HashMap, HashSet};
use std::error::Error;
use tracing::info;

// ==========================================
// ReportThresholds - 预警阈值
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct ReportThresholds {
    pub low_stock: f64,          // MSKU 总量低于该值 → 低库存
    pub warehouse_capacity: f64, // 仓库合计高于该值 → 容量预警
}

impl Default for ReportThresholds {
    fn default() -> Self {
        Self {
            low_stock: 10.0,
            warehouse_capacity: 500.0,
        }
    }
}

impl ReportThresholds {
    pub fn from_config(config: &dyn ProcessorConfigReader) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            low_stock: config.get_low_stock_threshold()?,
            warehouse_capacity: config.get_warehouse_capacity_threshold()?,
        })
    }
}

/// 生成库存影响报告
///
/// # 参数
/// - records: 富化结果
/// - impact: compute_impact 输出（可能含仓库扇出行）
/// - mapping: 映射表（组合商品组件）
/// - quantity_column: 数量列名
/// - thresholds: 预警阈值
pub fn build_impact_report(
    records: &EnrichedTable,
    impact: &[ImpactRow],
    mapping: &MappingTable,
    quantity_column: &str,
    thresholds: &ReportThresholds,
) -> ImpactReport {
    // 1. 按 MSKU 去重（扇出行携带相同总量）
    let mut primary: Vec<&ImpactRow> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for row in impact {
        if seen.insert(row.canonical_id.as_str()) {
            primary.push(row);
        }
    }

    // 2. 总览
    let overview = InventoryOverview {
        record_count: records.len(),
        distinct_msku_count: primary.len(),
        total_quantity: primary.iter().map(|r| r.quantity).sum(),
        unknown_record_count: records.records().iter().filter(|r| r.is_unknown()).count(),
        invalid_record_count: records
            .records()
            .iter()
            .filter(|r| !r.identifier_valid)
            .count(),
    };

    // 3. 仓库合计（首次出现顺序）
    let mut warehouse_totals: Vec<WarehouseTotal> = Vec::new();
    let mut warehouse_index: HashMap<&str, usize> = HashMap::new();
    for row in impact {
        let (Some(warehouse), Some(quantity)) = (row.warehouse.as_deref(), row.warehouse_quantity)
        else {
            continue;
        };
        match warehouse_index.get(warehouse) {
            Some(&idx) => warehouse_totals[idx].quantity += quantity,
            None => {
                warehouse_index.insert(warehouse, warehouse_totals.len());
                warehouse_totals.push(WarehouseTotal {
                    warehouse: warehouse.to_string(),
                    quantity,
                });
            }
        }
    }

    // 4. 低库存（按数量升序）
    let mut low_stock: Vec<LowStockAlert> = primary
        .iter()
        .filter(|r| r.quantity < thresholds.low_stock)
        .map(|r| LowStockAlert {
            canonical_id: r.canonical_id.clone(),
            quantity: r.quantity,
            inventory_type: r.inventory_type.clone(),
        })
        .collect();
    low_stock.sort_by(|a, b| a.quantity.total_cmp(&b.quantity));

    // 5. 仓库容量预警
    let over_capacity: Vec<WarehouseTotal> = warehouse_totals
        .iter()
        .filter(|w| w.quantity > thresholds.warehouse_capacity)
        .cloned()
        .collect();

    // 6. 组合商品复核
    let combo_review: Vec<ComboReviewItem> = records
        .records()
        .iter()
        .filter(|r| r.inventory_type == Some(InventoryType::Combo))
        .map(|r| ComboReviewItem {
            raw_identifier: r.raw_identifier.clone(),
            canonical_id: r.canonical_id.clone(),
            components: mapping
                .lookup(&r.raw_identifier)
                .map(|entry| entry.components.clone())
                .unwrap_or_default(),
            quantity: r.record.number(quantity_column).unwrap_or(0.0),
        })
        .collect();

    info!(
        msku_count = overview.distinct_msku_count,
        low_stock = low_stock.len(),
        over_capacity = over_capacity.len(),
        combo_review = combo_review.len(),
        "库存影响报告生成完成"
    );

    ImpactReport {
        overview,
        warehouse_totals,
        low_stock,
        over_capacity,
        combo_review,
    }
}
