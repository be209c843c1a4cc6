// ==========================================
// SKU 映射系统 - 库存影响汇总
// ==========================================
// 用途: 按 MSKU（可选按仓库）汇总数量 + 看板指标
// ==========================================

use crate::domain::types::InventoryType;
use serde::{Deserialize, Serialize};

// ==========================================
// ImpactRow - 影响汇总行
// ==========================================
// 说明: 指定仓库维度时,一个 MSKU 有几个仓库就输出几行,
//       每行都携带该 MSKU 的总量与类型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactRow {
    pub canonical_id: String,                  // MSKU（空字符串 = 未知 SKU 汇总）
    pub quantity: f64,                         // MSKU 总量
    pub inventory_type: Option<InventoryType>, // 首条记录的类型
    pub warehouse: Option<String>,             // 仓库（无仓库维度时为 None）
    pub warehouse_quantity: Option<f64>,       // 该仓库数量
}

impl ImpactRow {
    pub fn inventory_type_label(&self) -> &str {
        self.inventory_type
            .as_ref()
            .map(InventoryType::as_str)
            .unwrap_or("")
    }
}

// ==========================================
// InventoryOverview - 总览指标
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryOverview {
    pub record_count: usize,        // 记录数
    pub distinct_msku_count: usize, // MSKU 数（含未知组）
    pub total_quantity: f64,        // 总数量
    pub unknown_record_count: usize,
    pub invalid_record_count: usize,
}

// ==========================================
// WarehouseTotal - 仓库合计
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseTotal {
    pub warehouse: String,
    pub quantity: f64,
}

// ==========================================
// LowStockAlert - 低库存预警
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowStockAlert {
    pub canonical_id: String,
    pub quantity: f64,
    pub inventory_type: Option<InventoryType>,
}

// ==========================================
// ComboReviewItem - 组合商品待复核
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboReviewItem {
    pub raw_identifier: String,
    pub canonical_id: String,
    pub components: Vec<String>,
    pub quantity: f64,
}

// ==========================================
// ImpactReport - 影响报告
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactReport {
    pub overview: InventoryOverview,
    pub warehouse_totals: Vec<WarehouseTotal>,
    pub low_stock: Vec<LowStockAlert>,
    pub over_capacity: Vec<WarehouseTotal>,
    pub combo_review: Vec<ComboReviewItem>,
}
