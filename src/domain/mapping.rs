// ==========================================
// SKU 映射系统 - 映射条目
// ==========================================
// 用途: SKU → MSKU 映射表的单条记录
// 对齐: 映射文件列 SKU / MSKU / Type / Marketplace / Components / Packaging / Warehouse
// ==========================================

use crate::domain::types::InventoryType;
use serde::{Deserialize, Serialize};

// ==========================================
// MappingEntry - 映射条目
// ==========================================
// 红线: canonical_id 非空
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingEntry {
    pub canonical_id: String,           // MSKU（已 TRIM）
    pub inventory_type: InventoryType,  // 库存类型
    pub marketplace: Option<String>,    // 平台
    pub components: Vec<String>,        // 组合商品的组件 SKU
    pub packaging: Option<String>,      // 包材
    pub warehouse: Option<String>,      // 默认仓库
}

impl MappingEntry {
    pub fn new(canonical_id: impl Into<String>, inventory_type: InventoryType) -> Self {
        Self {
            canonical_id: canonical_id.into(),
            inventory_type,
            marketplace: None,
            components: Vec::new(),
            packaging: None,
            warehouse: None,
        }
    }
}

// ==========================================
// LoadOutcome - 映射加载结果
// ==========================================
// 用途: 加载失败不向上抛出,由调用方决定是否致命
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadOutcome {
    pub success: bool,
    pub count: usize,
    pub error: Option<String>,
}

impl LoadOutcome {
    pub fn loaded(count: usize) -> Self {
        Self {
            success: true,
            count,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            count: 0,
            error: Some(error.into()),
        }
    }
}
