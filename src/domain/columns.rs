// ==========================================
// SKU 映射系统 - 列名常量
// ==========================================
// 映射表与输出列名是唯一的逐字节契约
// ==========================================

// ===== 映射表（必填） =====
pub const SKU: &str = "SKU";
pub const MSKU: &str = "MSKU";
pub const TYPE: &str = "Type";

// ===== 映射表（可选） =====
pub const MARKETPLACE: &str = "Marketplace";
pub const COMPONENTS: &str = "Components";
pub const PACKAGING: &str = "Packaging";
pub const WAREHOUSE: &str = "Warehouse";

/// 映射表必填列
pub const MAPPING_REQUIRED: [&str; 3] = [SKU, MSKU, TYPE];

// ===== 富化输出列 =====
pub const INVENTORY_TYPE: &str = "Inventory_Type";
pub const SKU_VALID: &str = "SKU_Valid";

/// 富化后追加的派生列（同名输入列会被覆盖）
pub const ENRICHED_DERIVED: [&str; 3] = [MSKU, INVENTORY_TYPE, SKU_VALID];

// ===== 影响汇总输出列 =====
pub const QUANTITY: &str = "Quantity";
pub const WAREHOUSE_QUANTITY: &str = "Warehouse_Quantity";
