// ==========================================
// SKU 映射系统 - 领域模型层
// ==========================================
// 职责: 定义记录表、映射条目、富化结果、汇总结果
// 红线: 不含文件访问逻辑,不含引擎逻辑
// ==========================================

pub mod columns;
pub mod enriched;
pub mod error_log;
pub mod impact;
pub mod mapping;
pub mod record;
pub mod types;

// 重导出核心类型
pub use enriched::{EnrichedRecord, EnrichedTable};
pub use error_log::{ErrorLog, ErrorLogEntry, Operation};
pub use impact::{
    ComboReviewItem, ImpactReport, ImpactRow, InventoryOverview, LowStockAlert, WarehouseTotal,
};
pub use mapping::{LoadOutcome, MappingEntry};
pub use record::{CellValue, InventoryRecord, RecordTable};
pub use types::InventoryType;
