// ==========================================
// SKU 映射系统 - 引擎层
// ==========================================
// 职责: 映射表加载与查询、SKU 富化、库存影响汇总
// 红线: 引擎不做文件 I/O; 所有失败返回调用方或记入错误日志
// ==========================================

pub mod error;
pub mod impact_aggregator;
pub mod impact_report;
pub mod inventory_processor;
pub mod mapping_table;
pub mod validator;

// 重导出核心引擎
pub use error::{EngineError, EngineResult};
pub use impact_aggregator::{aggregate_impact, restore_enriched, AggregateOutput};
pub use impact_report::{build_impact_report, ReportThresholds};
pub use inventory_processor::InventoryProcessor;
pub use mapping_table::MappingTable;
pub use validator::{validate_format, SkuFormatValidator, DEFAULT_SKU_PATTERN};
