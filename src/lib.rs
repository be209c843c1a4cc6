// ==========================================
// SKU 映射系统 - 核心库
// ==========================================
// 系统定位: 平台 SKU → MSKU 映射、格式校验、库存影响汇总
// 运行模型: 单线程、同步、内存批处理
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 记录表与结果类型
pub mod domain;

// 引擎层 - 映射 / 富化 / 汇总
pub mod engine;

// 文件协作层 - 解析与导出
pub mod importer;

// 配置层 - 列名 / 格式 / 阈值
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::InventoryType;

// 领域实体
pub use domain::{
    CellValue, EnrichedRecord, EnrichedTable, ErrorLogEntry, ImpactReport, ImpactRow,
    InventoryRecord, LoadOutcome, MappingEntry, Operation, RecordTable,
};

// 引擎
pub use engine::{
    EngineError, EngineResult, InventoryProcessor, MappingTable, ReportThresholds,
    SkuFormatValidator,
};

// 配置
pub use config::{ConfigManager, ProcessorConfigReader};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "SKU 映射系统";
