// ==========================================
// SKU 映射系统 - 文件协作层
// ==========================================
// 职责: 文件 → 记录表（解析）, 结果 → 文件（导出）
// 支持: CSV, Excel, JSON
// ==========================================

// 模块声明
pub mod error;
pub mod exporter;
pub mod file_parser;
pub mod file_parser_trait;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use exporter::{export_enriched, export_impact, export_processed_data, ExportFormat};
pub use file_parser::{CsvParser, ExcelParser, JsonParser, UniversalFileParser};

// 重导出 Trait 接口
pub use file_parser_trait::FileParser;
