// ==========================================
// SKU 映射系统 - 配置层
// ==========================================
// 职责: 列名、SKU 格式、报告阈值等配置管理
// 存储: 内存键值对（可从 JSON 文件加载）
// ==========================================

pub mod config_manager;
pub mod processor_config_trait;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
pub use processor_config_trait::ProcessorConfigReader;
