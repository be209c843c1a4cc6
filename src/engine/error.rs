// ==========================================
// SKU 映射系统 - 引擎错误类型
// ==========================================
// 工具: thiserror 派生宏
// 范围: 仅单次调用致命,不影响实例状态
// ==========================================

use thiserror::Error;

/// 核心引擎错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    // ===== 映射表加载 =====
    #[error("映射表缺少必填列: {}", .missing.join(", "))]
    SchemaError { missing: Vec<String> },

    // ===== 富化 / 汇总 =====
    #[error("{operation}: 输入数据缺少列 '{column}'")]
    ColumnError { operation: String, column: String },

    // ===== 配置 =====
    #[error("SKU 格式正则非法 ({pattern}): {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl EngineError {
    pub fn column(operation: impl Into<String>, column: impl Into<String>) -> Self {
        EngineError::ColumnError {
            operation: operation.into(),
            column: column.into(),
        }
    }
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
