// ==========================================
// SKU 映射系统 - 错误日志
// ==========================================
// 用途: 实例级只追加错误日志,供前端展示
// 红线: 不自动清空; 仅显式 clear
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Operation - 操作标签
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    LoadMappings,             // 加载映射表
    ProcessInventoryData,     // 富化库存数据
    CalculateInventoryImpact, // 计算库存影响
    ExportProcessedData,      // 导出结果
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::LoadMappings => "load_mappings",
            Operation::ProcessInventoryData => "process_inventory_data",
            Operation::CalculateInventoryImpact => "calculate_inventory_impact",
            Operation::ExportProcessedData => "export_processed_data",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// ErrorLogEntry - 错误日志条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorLogEntry {
    pub operation: Operation,
    pub error: String,
    pub recorded_at: DateTime<Utc>,
}

// ==========================================
// ErrorLog - 错误日志
// ==========================================
#[derive(Debug, Clone, Default, Serialize)]
pub struct ErrorLog {
    entries: Vec<ErrorLogEntry>,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, operation: Operation, error: impl Into<String>) {
        self.entries.push(ErrorLogEntry {
            operation,
            error: error.into(),
            recorded_at: Utc::now(),
        });
    }

    /// 按追加顺序返回全部条目
    pub fn entries(&self) -> &[ErrorLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
