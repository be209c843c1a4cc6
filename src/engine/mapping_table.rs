// ==========================================
// SKU 映射系统 - 映射表
// ==========================================
// 职责: SKU → MappingEntry 内存字典,构造时加载一次
// 输入: 映射参考表（SKU / MSKU / Type + 可选列）
// 红线: 加载为整表替换,不合并; 失败不部分加载
// ==========================================

use crate::domain::columns;
use crate::domain::error_log::{ErrorLog, ErrorLogEntry, Operation};
use crate::domain::mapping::{LoadOutcome, MappingEntry};
use crate::domain::record::{InventoryRecord, RecordTable};
use crate::domain::types::InventoryType;
use crate::engine::error::{EngineError, EngineResult};
use crate::logging::LogScope;
use std::collections::HashMap;
use tracing::{debug, error, info, warn, Dispatch};

// ==========================================
// MappingTable - 映射表
// ==========================================
#[derive(Debug, Default)]
pub struct MappingTable {
    entries: HashMap<String, MappingEntry>,
    error_log: ErrorLog,
    log_scope: LogScope,
}

impl MappingTable {
    /// 创建空映射表
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建映射表; 提供 source 时立即加载（失败记录在错误日志中）
    pub fn with_source(source: Option<&RecordTable>) -> Self {
        let mut table = Self::new();
        if let Some(source) = source {
            table.load(source);
        }
        table
    }

    /// 注入日志分发器
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.log_scope = LogScope::new(dispatch);
        self
    }

    pub(crate) fn set_log_scope(&mut self, log_scope: LogScope) {
        self.log_scope = log_scope;
    }

    // ==========================================
    // 加载
    // ==========================================

    /// 从参考表加载映射（整表替换）
    ///
    /// # 返回
    /// - LoadOutcome { success: true, count }: 加载后的条目数
    /// - LoadOutcome { success: false, error }: 缺少必填列,原有条目保持不变
    pub fn load(&mut self, source: &RecordTable) -> LoadOutcome {
        let log_scope = self.log_scope.clone();
        log_scope.in_scope(|| match build_entries(source) {
            Ok((entries, skipped)) => {
                self.entries = entries;
                info!(count = self.entries.len(), skipped = skipped, "SKU 映射加载完成");
                LoadOutcome::loaded(self.entries.len())
            }
            Err(e) => {
                error!(error = %e, "SKU 映射加载失败");
                self.error_log.record(Operation::LoadMappings, e.to_string());
                LoadOutcome::failed(e.to_string())
            }
        })
    }

    // ==========================================
    // 查询
    // ==========================================

    /// 查询映射（输入先 TRIM）
    pub fn lookup(&self, raw_identifier: &str) -> Option<&MappingEntry> {
        self.entries.get(raw_identifier.trim())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MappingEntry)> {
        self.entries.iter()
    }

    // ==========================================
    // 错误日志
    // ==========================================

    pub fn error_log(&self) -> &[ErrorLogEntry] {
        self.error_log.entries()
    }

    pub fn clear_error_log(&mut self) {
        self.error_log.clear();
    }
}

// ==========================================
// 行解析
// ==========================================

/// 构建映射字典
///
/// # 返回
/// - Ok((entries, skipped)): skipped 为 SKU 或 MSKU 为空被跳过的行数
/// - Err(SchemaError): 缺少必填列（一次性列出全部缺失列）
fn build_entries(source: &RecordTable) -> EngineResult<(HashMap<String, MappingEntry>, usize)> {
    let missing = source.missing_columns(&columns::MAPPING_REQUIRED);
    if !missing.is_empty() {
        return Err(EngineError::SchemaError {
            missing: missing.into_iter().map(String::from).collect(),
        });
    }

    let mut entries = HashMap::with_capacity(source.len());
    let mut skipped = 0;

    for (idx, row) in source.rows().iter().enumerate() {
        let sku = row.text(columns::SKU).trim().to_string();
        let canonical_id = row.text(columns::MSKU).trim().to_string();

        if sku.is_empty() || canonical_id.is_empty() {
            warn!(row_number = idx + 1, sku = %sku, "映射行 SKU 或 MSKU 为空,跳过");
            skipped += 1;
            continue;
        }

        let entry = MappingEntry {
            canonical_id,
            inventory_type: InventoryType::parse(&row.text(columns::TYPE)),
            marketplace: optional_text(row, columns::MARKETPLACE),
            components: split_components(&row.text(columns::COMPONENTS)),
            packaging: optional_text(row, columns::PACKAGING),
            warehouse: optional_text(row, columns::WAREHOUSE),
        };

        // 同一 SKU 重复出现时后者覆盖前者
        if let Some(previous) = entries.insert(sku.clone(), entry) {
            debug!(sku = %sku, previous = %previous.canonical_id, "重复 SKU,后加载的映射生效");
        }
    }

    Ok((entries, skipped))
}

/// 可选列: 列缺失或空白 → None
fn optional_text(row: &InventoryRecord, column: &str) -> Option<String> {
    let value = row.text(column);
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// 组件列表: 以 , ; | 分隔
fn split_components(raw: &str) -> Vec<String> {
    raw.split([',', ';', '|'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
