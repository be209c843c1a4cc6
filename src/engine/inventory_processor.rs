// ==========================================
// SKU 映射系统 - 库存处理器
// ==========================================
// 职责: SKU 富化（MSKU / 类型 / 格式校验）+ 库存影响汇总
// 依赖: MappingTable（查询）, SkuFormatValidator（校验）
// 状态: 错误日志 + 未知 SKU 集合,跨调用累积,仅显式清空
// 红线: 不修改输入记录; 不做文件 I/O
// ==========================================

use crate::config::ProcessorConfigReader;
use crate::domain::enriched::{EnrichedRecord, EnrichedTable};
use crate::domain::error_log::{ErrorLog, ErrorLogEntry, Operation};
use crate::domain::impact::{ImpactReport, ImpactRow};
use crate::domain::mapping::LoadOutcome;
use crate::domain::record::RecordTable;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::impact_aggregator::{aggregate_impact, restore_enriched};
use crate::engine::impact_report::{build_impact_report, ReportThresholds};
use crate::engine::mapping_table::MappingTable;
use crate::engine::validator::SkuFormatValidator;
use crate::logging::LogScope;
use std::collections::HashSet;
use std::error::Error;
use tracing::{debug, error, info, info_span, warn, Dispatch};

// ==========================================
// InventoryProcessor - 库存处理器
// ==========================================
#[derive(Debug)]
pub struct InventoryProcessor {
    mapping: MappingTable,
    validator: SkuFormatValidator,
    unknown_identifiers: Vec<String>, // 首次出现顺序
    unknown_seen: HashSet<String>,
    error_log: ErrorLog,
    log_scope: LogScope,
}

impl InventoryProcessor {
    /// 创建处理器（默认 SKU 格式）
    pub fn new(mapping: MappingTable) -> Self {
        Self {
            mapping,
            validator: SkuFormatValidator::default(),
            unknown_identifiers: Vec::new(),
            unknown_seen: HashSet::new(),
            error_log: ErrorLog::new(),
            log_scope: LogScope::default(),
        }
    }

    /// 按配置创建处理器
    ///
    /// # 返回
    /// - Err: 配置读取失败,或 SKU 格式正则非法
    pub fn from_config(
        mapping: MappingTable,
        config: &dyn ProcessorConfigReader,
    ) -> Result<Self, Box<dyn Error>> {
        let validator = SkuFormatValidator::new(&config.get_sku_pattern()?)?;
        Ok(Self::new(mapping).with_validator(validator))
    }

    pub fn with_validator(mut self, validator: SkuFormatValidator) -> Self {
        self.validator = validator;
        self
    }

    /// 注入日志分发器（映射表共用同一分发器）
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.log_scope = LogScope::new(dispatch);
        self.mapping.set_log_scope(self.log_scope.clone());
        self
    }

    pub fn mapping(&self) -> &MappingTable {
        &self.mapping
    }

    pub fn validator(&self) -> &SkuFormatValidator {
        &self.validator
    }

    // ==========================================
    // 映射加载 / 单个查询
    // ==========================================

    /// 重新加载映射表（整表替换）; 失败同时记入处理器错误日志
    pub fn load_mapping(&mut self, source: &RecordTable) -> LoadOutcome {
        let outcome = self.mapping.load(source);
        if let Some(error) = &outcome.error {
            self.error_log.record(Operation::LoadMappings, error.clone());
        }
        outcome
    }

    /// 校验 SKU 格式（使用处理器配置的正则）
    pub fn validate_format(&self, identifier: &str) -> bool {
        self.validator.is_valid(identifier)
    }

    /// 单个 SKU 映射
    ///
    /// # 返回
    /// - Some(MSKU): 格式合法且已映射
    /// - None: 格式非法或未知 SKU
    pub fn map_identifier(&self, identifier: &str) -> Option<String> {
        if !self.validator.is_valid(identifier) {
            return None;
        }
        self.mapping
            .lookup(identifier)
            .map(|entry| entry.canonical_id.clone())
    }

    /// 批量 SKU 映射（保持输入顺序）
    pub fn map_identifiers<S: AsRef<str>>(&self, identifiers: &[S]) -> Vec<Option<String>> {
        identifiers
            .iter()
            .map(|identifier| self.map_identifier(identifier.as_ref()))
            .collect()
    }

    // ==========================================
    // 富化
    // ==========================================

    /// 富化库存记录
    ///
    /// # 参数
    /// - records: 原始库存记录表（不会被修改）
    /// - identifier_column: SKU 列名
    /// - marketplace_column: 平台列名（可选,存在时透传）
    ///
    /// # 返回
    /// - Ok(EnrichedTable): 每行追加 MSKU / 类型 / 格式合法标记
    /// - Err(ColumnError): SKU 列不存在
    pub fn enrich_records(
        &mut self,
        records: &RecordTable,
        identifier_column: &str,
        marketplace_column: Option<&str>,
    ) -> EngineResult<EnrichedTable> {
        let log_scope = self.log_scope.clone();
        log_scope.in_scope(|| {
            let _span = info_span!(
                "enrich_records",
                rows = records.len(),
                identifier_column = identifier_column
            )
            .entered();

            if !records.has_column(identifier_column) {
                let err = EngineError::column(
                    Operation::ProcessInventoryData.as_str(),
                    identifier_column,
                );
                error!(error = %err, "库存数据处理失败");
                self.error_log
                    .record(Operation::ProcessInventoryData, err.to_string());
                return Err(err);
            }

            let marketplace_column = marketplace_column.filter(|c| records.has_column(c));
            let mut enriched = Vec::with_capacity(records.len());
            let mut invalid: Vec<String> = Vec::new();
            let mut invalid_seen: HashSet<String> = HashSet::new();
            let mut unknown_batch: Vec<String> = Vec::new();

            for row in records.rows() {
                let raw_identifier = row.text(identifier_column);
                let entry = self.mapping.lookup(&raw_identifier);
                let identifier_valid = self.validator.is_valid(&raw_identifier);

                if !identifier_valid && invalid_seen.insert(raw_identifier.clone()) {
                    invalid.push(raw_identifier.clone());
                }
                if entry.is_none() {
                    unknown_batch.push(raw_identifier.clone());
                }

                enriched.push(EnrichedRecord {
                    record: row.clone(),
                    canonical_id: entry
                        .map(|e| e.canonical_id.clone())
                        .unwrap_or_default(),
                    inventory_type: entry.map(|e| e.inventory_type.clone()),
                    identifier_valid,
                    marketplace: marketplace_column
                        .and_then(|c| row.get(c))
                        .filter(|v| !v.is_blank())
                        .map(|v| v.display()),
                    raw_identifier,
                });
            }

            if !invalid.is_empty() {
                warn!(
                    invalid_count = invalid.len(),
                    identifiers = ?invalid,
                    "发现格式非法的 SKU"
                );
                self.error_log.record(
                    Operation::ProcessInventoryData,
                    format!("发现 {} 个格式非法的 SKU: {:?}", invalid.len(), invalid),
                );
            }

            for identifier in unknown_batch {
                if self.unknown_seen.insert(identifier.clone()) {
                    self.unknown_identifiers.push(identifier);
                }
            }

            info!(count = enriched.len(), "库存数据处理完成");
            if !self.unknown_identifiers.is_empty() {
                warn!(
                    unknown_count = self.unknown_identifiers.len(),
                    "存在未映射的 SKU"
                );
            }

            Ok(EnrichedTable::new(records.columns().to_vec(), enriched))
        })
    }

    // ==========================================
    // 库存影响汇总
    // ==========================================

    /// 计算库存影响
    ///
    /// # 参数
    /// - records: 富化结果
    /// - quantity_column: 数量列名
    /// - warehouse_column: 仓库列名（可选,列不存在时忽略）
    ///
    /// # 返回
    /// - Ok(Vec<ImpactRow>): 按 MSKU 首次出现顺序
    /// - Err(ColumnError): 数量列不存在
    pub fn compute_impact(
        &mut self,
        records: &EnrichedTable,
        quantity_column: &str,
        warehouse_column: Option<&str>,
    ) -> EngineResult<Vec<ImpactRow>> {
        let log_scope = self.log_scope.clone();
        log_scope.in_scope(|| {
            let _span = info_span!(
                "compute_impact",
                rows = records.len(),
                quantity_column = quantity_column
            )
            .entered();

            if !records.has_column(quantity_column) {
                let err = EngineError::column(
                    Operation::CalculateInventoryImpact.as_str(),
                    quantity_column,
                );
                error!(error = %err, "库存影响计算失败");
                self.error_log
                    .record(Operation::CalculateInventoryImpact, err.to_string());
                return Err(err);
            }

            let warehouse_column = match warehouse_column {
                Some(column) if records.has_column(column) => Some(column),
                Some(column) => {
                    debug!(warehouse_column = column, "仓库列不存在,仅按 MSKU 汇总");
                    None
                }
                None => None,
            };

            let output = aggregate_impact(records.records(), quantity_column, warehouse_column);
            if output.coerced_to_zero > 0 {
                debug!(coerced = output.coerced_to_zero, "数量缺失或非数值,按 0 计入");
            }
            info!(rows = output.rows.len(), "库存影响计算完成");
            Ok(output.rows)
        })
    }

    /// 由记录表计算库存影响（表须包含富化列 MSKU,例如重新导入的导出文件）
    ///
    /// # 返回
    /// - Err(ColumnError): 缺少 MSKU 列（未经富化）或数量列
    pub fn compute_impact_from_table(
        &mut self,
        table: &RecordTable,
        identifier_column: &str,
        quantity_column: &str,
        warehouse_column: Option<&str>,
    ) -> EngineResult<Vec<ImpactRow>> {
        let enriched = match restore_enriched(table, identifier_column) {
            Ok(enriched) => enriched,
            Err(err) => {
                self.log_scope
                    .in_scope(|| error!(error = %err, "库存影响计算失败"));
                self.error_log
                    .record(Operation::CalculateInventoryImpact, err.to_string());
                return Err(err);
            }
        };
        self.compute_impact(&enriched, quantity_column, warehouse_column)
    }

    /// 生成库存影响报告（总览 + 预警）
    pub fn build_report(
        &self,
        records: &EnrichedTable,
        impact: &[ImpactRow],
        quantity_column: &str,
        thresholds: &ReportThresholds,
    ) -> ImpactReport {
        self.log_scope.in_scope(|| {
            build_impact_report(records, impact, &self.mapping, quantity_column, thresholds)
        })
    }

    // ==========================================
    // 累积状态
    // ==========================================

    /// 未知 SKU 快照（去重,首次出现顺序）
    pub fn unknown_identifiers(&self) -> Vec<String> {
        self.unknown_identifiers.clone()
    }

    /// 错误日志（追加顺序）
    pub fn error_log(&self) -> &[ErrorLogEntry] {
        self.error_log.entries()
    }

    /// 追加错误日志（供导出等协作方记录失败）
    pub fn record_error(&mut self, operation: Operation, error: impl Into<String>) {
        self.error_log.record(operation, error);
    }

    pub fn clear_error_log(&mut self) {
        self.error_log.clear();
    }

    pub fn clear_unknown_identifiers(&mut self) {
        self.unknown_identifiers.clear();
        self.unknown_seen.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{config_keys, ConfigManager};
    use crate::domain::record::{CellValue, InventoryRecord};
    use crate::domain::types::InventoryType;
    use crate::logging::build_dispatch;

    fn mapping() -> MappingTable {
        let source = RecordTable::from_records(vec![
            InventoryRecord::from_pairs([("SKU", "ABC-123"), ("MSKU", "MSKU-001"), ("Type", "product")]),
            InventoryRecord::from_pairs([("SKU", "DEF-456"), ("MSKU", "MSKU-002"), ("Type", "product")]),
        ]);
        MappingTable::with_source(Some(&source))
    }

    fn inventory(rows: &[(&str, f64)]) -> RecordTable {
        let mut table = RecordTable::new(["SKU", "Quantity"]);
        for (sku, qty) in rows {
            table.push(InventoryRecord::from_pairs([
                ("SKU", CellValue::from(*sku)),
                ("Quantity", CellValue::from(*qty)),
            ]));
        }
        table
    }

    #[test]
    fn test_enrich_resolves_and_flags_unknown() {
        let mut processor = InventoryProcessor::new(mapping());
        let input = inventory(&[("ABC-123", 10.0), ("DEF-456", 5.0), ("XYZ-789", 1.0)]);

        let enriched = processor.enrich_records(&input, "SKU", None).unwrap();

        let records = enriched.records();
        assert_eq!(records[0].canonical_id, "MSKU-001");
        assert_eq!(records[0].inventory_type, Some(InventoryType::Product));
        assert_eq!(records[2].canonical_id, "");
        assert_eq!(records[2].inventory_type, None);
        assert!(records.iter().all(|r| r.identifier_valid));
        assert_eq!(processor.unknown_identifiers(), vec!["XYZ-789"]);
        assert!(processor.error_log().is_empty());
    }

    #[test]
    fn test_enrich_missing_column() {
        let mut processor = InventoryProcessor::new(mapping());
        let input = inventory(&[("ABC-123", 1.0)]);

        let result = processor.enrich_records(&input, "Missing", None);

        assert!(matches!(
            result,
            Err(EngineError::ColumnError { ref column, .. }) if column == "Missing"
        ));
        assert_eq!(processor.error_log().len(), 1);
        assert_eq!(processor.error_log()[0].operation, Operation::ProcessInventoryData);
    }

    #[test]
    fn test_invalid_identifiers_logged_once_per_call() {
        let mut processor = InventoryProcessor::new(mapping());
        let input = inventory(&[("ab!1", 1.0), ("ab!1", 2.0), ("abc-123", 3.0)]);

        let enriched = processor.enrich_records(&input, "SKU", None).unwrap();

        assert!(enriched.records().iter().all(|r| !r.identifier_valid));
        assert_eq!(processor.error_log().len(), 1);
        let message = &processor.error_log()[0].error;
        assert!(message.contains("ab!1"));
        assert!(message.contains("abc-123"));
        assert!(message.starts_with("发现 2 个"));
    }

    #[test]
    fn test_untrimmed_identifier_resolves_but_is_invalid() {
        let mut processor = InventoryProcessor::new(mapping());
        let input = inventory(&[(" ABC-123 ", 1.0)]);

        let enriched = processor.enrich_records(&input, "SKU", None).unwrap();
        let record = &enriched.records()[0];

        assert_eq!(record.canonical_id, "MSKU-001");
        assert!(!record.identifier_valid);
        assert_eq!(record.raw_identifier, " ABC-123 ");
    }

    #[test]
    fn test_marketplace_pass_through() {
        let mut processor = InventoryProcessor::new(mapping());
        let input = RecordTable::from_records(vec![InventoryRecord::from_pairs([
            ("SKU", "ABC-123"),
            ("Channel", "amazon"),
        ])]);

        let enriched = processor
            .enrich_records(&input, "SKU", Some("Channel"))
            .unwrap();
        assert_eq!(enriched.records()[0].marketplace.as_deref(), Some("amazon"));

        let enriched = processor
            .enrich_records(&input, "SKU", Some("NotThere"))
            .unwrap();
        assert_eq!(enriched.records()[0].marketplace, None);
    }

    #[test]
    fn test_compute_impact_missing_quantity_column() {
        let mut processor = InventoryProcessor::new(mapping());
        let input = RecordTable::from_records(vec![InventoryRecord::from_pairs([("SKU", "ABC-123")])]);
        let enriched = processor.enrich_records(&input, "SKU", None).unwrap();

        let result = processor.compute_impact(&enriched, "Quantity", None);

        assert!(matches!(result, Err(EngineError::ColumnError { .. })));
        assert_eq!(
            processor.error_log()[0].operation,
            Operation::CalculateInventoryImpact
        );
    }

    #[test]
    fn test_compute_impact_from_unenriched_table() {
        let mut processor = InventoryProcessor::new(mapping());
        let input = inventory(&[("ABC-123", 1.0)]);

        let result = processor.compute_impact_from_table(&input, "SKU", "Quantity", None);

        assert!(matches!(
            result,
            Err(EngineError::ColumnError { ref column, .. }) if column == "MSKU"
        ));
        assert_eq!(processor.error_log().len(), 1);
    }

    #[test]
    fn test_map_identifier() {
        let processor = InventoryProcessor::new(mapping());

        assert_eq!(processor.map_identifier("ABC-123").as_deref(), Some("MSKU-001"));
        assert_eq!(processor.map_identifier("abc-123"), None);
        assert_eq!(processor.map_identifier("XYZ-789"), None);
        assert_eq!(
            processor.map_identifiers(&["DEF-456", "NOPE"]),
            vec![Some("MSKU-002".to_string()), None]
        );
    }

    #[test]
    fn test_load_mapping_failure_recorded_on_processor() {
        let mut processor = InventoryProcessor::new(mapping());
        let broken = RecordTable::from_records(vec![InventoryRecord::from_pairs([("SKU", "A")])]);

        let outcome = processor.load_mapping(&broken);

        assert!(!outcome.success);
        assert_eq!(processor.error_log().len(), 1);
        assert_eq!(processor.error_log()[0].operation, Operation::LoadMappings);
        assert_eq!(processor.mapping().len(), 2);
    }

    #[test]
    fn test_from_config_pattern() {
        let mut config = ConfigManager::new();
        config.set(config_keys::SKU_PATTERN, "[a-z]+-[0-9]+");
        let processor = InventoryProcessor::from_config(mapping(), &config).unwrap();
        assert!(processor.validate_format("abc-123"));
        assert!(!processor.validate_format("ABC-123"));

        config.set(config_keys::SKU_PATTERN, "[a-z");
        assert!(InventoryProcessor::from_config(mapping(), &config).is_err());
    }

    #[test]
    fn test_reset_state() {
        let mut processor = InventoryProcessor::new(mapping());
        processor
            .enrich_records(&inventory(&[("XYZ-789", 1.0), ("bad!", 1.0)]), "SKU", None)
            .unwrap();
        assert!(!processor.unknown_identifiers().is_empty());
        assert!(!processor.error_log().is_empty());

        processor.clear_unknown_identifiers();
        processor.clear_error_log();

        assert!(processor.unknown_identifiers().is_empty());
        assert!(processor.error_log().is_empty());
    }

    #[test]
    fn test_injected_dispatch() {
        let mut processor = InventoryProcessor::new(mapping()).with_dispatch(build_dispatch("debug"));
        let enriched = processor
            .enrich_records(&inventory(&[("ABC-123", 2.0)]), "SKU", None)
            .unwrap();
        let rows = processor.compute_impact(&enriched, "Quantity", None).unwrap();
        assert_eq!(rows[0].quantity, 2.0);
    }
}
