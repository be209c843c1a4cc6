// ==========================================
// SKU 映射系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、快照
// 存储: 内存 key-value（JSON 对象文件加载）
// ==========================================

use crate::config::processor_config_trait::ProcessorConfigReader;
use crate::engine::validator::DEFAULT_SKU_PATTERN;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::error::Error;
use std::path::Path;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    values: HashMap<String, String>,
}

impl ConfigManager {
    /// 创建空配置（全部取默认值）
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 配置文件创建
    ///
    /// # 参数
    /// - path: JSON 文件路径,内容为扁平对象 {"key": value}
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let raw = std::fs::read_to_string(path.as_ref())
            .map_err(|e| format!("配置文件读取失败 ({}): {}", path.as_ref().display(), e))?;
        let mut manager = Self::new();
        manager.restore_config_from_snapshot(&raw)?;
        Ok(manager)
    }

    /// 设置配置值
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// 读取配置值
    ///
    /// # 返回
    /// - Some(String): 配置值（已 TRIM,空串视为未配置）
    /// - None: 配置不存在
    fn get_config_value(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// 读取配置值（公开方法，供其他模块复用）
    pub fn get_global_config_value(&self, key: &str) -> Option<String> {
        self.get_config_value(key)
    }

    /// 读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> String {
        self.get_config_value(key)
            .unwrap_or_else(|| default.to_string())
    }

    /// 读取数值配置; 格式错误时告警并回退默认值
    fn get_f64_or_default(&self, key: &str, default: f64) -> f64 {
        match self.get_config_value(key) {
            None => default,
            Some(value) => value.parse::<f64>().unwrap_or_else(|_| {
                tracing::warn!(
                    config_key = key,
                    raw_value = %value,
                    "配置值格式错误，使用默认值"
                );
                default
            }),
        }
    }

    /// 获取所有配置的快照（JSON格式）
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let ordered: std::collections::BTreeMap<&String, &String> = self.values.iter().collect();
        Ok(serde_json::to_string(&json!(ordered))?)
    }

    /// 从配置快照恢复配置
    ///
    /// # 返回
    /// - Ok(usize): 恢复的配置项数量
    /// - Err: 非 JSON 对象
    ///
    /// # 注意
    /// - 同名键覆盖; null 值忽略; 数值/布尔转为文本
    pub fn restore_config_from_snapshot(&mut self, snapshot_json: &str) -> Result<usize, Box<dyn Error>> {
        let parsed: Value = serde_json::from_str(snapshot_json)?;
        let object = parsed
            .as_object()
            .ok_or("配置快照必须是 JSON 对象")?;

        let mut count = 0;
        for (key, value) in object {
            let text = match value {
                Value::Null => continue,
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            self.values.insert(key.clone(), text);
            count += 1;
        }

        Ok(count)
    }
}

// ==========================================
// ProcessorConfigReader Trait 实现
// ==========================================
impl ProcessorConfigReader for ConfigManager {
    // ===== 列名配置 =====

    fn get_sku_column(&self) -> Result<String, Box<dyn Error>> {
        Ok(self.get_config_or_default(config_keys::SKU_COLUMN, "SKU"))
    }

    fn get_marketplace_column(&self) -> Result<Option<String>, Box<dyn Error>> {
        Ok(self.get_config_value(config_keys::MARKETPLACE_COLUMN))
    }

    fn get_quantity_column(&self) -> Result<String, Box<dyn Error>> {
        Ok(self.get_config_or_default(config_keys::QUANTITY_COLUMN, "Quantity"))
    }

    fn get_warehouse_column(&self) -> Result<Option<String>, Box<dyn Error>> {
        Ok(self.get_config_value(config_keys::WAREHOUSE_COLUMN))
    }

    // ===== 校验配置 =====

    fn get_sku_pattern(&self) -> Result<String, Box<dyn Error>> {
        Ok(self.get_config_or_default(config_keys::SKU_PATTERN, DEFAULT_SKU_PATTERN))
    }

    // ===== 报告阈值配置 =====

    fn get_low_stock_threshold(&self) -> Result<f64, Box<dyn Error>> {
        Ok(self.get_f64_or_default(config_keys::LOW_STOCK_THRESHOLD, 10.0))
    }

    fn get_warehouse_capacity_threshold(&self) -> Result<f64, Box<dyn Error>> {
        Ok(self.get_f64_or_default(config_keys::WAREHOUSE_CAPACITY_THRESHOLD, 500.0))
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 列名
    pub const SKU_COLUMN: &str = "sku_column";
    pub const MARKETPLACE_COLUMN: &str = "marketplace_column";
    pub const QUANTITY_COLUMN: &str = "quantity_column";
    pub const WAREHOUSE_COLUMN: &str = "warehouse_column";

    // 校验
    pub const SKU_PATTERN: &str = "sku_pattern";

    // 报告阈值
    pub const LOW_STOCK_THRESHOLD: &str = "low_stock_threshold";
    pub const WAREHOUSE_CAPACITY_THRESHOLD: &str = "warehouse_capacity_threshold";
}
