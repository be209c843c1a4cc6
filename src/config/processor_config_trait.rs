// ==========================================
// SKU 映射系统 - 处理配置读取 Trait
// ==========================================
// 职责: 定义处理流程所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use std::error::Error;

// ==========================================
// ProcessorConfigReader Trait
// ==========================================
// 用途: 富化 / 汇总 / 报告所需的配置读取接口
// 实现者: ConfigManager
pub trait ProcessorConfigReader {
    // ===== 列名配置 =====

    /// 获取 SKU 列名
    ///
    /// # 默认值
    /// - "SKU"
    fn get_sku_column(&self) -> Result<String, Box<dyn Error>>;

    /// 获取平台列名（透传维度）
    ///
    /// # 默认值
    /// - None（不透传）
    fn get_marketplace_column(&self) -> Result<Option<String>, Box<dyn Error>>;

    /// 获取数量列名
    ///
    /// # 默认值
    /// - "Quantity"
    fn get_quantity_column(&self) -> Result<String, Box<dyn Error>>;

    /// 获取仓库列名
    ///
    /// # 默认值
    /// - None（不按仓库拆分）
    fn get_warehouse_column(&self) -> Result<Option<String>, Box<dyn Error>>;

    // ===== 校验配置 =====

    /// 获取 SKU 格式正则（整串匹配）
    ///
    /// # 默认值
    /// - "[A-Z0-9_-]+"
    fn get_sku_pattern(&self) -> Result<String, Box<dyn Error>>;

    // ===== 报告阈值配置 =====

    /// 获取低库存阈值
    ///
    /// # 返回
    /// - f64: MSKU 总量低于该值时预警
    ///
    /// # 默认值
    /// - 10
    fn get_low_stock_threshold(&self) -> Result<f64, Box<dyn Error>>;

    /// 获取仓库容量阈值
    ///
    /// # 返回
    /// - f64: 仓库合计超过该值时预警
    ///
    /// # 默认值
    /// - 500
    fn get_warehouse_capacity_threshold(&self) -> Result<f64, Box<dyn Error>>;
}
