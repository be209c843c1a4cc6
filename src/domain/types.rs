// ==========================================
// SKU 映射系统 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 库存类型 (Inventory Type)
// ==========================================
// 映射表 Type 列取值; 未知取值原样保留（Other）,不丢弃
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InventoryType {
    Product,   // 单品
    Combo,     // 组合
    Packaging, // 包材
    Component, // 组件
    Other(String),
}

impl InventoryType {
    /// 解析 Type 列（TRIM + 忽略大小写）
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_lowercase().as_str() {
            "product" => InventoryType::Product,
            "combo" => InventoryType::Combo,
            "packaging" => InventoryType::Packaging,
            "component" => InventoryType::Component,
            _ => InventoryType::Other(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            InventoryType::Product => "product",
            InventoryType::Combo => "combo",
            InventoryType::Packaging => "packaging",
            InventoryType::Component => "component",
            InventoryType::Other(raw) => raw,
        }
    }
}

impl fmt::Display for InventoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for InventoryType {
    fn from(value: String) -> Self {
        InventoryType::parse(&value)
    }
}

impl From<InventoryType> for String {
    fn from(value: InventoryType) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_types() {
        assert_eq!(InventoryType::parse("product"), InventoryType::Product);
        assert_eq!(InventoryType::parse(" Combo "), InventoryType::Combo);
        assert_eq!(InventoryType::parse("PACKAGING"), InventoryType::Packaging);
        assert_eq!(InventoryType::parse("component"), InventoryType::Component);
    }

    #[test]
    fn test_parse_unknown_type_is_preserved() {
        let t = InventoryType::parse(" Bundle-X ");
        assert_eq!(t, InventoryType::Other("Bundle-X".to_string()));
        assert_eq!(t.to_string(), "Bundle-X");
    }

    #[test]
    fn test_serde_as_plain_string() {
        let json = serde_json::to_string(&InventoryType::Combo).unwrap();
        assert_eq!(json, "\"combo\"");
        let back: InventoryType = serde_json::from_str("\"product\"").unwrap();
        assert_eq!(back, InventoryType::Product);
    }
}
