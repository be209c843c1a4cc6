// ==========================================
// SKU 映射系统 - SKU 格式校验器
// ==========================================
// 规则: 整串匹配（非子串匹配）
// 默认: 大写字母 / 数字 / 下划线 / 连字符,至少 1 个字符
// ==========================================

use crate::engine::error::{EngineError, EngineResult};
use regex::Regex;

/// 默认 SKU 格式
pub const DEFAULT_SKU_PATTERN: &str = "[A-Z0-9_-]+";

// ==========================================
// SkuFormatValidator - SKU 格式校验器
// ==========================================
#[derive(Debug, Clone)]
pub struct SkuFormatValidator {
    pattern: String,
    regex: Regex,
}

impl SkuFormatValidator {
    /// 以自定义正则构造; 自动补全首尾锚点
    pub fn new(pattern: &str) -> EngineResult<Self> {
        let anchored = format!("^(?:{})$", strip_anchors(pattern));
        let regex = Regex::new(&anchored).map_err(|e| EngineError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// 校验 SKU（不做 TRIM,首尾空白视为非法）
    pub fn is_valid(&self, sku: &str) -> bool {
        self.regex.is_match(sku)
    }
}

impl Default for SkuFormatValidator {
    fn default() -> Self {
        Self::new(DEFAULT_SKU_PATTERN).expect("默认 SKU 格式正则必须合法")
    }
}

/// 纯函数形式的格式校验
///
/// # 返回
/// - Ok(bool): 是否整串匹配
/// - Err: 正则非法
pub fn validate_format(identifier: &str, pattern: &str) -> EngineResult<bool> {
    Ok(SkuFormatValidator::new(pattern)?.is_valid(identifier))
}

// 调用方可能自带 ^...$,去掉后统一包裹
fn strip_anchors(pattern: &str) -> &str {
    let p = pattern.strip_prefix('^').unwrap_or(pattern);
    match p.strip_suffix('$') {
        Some(inner) if !inner.ends_with('\\') => inner,
        _ => p,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pattern() {
        let validator = SkuFormatValidator::default();
        assert!(validator.is_valid("ABC-123"));
        assert!(validator.is_valid("DEF_456"));
        assert!(!validator.is_valid("abc-123")); // 区分大小写
        assert!(!validator.is_valid("AB!123"));
        assert!(!validator.is_valid(""));
        assert!(!validator.is_valid(" ABC-123")); // 首尾空白非法
    }

    #[test]
    fn test_full_string_anchor() {
        // 子串匹配不算通过
        assert!(!validate_format("ABC-123!", DEFAULT_SKU_PATTERN).unwrap());
        assert!(!validate_format("x", "[a-z]{2}").unwrap());
        assert!(validate_format("xy", "[a-z]{2}").unwrap());
    }

    #[test]
    fn test_caller_anchors_are_tolerated() {
        assert!(validate_format("abc-123", r"^[A-Za-z0-9_-]+$").unwrap());
        assert!(!validate_format("abc 123", r"^[A-Za-z0-9_-]+$").unwrap());
    }

    #[test]
    fn test_invalid_pattern() {
        let result = SkuFormatValidator::new("[A-Z");
        assert!(matches!(result, Err(EngineError::InvalidPattern { .. })));
    }
}
