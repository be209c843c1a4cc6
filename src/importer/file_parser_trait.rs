// ==========================================
// SKU 映射系统 - 文件解析 Trait
// ==========================================
// 职责: 定义文件 → 记录表 的解析接口（不包含实现）
// ==========================================

use crate::domain::record::RecordTable;
use crate::importer::error::ImportResult;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口
// 实现者: CsvParser, ExcelParser, JsonParser
pub trait FileParser: Send + Sync {
    /// 解析文件为记录表
    ///
    /// # 参数
    /// - file_path: 文件路径
    ///
    /// # 返回
    /// - Ok(RecordTable): 列顺序 = 文件表头顺序
    /// - Err: 文件不存在、扩展名不符、解析失败
    fn parse(&self, file_path: &Path) -> ImportResult<RecordTable>;
}
