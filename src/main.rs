// ==========================================
// SKU 映射系统 - 命令行入口
// ==========================================
// 用法:
//   sku-mapper <mapping_file> <inventory_file>
//              [--config <json>] [--export <file>] [--impact-export <file>]
// 退出码: 映射加载或处理失败时非 0
// ==========================================

use anyhow::{anyhow, bail, Context};
use sku_mapper::config::{ConfigManager, ProcessorConfigReader};
use sku_mapper::engine::{InventoryProcessor, MappingTable, ReportThresholds};
use sku_mapper::importer::{export_impact, export_processed_data, ExportFormat, UniversalFileParser};
use sku_mapper::{logging, ImpactReport};
use std::path::PathBuf;

const USAGE: &str = "用法: sku-mapper <mapping_file> <inventory_file> [--config <json>] [--export <file>] [--impact-export <file>]";

struct CliArgs {
    mapping_file: PathBuf,
    inventory_file: PathBuf,
    config_file: Option<PathBuf>,
    export_file: Option<PathBuf>,
    impact_export_file: Option<PathBuf>,
}

fn parse_args() -> anyhow::Result<CliArgs> {
    let mut positional = Vec::new();
    let mut config_file = None;
    let mut export_file = None;
    let mut impact_export_file = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let slot = match arg.as_str() {
            "--config" => &mut config_file,
            "--export" => &mut export_file,
            "--impact-export" => &mut impact_export_file,
            "-h" | "--help" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            flag if flag.starts_with("--") => bail!("未知参数: {}\n{}", flag, USAGE),
            _ => {
                positional.push(PathBuf::from(&arg));
                continue;
            }
        };
        let value = args
            .next()
            .ok_or_else(|| anyhow!("参数 {} 缺少取值\n{}", arg, USAGE))?;
        *slot = Some(PathBuf::from(value));
    }

    if positional.len() != 2 {
        bail!("{}", USAGE);
    }
    let inventory_file = positional.pop().unwrap_or_default();
    let mapping_file = positional.pop().unwrap_or_default();

    Ok(CliArgs {
        mapping_file,
        inventory_file,
        config_file,
        export_file,
        impact_export_file,
    })
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let args = parse_args()?;

    tracing::info!("==================================================");
    tracing::info!("{} v{}", sku_mapper::APP_NAME, sku_mapper::VERSION);
    tracing::info!("==================================================");

    // 1. 配置
    let config = match &args.config_file {
        Some(path) => ConfigManager::from_json_file(path).map_err(|e| anyhow!("{}", e))?,
        None => ConfigManager::new(),
    };
    let sku_column = config.get_sku_column().map_err(|e| anyhow!("{}", e))?;
    let marketplace_column = config.get_marketplace_column().map_err(|e| anyhow!("{}", e))?;
    let quantity_column = config.get_quantity_column().map_err(|e| anyhow!("{}", e))?;
    let warehouse_column = config.get_warehouse_column().map_err(|e| anyhow!("{}", e))?;
    let thresholds = ReportThresholds::from_config(&config).map_err(|e| anyhow!("{}", e))?;

    // 2. 映射表
    let parser = UniversalFileParser;
    let mapping_source = parser
        .parse(&args.mapping_file)
        .with_context(|| format!("映射文件读取失败: {}", args.mapping_file.display()))?;
    let mut processor =
        InventoryProcessor::from_config(MappingTable::new(), &config).map_err(|e| anyhow!("{}", e))?;
    let outcome = processor.load_mapping(&mapping_source);
    if !outcome.success {
        bail!("映射加载失败: {}", outcome.error.unwrap_or_default());
    }

    // 3. 富化 + 汇总
    let inventory = parser
        .parse(&args.inventory_file)
        .with_context(|| format!("库存文件读取失败: {}", args.inventory_file.display()))?;
    let enriched = processor
        .enrich_records(&inventory, &sku_column, marketplace_column.as_deref())
        .context("库存数据处理失败")?;
    let impact = processor
        .compute_impact(&enriched, &quantity_column, warehouse_column.as_deref())
        .context("库存影响计算失败")?;
    let report = processor.build_report(&enriched, &impact, &quantity_column, &thresholds);

    // 4. 导出
    if let Some(path) = &args.export_file {
        let format = ExportFormat::from_path(path)
            .with_context(|| format!("导出文件扩展名不支持: {}", path.display()))?;
        if !export_processed_data(&mut processor, &enriched, path, format.as_str()) {
            bail!("富化结果导出失败: {}", path.display());
        }
    }
    if let Some(path) = &args.impact_export_file {
        let format = ExportFormat::from_path(path)
            .with_context(|| format!("导出文件扩展名不支持: {}", path.display()))?;
        export_impact(&impact, path, format)
            .with_context(|| format!("影响汇总导出失败: {}", path.display()))?;
    }

    print_report(&report, &processor);
    Ok(())
}

fn print_report(report: &ImpactReport, processor: &InventoryProcessor) {
    let overview = &report.overview;
    println!("记录数: {}", overview.record_count);
    println!("MSKU 数: {}", overview.distinct_msku_count);
    println!("总数量: {}", overview.total_quantity);
    println!("未知 SKU 记录: {}", overview.unknown_record_count);
    println!("格式非法记录: {}", overview.invalid_record_count);

    if !report.warehouse_totals.is_empty() {
        println!("\n仓库合计:");
        for total in &report.warehouse_totals {
            println!("  {}: {}", total.warehouse, total.quantity);
        }
    }
    if !report.low_stock.is_empty() {
        println!("\n低库存预警:");
        for alert in &report.low_stock {
            let label = alert.inventory_type.as_ref().map(|t| t.as_str()).unwrap_or("-");
            println!("  {} ({}): {}", alert.canonical_id, label, alert.quantity);
        }
    }
    if !report.over_capacity.is_empty() {
        println!("\n仓库容量预警:");
        for total in &report.over_capacity {
            println!("  {}: {}", total.warehouse, total.quantity);
        }
    }
    if !report.combo_review.is_empty() {
        println!("\n组合商品待复核:");
        for item in &report.combo_review {
            println!(
                "  {} → {} [{}]",
                item.raw_identifier,
                item.canonical_id,
                item.components.join(", ")
            );
        }
    }

    let unknown = processor.unknown_identifiers();
    if !unknown.is_empty() {
        println!("\n未映射 SKU ({}): {}", unknown.len(), unknown.join(", "));
    }
    let errors = processor.error_log();
    if !errors.is_empty() {
        println!("\n错误日志:");
        for entry in errors {
            println!(
                "  [{}] {}: {}",
                entry.recorded_at.format("%Y-%m-%d %H:%M:%S"),
                entry.operation,
                entry.error
            );
        }
    }
}
