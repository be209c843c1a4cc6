// ==========================================
// 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// 支持环境变量配置日志级别
// 组件可注入独立的 Dispatch（不依赖全局订阅者）
// ==========================================

use tracing::Dispatch;
use tracing_subscriber::{fmt, EnvFilter};

/// 初始化日志系统
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器（默认: info）
///   例如: RUST_LOG=debug 或 RUST_LOG=sku_mapper=trace
///
/// # 示例
/// ```no_run
/// use sku_mapper::logging;
/// logging::init();
/// ```
pub fn init() {
    // 从环境变量读取日志级别，默认为 info
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // 配置日志格式
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();
}

/// 初始化测试环境的日志系统
///
/// 使用更详细的日志级别，便于调试
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

/// 构建可注入的日志分发器（不注册为全局）
///
/// # 参数
/// - filter: 过滤表达式,如 "info" / "sku_mapper=debug"
pub fn build_dispatch(filter: &str) -> Dispatch {
    let subscriber = fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    Dispatch::new(subscriber)
}

// ==========================================
// LogScope - 组件日志作用域
// ==========================================
// 未注入时使用进程默认订阅者
#[derive(Debug, Clone, Default)]
pub struct LogScope {
    dispatch: Option<Dispatch>,
}

impl LogScope {
    pub fn new(dispatch: Dispatch) -> Self {
        Self {
            dispatch: Some(dispatch),
        }
    }

    /// 在注入的分发器下执行
    pub fn in_scope<R>(&self, f: impl FnOnce() -> R) -> R {
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, f),
            None => f(),
        }
    }
}
