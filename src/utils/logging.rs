// 日志工具模块
//
// 封装 flexi_logger 的初始化和关闭操作，确保异步日志在退出前 flush

use crate::config::LogConfig;
use crate::core::{VizError, VizResult};
use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use parking_lot::Mutex;

/// 全局日志句柄，用于程序退出时 flush
static LOGGER_HANDLE: Mutex<Option<LoggerHandle>> = Mutex::new(None);

/// 初始化日志系统
///
/// 日志写入 `dir/file*.log`，按大小轮转，警告及以上同时输出到 stderr。
/// 重复调用会返回错误，因为 `log` 门面只能设置一次。
///
/// # Examples
/// ```no_run
/// use algotrace::config::Config;
/// use algotrace::utils::logging;
///
/// let config = Config::default();
/// logging::init(&config.log).expect("日志初始化失败");
/// ```
pub fn init(config: &LogConfig) -> VizResult<()> {
    let mut guard = LOGGER_HANDLE.lock();
    if guard.is_some() {
        return Err(VizError::Config("logger already initialized".to_string()));
    }

    let handle = Logger::try_with_str(&config.level)
        .map_err(|e| VizError::Config(format!("invalid log level '{}': {}", config.level, e)))?
        .log_to_file(
            FileSpec::default()
                .basename(&config.file)
                .directory(&config.dir),
        )
        .rotate(
            Criterion::Size(config.max_file_size),
            Naming::Numbers,
            Cleanup::KeepLogFiles(config.max_files),
        )
        .duplicate_to_stderr(Duplicate::Warn)
        .write_mode(WriteMode::Async)
        .append()
        .start()
        .map_err(|e| VizError::Config(format!("failed to start logger: {}", e)))?;

    *guard = Some(handle);
    drop(guard);

    log::info!("日志系统初始化完成: {}/{}", config.dir, config.file);
    Ok(())
}

/// 刷新并关闭日志系统
///
/// 在程序退出前调用，确保所有异步日志都已写入文件
pub fn shutdown() {
    if let Some(handle) = LOGGER_HANDLE.lock().take() {
        handle.flush();
        // handle 在这里被 drop，会等待异步线程完成
    }
}

/// 检查日志系统是否已初始化
pub fn is_initialized() -> bool {
    LOGGER_HANDLE.lock().is_some()
}
