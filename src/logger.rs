use colored::*;
use log::{Level, LevelFilter, Metadata, Record};
use std::sync::Mutex;

// 所有诊断输出共用一把锁，避免并发任务交错输出半行
static EMIT_LOCK: Mutex<()> = Mutex::new(());

/// 进程级日志器
pub struct Logger {
    use_colors: bool,
    max_level: Level,
}

impl Logger {
    pub fn new() -> Self {
        Logger {
            use_colors: true,
            max_level: Level::Info,
        }
    }

    fn wrap(&self, label: &str, level: Level) -> String {
        if !self.use_colors {
            return label.to_string();
        }

        match level {
            Level::Error => label.red().to_string(),
            Level::Warn => label.yellow().to_string(),
            Level::Info => label.cyan().to_string(),
            Level::Debug => label.magenta().to_string(),
            Level::Trace => label.normal().to_string(),
        }
    }

    fn label(level: Level) -> &'static str {
        match level {
            Level::Error => "ERROR",
            Level::Warn => "WARNING",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let label = self.wrap(Self::label(record.level()), record.level());
        if let Ok(_guard) = EMIT_LOCK.lock() {
            println!("[{}] [{}] {}", timestamp(), label, record.args());
        }
    }

    fn flush(&self) {}
}

/// 初始化全局日志器
pub fn init_logger() {
    if log::set_boxed_logger(Box::new(Logger::new())).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }
}

/// 成功事件输出（发现子域名、报告落盘等），与全局日志共用同一把锁
pub fn success(msg: &str) {
    if let Ok(_guard) = EMIT_LOCK.lock() {
        println!("[{}] [{}] {}", timestamp(), "SUCCESS".green(), msg);
    }
}

fn timestamp() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}
