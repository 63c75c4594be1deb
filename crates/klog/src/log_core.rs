//! 日志核心
//!
//! 全局实例与测试中的局部实例共用同一实现。

use alloc::string::String;
use core::fmt::{self, Write};
use core::sync::atomic::{AtomicU8, Ordering};

use crate::buffer::GlobalLogBuffer;
use crate::entry::LogEntry;
use crate::level::LogLevel;

/// 环形缓冲区加两级阈值
///
/// - 记录阈值：高于它的消息直接丢弃
/// - 控制台阈值：不高于它的消息同时写到 [`LogOutput`](crate::LogOutput)
pub struct LogCore {
    buffer: GlobalLogBuffer,
    level: AtomicU8,
    console_level: AtomicU8,
}

impl LogCore {
    /// 创建实例，可用于 `static` 初始化
    pub const fn new(level: LogLevel, console_level: LogLevel) -> Self {
        Self {
            buffer: GlobalLogBuffer::new(),
            level: AtomicU8::new(level as u8),
            console_level: AtomicU8::new(console_level as u8),
        }
    }

    /// 记录一条消息
    pub fn log(&self, level: LogLevel, args: fmt::Arguments) {
        if !self.is_level_enabled(level) {
            return;
        }

        let (cpu_id, task_id, timestamp) = crate::context_provider()
            .map(|ctx| (ctx.cpu_id(), ctx.task_id(), ctx.timestamp()))
            .unwrap_or_default();

        let entry = LogEntry::from_args(level, cpu_id, task_id, timestamp, args);
        self.buffer.write(&entry);

        if level as u8 <= self.console_level.load(Ordering::Acquire) {
            if let Some(output) = crate::log_output() {
                let mut line = format_log_entry(&entry);
                line.push('\n');
                output.write_str(&line);
            }
        }
    }

    /// 取出最旧的一条
    pub fn read(&self) -> Option<LogEntry> {
        self.buffer.read()
    }

    /// 依次取出全部条目
    pub fn drain(&self, mut f: impl FnMut(LogEntry)) {
        while let Some(entry) = self.buffer.read() {
            f(entry);
        }
    }

    /// 未读条目数
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// 缓冲区是否为空
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 被覆盖的条目数
    pub fn dropped(&self) -> usize {
        self.buffer.dropped_count()
    }

    /// 设置记录阈值
    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level as u8, Ordering::Release);
    }

    /// 当前记录阈值
    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::Acquire))
    }

    /// 设置控制台阈值
    pub fn set_console_level(&self, level: LogLevel) {
        self.console_level.store(level as u8, Ordering::Release);
    }

    /// 当前控制台阈值
    pub fn console_level(&self) -> LogLevel {
        LogLevel::from_u8(self.console_level.load(Ordering::Acquire))
    }

    #[inline(always)]
    pub(crate) fn is_level_enabled(&self, level: LogLevel) -> bool {
        level as u8 <= self.level.load(Ordering::Acquire)
    }
}

/// 按控制台格式渲染一条日志
///
/// ```text
/// <color>[    12.000345] [INFO] cpu1/42: message<reset>
/// ```
///
/// 时间戳按微秒解释，拆成秒和 6 位小数，与 `dmesg` 相同。
pub fn format_log_entry(entry: &LogEntry) -> String {
    let level = entry.level();
    let ts = entry.timestamp();
    let mut line = String::new();
    // 写入 String 不会失败
    let _ = write!(
        line,
        "{}[{:>5}.{:06}] {} cpu{}/{}: {}{}",
        level.color_code(),
        ts / 1_000_000,
        ts % 1_000_000,
        level.as_str(),
        entry.cpu_id(),
        entry.task_id(),
        entry.message(),
        level.reset_color_code()
    );
    line
}
