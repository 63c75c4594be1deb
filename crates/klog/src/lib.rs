//! 内核日志子系统
//!
//! printk 风格的分级日志：驱动通过 `pr_emerg!` … `pr_debug!` 记录消息，
//! 消息按 [`LogLevel`] 过滤后进入固定容量的环形缓冲区（类似 `dmesg`），
//! 达到控制台级别的消息同时直接输出。
//!
//! # 运行时依赖
//!
//! - [`LogContextProvider`]：CPU ID、任务 ID、时间戳（微秒）
//! - [`LogOutput`]：控制台输出
//!
//! 两者都是可选的；未注册时上下文字段为 0，控制台输出被跳过，
//! 缓冲区照常工作。

#![no_std]

extern crate alloc;

mod buffer;
mod config;
mod entry;
mod level;
mod log_core;
pub mod macros;

pub use config::{
    DEFAULT_CONSOLE_LEVEL, DEFAULT_LOG_LEVEL, GLOBAL_LOG_BUFFER_SIZE, MAX_LOG_MESSAGE_LENGTH,
};
pub use entry::LogEntry;
pub use level::LogLevel;
pub use log_core::{LogCore, format_log_entry};

use core::sync::atomic::{AtomicUsize, Ordering};

/// 日志上下文提供者
pub trait LogContextProvider: Send + Sync {
    /// 当前 CPU ID
    fn cpu_id(&self) -> usize;
    /// 当前任务 ID（没有任务时为 0）
    fn task_id(&self) -> u32;
    /// 自启动以来的微秒数
    fn timestamp(&self) -> usize;
}

/// 日志控制台输出
pub trait LogOutput: Send + Sync {
    /// 输出一行已格式化的日志（含换行）
    fn write_str(&self, s: &str);
}

/// trait object 胖指针的存放位置，data 为 0 表示未注册
struct FatSlot {
    data: AtomicUsize,
    vtable: AtomicUsize,
}

impl FatSlot {
    const fn new() -> Self {
        Self {
            data: AtomicUsize::new(0),
            vtable: AtomicUsize::new(0),
        }
    }

    fn store(&self, [data, vtable]: [usize; 2]) {
        self.vtable.store(vtable, Ordering::Release);
        self.data.store(data, Ordering::Release);
    }

    fn load(&self) -> Option<[usize; 2]> {
        let data = self.data.load(Ordering::Acquire);
        if data == 0 {
            return None;
        }
        Some([data, self.vtable.load(Ordering::Acquire)])
    }
}

static CONTEXT_PROVIDER: FatSlot = FatSlot::new();
static LOG_OUTPUT: FatSlot = FatSlot::new();

/// 注册日志上下文提供者
///
/// # Safety
/// 必须在单线程环境下调用，且只能调用一次
pub unsafe fn register_context_provider(provider: &'static dyn LogContextProvider) {
    let ptr = provider as *const dyn LogContextProvider;
    // SAFETY: 将 fat pointer 拆分为 data 和 vtable 两部分存储
    CONTEXT_PROVIDER.store(unsafe {
        core::mem::transmute::<*const dyn LogContextProvider, [usize; 2]>(ptr)
    });
}

/// 注册日志输出
///
/// # Safety
/// 必须在单线程环境下调用，且只能调用一次
pub unsafe fn register_log_output(output: &'static dyn LogOutput) {
    let ptr = output as *const dyn LogOutput;
    // SAFETY: 同上
    LOG_OUTPUT.store(unsafe { core::mem::transmute::<*const dyn LogOutput, [usize; 2]>(ptr) });
}

pub(crate) fn context_provider() -> Option<&'static dyn LogContextProvider> {
    let parts = CONTEXT_PROVIDER.load()?;
    // SAFETY: 由 register_context_provider 存入的 'static 引用重组
    Some(unsafe { &*core::mem::transmute::<[usize; 2], *const dyn LogContextProvider>(parts) })
}

pub(crate) fn log_output() -> Option<&'static dyn LogOutput> {
    let parts = LOG_OUTPUT.load()?;
    // SAFETY: 由 register_log_output 存入的 'static 引用重组
    Some(unsafe { &*core::mem::transmute::<[usize; 2], *const dyn LogOutput>(parts) })
}

/// 全局日志实例
static GLOBAL_LOG: LogCore = LogCore::new(DEFAULT_LOG_LEVEL, DEFAULT_CONSOLE_LEVEL);

/// 宏的落点
#[doc(hidden)]
pub fn log_impl(level: LogLevel, args: core::fmt::Arguments) {
    GLOBAL_LOG.log(level, args);
}

/// 宏的级别预检，被过滤的消息不会格式化
#[doc(hidden)]
pub fn is_level_enabled(level: LogLevel) -> bool {
    GLOBAL_LOG.is_level_enabled(level)
}

/// 取出最旧的一条日志
pub fn read_log() -> Option<LogEntry> {
    GLOBAL_LOG.read()
}

/// 依次取出所有日志（`dmesg -c`）
pub fn drain_log(f: impl FnMut(LogEntry)) {
    GLOBAL_LOG.drain(f);
}

/// 未读日志条目数
pub fn log_len() -> usize {
    GLOBAL_LOG.len()
}

/// 因缓冲区写满而覆盖的条目数
pub fn log_dropped_count() -> usize {
    GLOBAL_LOG.dropped()
}

/// 设置记录阈值
pub fn set_global_level(level: LogLevel) {
    GLOBAL_LOG.set_level(level);
}

/// 当前记录阈值
pub fn get_global_level() -> LogLevel {
    GLOBAL_LOG.level()
}

/// 设置控制台阈值
pub fn set_console_level(level: LogLevel) {
    GLOBAL_LOG.set_console_level(level);
}

/// 当前控制台阈值
pub fn get_console_level() -> LogLevel {
    GLOBAL_LOG.console_level()
}

#[cfg(test)]
mod tests;
