//! 日志系统配置常量

use crate::level::LogLevel;

/// 环形缓冲区可容纳的日志条目数
pub const GLOBAL_LOG_BUFFER_SIZE: usize = 64;

/// 单条日志消息的最大字节数（超出部分被截断）
pub const MAX_LOG_MESSAGE_LENGTH: usize = 256;

/// 默认全局日志级别：Debug 被过滤
pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

/// 默认控制台级别：与 Linux 默认 console_loglevel 一致，Info 及以上立即打印
pub const DEFAULT_CONSOLE_LEVEL: LogLevel = LogLevel::Info;
