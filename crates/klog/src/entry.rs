//! 日志条目
//!
//! 条目大小固定，消息就地格式化到内联缓冲区，不做堆分配。

use core::fmt::{self, Write};

use crate::config::MAX_LOG_MESSAGE_LENGTH;
use crate::level::LogLevel;

/// 一条日志记录
#[derive(Clone)]
pub struct LogEntry {
    level: LogLevel,
    cpu_id: usize,
    task_id: u32,
    timestamp: usize,
    len: usize,
    message: [u8; MAX_LOG_MESSAGE_LENGTH],
}

impl LogEntry {
    /// 由 `format_args!` 构造条目，超长消息在字符边界处截断
    pub fn from_args(
        level: LogLevel,
        cpu_id: usize,
        task_id: u32,
        timestamp: usize,
        args: fmt::Arguments,
    ) -> Self {
        let mut entry = Self {
            level,
            cpu_id,
            task_id,
            timestamp,
            len: 0,
            message: [0; MAX_LOG_MESSAGE_LENGTH],
        };
        let mut writer = MessageWriter {
            buf: &mut entry.message,
            len: 0,
        };
        // 截断时 write_str 返回 Err，此时已写入的部分仍然有效
        let _ = writer.write_fmt(args);
        entry.len = writer.len;
        entry
    }

    /// 日志级别
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// 产生日志的 CPU
    pub fn cpu_id(&self) -> usize {
        self.cpu_id
    }

    /// 产生日志的任务，0 表示无任务上下文
    pub fn task_id(&self) -> u32 {
        self.task_id
    }

    /// 时间戳
    pub fn timestamp(&self) -> usize {
        self.timestamp
    }

    /// 消息文本
    pub fn message(&self) -> &str {
        // MessageWriter 只在字符边界处截断
        core::str::from_utf8(&self.message[..self.len]).unwrap_or("")
    }
}

impl fmt::Debug for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogEntry")
            .field("level", &self.level)
            .field("cpu_id", &self.cpu_id)
            .field("task_id", &self.task_id)
            .field("timestamp", &self.timestamp)
            .field("message", &self.message())
            .finish()
    }
}

struct MessageWriter<'a> {
    buf: &'a mut [u8; MAX_LOG_MESSAGE_LENGTH],
    len: usize,
}

impl Write for MessageWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = MAX_LOG_MESSAGE_LENGTH - self.len;
        if s.len() <= room {
            self.buf[self.len..self.len + s.len()].copy_from_slice(s.as_bytes());
            self.len += s.len();
            return Ok(());
        }
        let mut cut = room;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        self.buf[self.len..self.len + cut].copy_from_slice(&s.as_bytes()[..cut]);
        self.len += cut;
        Err(fmt::Error)
    }
}
