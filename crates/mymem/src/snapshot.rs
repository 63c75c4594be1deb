//! 内存报告快照
//!
//! 快照只存在于一次 `read` 调用内：分配、填充、复制给调用者后随作用域释放，
//! 并发读者之间不共享任何缓冲区。

use alloc::vec::Vec;

use crate::error::MemDevError;
use crate::source::ReportSource;

/// 一次内存报告的快照
///
/// 内部缓冲区按 `capacity` 一次性分配，报告最多 `capacity - 1` 字节，后跟 NUL。
pub struct Snapshot {
    buf: Vec<u8>,
    len: usize,
}

impl Snapshot {
    /// 打开 `source` 并从偏移 0 读取一次
    ///
    /// # Errors
    /// - `ReportUnavailable`: 数据源无法打开
    /// - `OutOfMemory`: 缓冲区分配失败
    /// - `ReportRead`: 数据源读取失败
    pub fn take(source: &dyn ReportSource, capacity: usize) -> Result<Self, MemDevError> {
        let report = source.open().map_err(MemDevError::ReportUnavailable)?;

        let mut buf = Vec::new();
        buf.try_reserve_exact(capacity)
            .map_err(|_| MemDevError::OutOfMemory)?;
        buf.resize(capacity, 0);

        let max = capacity.saturating_sub(1);
        let len = report
            .read_at(0, &mut buf[..max])
            .map_err(MemDevError::ReportRead)?
            .min(max);
        if let Some(terminator) = buf.get_mut(len) {
            *terminator = 0;
        }

        Ok(Self { buf, len })
    }

    /// 报告内容（不含结尾 NUL）
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// 报告长度
    pub fn len(&self) -> usize {
        self.len
    }

    /// 报告是否为空
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 缓冲区容量
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }
}
