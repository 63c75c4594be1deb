//! 字符设备操作集

use alloc::sync::Arc;
use klog::{pr_err, pr_info};
use vfs::{CharDevOps, FsError, OpenFlags, UserSlice, UserSliceMut};

use crate::error::MemDevError;
use crate::snapshot::Snapshot;
use crate::source::ReportSource;

/// `mymem` 的文件操作
///
/// 除数据源外不持有任何可变状态；句柄的读位置由 `CharDeviceFile` 维护。
pub struct MemDevOps {
    source: Arc<dyn ReportSource>,
    capacity: usize,
}

impl MemDevOps {
    /// 以 `source` 为数据源，快照容量为 `capacity`
    pub fn new(source: Arc<dyn ReportSource>, capacity: usize) -> Self {
        Self { source, capacity }
    }

    /// 读取一次报告
    ///
    /// `offset > 0` 时直接返回 0（EOF），不再访问数据源。否则取一份快照，
    /// 复制 `min(报告长度, buf.len())` 字节，成功且非零时推进 `offset`。
    pub fn read_report(
        &self,
        buf: &mut UserSliceMut<'_>,
        offset: &mut usize,
    ) -> Result<usize, MemDevError> {
        if *offset > 0 {
            return Ok(0);
        }

        let snapshot = Snapshot::take(self.source.as_ref(), self.capacity).inspect_err(|e| {
            pr_err!("mymem: Failed to read /proc/meminfo: {}", e);
        })?;

        let count = snapshot.len().min(buf.len());
        buf.copy_from(&snapshot.as_bytes()[..count])
            .map_err(|_| MemDevError::CopyFault)?;

        *offset += count;
        Ok(count)
    }
}

impl CharDevOps for MemDevOps {
    fn open(&self, _dev: u64, _flags: OpenFlags) -> Result<(), FsError> {
        pr_info!("mymem: Device opened");
        Ok(())
    }

    fn release(&self, _dev: u64) {
        pr_info!("mymem: Device closed");
    }

    fn read(&self, mut buf: UserSliceMut<'_>, offset: &mut usize) -> Result<usize, FsError> {
        Ok(self.read_report(&mut buf, offset)?)
    }

    fn write(&self, buf: UserSlice<'_>, _offset: &mut usize) -> Result<usize, FsError> {
        // 内容不读取，直接报告全部写入
        pr_info!("mymem: Write operation ignored (count={})", buf.len());
        Ok(buf.len())
    }
}
