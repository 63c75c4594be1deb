//! 内存报告数据源

use alloc::sync::Arc;
use fs::{PROC_MOUNT_POINT, mounted_procfs};
use vfs::{FileSystem, FsError, Inode, lookup_path};

use crate::config::MEMINFO_PATH;

/// 内存报告数据源
///
/// 每次取快照时调用一次 [`open`](ReportSource::open)，从返回的 inode 偏移 0 处读取。
pub trait ReportSource: Send + Sync {
    /// 打开报告
    fn open(&self) -> Result<Arc<dyn Inode>, FsError>;
}

/// 已挂载 procfs 中的 `/proc/meminfo`
pub struct ProcMeminfo {
    path: &'static str,
}

impl ProcMeminfo {
    /// 使用默认路径
    pub const fn new() -> Self {
        Self { path: MEMINFO_PATH }
    }

    /// 使用 `/proc` 下的其它路径
    pub const fn with_path(path: &'static str) -> Self {
        Self { path }
    }
}

impl Default for ProcMeminfo {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportSource for ProcMeminfo {
    fn open(&self) -> Result<Arc<dyn Inode>, FsError> {
        let rel = self
            .path
            .strip_prefix(PROC_MOUNT_POINT)
            .filter(|rel| rel.is_empty() || rel.starts_with('/'))
            .ok_or(FsError::NotFound)?;
        let procfs = mounted_procfs().ok_or(FsError::NotFound)?;
        lookup_path(&procfs.root_inode(), rel)
    }
}
