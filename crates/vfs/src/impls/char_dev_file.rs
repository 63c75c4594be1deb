//! 字符设备的打开句柄

use alloc::sync::Arc;
use sync::SpinLock;

use crate::chrdev::{CharDevOps, chrdev_ops};
use crate::uaccess::{UserSlice, UserSliceMut};
use crate::{File, FsError, Inode, InodeMetadata, InodeType, OpenFlags};

/// 一次 open 得到的字符设备句柄
///
/// 构造时按节点的 `rdev` 找到驱动并调用其 `open`；
/// 句柄的最后一个引用释放时调用 `release`。
pub struct CharDeviceFile {
    /// 设备节点
    pub inode: Arc<dyn Inode>,
    dev: u64,
    driver: Arc<dyn CharDevOps>,
    /// 打开标志
    pub flags: OpenFlags,
    cursor: SpinLock<usize>,
}

impl CharDeviceFile {
    /// 打开设备节点
    ///
    /// 节点不是字符设备时返回 `InvalidArgument`，设备号上没有驱动时返回
    /// `NoDevice`，驱动 `open` 的错误原样返回（此时不会调用 `release`）。
    pub fn open(inode: Arc<dyn Inode>, flags: OpenFlags) -> Result<Arc<Self>, FsError> {
        let meta = inode.metadata()?;
        if meta.inode_type != InodeType::CharDevice {
            return Err(FsError::InvalidArgument);
        }
        let driver = chrdev_ops(meta.rdev).ok_or(FsError::NoDevice)?;
        driver.open(meta.rdev, flags)?;

        Ok(Arc::new(Self {
            inode,
            dev: meta.rdev,
            driver,
            flags,
            cursor: SpinLock::new(0),
        }))
    }

    /// 设备号
    pub fn dev(&self) -> u64 {
        self.dev
    }

    /// 取出游标交给驱动，驱动改动了游标才写回
    ///
    /// 驱动可能访问用户页而缺页，调用期间不持有游标锁。未改动游标的调用
    /// 不写回，以免覆盖并发调用在此期间推进的位置。
    fn with_cursor(
        &self,
        op: impl FnOnce(&dyn CharDevOps, &mut usize) -> Result<usize, FsError>,
    ) -> Result<usize, FsError> {
        let start = *self.cursor.lock();
        let mut pos = start;
        let n = op(self.driver.as_ref(), &mut pos)?;
        if pos != start {
            *self.cursor.lock() = pos;
        }
        Ok(n)
    }
}

impl File for CharDeviceFile {
    fn readable(&self) -> bool {
        self.flags.readable()
    }

    fn writable(&self) -> bool {
        self.flags.writable()
    }

    fn read(&self, buf: UserSliceMut<'_>) -> Result<usize, FsError> {
        if !self.readable() {
            return Err(FsError::PermissionDenied);
        }
        self.with_cursor(|drv, pos| drv.read(buf, pos))
    }

    fn write(&self, buf: UserSlice<'_>) -> Result<usize, FsError> {
        if !self.writable() {
            return Err(FsError::PermissionDenied);
        }
        self.with_cursor(|drv, pos| drv.write(buf, pos))
    }

    fn metadata(&self) -> Result<InodeMetadata, FsError> {
        self.inode.metadata()
    }

    fn offset(&self) -> usize {
        *self.cursor.lock()
    }

    fn flags(&self) -> OpenFlags {
        self.flags
    }

    fn as_any(&self) -> &dyn core::any::Any {
        self
    }
}

impl Drop for CharDeviceFile {
    fn drop(&mut self) {
        self.driver.release(self.dev);
    }
}
