//! 打开句柄
//!
//! 每次 open 得到一个 `Arc<dyn File>`，最后一个引用释放即相当于 close。
//! 句柄持有游标和打开标志，底层节点见 [`crate::Inode`]。

use uapi::fcntl::OpenFlags;

use crate::uaccess::{UserSlice, UserSliceMut};
use crate::{FsError, InodeMetadata};

/// 打开句柄的操作
pub trait File: Send + Sync {
    /// 打开模式是否允许读
    fn readable(&self) -> bool;

    /// 打开模式是否允许写
    fn writable(&self) -> bool;

    /// 从当前游标读到 `buf`，返回字节数，0 表示 EOF
    fn read(&self, buf: UserSliceMut<'_>) -> Result<usize, FsError>;

    /// 从 `buf` 写入，返回被接受的字节数
    fn write(&self, buf: UserSlice<'_>) -> Result<usize, FsError>;

    /// 底层节点的元数据
    fn metadata(&self) -> Result<InodeMetadata, FsError>;

    /// 当前游标
    fn offset(&self) -> usize {
        0
    }

    /// 打开时的标志
    fn flags(&self) -> OpenFlags {
        OpenFlags::empty()
    }

    /// 向下转型
    fn as_any(&self) -> &dyn core::any::Any;
}
