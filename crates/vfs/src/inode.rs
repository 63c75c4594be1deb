//! 索引节点
//!
//! `Inode` 是无状态、按显式偏移访问的对象，可被多个打开句柄共享；
//! 偏移量与打开标志属于 [`crate::File`]。
//!
//! 这里只保留伪文件系统（procfs、devtmpfs）需要的节点种类。

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::Any;
use uapi::time::TimeSpec;

use crate::FsError;

/// 节点种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InodeType {
    /// 普通文件
    File,
    /// 目录
    Directory,
    /// 字符设备，设备号见 [`InodeMetadata::rdev`]
    CharDevice,
}

impl InodeType {
    /// 对应的 `S_IFMT` 类型位
    pub const fn mode_bits(self) -> FileMode {
        match self {
            InodeType::File => FileMode::S_IFREG,
            InodeType::Directory => FileMode::S_IFDIR,
            InodeType::CharDevice => FileMode::S_IFCHR,
        }
    }
}

bitflags::bitflags! {
    /// `st_mode` 的子集
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FileMode: u32 {
        /// 类型掩码
        const S_IFMT   = 0o170000;
        /// 普通文件
        const S_IFREG  = 0o100000;
        /// 目录
        const S_IFDIR  = 0o040000;
        /// 字符设备
        const S_IFCHR  = 0o020000;

        /// 属主读
        const S_IRUSR  = 0o400;
        /// 属主写
        const S_IWUSR  = 0o200;
        /// 属主执行
        const S_IXUSR  = 0o100;
        /// 组读
        const S_IRGRP  = 0o040;
        /// 组执行
        const S_IXGRP  = 0o010;
        /// 其他读
        const S_IROTH  = 0o004;
        /// 其他执行
        const S_IXOTH  = 0o001;
    }
}

impl FileMode {
    /// 由类型位还原节点种类
    pub fn file_type(&self) -> Option<InodeType> {
        let fmt = self.bits() & FileMode::S_IFMT.bits();
        [InodeType::File, InodeType::Directory, InodeType::CharDevice]
            .into_iter()
            .find(|t| t.mode_bits().bits() == fmt)
    }

    /// 属主是否可写
    pub fn can_write(&self) -> bool {
        self.contains(FileMode::S_IWUSR)
    }
}

/// readdir 返回的目录项
#[derive(Debug, Clone)]
pub struct DirEntry {
    /// 名字
    pub name: String,
    /// 节点号
    pub inode_no: usize,
    /// 种类
    pub inode_type: InodeType,
}

/// `stat` 所需的元数据
#[derive(Debug, Clone)]
pub struct InodeMetadata {
    /// 节点号
    pub inode_no: usize,
    /// 种类
    pub inode_type: InodeType,
    /// 类型与权限位
    pub mode: FileMode,
    /// 属主
    pub uid: u32,
    /// 属组
    pub gid: u32,
    /// 字节数；动态生成的文件为 0
    pub size: usize,
    /// 访问时间
    pub atime: TimeSpec,
    /// 修改时间
    pub mtime: TimeSpec,
    /// 状态变更时间
    pub ctime: TimeSpec,
    /// 链接数
    pub nlinks: usize,
    /// 512 字节块数
    pub blocks: usize,
    /// 设备号，仅字符设备有效
    pub rdev: u64,
}

/// 节点操作
///
/// 修改类操作默认拒绝，伪文件系统无需实现。
pub trait Inode: Send + Sync + Any {
    /// 元数据
    fn metadata(&self) -> Result<InodeMetadata, FsError>;

    /// 从 `offset` 开始读到 `buf`，返回读取字节数，越过末尾返回 0
    fn read_at(&self, offset: usize, buf: &mut [u8]) -> Result<usize, FsError>;

    /// 写入，默认 `PermissionDenied`
    fn write_at(&self, _offset: usize, _buf: &[u8]) -> Result<usize, FsError> {
        Err(FsError::PermissionDenied)
    }

    /// 在目录中查找子项；非目录返回 `NotDirectory`
    fn lookup(&self, name: &str) -> Result<Arc<dyn Inode>, FsError>;

    /// 列出目录
    fn readdir(&self) -> Result<Vec<DirEntry>, FsError>;

    /// 供 [`downcast_ref`](dyn Inode::downcast_ref) 使用
    fn as_any(&self) -> &dyn Any;
}

impl dyn Inode {
    /// 向下转型到具体节点类型
    pub fn downcast_ref<T: Inode>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}
