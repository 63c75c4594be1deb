//! 设备文件系统
//!
//! 以扁平目录的形式暴露 [`class`](crate::class) 中注册的节点，
//! 并提供按路径打开设备的入口。

use alloc::string::ToString;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::Any;
use vfs::{
    CharDeviceFile, DirEntry, File, FileMode, FileSystem, FsError, Inode, InodeMetadata,
    InodeType, OpenFlags, TimeSpec, lookup_path,
};

use crate::class::{find_node, list_nodes};

/// devfs 根目录
pub struct DevDir;

impl Inode for DevDir {
    fn metadata(&self) -> Result<InodeMetadata, FsError> {
        Ok(InodeMetadata {
            inode_no: 1,
            inode_type: InodeType::Directory,
            mode: FileMode::S_IFDIR | FileMode::from_bits_truncate(0o755),
            uid: 0,
            gid: 0,
            size: 0,
            atime: TimeSpec::zero(),
            mtime: TimeSpec::zero(),
            ctime: TimeSpec::zero(),
            nlinks: 2,
            blocks: 0,
            rdev: 0,
        })
    }

    fn read_at(&self, _offset: usize, _buf: &mut [u8]) -> Result<usize, FsError> {
        Err(FsError::IsDirectory)
    }

    fn lookup(&self, name: &str) -> Result<Arc<dyn Inode>, FsError> {
        find_node(name)
            .map(|node| node as Arc<dyn Inode>)
            .ok_or(FsError::NotFound)
    }

    fn readdir(&self) -> Result<Vec<DirEntry>, FsError> {
        list_nodes()
            .into_iter()
            .map(|node| {
                Ok(DirEntry {
                    name: node.name().to_string(),
                    inode_no: node.metadata()?.inode_no,
                    inode_type: InodeType::CharDevice,
                })
            })
            .collect()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// 设备文件系统
pub struct DevFs {
    root: Arc<DevDir>,
}

impl DevFs {
    /// 创建 devfs 实例
    pub fn new() -> Self {
        Self {
            root: Arc::new(DevDir),
        }
    }
}

impl Default for DevFs {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for DevFs {
    fn fs_type(&self) -> &'static str {
        "devtmpfs"
    }

    fn root_inode(&self) -> Arc<dyn Inode> {
        self.root.clone()
    }
}

/// 打开设备节点
///
/// `path` 可以是节点名（`mymem`），也可以是 `/dev/` 下的路径（`/dev/mymem`）。
pub fn open_node(path: &str, flags: OpenFlags) -> Result<Arc<dyn File>, FsError> {
    let rel = path.strip_prefix("/dev/").unwrap_or(path);
    let inode = lookup_path(&DevFs::new().root_inode(), rel)?;
    let file: Arc<dyn File> = CharDeviceFile::open(inode, flags)?;
    Ok(file)
}
