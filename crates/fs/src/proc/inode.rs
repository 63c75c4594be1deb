//! procfs 节点
//!
//! 节点只有两种：读时生成内容的文件，以及挂着子节点表的目录。
//! 元数据在创建时确定，之后不再变化，因此不需要加锁。

use core::any::Any;
use core::sync::atomic::{AtomicUsize, Ordering};

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use sync::SpinLock;
use uapi::time::TimeSpec;
use vfs::{DirEntry, FileMode, FsError, Inode, InodeMetadata, InodeType};

use crate::ops::fs_ops;

/// 读时生成文件内容
pub trait ContentGenerator: Send + Sync {
    /// 生成完整内容，每次读取都会调用
    fn generate(&self) -> Result<Vec<u8>, FsError>;
}

enum Body {
    Generated(Arc<dyn ContentGenerator>),
    Dir(SpinLock<BTreeMap<String, Arc<ProcInode>>>),
}

/// procfs 节点
pub struct ProcInode {
    ino: usize,
    mode: FileMode,
    born: TimeSpec,
    body: Body,
}

static NEXT_INO: AtomicUsize = AtomicUsize::new(1);

impl ProcInode {
    fn alloc(kind: InodeType, perm: FileMode, body: Body) -> Arc<Self> {
        Arc::new(Self {
            ino: NEXT_INO.fetch_add(1, Ordering::Relaxed),
            mode: kind.mode_bits() | perm,
            born: fs_ops().timespec_now(),
            body,
        })
    }

    /// 读时生成内容的只读文件
    pub fn new_dynamic_file(generator: Arc<dyn ContentGenerator>, perm: FileMode) -> Arc<Self> {
        Self::alloc(InodeType::File, perm, Body::Generated(generator))
    }

    /// 空目录
    pub fn new_directory(perm: FileMode) -> Arc<Self> {
        Self::alloc(InodeType::Directory, perm, Body::Dir(SpinLock::new(BTreeMap::new())))
    }

    fn children(&self) -> Result<&SpinLock<BTreeMap<String, Arc<ProcInode>>>, FsError> {
        match &self.body {
            Body::Dir(children) => Ok(children),
            Body::Generated(_) => Err(FsError::NotDirectory),
        }
    }

    fn kind(&self) -> InodeType {
        match self.body {
            Body::Generated(_) => InodeType::File,
            Body::Dir(_) => InodeType::Directory,
        }
    }

    /// 挂载子节点，重名返回 `AlreadyExists`
    pub fn add_child(&self, name: &str, child: Arc<ProcInode>) -> Result<(), FsError> {
        let mut children = self.children()?.lock();
        if children.contains_key(name) {
            return Err(FsError::AlreadyExists);
        }
        children.insert(name.to_string(), child);
        Ok(())
    }

    /// 摘下子节点
    pub fn remove_child(&self, name: &str) -> Result<Arc<ProcInode>, FsError> {
        self.children()?.lock().remove(name).ok_or(FsError::NotFound)
    }
}

impl Inode for ProcInode {
    fn metadata(&self) -> Result<InodeMetadata, FsError> {
        let kind = self.kind();
        Ok(InodeMetadata {
            inode_no: self.ino,
            inode_type: kind,
            mode: self.mode,
            uid: 0,
            gid: 0,
            // 与 Linux 一致，生成文件的大小报告为 0
            size: 0,
            atime: self.born,
            mtime: self.born,
            ctime: self.born,
            nlinks: if kind == InodeType::Directory { 2 } else { 1 },
            blocks: 0,
            rdev: 0,
        })
    }

    fn read_at(&self, offset: usize, buf: &mut [u8]) -> Result<usize, FsError> {
        let Body::Generated(generator) = &self.body else {
            return Err(FsError::IsDirectory);
        };
        let data = generator.generate()?;
        let Some(rest) = data.get(offset..) else {
            return Ok(0);
        };
        let n = rest.len().min(buf.len());
        buf[..n].copy_from_slice(&rest[..n]);
        Ok(n)
    }

    fn lookup(&self, name: &str) -> Result<Arc<dyn Inode>, FsError> {
        let child = self.children()?.lock().get(name).cloned();
        child.map(|c| c as Arc<dyn Inode>).ok_or(FsError::NotFound)
    }

    fn readdir(&self) -> Result<Vec<DirEntry>, FsError> {
        let children = self.children()?.lock();
        let dot = |name: &str| DirEntry {
            name: name.to_string(),
            inode_no: self.ino,
            inode_type: InodeType::Directory,
        };
        let mut entries = Vec::with_capacity(children.len() + 2);
        entries.push(dot("."));
        entries.push(dot(".."));
        entries.extend(children.iter().map(|(name, child)| DirEntry {
            name: name.clone(),
            inode_no: child.ino,
            inode_type: child.kind(),
        }));
        Ok(entries)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
