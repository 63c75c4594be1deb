//! procfs 实例与 `/proc` 挂载

use alloc::sync::Arc;
use sync::SpinLock;

use crate::proc::ProcInode;
use crate::proc::generators::MeminfoGenerator;
use vfs::{FileMode, FileSystem, FsError, Inode};

/// 一棵 procfs 树
pub struct ProcFS {
    root: Arc<ProcInode>,
}

impl ProcFS {
    /// 只有空根目录的实例，条目由 [`init_tree`](Self::init_tree) 填充
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            root: ProcInode::new_directory(FileMode::from_bits_truncate(0o555)),
        })
    }

    /// 挂上 `meminfo`；重复调用返回 `AlreadyExists`
    pub fn init_tree(&self) -> Result<(), FsError> {
        let meminfo = ProcInode::new_dynamic_file(
            Arc::new(MeminfoGenerator),
            FileMode::from_bits_truncate(0o444),
        );
        self.root.add_child("meminfo", meminfo)
    }

    /// 根目录，保留具体类型以便增删条目
    pub fn root(&self) -> &Arc<ProcInode> {
        &self.root
    }
}

impl FileSystem for ProcFS {
    fn fs_type(&self) -> &'static str {
        "proc"
    }

    fn root_inode(&self) -> Arc<dyn Inode> {
        self.root.clone()
    }
}

/// 挂载在 `/proc` 的实例
static PROC_MOUNT: SpinLock<Option<Arc<ProcFS>>> = SpinLock::new(None);

/// 挂载点路径
pub const PROC_MOUNT_POINT: &str = "/proc";

/// 创建并挂载 procfs；已挂载时返回现有实例
pub fn mount_procfs() -> Result<Arc<ProcFS>, FsError> {
    let mut mount = PROC_MOUNT.lock();
    if let Some(fs) = mount.as_ref() {
        return Ok(fs.clone());
    }
    let fs = ProcFS::new();
    fs.init_tree()?;
    *mount = Some(fs.clone());
    log::debug!("procfs: mounted at {}", PROC_MOUNT_POINT);
    Ok(fs)
}

/// 卸载 procfs，返回此前挂载的实例
pub fn umount_procfs() -> Option<Arc<ProcFS>> {
    let fs = PROC_MOUNT.lock().take();
    if fs.is_some() {
        log::debug!("procfs: unmounted");
    }
    fs
}

/// 当前挂载的 procfs
pub fn mounted_procfs() -> Option<Arc<ProcFS>> {
    PROC_MOUNT.lock().clone()
}
