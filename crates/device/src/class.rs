//! 设备类与设备节点
//!
//! 对应 Linux 的 `class_create` / `device_create`：驱动先创建一个设备类，
//! 再在类下为某个设备号创建命名节点。节点名全局唯一，打开节点即打开对应的
//! 字符设备。

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::Any;
use core::sync::atomic::{AtomicUsize, Ordering};
use lazy_static::lazy_static;
use sync::RwLock;
use vfs::{
    DirEntry, FileMode, FsError, Inode, InodeMetadata, InodeType, NAME_MAX, TimeSpec, major,
    minor,
};

/// 设备类
#[derive(Debug)]
pub struct DeviceClass {
    name: String,
}

impl DeviceClass {
    /// 类名
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// 设备节点（`/dev/<name>`）
#[derive(Debug)]
pub struct DeviceNode {
    name: String,
    class: String,
    dev: u64,
    inode_no: usize,
}

impl DeviceNode {
    /// 节点名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 所属类名
    pub fn class_name(&self) -> &str {
        &self.class
    }

    /// 设备号
    pub fn dev(&self) -> u64 {
        self.dev
    }
}

impl Inode for DeviceNode {
    fn metadata(&self) -> Result<InodeMetadata, FsError> {
        Ok(InodeMetadata {
            inode_no: self.inode_no,
            inode_type: InodeType::CharDevice,
            mode: FileMode::S_IFCHR
                | FileMode::S_IRUSR
                | FileMode::S_IWUSR
                | FileMode::S_IRGRP
                | FileMode::S_IROTH,
            uid: 0,
            gid: 0,
            size: 0,
            atime: TimeSpec::zero(),
            mtime: TimeSpec::zero(),
            ctime: TimeSpec::zero(),
            nlinks: 1,
            blocks: 0,
            rdev: self.dev,
        })
    }

    fn read_at(&self, _offset: usize, _buf: &mut [u8]) -> Result<usize, FsError> {
        // 数据经由 CharDeviceFile 和驱动读取
        Err(FsError::NotSupported)
    }

    fn lookup(&self, _name: &str) -> Result<Arc<dyn Inode>, FsError> {
        Err(FsError::NotDirectory)
    }

    fn readdir(&self) -> Result<Vec<DirEntry>, FsError> {
        Err(FsError::NotDirectory)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

lazy_static! {
    static ref CLASSES: RwLock<BTreeMap<String, Arc<DeviceClass>>> = RwLock::new(BTreeMap::new());
    static ref NODES: RwLock<BTreeMap<String, Arc<DeviceNode>>> = RwLock::new(BTreeMap::new());
}

/// 节点 inode 号从 2 开始，1 留给 devfs 根目录
static NEXT_INODE_NO: AtomicUsize = AtomicUsize::new(2);

fn check_name(name: &str) -> Result<(), FsError> {
    if name.is_empty() || name.contains('/') || name == "." || name == ".." {
        return Err(FsError::InvalidArgument);
    }
    if name.len() > NAME_MAX {
        return Err(FsError::NameTooLong);
    }
    Ok(())
}

/// 创建设备类
///
/// # Errors
/// - `InvalidArgument`: 名称非法
/// - `AlreadyExists`: 同名类已存在
pub fn class_create(name: &str) -> Result<Arc<DeviceClass>, FsError> {
    check_name(name)?;
    let mut classes = CLASSES.write();
    if classes.contains_key(name) {
        return Err(FsError::AlreadyExists);
    }
    let class = Arc::new(DeviceClass {
        name: name.to_string(),
    });
    classes.insert(name.to_string(), class.clone());
    log::debug!("device: class '{}' created", name);
    Ok(class)
}

/// 销毁设备类
///
/// 类下残留的节点会被一并移除。
pub fn class_destroy(class: &Arc<DeviceClass>) {
    let removed = {
        let mut classes = CLASSES.write();
        match classes.get(class.name()) {
            Some(c) if Arc::ptr_eq(c, class) => classes.remove(class.name()).is_some(),
            _ => false,
        }
    };
    if !removed {
        log::warn!("device: class '{}' is not registered", class.name());
        return;
    }

    let mut nodes = NODES.write();
    let before = nodes.len();
    nodes.retain(|_, node| node.class != class.name);
    if nodes.len() != before {
        log::warn!(
            "device: class '{}' destroyed with {} live node(s)",
            class.name(),
            before - nodes.len()
        );
    }
    log::debug!("device: class '{}' destroyed", class.name());
}

/// 在 `class` 下为设备号 `dev` 创建节点 `name`
///
/// # Errors
/// - `InvalidArgument`: 名称非法
/// - `NotFound`: `class` 已被销毁
/// - `AlreadyExists`: 同名节点已存在
pub fn device_create(
    class: &Arc<DeviceClass>,
    dev: u64,
    name: &str,
) -> Result<Arc<DeviceNode>, FsError> {
    check_name(name)?;
    let classes = CLASSES.read();
    match classes.get(class.name()) {
        Some(c) if Arc::ptr_eq(c, class) => {}
        _ => return Err(FsError::NotFound),
    }

    let mut nodes = NODES.write();
    if nodes.contains_key(name) {
        return Err(FsError::AlreadyExists);
    }
    let node = Arc::new(DeviceNode {
        name: name.to_string(),
        class: class.name.clone(),
        dev,
        inode_no: NEXT_INODE_NO.fetch_add(1, Ordering::Relaxed),
    });
    nodes.insert(name.to_string(), node.clone());
    log::debug!(
        "device: node '{}' ({}:{}) created in class '{}'",
        name,
        major(dev),
        minor(dev),
        class.name()
    );
    Ok(node)
}

/// 移除 `class` 下设备号为 `dev` 的节点
pub fn device_destroy(class: &Arc<DeviceClass>, dev: u64) {
    let mut nodes = NODES.write();
    let name = nodes
        .values()
        .find(|node| node.dev == dev && node.class == class.name)
        .map(|node| node.name.clone());
    match name {
        Some(name) => {
            nodes.remove(&name);
            log::debug!("device: node '{}' destroyed", name);
        }
        None => log::warn!(
            "device: no node {}:{} in class '{}'",
            major(dev),
            minor(dev),
            class.name()
        ),
    }
}

/// 按名称查找节点
pub fn find_node(name: &str) -> Option<Arc<DeviceNode>> {
    NODES.read().get(name).cloned()
}

/// 按名称查找类
pub fn find_class(name: &str) -> Option<Arc<DeviceClass>> {
    CLASSES.read().get(name).cloned()
}

/// 列出所有节点（按名称排序）
pub fn list_nodes() -> Vec<Arc<DeviceNode>> {
    NODES.read().values().cloned().collect()
}
