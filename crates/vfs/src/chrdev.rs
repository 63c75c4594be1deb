//! 字符设备号注册表
//!
//! 对应 Linux 的 `register_chrdev` / `unregister_chrdev`：一次注册占用整个 major
//! （`MINORS_PER_MAJOR` 个 minor），打开时按 major 查找驱动的 [`CharDevOps`]。

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use lazy_static::lazy_static;
use sync::RwLock;
use uapi::fcntl::OpenFlags;

use crate::dev::{major, minor};
use crate::devno::{MINORS_PER_MAJOR, chrdev_major, dynamic_major_candidates};
use crate::uaccess::{UserSlice, UserSliceMut};
use crate::FsError;

/// 字符设备驱动的文件操作集
///
/// `offset` 是打开句柄的当前位置，由 [`CharDeviceFile`](crate::CharDeviceFile) 维护，
/// 驱动自行决定是否推进。
pub trait CharDevOps: Send + Sync {
    /// 打开设备，返回错误时打开失败
    fn open(&self, _dev: u64, _flags: OpenFlags) -> Result<(), FsError> {
        Ok(())
    }

    /// 最后一个引用释放时调用
    fn release(&self, _dev: u64) {}

    /// 读取数据到 `buf`
    fn read(&self, buf: UserSliceMut<'_>, offset: &mut usize) -> Result<usize, FsError>;

    /// 从 `buf` 写入数据
    fn write(&self, buf: UserSlice<'_>, offset: &mut usize) -> Result<usize, FsError>;
}

struct ChrdevRegion {
    name: String,
    ops: Arc<dyn CharDevOps>,
}

lazy_static! {
    static ref CHRDEVS: RwLock<BTreeMap<u32, ChrdevRegion>> = RwLock::new(BTreeMap::new());
}

/// 注册字符设备
///
/// `major` 为 0 时按 254..=234、511..=384 的顺序动态分配，返回实际的 major。
///
/// # Errors
/// - `InvalidArgument`: `major` 超出范围或 `name` 为空
/// - `Busy`: 指定的 major 已被占用，或动态区间已耗尽
pub fn register_chrdev(major: u32, name: &str, ops: Arc<dyn CharDevOps>) -> Result<u32, FsError> {
    if name.is_empty() || major >= chrdev_major::MAX {
        return Err(FsError::InvalidArgument);
    }

    let mut table = CHRDEVS.write();
    let major = if major == 0 {
        match dynamic_major_candidates().find(|m| !table.contains_key(m)) {
            Some(m) => m,
            None => {
                log::warn!("chrdev: dynamic major pool exhausted for '{}'", name);
                return Err(FsError::Busy);
            }
        }
    } else if table.contains_key(&major) {
        return Err(FsError::Busy);
    } else {
        major
    };

    table.insert(
        major,
        ChrdevRegion {
            name: name.to_string(),
            ops,
        },
    );
    log::debug!("chrdev: registered '{}' at major {}", name, major);
    Ok(major)
}

/// 注销字符设备
///
/// 只有名称匹配时才会移除；不匹配或不存在时仅记录警告。
pub fn unregister_chrdev(major: u32, name: &str) {
    let mut table = CHRDEVS.write();
    match table.get(&major) {
        Some(region) if region.name == name => {
            table.remove(&major);
            log::debug!("chrdev: unregistered '{}' at major {}", name, major);
        }
        Some(region) => log::warn!(
            "chrdev: major {} belongs to '{}', not '{}'",
            major,
            region.name,
            name
        ),
        None => log::warn!("chrdev: major {} not registered", major),
    }
}

/// 按设备号查找驱动
pub fn chrdev_ops(dev: u64) -> Option<Arc<dyn CharDevOps>> {
    if minor(dev) >= MINORS_PER_MAJOR {
        return None;
    }
    CHRDEVS
        .read()
        .get(&major(dev))
        .map(|region| region.ops.clone())
}

/// 查询 major 的注册名
pub fn chrdev_name(major: u32) -> Option<String> {
    CHRDEVS.read().get(&major).map(|region| region.name.clone())
}
