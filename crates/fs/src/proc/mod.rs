//! ProcFS - 内核信息伪文件系统
//!
//! 该模块提供了一个与 **Linux /proc 兼容的虚拟文件系统**，目前导出 `/proc/meminfo`。

pub mod generators;
pub mod inode;
pub mod proc;

pub use generators::MeminfoGenerator;
pub use inode::{ContentGenerator, ProcInode};
pub use proc::{PROC_MOUNT_POINT, ProcFS, mount_procfs, mounted_procfs, umount_procfs};
