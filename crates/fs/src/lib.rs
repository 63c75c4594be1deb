//! 伪文件系统
//!
//! 目前只有 [procfs](proc)，导出 `/proc/meminfo`。

#![no_std]

extern crate alloc;

pub mod ops;
pub mod proc;

pub use ops::{FsOps, fs_ops, register_fs_ops};
pub use proc::{
    ContentGenerator, MeminfoGenerator, PROC_MOUNT_POINT, ProcFS, ProcInode,
    mount_procfs, mounted_procfs, umount_procfs,
};
