//! 字符设备路径上的 VFS
//!
//! 设备号与驱动注册表（[`chrdev`]）、节点与句柄抽象（[`Inode`]、[`File`]）、
//! 字符设备句柄 [`CharDeviceFile`]，以及在内核与用户内存之间拷贝的
//! [`UserSliceMut`] / [`UserSlice`]。

#![no_std]
#![allow(clippy::module_inception)]

extern crate alloc;

pub mod chrdev;
pub mod dev;
pub mod devno;
pub mod error;
pub mod impls;
pub mod ops;
pub mod uaccess;

mod file;
mod file_system;
mod inode;
mod path;

pub use chrdev::{CharDevOps, chrdev_name, chrdev_ops, register_chrdev, unregister_chrdev};
pub use dev::{major, makedev, minor};
pub use devno::{MINORS_PER_MAJOR, chrdev_major, dynamic_major_candidates};
pub use error::FsError;
pub use file::File;
pub use file_system::FileSystem;
pub use impls::CharDeviceFile;
pub use inode::{DirEntry, FileMode, Inode, InodeMetadata, InodeType};
pub use ops::{UserAccessGuard, VfsOps, register_vfs_ops, try_vfs_ops, vfs_ops};
pub use path::{NAME_MAX, lookup_path};
pub use uaccess::{UserSlice, UserSliceMut};

pub use uapi::fcntl::OpenFlags;
pub use uapi::time::TimeSpec;
