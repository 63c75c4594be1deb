//! 内核设备模型
//!
//! 此 crate 提供字符设备驱动对外暴露节点所需的设备模型，包括：
//!
//! - [`DeviceClass`] - 设备类（`class_create` / `class_destroy`）
//! - [`DeviceNode`] - 设备节点（`device_create` / `device_destroy`）
//! - [`DevFs`] - 以扁平目录暴露所有节点的设备文件系统
//! - [`open_node`] - 按名称或 `/dev/` 路径打开设备
//!
//! 设备号与驱动的绑定由 [`vfs::register_chrdev`] 负责，本 crate 只维护名字空间。

#![no_std]
#![allow(clippy::module_inception)]

extern crate alloc;

pub mod class;
pub mod devfs;

// Re-export class
pub use class::{
    DeviceClass, DeviceNode, class_create, class_destroy, device_create, device_destroy,
    find_class, find_node, list_nodes,
};

// Re-export devfs
pub use devfs::{DevDir, DevFs, open_node};
