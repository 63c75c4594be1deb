//! `/dev/mymem` 内存信息字符设备
//!
//! 读取设备得到 `/proc/meminfo` 的一份快照，写入的内容被丢弃。
//!
//! - [`MemDevice`] - 加载/卸载（chrdev + 设备类 + 设备节点）
//! - [`MemDevOps`] - open/release/read/write
//! - [`ReportSource`] - 内存报告数据源，默认为 [`ProcMeminfo`]
//! - [`init`] / [`exit`] - 全局实例入口
//!
//! 每个打开的句柄只返回一次数据：首次读取后的读取均返回 0。
//! 快照超过 [`SNAPSHOT_CAPACITY`]` - 1` 字节的部分被截断。

#![no_std]

extern crate alloc;

pub mod config;
pub mod driver;
pub mod error;
pub mod lifecycle;
pub mod snapshot;
pub mod source;

pub use config::{CLASS_NAME, DEVICE_NAME, MEMINFO_PATH, MemDevConfig, SNAPSHOT_CAPACITY};
pub use driver::MemDevOps;
pub use error::MemDevError;
pub use lifecycle::{MemDevice, exit, init, is_loaded};
pub use snapshot::Snapshot;
pub use source::{ProcMeminfo, ReportSource};
