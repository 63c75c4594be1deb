//! Mock 实现模块
//!
//! 提供子系统运行时操作的 Mock 实现，用于测试

pub mod fs;
pub mod vfs;
