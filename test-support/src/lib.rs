//! 测试支持 crate
//!
//! 提供各子系统运行时操作的 Mock 实现。
//! 各 crate 在 `cfg(test)` 下为这些类型实现自己的 trait 并注册。

#![no_std]

pub mod mock;
