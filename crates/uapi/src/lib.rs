//! 内核与用户态共享的 Linux ABI 定义
//!
//! 只收录字符设备路径用到的部分：errno、open 标志、`timespec`。

#![no_std]
// 常量名沿用 Linux 头文件，逐项文档意义不大
#![allow(missing_docs)]

pub mod errno;
pub mod fcntl;
pub mod time;
