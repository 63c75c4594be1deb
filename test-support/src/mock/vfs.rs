//! VFS 相关操作的 Mock 实现
//!
//! 注意：这里不直接依赖 `vfs` crate（避免循环依赖）。
//! `vfs` crate 在 `cfg(test)` 下为这些类型实现其 trait（例如 `VfsOps`）。

use core::sync::atomic::{AtomicUsize, Ordering};

/// 模拟的用户地址空间上界（Sv48 / x86_64 的低半区）
pub const MOCK_USER_END: usize = 0x0000_8000_0000_0000;

/// Mock 的 VFS 操作
///
/// 低半区地址视为用户空间；宿主机测试中的堆/栈地址都落在此范围内，
/// 高半区地址用于构造 `EFAULT`。
pub struct MockVfsOps {
    /// 当前处于用户访问模式的嵌套层数
    pub user_access_depth: AtomicUsize,
}

impl MockVfsOps {
    pub const fn new() -> Self {
        Self {
            user_access_depth: AtomicUsize::new(0),
        }
    }

    pub fn access_ok(&self, addr: usize, len: usize) -> bool {
        match addr.checked_add(len) {
            Some(end) => end <= MOCK_USER_END,
            None => false,
        }
    }

    pub fn enter_user_access(&self) {
        self.user_access_depth.fetch_add(1, Ordering::SeqCst);
    }

    pub fn exit_user_access(&self) {
        self.user_access_depth.fetch_sub(1, Ordering::SeqCst);
    }
}

/// 全局 Mock 实例
pub static MOCK_VFS_OPS: MockVfsOps = MockVfsOps::new();
