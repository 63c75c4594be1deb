//! FS 相关操作的 Mock 实现
//!
//! 注意：这里不直接依赖 `fs` crate（避免循环依赖）。
//! `fs` crate 在 `cfg(test)` 下为这些类型实现其 trait（例如 `FsOps`）。

use core::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Mock 的 FS 运行时操作
///
/// 页大小固定 4 KiB；页帧计数可在测试中修改。
pub struct MockFsOps {
    pub total_frames: AtomicUsize,
    pub free_frames: AtomicUsize,
    pub now_ms: AtomicU64,
}

impl MockFsOps {
    pub const fn new() -> Self {
        Self {
            // 128 MiB / 32 MiB
            total_frames: AtomicUsize::new(32768),
            free_frames: AtomicUsize::new(8192),
            now_ms: AtomicU64::new(0),
        }
    }

    pub fn page_size(&self) -> usize {
        4096
    }

    pub fn total_frames(&self) -> usize {
        self.total_frames.load(Ordering::Relaxed)
    }

    pub fn free_frames(&self) -> usize {
        self.free_frames.load(Ordering::Relaxed)
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms.load(Ordering::Relaxed)
    }
}

/// 全局 Mock 实例
pub static MOCK_FS_OPS: MockFsOps = MockFsOps::new();
