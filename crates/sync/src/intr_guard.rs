//! 关中断守卫
//!
//! 只屏蔽本 CPU 的中断，其他 CPU 仍可并发访问，共享数据还需配合自旋锁。

use crate::arch_ops;

/// 创建时关闭本地中断，drop 时恢复原状态
///
/// 没有注册 [`ArchOps`](crate::ArchOps) 时什么也不做。
pub struct IntrGuard {
    saved: Option<usize>,
}

impl IntrGuard {
    /// 关中断
    pub fn new() -> Self {
        // SAFETY: saved 只在 drop 中恢复一次
        let saved = arch_ops().map(|ops| unsafe { ops.save_and_disable_irq() });
        Self { saved }
    }

    /// 进入前中断是否打开；未注册时为 false
    pub fn was_enabled(&self) -> bool {
        match (self.saved, arch_ops()) {
            (Some(flags), Some(ops)) => ops.irq_enabled_in(flags),
            _ => false,
        }
    }
}

impl Default for IntrGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for IntrGuard {
    fn drop(&mut self) {
        if let (Some(flags), Some(ops)) = (self.saved, arch_ops()) {
            // SAFETY: flags 由 new 中配对的 save_and_disable_irq 返回
            unsafe { ops.restore_irq(flags) };
        }
    }
}
