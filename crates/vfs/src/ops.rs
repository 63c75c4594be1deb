//! 用户内存访问所依赖的宿主服务
//!
//! [`crate::uaccess`] 在拷贝到用户地址前通过这里检查地址范围，
//! 并在拷贝期间打开用户页访问（RISC-V 上即置位 `sstatus.SUM`）。

use core::sync::atomic::{AtomicUsize, Ordering};

/// 宿主为 VFS 提供的用户内存服务
pub trait VfsOps: Send + Sync {
    /// `[addr, addr + len)` 是否完整位于当前进程的用户地址空间
    fn access_ok(&self, addr: usize, len: usize) -> bool;

    /// 允许内核访问用户页
    fn enter_user_access(&self);

    /// 撤销 [`enter_user_access`](VfsOps::enter_user_access)
    fn exit_user_access(&self);
}

static VFS_OPS: [AtomicUsize; 2] = [AtomicUsize::new(0), AtomicUsize::new(0)];

/// 注册宿主服务
///
/// # Safety
/// 启动早期单线程阶段调用；重复注册必须传入同一对象
pub unsafe fn register_vfs_ops(ops: &'static dyn VfsOps) {
    // SAFETY: (data, vtable) 布局
    let [data, vtable] =
        unsafe { core::mem::transmute::<*const dyn VfsOps, [usize; 2]>(ops as *const dyn VfsOps) };
    VFS_OPS[1].store(vtable, Ordering::Release);
    VFS_OPS[0].store(data, Ordering::Release);
}

/// 已注册的宿主服务；没有时用户地址一律视为不可访问
#[inline]
pub fn try_vfs_ops() -> Option<&'static dyn VfsOps> {
    let data = VFS_OPS[0].load(Ordering::Acquire);
    if data == 0 {
        return None;
    }
    let vtable = VFS_OPS[1].load(Ordering::Acquire);
    // SAFETY: 由 register_vfs_ops 写入
    Some(unsafe { &*core::mem::transmute::<[usize; 2], *const dyn VfsOps>([data, vtable]) })
}

/// 同 [`try_vfs_ops`]，未注册时 panic
#[inline]
pub fn vfs_ops() -> &'static dyn VfsOps {
    match try_vfs_ops() {
        Some(ops) => ops,
        None => panic!("vfs: VfsOps not registered"),
    }
}

/// 用户页访问窗口，drop 时关闭
pub struct UserAccessGuard {
    ops: &'static dyn VfsOps,
}

impl UserAccessGuard {
    /// 用全局注册的服务打开窗口
    ///
    /// # Panics
    /// 未注册 [`VfsOps`] 时 panic
    #[inline]
    pub fn new() -> Self {
        Self::with_ops(vfs_ops())
    }

    /// 用指定的服务打开窗口
    #[inline]
    pub fn with_ops(ops: &'static dyn VfsOps) -> Self {
        ops.enter_user_access();
        Self { ops }
    }
}

impl Drop for UserAccessGuard {
    #[inline]
    fn drop(&mut self) {
        self.ops.exit_user_access();
    }
}

impl Default for UserAccessGuard {
    fn default() -> Self {
        Self::new()
    }
}
