//! 用户空间缓冲区
//!
//! 字符设备的 `read`/`write` 不直接接收 `&mut [u8]`，而是接收可能指向用户空间的
//! [`UserSliceMut`] / [`UserSlice`]。内核内部调用（以及宿主机测试）使用
//! `kernel` 构造器包装普通切片；系统调用路径使用 `user` 构造器包装用户地址，
//! 复制前通过 [`VfsOps::access_ok`](crate::VfsOps::access_ok) 校验范围，
//! 失败返回 [`FsError::BadAddress`]。

use crate::ops::{UserAccessGuard, try_vfs_ops};
use crate::FsError;

enum Dst<'a> {
    Kernel(&'a mut [u8]),
    User { addr: usize, len: usize },
}

enum Src<'a> {
    Kernel(&'a [u8]),
    User { addr: usize, len: usize },
}

/// 可写的目标缓冲区（`read` 的输出）
pub struct UserSliceMut<'a> {
    inner: Dst<'a>,
}

/// 只读的源缓冲区（`write` 的输入）
pub struct UserSlice<'a> {
    inner: Src<'a>,
}

/// 校验用户地址范围，成功时返回进入访问模式的 guard
fn check_user_range(addr: usize, len: usize) -> Result<UserAccessGuard, FsError> {
    let ops = try_vfs_ops().ok_or(FsError::BadAddress)?;
    if addr == 0 || addr.checked_add(len).is_none() || !ops.access_ok(addr, len) {
        return Err(FsError::BadAddress);
    }
    Ok(UserAccessGuard::with_ops(ops))
}

impl<'a> UserSliceMut<'a> {
    /// 包装内核缓冲区
    pub fn kernel(buf: &'a mut [u8]) -> Self {
        Self {
            inner: Dst::Kernel(buf),
        }
    }

    /// 包装用户空间地址
    ///
    /// # Safety
    /// 若 `access_ok` 通过，`[addr, addr + len)` 必须是当前地址空间中可写的映射。
    pub unsafe fn user(addr: usize, len: usize) -> UserSliceMut<'static> {
        UserSliceMut {
            inner: Dst::User { addr, len },
        }
    }

    /// 缓冲区长度
    pub fn len(&self) -> usize {
        match &self.inner {
            Dst::Kernel(buf) => buf.len(),
            Dst::User { len, .. } => *len,
        }
    }

    /// 缓冲区是否为空
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 将 `src` 复制到缓冲区开头，返回复制的字节数 `min(len, src.len())`
    pub fn copy_from(&mut self, src: &[u8]) -> Result<usize, FsError> {
        let n = src.len().min(self.len());
        if n == 0 {
            return Ok(0);
        }
        match &mut self.inner {
            Dst::Kernel(buf) => buf[..n].copy_from_slice(&src[..n]),
            Dst::User { addr, .. } => {
                let _guard = check_user_range(*addr, n)?;
                // SAFETY: 范围已由 access_ok 校验，调用者在构造时保证映射可写
                unsafe { core::ptr::copy_nonoverlapping(src.as_ptr(), *addr as *mut u8, n) };
            }
        }
        Ok(n)
    }
}

impl<'a> UserSlice<'a> {
    /// 包装内核缓冲区
    pub fn kernel(buf: &'a [u8]) -> Self {
        Self {
            inner: Src::Kernel(buf),
        }
    }

    /// 包装用户空间地址
    ///
    /// # Safety
    /// 若 `access_ok` 通过，`[addr, addr + len)` 必须是当前地址空间中可读的映射。
    pub unsafe fn user(addr: usize, len: usize) -> UserSlice<'static> {
        UserSlice {
            inner: Src::User { addr, len },
        }
    }

    /// 缓冲区长度
    pub fn len(&self) -> usize {
        match &self.inner {
            Src::Kernel(buf) => buf.len(),
            Src::User { len, .. } => *len,
        }
    }

    /// 缓冲区是否为空
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 将缓冲区开头的 `min(len, dst.len())` 字节复制到 `dst`
    pub fn copy_to(&self, dst: &mut [u8]) -> Result<usize, FsError> {
        let n = dst.len().min(self.len());
        if n == 0 {
            return Ok(0);
        }
        match &self.inner {
            Src::Kernel(buf) => dst[..n].copy_from_slice(&buf[..n]),
            Src::User { addr, .. } => {
                let _guard = check_user_range(*addr, n)?;
                // SAFETY: 范围已由 access_ok 校验，调用者在构造时保证映射可读
                unsafe { core::ptr::copy_nonoverlapping(*addr as *const u8, dst.as_mut_ptr(), n) };
            }
        }
        Ok(n)
    }
}
