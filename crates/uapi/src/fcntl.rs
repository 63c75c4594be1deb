//! 文件打开标志（`open(2)` 的 flags 参数）

bitflags::bitflags! {
    /// open(2) 标志位
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct OpenFlags: u32 {
        const O_RDONLY    = 0o0;
        const O_WRONLY    = 0o1;
        const O_RDWR      = 0o2;
        const O_CREAT     = 0o100;
        const O_EXCL      = 0o200;
        const O_NOCTTY    = 0o400;
        const O_TRUNC     = 0o1000;
        const O_APPEND    = 0o2000;
        const O_NONBLOCK  = 0o4000;
        const O_CLOEXEC   = 0o2000000;
    }
}

impl OpenFlags {
    /// 访问模式掩码
    pub const O_ACCMODE: u32 = 0o3;

    /// 访问模式是否允许读
    pub fn readable(&self) -> bool {
        let mode = self.bits() & Self::O_ACCMODE;
        mode == Self::O_RDONLY.bits() || mode == Self::O_RDWR.bits()
    }

    /// 访问模式是否允许写
    pub fn writable(&self) -> bool {
        let mode = self.bits() & Self::O_ACCMODE;
        mode == Self::O_WRONLY.bits() || mode == Self::O_RDWR.bits()
    }
}

#[cfg(test)]
mod tests {
    use super::OpenFlags;

    #[test]
    fn test_access_mode() {
        assert!(OpenFlags::O_RDONLY.readable());
        assert!(!OpenFlags::O_RDONLY.writable());
        assert!(!OpenFlags::O_WRONLY.readable());
        assert!(OpenFlags::O_WRONLY.writable());
        assert!(OpenFlags::O_RDWR.readable());
        assert!(OpenFlags::O_RDWR.writable());
        assert!((OpenFlags::O_RDONLY | OpenFlags::O_NONBLOCK).readable());
    }
}
