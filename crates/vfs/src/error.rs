//! VFS 错误码
//!
//! 每个变体对应一个 Linux errno，系统调用返回时用 [`FsError::to_errno`] 取负值。

/// VFS 错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsError {
    /// -ENOENT
    NotFound,
    /// -EEXIST
    AlreadyExists,
    /// -ENOTDIR
    NotDirectory,
    /// -EISDIR
    IsDirectory,
    /// -ENAMETOOLONG
    NameTooLong,
    /// -EINVAL
    InvalidArgument,
    /// -EACCES，也用于按只读/只写打开后的反向操作
    PermissionDenied,
    /// -ENODEV，设备号上没有注册驱动
    NoDevice,
    /// -EBUSY，设备号已被占用或动态池耗尽
    Busy,
    /// -ENOMEM
    OutOfMemory,
    /// -EFAULT，用户地址不可访问
    BadAddress,
    /// -EIO
    IoError,
    /// -ENOTSUP
    NotSupported,
}

impl FsError {
    /// 正 errno
    pub fn errno(&self) -> i32 {
        use uapi::errno::*;

        match self {
            FsError::NotFound => ENOENT,
            FsError::AlreadyExists => EEXIST,
            FsError::NotDirectory => ENOTDIR,
            FsError::IsDirectory => EISDIR,
            FsError::NameTooLong => ENAMETOOLONG,
            FsError::InvalidArgument => EINVAL,
            FsError::PermissionDenied => EACCES,
            FsError::NoDevice => ENODEV,
            FsError::Busy => EBUSY,
            FsError::OutOfMemory => ENOMEM,
            FsError::BadAddress => EFAULT,
            FsError::IoError => EIO,
            FsError::NotSupported => ENOTSUP,
        }
    }

    /// 系统调用返回值（负 errno）
    pub fn to_errno(&self) -> isize {
        -(self.errno() as isize)
    }
}

impl core::fmt::Display for FsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?} (errno {})", self, self.errno())
    }
}

#[cfg(test)]
mod tests {
    use super::FsError;

    #[test]
    fn errno_matches_linux() {
        assert_eq!(FsError::NotFound.to_errno(), -2);
        assert_eq!(FsError::OutOfMemory.to_errno(), -12);
        assert_eq!(FsError::BadAddress.to_errno(), -14);
        assert_eq!(FsError::Busy.to_errno(), -16);
        assert_eq!(FsError::NoDevice.to_errno(), -19);
    }

    #[test]
    fn display_includes_errno() {
        use alloc::string::ToString;
        assert_eq!(FsError::BadAddress.to_string(), "BadAddress (errno 14)");
    }
}
