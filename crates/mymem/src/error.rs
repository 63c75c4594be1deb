//! 设备错误类型

use vfs::FsError;

/// 读取内存报告时可能出现的错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemDevError {
    /// 内存报告无法打开，携带数据源自身的错误
    ReportUnavailable(FsError),
    /// 内存报告已打开但读取失败，携带读取返回的错误
    ReportRead(FsError),
    /// 快照缓冲区分配失败
    OutOfMemory,
    /// 目标缓冲区无效
    CopyFault,
}

impl From<MemDevError> for FsError {
    fn from(err: MemDevError) -> Self {
        match err {
            MemDevError::ReportUnavailable(source) | MemDevError::ReportRead(source) => source,
            MemDevError::OutOfMemory => FsError::OutOfMemory,
            MemDevError::CopyFault => FsError::BadAddress,
        }
    }
}

impl core::fmt::Display for MemDevError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MemDevError::ReportUnavailable(source) => {
                write!(f, "memory report unavailable: {}", source)
            }
            MemDevError::ReportRead(source) => write!(f, "memory report read failed: {}", source),
            MemDevError::OutOfMemory => f.write_str("out of memory"),
            MemDevError::CopyFault => f.write_str("bad user buffer"),
        }
    }
}
