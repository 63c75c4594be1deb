//! 路径解析
//!
//! 在给定根 inode 下逐级 `lookup`，不经过 dentry 缓存与挂载表。

use alloc::sync::Arc;

use crate::{FsError, Inode};

/// 单个文件名分量的最大长度
pub const NAME_MAX: usize = 255;

/// 从 `root` 出发解析 `path`
///
/// 开头的 `/`、空分量和 `.` 被忽略；不支持 `..`（返回 `InvalidArgument`）。
/// 空路径解析为 `root` 自身。
pub fn lookup_path(root: &Arc<dyn Inode>, path: &str) -> Result<Arc<dyn Inode>, FsError> {
    let mut current = root.clone();
    for component in path.split('/') {
        match component {
            "" | "." => continue,
            ".." => return Err(FsError::InvalidArgument),
            name if name.len() > NAME_MAX => return Err(FsError::NameTooLong),
            name => current = current.lookup(name)?,
        }
    }
    Ok(current)
}
