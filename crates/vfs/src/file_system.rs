//! 挂载到某个路径下的节点树

use alloc::sync::Arc;

use crate::Inode;

/// 一棵节点树
pub trait FileSystem: Send + Sync {
    /// 类型名，如 `proc`、`devtmpfs`
    fn fs_type(&self) -> &'static str;

    /// 根目录
    fn root_inode(&self) -> Arc<dyn Inode>;
}
