//! 设备配置常量

/// 设备节点名（`/dev/mymem`）
pub const DEVICE_NAME: &str = "mymem";

/// 设备类名
pub const CLASS_NAME: &str = "mymem";

/// 快照缓冲区容量（含结尾 NUL），报告最多 `SNAPSHOT_CAPACITY - 1` 字节
pub const SNAPSHOT_CAPACITY: usize = 4096;

/// 内存报告的路径
pub const MEMINFO_PATH: &str = "/proc/meminfo";

/// 设备实例的配置
///
/// [`Default`] 即内置常量；测试或需要多实例时可替换名称与容量。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemDevConfig {
    /// 设备节点名，同时用作 chrdev 注册名
    pub device_name: &'static str,
    /// 设备类名
    pub class_name: &'static str,
    /// 快照缓冲区容量
    pub snapshot_capacity: usize,
}

impl MemDevConfig {
    /// 默认配置
    pub const fn new() -> Self {
        Self {
            device_name: DEVICE_NAME,
            class_name: CLASS_NAME,
            snapshot_capacity: SNAPSHOT_CAPACITY,
        }
    }

    /// 快照中报告内容的最大长度
    pub const fn max_report_len(&self) -> usize {
        self.snapshot_capacity.saturating_sub(1)
    }
}

impl Default for MemDevConfig {
    fn default() -> Self {
        Self::new()
    }
}
