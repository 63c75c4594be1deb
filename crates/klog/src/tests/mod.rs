//! klog 单元测试，全部针对局部 `LogCore`，不触碰全局实例

use crate::LogLevel;
use crate::log_core::LogCore;

fn core_at(level: LogLevel) -> LogCore {
    // 控制台阈值设为最低，避免测试间经由全局输出互相干扰
    LogCore::new(level, LogLevel::Emergency)
}

mod render;
