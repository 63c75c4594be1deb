//! 字符设备号分配规则

/// 标准字符设备 major 号
pub mod chrdev_major {
    /// /dev/null, /dev/zero 等
    pub const MEM: u32 = 1;
    /// /dev/tty*, /dev/ttyS*
    pub const TTY: u32 = 4;
    /// /dev/console
    pub const CONSOLE: u32 = 5;
    /// /dev/misc/* (rtc=135)
    pub const MISC: u32 = 10;
    /// /dev/input/*
    pub const INPUT: u32 = 13;

    /// 允许注册的最大 major（不含）
    pub const MAX: u32 = 512;

    /// 动态分配首选区间：从 254 向下到 234
    pub const DYN_START: u32 = 254;
    /// 首选区间下界（含）
    pub const DYN_END: u32 = 234;
    /// 动态分配扩展区间：从 511 向下到 384
    pub const DYN_EXT_START: u32 = 511;
    /// 扩展区间下界（含）
    pub const DYN_EXT_END: u32 = 384;
}

/// 每个 major 覆盖的 minor 数（对应 `register_chrdev` 的整段注册）
pub const MINORS_PER_MAJOR: u32 = 256;

/// 按 Linux 的搜索顺序枚举可动态分配的 major
pub fn dynamic_major_candidates() -> impl Iterator<Item = u32> {
    use chrdev_major::*;

    (DYN_END..=DYN_START)
        .rev()
        .chain((DYN_EXT_END..=DYN_EXT_START).rev())
}
