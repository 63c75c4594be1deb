//! /proc/meminfo 生成器

use alloc::{string::String, vec::Vec};
use core::fmt::Write;

use crate::ops::fs_ops;
use crate::proc::ContentGenerator;
use vfs::FsError;

/// `/proc/meminfo` 内容生成器。
///
/// 只有总量与空闲量来自页帧分配器，其余字段固定为 0，保持 Linux 的字段顺序。
pub struct MeminfoGenerator;

const ZERO_FIELDS: &[&str] = &[
    "Buffers",
    "Cached",
    "SwapCached",
    "Active",
    "Inactive",
    "Active(anon)",
    "Inactive(anon)",
    "Active(file)",
    "Inactive(file)",
    "Unevictable",
    "Mlocked",
    "SwapTotal",
    "SwapFree",
    "Dirty",
    "Writeback",
    "AnonPages",
    "Mapped",
    "Shmem",
];

fn frames_to_kb(frames: usize, page_size: usize) -> usize {
    frames.saturating_mul(page_size) / 1024
}

fn push_line(out: &mut String, key: &str, kb: usize) -> Result<(), FsError> {
    // "Key:" 左对齐占 16 列，数值右对齐占 8 列
    let pad = 16usize.saturating_sub(key.len() + 1);
    writeln!(out, "{}:{:pad$}{:>8} kB", key, "", kb, pad = pad).map_err(|_| FsError::IoError)
}

impl ContentGenerator for MeminfoGenerator {
    fn generate(&self) -> Result<Vec<u8>, FsError> {
        let ops = fs_ops();
        let page_size = ops.page_size();
        let total_kb = frames_to_kb(ops.get_total_frames(), page_size);
        let free_kb = frames_to_kb(ops.get_free_frames(), page_size).min(total_kb);

        let mut content = String::new();
        push_line(&mut content, "MemTotal", total_kb)?;
        push_line(&mut content, "MemFree", free_kb)?;
        push_line(&mut content, "MemAvailable", free_kb)?;
        for key in ZERO_FIELDS {
            push_line(&mut content, key, 0)?;
        }

        Ok(content.into_bytes())
    }
}
