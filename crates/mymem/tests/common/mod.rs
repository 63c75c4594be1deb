//! 集成测试共用的数据源

#![allow(dead_code)]

use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use mymem::ReportSource;
use vfs::{DirEntry, FileMode, FsError, Inode, InodeMetadata, InodeType, TimeSpec};

/// 固定内容的只读文件
pub struct TextInode(pub Vec<u8>);

impl Inode for TextInode {
    fn metadata(&self) -> Result<InodeMetadata, FsError> {
        Ok(InodeMetadata {
            inode_no: 1,
            inode_type: InodeType::File,
            mode: FileMode::S_IFREG | FileMode::S_IRUSR,
            uid: 0,
            gid: 0,
            size: self.0.len(),
            atime: TimeSpec::zero(),
            mtime: TimeSpec::zero(),
            ctime: TimeSpec::zero(),
            nlinks: 1,
            blocks: 0,
            rdev: 0,
        })
    }

    fn read_at(&self, offset: usize, buf: &mut [u8]) -> Result<usize, FsError> {
        let data = self.0.get(offset..).unwrap_or(&[]);
        let n = data.len().min(buf.len());
        buf[..n].copy_from_slice(&data[..n]);
        Ok(n)
    }

    fn lookup(&self, _name: &str) -> Result<Arc<dyn Inode>, FsError> {
        Err(FsError::NotDirectory)
    }

    fn readdir(&self) -> Result<Vec<DirEntry>, FsError> {
        Err(FsError::NotDirectory)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// 固定报告，记录被打开的次数
pub struct FixedSource {
    pub report: Vec<u8>,
    pub opens: AtomicUsize,
}

impl FixedSource {
    pub fn new(report: &[u8]) -> Arc<Self> {
        Arc::new(Self {
            report: report.to_vec(),
            opens: AtomicUsize::new(0),
        })
    }

    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }
}

impl ReportSource for FixedSource {
    fn open(&self) -> Result<Arc<dyn Inode>, FsError> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(TextInode(self.report.clone())))
    }
}

/// 始终无法打开的数据源
pub struct FailingSource(pub FsError);

impl ReportSource for FailingSource {
    fn open(&self) -> Result<Arc<dyn Inode>, FsError> {
        Err(self.0)
    }
}

/// 打开成功但读取失败的数据源
pub struct BrokenSource;

struct BrokenInode;

impl Inode for BrokenInode {
    fn metadata(&self) -> Result<InodeMetadata, FsError> {
        TextInode(Vec::new()).metadata()
    }

    fn read_at(&self, _offset: usize, _buf: &mut [u8]) -> Result<usize, FsError> {
        Err(FsError::IoError)
    }

    fn lookup(&self, _name: &str) -> Result<Arc<dyn Inode>, FsError> {
        Err(FsError::NotDirectory)
    }

    fn readdir(&self) -> Result<Vec<DirEntry>, FsError> {
        Err(FsError::NotDirectory)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl ReportSource for BrokenSource {
    fn open(&self) -> Result<Arc<dyn Inode>, FsError> {
        Ok(Arc::new(BrokenInode))
    }
}

/// 每次打开生成新一代报告：所有行都带同一个代号
pub struct GenerationSource {
    generation: AtomicUsize,
}

impl GenerationSource {
    pub const LINES: usize = 64;

    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            generation: AtomicUsize::new(0),
        })
    }
}

impl ReportSource for GenerationSource {
    fn open(&self) -> Result<Arc<dyn Inode>, FsError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst);
        let report: String = (0..Self::LINES)
            .map(|i| format!("Line{:02}: {:>10} kB\n", i, generation))
            .collect();
        Ok(Arc::new(TextInode(report.into_bytes())))
    }
}
