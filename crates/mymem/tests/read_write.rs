//! 读写语义

mod common;

use std::sync::Arc;
use std::thread;

use common::{BrokenSource, FailingSource, FixedSource, GenerationSource};
use device::open_node;
use mymem::{MemDevConfig, MemDevError, MemDevOps, MemDevice, ReportSource, SNAPSHOT_CAPACITY};
use vfs::{File, FsError, OpenFlags, UserSlice, UserSliceMut};

const SAMPLE: &[u8] = b"MemTotal: 8000000 kB\nMemFree: 500000 kB\n";

fn config(name: &'static str) -> MemDevConfig {
    MemDevConfig {
        device_name: name,
        class_name: name,
        ..MemDevConfig::default()
    }
}

fn load(name: &'static str, source: Arc<dyn ReportSource>) -> MemDevice {
    MemDevice::load_with(config(name), source).unwrap()
}

fn read(file: &Arc<dyn File>, len: usize) -> Result<Vec<u8>, FsError> {
    let mut buf = vec![0u8; len];
    let n = file.read(UserSliceMut::kernel(&mut buf))?;
    buf.truncate(n);
    Ok(buf)
}

#[test]
fn test_sample_report_then_eof() {
    let source = FixedSource::new(SAMPLE);
    let dev = load("rw-sample", source.clone());
    let file = open_node("/dev/rw-sample", OpenFlags::O_RDONLY).unwrap();

    let first = read(&file, 1000).unwrap();
    assert_eq!(first.len(), 40);
    assert_eq!(first, SAMPLE);
    assert_eq!(file.offset(), SAMPLE.len());

    assert_eq!(read(&file, 1000).unwrap(), b"");
    assert_eq!(read(&file, 1).unwrap(), b"");
    // EOF 不再访问数据源
    assert_eq!(source.opens(), 1);

    drop(file);
    dev.unload();
}

#[test]
fn test_short_read_then_eof() {
    let dev = load("rw-short", FixedSource::new(SAMPLE));
    let file = open_node("rw-short", OpenFlags::O_RDONLY).unwrap();

    assert_eq!(read(&file, 10).unwrap(), &SAMPLE[..10]);
    assert_eq!(read(&file, 1000).unwrap(), b"");

    drop(file);
    dev.unload();
}

#[test]
fn test_each_handle_reads_once() {
    let source = FixedSource::new(SAMPLE);
    let dev = load("rw-handles", source.clone());

    for _ in 0..3 {
        let file = open_node("rw-handles", OpenFlags::O_RDONLY).unwrap();
        assert_eq!(read(&file, 4096).unwrap(), SAMPLE);
        assert_eq!(read(&file, 4096).unwrap(), b"");
    }
    assert_eq!(source.opens(), 3);

    dev.unload();
}

#[test]
fn test_long_report_truncated() {
    let report = vec![b'k'; 6000];
    let dev = load("rw-long", FixedSource::new(&report));
    let file = open_node("rw-long", OpenFlags::O_RDONLY).unwrap();

    let data = read(&file, 8192).unwrap();
    assert_eq!(data.len(), SNAPSHOT_CAPACITY - 1);
    assert!(data.iter().all(|&b| b == b'k'));
    assert_eq!(read(&file, 8192).unwrap(), b"");

    drop(file);
    dev.unload();
}

#[test]
fn test_custom_capacity() {
    let config = MemDevConfig {
        snapshot_capacity: 16,
        ..config("rw-cap")
    };
    let dev = MemDevice::load_with(config, FixedSource::new(SAMPLE)).unwrap();
    let file = open_node("rw-cap", OpenFlags::O_RDONLY).unwrap();

    assert_eq!(read(&file, 100).unwrap(), &SAMPLE[..15]);

    drop(file);
    dev.unload();
}

#[test]
fn test_zero_length_read_does_not_advance() {
    let source = FixedSource::new(SAMPLE);
    let dev = load("rw-zero-len", source.clone());
    let file = open_node("rw-zero-len", OpenFlags::O_RDONLY).unwrap();

    assert_eq!(read(&file, 0).unwrap(), b"");
    assert_eq!(file.offset(), 0);
    assert_eq!(read(&file, 100).unwrap(), SAMPLE);
    assert_eq!(source.opens(), 2);

    drop(file);
    dev.unload();
}

#[test]
fn test_empty_report() {
    let source = FixedSource::new(b"");
    let dev = load("rw-empty", source.clone());
    let file = open_node("rw-empty", OpenFlags::O_RDONLY).unwrap();

    assert_eq!(read(&file, 100).unwrap(), b"");
    assert_eq!(file.offset(), 0);
    assert_eq!(read(&file, 100).unwrap(), b"");
    assert_eq!(source.opens(), 2);

    drop(file);
    dev.unload();
}

#[test]
fn test_writes_are_discarded() {
    let dev = load("rw-write", FixedSource::new(SAMPLE));
    let file = open_node("rw-write", OpenFlags::O_RDWR).unwrap();

    for len in [0usize, 1, 41, 4096, 100_000] {
        let data = vec![0xa5u8; len];
        assert_eq!(file.write(UserSlice::kernel(&data)).unwrap(), len);
    }
    assert_eq!(file.offset(), 0);
    assert_eq!(read(&file, 1000).unwrap(), SAMPLE);

    drop(file);
    dev.unload();
}

#[test]
fn test_write_does_not_touch_user_buffer() {
    let dev = load("rw-write-user", FixedSource::new(SAMPLE));
    let file = open_node("rw-write-user", OpenFlags::O_WRONLY).unwrap();

    // 内容从不读取，因此无效地址也按全部写入处理
    let bogus = unsafe { UserSlice::user(0xffff_8000_0000_0000, 512) };
    assert_eq!(file.write(bogus).unwrap(), 512);

    drop(file);
    dev.unload();
}

#[test]
fn test_unavailable_report() {
    let dev = load("rw-missing", Arc::new(FailingSource(FsError::NotFound)));
    let file = open_node("rw-missing", OpenFlags::O_RDONLY).unwrap();

    assert_eq!(read(&file, 100).err(), Some(FsError::NotFound));
    assert_eq!(file.offset(), 0);
    assert_eq!(read(&file, 100).err(), Some(FsError::NotFound));

    drop(file);
    dev.unload();
}

#[test]
fn test_report_read_error_surfaces() {
    let dev = load("rw-broken", Arc::new(BrokenSource));
    let file = open_node("rw-broken", OpenFlags::O_RDONLY).unwrap();

    assert_eq!(read(&file, 100).err(), Some(FsError::IoError));

    drop(file);
    dev.unload();
}

#[test]
fn test_out_of_memory() {
    let config = MemDevConfig {
        snapshot_capacity: usize::MAX,
        ..config("rw-oom")
    };
    let dev = MemDevice::load_with(config, FixedSource::new(SAMPLE)).unwrap();
    let file = open_node("rw-oom", OpenFlags::O_RDONLY).unwrap();

    assert_eq!(read(&file, 100).err(), Some(FsError::OutOfMemory));
    assert_eq!(file.offset(), 0);

    drop(file);
    dev.unload();
}

#[test]
fn test_typed_errors() {
    let ops = MemDevOps::new(Arc::new(FailingSource(FsError::NotFound)), SNAPSHOT_CAPACITY);
    let mut buf = [0u8; 8];
    let mut offset = 0;
    assert_eq!(
        ops.read_report(&mut UserSliceMut::kernel(&mut buf), &mut offset),
        Err(MemDevError::ReportUnavailable(FsError::NotFound))
    );

    let ops = MemDevOps::new(FixedSource::new(SAMPLE), usize::MAX);
    assert_eq!(
        ops.read_report(&mut UserSliceMut::kernel(&mut buf), &mut offset),
        Err(MemDevError::OutOfMemory)
    );

    let ops = MemDevOps::new(FixedSource::new(SAMPLE), SNAPSHOT_CAPACITY);
    let mut offset = 5;
    assert_eq!(
        ops.read_report(&mut UserSliceMut::kernel(&mut buf), &mut offset),
        Ok(0)
    );
    assert_eq!(FsError::from(MemDevError::CopyFault).to_errno(), -14);
    assert_eq!(FsError::from(MemDevError::OutOfMemory).to_errno(), -12);
}

#[test]
fn test_concurrent_readers_see_whole_snapshots() {
    const READERS: usize = 8;
    let dev = load("rw-concurrent", GenerationSource::new());

    let handles: Vec<_> = (0..READERS)
        .map(|_| {
            thread::spawn(|| {
                let file = open_node("rw-concurrent", OpenFlags::O_RDONLY).unwrap();
                let data = read(&file, 8192).unwrap();
                assert_eq!(read(&file, 8192).unwrap(), b"");
                String::from_utf8(data).unwrap()
            })
        })
        .collect();

    for handle in handles {
        let text = handle.join().unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), GenerationSource::LINES);
        let generation = lines[0].split_whitespace().nth(1).unwrap();
        assert!(
            lines
                .iter()
                .all(|l| l.split_whitespace().nth(1) == Some(generation))
        );
    }

    dev.unload();
}

/// 低半区视为用户空间
struct LowHalfUser;

impl vfs::VfsOps for LowHalfUser {
    fn access_ok(&self, addr: usize, len: usize) -> bool {
        addr.checked_add(len)
            .is_some_and(|end| end <= 0x0000_8000_0000_0000)
    }

    fn enter_user_access(&self) {}

    fn exit_user_access(&self) {}
}

static LOW_HALF_USER: LowHalfUser = LowHalfUser;

#[test]
fn test_copy_fault_and_user_copy() {
    // SAFETY: 本测试二进制中只注册这一个实现
    unsafe { vfs::register_vfs_ops(&LOW_HALF_USER) };

    let source = FixedSource::new(SAMPLE);
    let dev = load("rw-fault", source.clone());
    let file = open_node("rw-fault", OpenFlags::O_RDONLY).unwrap();

    let bad = unsafe { UserSliceMut::user(0xffff_8000_0000_0000, 100) };
    assert_eq!(file.read(bad).err(), Some(FsError::BadAddress));
    assert_eq!(file.offset(), 0);

    // 失败的读取不推进位置，随后用合法地址可以读到完整报告
    let mut backing = vec![0u8; 100];
    let good = unsafe { UserSliceMut::user(backing.as_mut_ptr() as usize, backing.len()) };
    assert_eq!(file.read(good).unwrap(), SAMPLE.len());
    assert_eq!(&backing[..SAMPLE.len()], SAMPLE);
    assert_eq!(source.opens(), 2);

    drop(file);
    dev.unload();
}
