//! 全局实例与 /proc/meminfo 数据源

use std::sync::{Arc, Mutex, MutexGuard};

use device::open_node;
use fs::{FsOps, mount_procfs, umount_procfs};
use mymem::{MemDevConfig, MemDevice, ProcMeminfo, ReportSource};
use vfs::{FsError, OpenFlags, TimeSpec, UserSliceMut};

struct HostFsOps;

impl FsOps for HostFsOps {
    fn page_size(&self) -> usize {
        4096
    }

    fn timespec_now(&self) -> TimeSpec {
        TimeSpec::zero()
    }

    fn get_total_frames(&self) -> usize {
        2_000_000
    }

    fn get_free_frames(&self) -> usize {
        125_000
    }
}

static HOST_FS_OPS: HostFsOps = HostFsOps;

static SERIAL: Mutex<()> = Mutex::new(());

/// 注册 FsOps 并串行化：两个测试共享挂载状态
fn setup() -> MutexGuard<'static, ()> {
    let guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    // SAFETY: 本测试二进制中只注册这一个实现
    unsafe { fs::register_fs_ops(&HOST_FS_OPS) };
    guard
}

fn read_all(path: &str) -> Result<(String, usize), FsError> {
    let file = open_node(path, OpenFlags::O_RDONLY)?;
    let mut buf = vec![0u8; 8192];
    let n = file.read(UserSliceMut::kernel(&mut buf))?;
    buf.truncate(n);
    let again = file.read(UserSliceMut::kernel(&mut [0u8; 16]))?;
    Ok((String::from_utf8(buf).unwrap(), again))
}

#[test]
fn test_global_instance_over_procfs() {
    let _serial = setup();
    umount_procfs();

    assert!(!mymem::is_loaded());
    mymem::exit();

    mymem::init().unwrap();
    assert!(mymem::is_loaded());
    assert_eq!(mymem::init(), Err(FsError::Busy));

    // procfs 尚未挂载：报告不可用
    assert_eq!(read_all("/dev/mymem").err(), Some(FsError::NotFound));

    mount_procfs().unwrap();
    let (text, again) = read_all("/dev/mymem").unwrap();
    assert_eq!(again, 0);
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("MemTotal:        8000000 kB"));
    assert_eq!(lines.next(), Some("MemFree:          500000 kB"));
    assert!(text.ends_with(" kB\n"));

    mymem::exit();
    assert!(!mymem::is_loaded());
    assert_eq!(read_all("/dev/mymem").err(), Some(FsError::NotFound));
    mymem::exit();

    // 可以重新加载
    mymem::init().unwrap();
    assert!(read_all("mymem").is_ok());
    mymem::exit();

    umount_procfs();
    let source = ProcMeminfo::new();
    assert_eq!(source.open().err(), Some(FsError::NotFound));
}

#[test]
fn test_proc_meminfo_path_resolution() {
    let _serial = setup();
    mount_procfs().unwrap();

    assert!(ProcMeminfo::with_path("/proc/meminfo").open().is_ok());
    assert_eq!(
        ProcMeminfo::with_path("/proc/nope").open().err(),
        Some(FsError::NotFound)
    );
    assert_eq!(
        ProcMeminfo::with_path("/procmeminfo").open().err(),
        Some(FsError::NotFound)
    );
    assert_eq!(
        ProcMeminfo::with_path("/sys/meminfo").open().err(),
        Some(FsError::NotFound)
    );

    let config = MemDevConfig {
        device_name: "proc-path",
        class_name: "proc-path",
        ..MemDevConfig::default()
    };
    let dev = MemDevice::load_with(config, Arc::new(ProcMeminfo::new())).unwrap();
    let (text, _) = read_all("proc-path").unwrap();
    assert!(text.starts_with("MemTotal:"));
    dev.unload();
}
