//! 动态 major 耗尽时加载失败（独立进程）

mod common;

use std::sync::Arc;

use common::FixedSource;
use device::{find_class, find_node};
use mymem::{MemDevConfig, MemDevOps, MemDevice};
use vfs::{FsError, dynamic_major_candidates, register_chrdev, unregister_chrdev};

#[test]
fn test_load_fails_without_free_major() {
    let filler = Arc::new(MemDevOps::new(FixedSource::new(b""), 16));
    let taken: Vec<u32> = dynamic_major_candidates()
        .map(|_| register_chrdev(0, "filler", filler.clone()).unwrap())
        .collect();

    let config = MemDevConfig {
        device_name: "ex-mymem",
        class_name: "ex-mymem",
        ..MemDevConfig::default()
    };
    let err = MemDevice::load_with(config, FixedSource::new(b"x")).err();
    assert_eq!(err, Some(FsError::Busy));
    assert!(find_class("ex-mymem").is_none());
    assert!(find_node("ex-mymem").is_none());

    unregister_chrdev(taken[0], "filler");
    let dev = MemDevice::load_with(config, FixedSource::new(b"x")).unwrap();
    assert_eq!(dev.major(), taken[0]);
    dev.unload();

    for major in taken.into_iter().skip(1) {
        unregister_chrdev(major, "filler");
    }
}
