//! 动态 major 耗尽（独立进程，避免与其它测试争用注册表）

use std::sync::Arc;

use vfs::{
    CharDevOps, FsError, UserSlice, UserSliceMut, dynamic_major_candidates, register_chrdev,
    unregister_chrdev,
};

struct Nop;

impl CharDevOps for Nop {
    fn read(&self, _buf: UserSliceMut<'_>, _offset: &mut usize) -> Result<usize, FsError> {
        Ok(0)
    }

    fn write(&self, buf: UserSlice<'_>, _offset: &mut usize) -> Result<usize, FsError> {
        Ok(buf.len())
    }
}

#[test]
fn test_dynamic_pool_exhaustion_and_reuse() {
    let ops: Arc<dyn CharDevOps> = Arc::new(Nop);
    let expected: Vec<u32> = dynamic_major_candidates().collect();

    let got: Vec<u32> = expected
        .iter()
        .map(|_| register_chrdev(0, "filler", ops.clone()).unwrap())
        .collect();
    assert_eq!(got, expected);

    assert_eq!(register_chrdev(0, "one-more", ops.clone()), Err(FsError::Busy));

    unregister_chrdev(400, "filler");
    assert_eq!(register_chrdev(0, "one-more", ops.clone()), Ok(400));

    unregister_chrdev(400, "one-more");
    for major in got {
        unregister_chrdev(major, "filler");
    }
    assert_eq!(register_chrdev(0, "fresh", ops), Ok(254));
}
