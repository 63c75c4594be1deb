//! 日志环形缓冲区
//!
//! 固定容量，写满后覆盖最旧的条目并累计丢弃计数。
//! 读写索引是单调递增的序号，槽位为 `序号 % 容量`。

use core::cell::UnsafeCell;
use core::hint;
use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::config::GLOBAL_LOG_BUFFER_SIZE;
use crate::entry::LogEntry;

struct Ring {
    slots: [Option<LogEntry>; GLOBAL_LOG_BUFFER_SIZE],
    /// 下一个待读取的序号
    head: usize,
    /// 下一个待写入的序号
    tail: usize,
}

/// 全局日志缓冲区
///
/// klog 不依赖 `sync` crate，这里用一个极短的自旋临界区保护环形队列；
/// 临界区内只有条目拷贝，不做格式化。
pub(crate) struct GlobalLogBuffer {
    busy: AtomicBool,
    ring: UnsafeCell<Ring>,
    dropped: AtomicUsize,
}

// SAFETY: ring 只在持有 busy 标志时访问
unsafe impl Sync for GlobalLogBuffer {}

impl GlobalLogBuffer {
    pub(crate) const fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
            ring: UnsafeCell::new(Ring {
                slots: [const { None }; GLOBAL_LOG_BUFFER_SIZE],
                head: 0,
                tail: 0,
            }),
            dropped: AtomicUsize::new(0),
        }
    }

    fn with_ring<R>(&self, f: impl FnOnce(&mut Ring) -> R) -> R {
        while self
            .busy
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            hint::spin_loop();
        }
        // SAFETY: busy 标志保证独占访问
        let result = f(unsafe { &mut *self.ring.get() });
        self.busy.store(false, Ordering::Release);
        result
    }

    pub(crate) fn write(&self, entry: &LogEntry) {
        let overwritten = self.with_ring(|ring| {
            let full = ring.tail - ring.head == GLOBAL_LOG_BUFFER_SIZE;
            if full {
                ring.head += 1;
            }
            ring.slots[ring.tail % GLOBAL_LOG_BUFFER_SIZE] = Some(entry.clone());
            ring.tail += 1;
            full
        });
        if overwritten {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn read(&self) -> Option<LogEntry> {
        self.with_ring(|ring| {
            if ring.head == ring.tail {
                return None;
            }
            let entry = ring.slots[ring.head % GLOBAL_LOG_BUFFER_SIZE].take();
            ring.head += 1;
            entry
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.with_ring(|ring| ring.tail - ring.head)
    }

    pub(crate) fn dropped_count(&self) -> usize {
        self.dropped.load(Ordering::Relaxed)
    }
}
