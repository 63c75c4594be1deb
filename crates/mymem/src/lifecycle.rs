//! 设备的加载与卸载
//!
//! 加载依次注册 chrdev（动态 major）、创建设备类、创建设备节点，
//! 任一步失败都会回滚已完成的步骤。卸载按相反顺序进行。

use alloc::sync::Arc;
use device::{DeviceClass, class_create, class_destroy, device_create, device_destroy};
use klog::{pr_alert, pr_info};
use sync::SpinLock;
use vfs::{FsError, makedev, register_chrdev, unregister_chrdev};

use crate::config::MemDevConfig;
use crate::driver::MemDevOps;
use crate::source::{ProcMeminfo, ReportSource};

/// 已加载的设备
///
/// 持有注册结果；只能通过 [`unload`](MemDevice::unload) 释放。
pub struct MemDevice {
    config: MemDevConfig,
    major: u32,
    class: Arc<DeviceClass>,
}

impl MemDevice {
    /// 以默认配置和 `/proc/meminfo` 加载
    pub fn load() -> Result<Self, FsError> {
        Self::load_with(MemDevConfig::default(), Arc::new(ProcMeminfo::new()))
    }

    /// 以指定配置和数据源加载
    pub fn load_with(config: MemDevConfig, source: Arc<dyn ReportSource>) -> Result<Self, FsError> {
        pr_info!("mymem: Initializing memory character device driver");

        let ops = Arc::new(MemDevOps::new(source, config.snapshot_capacity));
        let major = register_chrdev(0, config.device_name, ops).inspect_err(|_| {
            pr_alert!("mymem: Failed to register a major number");
        })?;
        pr_info!("mymem: Registered correctly with major number {}", major);

        let class = match class_create(config.class_name) {
            Ok(class) => class,
            Err(e) => {
                unregister_chrdev(major, config.device_name);
                pr_alert!("mymem: Failed to register device class");
                return Err(e);
            }
        };
        pr_info!("mymem: Device class registered correctly");

        if let Err(e) = device_create(&class, makedev(major, 0), config.device_name) {
            class_destroy(&class);
            unregister_chrdev(major, config.device_name);
            pr_alert!("mymem: Failed to create the device");
            return Err(e);
        }
        pr_info!("mymem: Device created successfully");
        pr_info!("mymem: Use 'cat /dev/{}' to read memory info", config.device_name);

        Ok(Self {
            config,
            major,
            class,
        })
    }

    /// 卸载设备
    pub fn unload(self) {
        device_destroy(&self.class, self.dev());
        pr_info!("mymem: Device removed");
        class_destroy(&self.class);
        pr_info!("mymem: Device class unregistered");
        unregister_chrdev(self.major, self.config.device_name);
        pr_info!("mymem: Unregistered major number {}", self.major);
        pr_info!("mymem: Memory character device driver removed");
    }

    /// 分配到的 major
    pub fn major(&self) -> u32 {
        self.major
    }

    /// 设备号（minor 恒为 0）
    pub fn dev(&self) -> u64 {
        makedev(self.major, 0)
    }

    /// 加载时使用的配置
    pub fn config(&self) -> &MemDevConfig {
        &self.config
    }
}

static INSTANCE: SpinLock<Option<MemDevice>> = SpinLock::new(None);

/// 加载全局实例
///
/// # Errors
/// 已加载时返回 `Busy`；否则返回 [`MemDevice::load`] 的错误。
pub fn init() -> Result<(), FsError> {
    let mut instance = INSTANCE.lock();
    if instance.is_some() {
        return Err(FsError::Busy);
    }
    *instance = Some(MemDevice::load()?);
    Ok(())
}

/// 卸载全局实例，未加载时什么也不做
pub fn exit() {
    let device = INSTANCE.lock().take();
    if let Some(device) = device {
        device.unload();
    }
}

/// 全局实例是否已加载
pub fn is_loaded() -> bool {
    INSTANCE.lock().is_some()
}
