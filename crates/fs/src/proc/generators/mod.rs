//! 动态文件内容生成器

mod meminfo;

pub use meminfo::MeminfoGenerator;
