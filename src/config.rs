//! quotafs 的全局常量

/// 页大小，同时也是容量记账的块大小
pub const PAGE_SIZE: usize = 4096;

/// 页内偏移掩码
pub const PAGE_MASK: usize = PAGE_SIZE - 1;

/// 未指定 `size=` 挂载选项时的默认容量上限
pub const DEFAULT_MAX_SIZE: usize = 64 * 1024 * 1024; // 64MB

/// 单个文件名的最大长度（字节）
pub const NAME_MAX: usize = 255;

/// statfs 返回的文件系统魔数
pub const QUOTAFS_MAGIC: u64 = 0x5146_5331; // "QFS1"

/// 根目录默认权限
pub const DEFAULT_ROOT_MODE: u32 = 0o755;
