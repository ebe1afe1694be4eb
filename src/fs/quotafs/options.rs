//! 挂载选项
//!
//! 挂载数据是逗号分隔的 `key=value` 列表，例如 `size=16m,nr_inodes=1024,mode=0755`。

use alloc::string::String;
use core::fmt;

use crate::config::{DEFAULT_MAX_SIZE, DEFAULT_ROOT_MODE};
use crate::pr_err;
use crate::vfs::{FileMode, FsError};

/// quotafs 挂载选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountOptions {
    /// 容量上限（字节），按块向下取整
    pub max_size: usize,
    /// inode 数量上限，0 表示无限制
    pub nr_inodes: usize,
    /// 根目录权限
    pub mode: FileMode,
    /// 根目录属主
    pub uid: u32,
    /// 根目录属组
    pub gid: u32,
}

impl Default for MountOptions {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            nr_inodes: 0,
            mode: FileMode::from_bits_truncate(DEFAULT_ROOT_MODE),
            uid: 0,
            gid: 0,
        }
    }
}

impl MountOptions {
    /// 指定容量上限，其余取默认值
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            max_size,
            ..Self::default()
        }
    }

    /// 解析挂载数据字符串；空字符串得到默认选项
    pub fn parse(data: &str) -> Result<Self, FsError> {
        let mut opts = Self::default();

        for item in data.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let (key, value) = item.split_once('=').ok_or(FsError::InvalidArgument)?;
            match key {
                "size" => opts.max_size = parse_size(value)?,
                "nr_inodes" => opts.nr_inodes = parse_size(value)?,
                "mode" => {
                    let bits =
                        u32::from_str_radix(value, 8).map_err(|_| FsError::InvalidArgument)?;
                    if bits & !0o7777 != 0 {
                        return Err(FsError::InvalidArgument);
                    }
                    opts.mode = FileMode::from_bits_truncate(bits);
                }
                "uid" => opts.uid = value.parse().map_err(|_| FsError::InvalidArgument)?,
                "gid" => opts.gid = value.parse().map_err(|_| FsError::InvalidArgument)?,
                _ => {
                    pr_err!("quotafs: unknown mount option '{}'", key);
                    return Err(FsError::InvalidArgument);
                }
            }
        }

        Ok(opts)
    }

    /// 渲染为挂载数据字符串（show_options）
    pub fn to_option_string(&self) -> String {
        alloc::format!("{}", self)
    }
}

/// 解析带 k/m/g 后缀的数值
fn parse_size(value: &str) -> Result<usize, FsError> {
    let value = value.trim();
    let (digits, shift) = match value.as_bytes().last() {
        Some(b'k' | b'K') => (&value[..value.len() - 1], 10),
        Some(b'm' | b'M') => (&value[..value.len() - 1], 20),
        Some(b'g' | b'G') => (&value[..value.len() - 1], 30),
        _ => (value, 0),
    };
    let n: usize = digits.parse().map_err(|_| FsError::InvalidArgument)?;
    n.checked_mul(1usize << shift).ok_or(FsError::InvalidArgument)
}

impl fmt::Display for MountOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "size={}", self.max_size)?;
        if self.nr_inodes != 0 {
            write!(f, ",nr_inodes={}", self.nr_inodes)?;
        }
        write!(f, ",mode={:o}", self.mode.bits())?;
        if self.uid != 0 {
            write!(f, ",uid={}", self.uid)?;
        }
        if self.gid != 0 {
            write!(f, ",gid={}", self.gid)?;
        }
        Ok(())
    }
}
