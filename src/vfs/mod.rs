//! 虚拟文件系统层
//!
//! 与具体文件系统无关的接口：[`Inode`] 与 [`FileSystem`] trait、错误码、
//! 打开文件的会话层和全局挂载表。
pub mod error;
pub mod file;
pub mod file_system;
pub mod impls;
pub mod inode;
pub mod mount;
pub mod path;


pub use error::FsError;
pub use file::{AccessMode, File, OpenFlags};
pub use file_system::{FileSystem, StatFs};
pub use impls::InodeFile;
pub use inode::{DirEntry, FileMode, Inode, InodeMetadata, InodeType, TimeSpec};
pub use mount::{MOUNT_TABLE, MountFlags, MountInfo, MountPoint, MountTable};
pub use path::{normalize_path, split_path};
