//! [`File`](crate::vfs::File) 的实现
mod inode_file;

pub use inode_file::InodeFile;
