//! quotafs 容量报告测试

use super::*;
use crate::config::{NAME_MAX, QUOTAFS_MAGIC};
use crate::{kassert, test_case};
use alloc::vec;

test_case!(test_quotafs_statfs_fresh, {
    let fs = create_test_quotafs(10);
    let stat = fs.statfs().unwrap();
    kassert!(stat.magic == QUOTAFS_MAGIC);
    kassert!(stat.block_size == PAGE_SIZE);
    kassert!(stat.total_blocks == 10);
    kassert!(stat.free_blocks == 10);
    kassert!(stat.available_blocks == 10);
    kassert!(stat.max_filename_len == NAME_MAX);
    kassert!(stat.total_inodes == 0);
});

test_case!(test_quotafs_statfs_tracks_usage, {
    let fs = create_test_quotafs(10);
    create_test_file_with_content(&fs, "a", &vec![0; 3 * PAGE_SIZE]).unwrap();

    let stat = fs.statfs().unwrap();
    kassert!(stat.total_blocks == 10);
    kassert!(stat.free_blocks == 7);

    let usage = fs.usage();
    kassert!(usage.total == 10);
    kassert!(usage.used == 3);
    kassert!(usage.available == 7);
});

test_case!(test_quotafs_statfs_clamps_overshoot, {
    let fs = create_test_quotafs(4);
    // 模拟并发超额
    fs.ledger().charge(6);
    kassert!(fs.ledger().remaining_blocks() == -2);

    let stat = fs.statfs().unwrap();
    kassert!(stat.free_blocks == 0);
    kassert!(stat.available_blocks == 0);
    kassert!(fs.usage().used == 4);
});

test_case!(test_quotafs_statfs_clamps_negative_usage, {
    let fs = create_test_quotafs(4);
    // 记账错误导致已用块数为负
    fs.ledger().refund(3);
    kassert!(used_blocks(&fs) == -3);

    let stat = fs.statfs().unwrap();
    kassert!(stat.free_blocks == 4);
    kassert!(stat.available_blocks <= stat.total_blocks);
    kassert!(fs.usage().used == 0);
    fs.ledger().charge(3);
});

test_case!(test_quotafs_partial_block_capacity_rounds_down, {
    let fs = QuotaFs::new(MountOptions::with_max_size(3 * PAGE_SIZE + 1000)).unwrap();
    kassert!(fs.statfs().unwrap().total_blocks == 3);
});

test_case!(test_quotafs_inode_limit, {
    let fs = QuotaFs::new(MountOptions::parse("size=64k,nr_inodes=3").unwrap()).unwrap();
    let root = fs.root_inode();
    let mode = FileMode::from_bits_truncate(0o644);

    kassert!(root.create("a", mode).is_ok());
    kassert!(root.create("b", mode).is_ok());
    kassert!(root.create("c", mode).err() == Some(FsError::NoSpace));

    let stat = fs.statfs().unwrap();
    kassert!(stat.total_inodes == 3);
    kassert!(stat.free_inodes == 0);

    kassert!(root.unlink("a").is_ok());
    kassert!(fs.statfs().unwrap().free_inodes == 1);
    kassert!(root.create("c", mode).is_ok());
});

test_case!(test_quotafs_statfs_fsid_unique, {
    let a = create_test_quotafs(1);
    let b = create_test_quotafs(1);
    kassert!(a.statfs().unwrap().fsid != b.statfs().unwrap().fsid);
});
