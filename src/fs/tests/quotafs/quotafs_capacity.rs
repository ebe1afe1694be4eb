//! quotafs 容量记账测试

use super::*;
use crate::{kassert, test_case};
use alloc::format;
use alloc::vec;

test_case!(test_quotafs_fill_reject_unlink_admit, {
    // 4 块：4 个单页文件写满，第 5 个被拒绝，删除一个后重新接受
    let fs = create_test_quotafs(4);
    let page = vec![0x5A; PAGE_SIZE];

    for i in 0..4 {
        let name = format!("f{}", i);
        kassert!(create_test_file_with_content(&fs, &name, &page).is_ok());
    }
    kassert!(used_blocks(&fs) == 4);

    let root = fs.root_inode();
    let fifth = root
        .create("f4", FileMode::from_bits_truncate(0o644))
        .unwrap();
    kassert!(fifth.write_at(0, &page) == Err(FsError::NoMemory));
    kassert!(used_blocks(&fs) == 4);
    kassert!(fifth.metadata().unwrap().size == 0);

    kassert!(root.unlink("f0").is_ok());
    kassert!(used_blocks(&fs) == 3);

    kassert!(fifth.write_at(0, &page) == Ok(PAGE_SIZE));
    kassert!(used_blocks(&fs) == 4);
});

test_case!(test_quotafs_partial_write_when_capacity_runs_out, {
    let fs = create_test_quotafs(2);
    let root = fs.root_inode();
    let file = root
        .create("big", FileMode::from_bits_truncate(0o644))
        .unwrap();

    // 3 页的写入只能写入前 2 页
    let data = vec![0xC3; 3 * PAGE_SIZE];
    kassert!(file.write_at(0, &data) == Ok(2 * PAGE_SIZE));
    kassert!(file.metadata().unwrap().size == 2 * PAGE_SIZE);
    kassert!(used_blocks(&fs) == 2);

    // 再次写入时第一页就被拒绝
    kassert!(file.write_at(2 * PAGE_SIZE, &data) == Err(FsError::NoMemory));
});

test_case!(test_quotafs_redirty_never_double_charges, {
    let fs = create_test_quotafs(8);
    let file = create_test_file_with_content(&fs, "same", b"first").unwrap();
    kassert!(used_blocks(&fs) == 1);

    for i in 0..10 {
        file.write_at(i * 100, b"again").unwrap();
    }
    kassert!(used_blocks(&fs) == 1);
    kassert!(file.metadata().unwrap().blocks == 1);
});

test_case!(test_quotafs_full_rejects_overwrite_of_dirty_page, {
    // 准入检查发生在查找页之前，已满时即使覆盖已记账的页也会被拒绝
    let fs = create_test_quotafs(1);
    let file = create_test_file_with_content(&fs, "only", b"data").unwrap();
    kassert!(used_blocks(&fs) == 1);
    kassert!(file.write_at(0, b"more") == Err(FsError::NoMemory));
});

test_case!(test_quotafs_sparse_write_charges_only_touched_pages, {
    let fs = create_test_quotafs(16);
    let root = fs.root_inode();
    let file = root
        .create("sparse", FileMode::from_bits_truncate(0o644))
        .unwrap();

    file.write_at(10 * PAGE_SIZE, b"tail").unwrap();
    kassert!(used_blocks(&fs) == 1);
    kassert!(file.metadata().unwrap().size == 10 * PAGE_SIZE + 4);

    // 空洞读出为 0
    let mut buf = vec![0xFFu8; 64];
    kassert!(file.read_at(PAGE_SIZE, &mut buf) == Ok(64));
    kassert!(buf.iter().all(|&b| b == 0));
});

test_case!(test_quotafs_write_spanning_pages_charges_each, {
    let fs = create_test_quotafs(16);
    let root = fs.root_inode();
    let file = root
        .create("span", FileMode::from_bits_truncate(0o644))
        .unwrap();

    // 跨越两页边界
    let data = vec![0x11; 200];
    kassert!(file.write_at(PAGE_SIZE - 100, &data) == Ok(200));
    kassert!(used_blocks(&fs) == 2);
});

test_case!(test_quotafs_truncate_refunds_dropped_pages, {
    let fs = create_test_quotafs(8);
    let file = create_test_file_with_content(&fs, "t", &vec![0xEE; 3 * PAGE_SIZE]).unwrap();
    kassert!(used_blocks(&fs) == 3);

    kassert!(file.truncate(100).is_ok());
    kassert!(file.metadata().unwrap().size == 100);
    kassert!(used_blocks(&fs) == 1);

    // 重新扩展后，截断点之后的内容为 0
    kassert!(file.truncate(PAGE_SIZE).is_ok());
    let mut buf = vec![0xFFu8; PAGE_SIZE];
    kassert!(file.read_at(0, &mut buf) == Ok(PAGE_SIZE));
    kassert!(buf[..100].iter().all(|&b| b == 0xEE));
    kassert!(buf[100..].iter().all(|&b| b == 0));
    kassert!(used_blocks(&fs) == 1);

    kassert!(file.truncate(0).is_ok());
    kassert!(used_blocks(&fs) == 0);
});

test_case!(test_quotafs_remove_everything_returns_to_zero, {
    let fs = create_test_quotafs(32);
    let root = fs.root_inode();
    for i in 0..8 {
        let name = format!("file{}", i);
        create_test_file_with_content(&fs, &name, &vec![i as u8; (i + 1) * 1000]).unwrap();
    }
    kassert!(used_blocks(&fs) > 0);

    for i in 0..8 {
        let name = format!("file{}", i);
        kassert!(root.unlink(&name).is_ok());
    }
    kassert!(used_blocks(&fs) == 0);
    kassert!(fs.usage().available == 32);
});
