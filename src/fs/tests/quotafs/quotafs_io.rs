//! quotafs 读写路径测试

use super::*;
use crate::{kassert, test_case};
use alloc::vec;

test_case!(test_quotafs_small_write_zeroes_page_tail, {
    let fs = create_test_quotafs(4);
    let file = create_test_file_with_content(&fs, "small", &[0x7F; 100]).unwrap();

    kassert!(used_blocks(&fs) == 1);
    kassert!(file.metadata().unwrap().size == 100);

    // 扩展到整页后，100 之后的内容必须为 0
    file.write_at(PAGE_SIZE - 1, b"!").unwrap();
    kassert!(used_blocks(&fs) == 1);

    let mut buf = vec![0xAAu8; PAGE_SIZE];
    kassert!(file.read_at(0, &mut buf) == Ok(PAGE_SIZE));
    kassert!(buf[..100].iter().all(|&b| b == 0x7F));
    kassert!(buf[100..PAGE_SIZE - 1].iter().all(|&b| b == 0));
    kassert!(buf[PAGE_SIZE - 1] == b'!');
});

test_case!(test_quotafs_short_copy_zero_fills_gap, {
    let fs = create_test_quotafs(4);
    let file = create_test_file_with_content(&fs, "full", &vec![0xFF; PAGE_SIZE]).unwrap();
    let inode = as_quota(&file);

    // 计划写 20 字节，只拷贝了 5 字节
    let mut ctx = inode.write_begin(10, 20).unwrap();
    kassert!(ctx.write_len() == 20);
    kassert!(ctx.copy_from(b"hello") == 5);
    kassert!(inode.write_end(ctx, 5) == 5);

    let mut buf = vec![0u8; 64];
    file.read_at(0, &mut buf).unwrap();
    kassert!(buf[..10].iter().all(|&b| b == 0xFF));
    kassert!(&buf[10..15] == b"hello");
    kassert!(buf[15..30].iter().all(|&b| b == 0));
    kassert!(buf[30..].iter().all(|&b| b == 0xFF));

    kassert!(file.metadata().unwrap().size == PAGE_SIZE);
    kassert!(used_blocks(&fs) == 1);
});

test_case!(test_quotafs_short_copy_on_fresh_page, {
    let fs = create_test_quotafs(4);
    let root = fs.root_inode();
    let file = root
        .create("fresh", FileMode::from_bits_truncate(0o644))
        .unwrap();
    let inode = as_quota(&file);

    let mut ctx = inode.write_begin(100, 50).unwrap();
    kassert!(ctx.page_index() == 0);
    kassert!(ctx.copy_from(&[0x42; 10]) == 10);
    kassert!(inode.write_end(ctx, 10) == 10);

    // 文件大小只扩展到实际拷贝的末尾
    kassert!(file.metadata().unwrap().size == 110);
    kassert!(inode.charged_pages() == 1);

    let mut buf = vec![0xAAu8; 110];
    kassert!(file.read_at(0, &mut buf) == Ok(110));
    kassert!(buf[..100].iter().all(|&b| b == 0));
    kassert!(buf[100..].iter().all(|&b| b == 0x42));
});

test_case!(test_quotafs_abandoned_copy_is_zeroed_by_next_write, {
    let fs = create_test_quotafs(4);
    let root = fs.root_inode();
    let file = root
        .create("abandoned", FileMode::from_bits_truncate(0o644))
        .unwrap();
    let inode = as_quota(&file);

    // 拷贝之后放弃，不调用 write_end：页留在缓存中但既不是 uptodate 也不是 dirty
    let mut ctx = inode.write_begin(0, 64).unwrap();
    kassert!(ctx.copy_from(&[0xEE; 64]) == 64);
    drop(ctx);
    kassert!(inode.resident_pages() == 1);
    kassert!(used_blocks(&fs) == 0);
    kassert!(file.metadata().unwrap().size == 0);

    // 下一次部分写入必须把写入区域之外的旧内容清零
    kassert!(file.write_at(100, b"x") == Ok(1));
    kassert!(file.metadata().unwrap().size == 101);
    kassert!(used_blocks(&fs) == 1);

    let mut buf = vec![0xAAu8; 101];
    kassert!(file.read_at(0, &mut buf) == Ok(101));
    kassert!(buf[..100].iter().all(|&b| b == 0));
    kassert!(buf[100] == b'x');
});

test_case!(test_quotafs_write_begin_rejected_leaves_no_page, {
    let fs = create_test_quotafs(1);
    create_test_file_with_content(&fs, "a", b"x").unwrap();

    let root = fs.root_inode();
    let file = root
        .create("b", FileMode::from_bits_truncate(0o644))
        .unwrap();
    let inode = as_quota(&file);
    kassert!(inode.write_begin(0, 10).err() == Some(FsError::NoMemory));
    kassert!(inode.resident_pages() == 0);
    kassert!(inode.charged_pages() == 0);
});

test_case!(test_quotafs_write_begin_rejects_cross_page_range, {
    let fs = create_test_quotafs(4);
    let file = create_test_file_with_content(&fs, "f", b"").unwrap();
    let inode = as_quota(&file);
    kassert!(inode.write_begin(PAGE_SIZE - 10, 20).err() == Some(FsError::InvalidArgument));
    kassert!(inode.write_begin(0, 0).err() == Some(FsError::InvalidArgument));
    kassert!(used_blocks(&fs) == 0);
});

test_case!(test_quotafs_random_access, {
    let fs = create_test_quotafs_default();
    let inode = create_test_file_with_content(&fs, "test.txt", b"0123456789").unwrap();

    let mut buf = vec![0u8; 5];
    kassert!(inode.read_at(3, &mut buf) == Ok(5));
    kassert!(&buf[..] == b"34567");

    inode.write_at(5, b"XXXXX").unwrap();

    let mut buf = vec![0u8; 10];
    inode.read_at(0, &mut buf).unwrap();
    kassert!(&buf[..] == b"01234XXXXX");
});

test_case!(test_quotafs_read_past_eof, {
    let fs = create_test_quotafs_default();
    let inode = create_test_file_with_content(&fs, "eof", b"abc").unwrap();

    let mut buf = vec![0u8; 16];
    kassert!(inode.read_at(3, &mut buf) == Ok(0));
    kassert!(inode.read_at(100, &mut buf) == Ok(0));
    kassert!(inode.read_at(1, &mut buf) == Ok(2));
    kassert!(&buf[..2] == b"bc");
});

test_case!(test_quotafs_large_write_read_back, {
    let fs = create_test_quotafs_default();
    let root = fs.root_inode();
    let file = root
        .create("large", FileMode::from_bits_truncate(0o644))
        .unwrap();

    let data: alloc::vec::Vec<u8> = (0..5 * PAGE_SIZE + 123).map(|i| (i % 251) as u8).collect();
    kassert!(file.write_at(0, &data) == Ok(data.len()));
    kassert!(used_blocks(&fs) == 6);

    let mut buf = vec![0u8; data.len()];
    kassert!(file.read_at(0, &mut buf) == Ok(data.len()));
    kassert!(buf == data);
});

test_case!(test_quotafs_empty_write_is_noop, {
    let fs = create_test_quotafs(4);
    let file = create_test_file_with_content(&fs, "e", b"").unwrap();
    kassert!(file.write_at(0, &[]) == Ok(0));
    kassert!(file.metadata().unwrap().size == 0);
    kassert!(used_blocks(&fs) == 0);
});

test_case!(test_quotafs_write_on_directory_rejected, {
    let fs = create_test_quotafs(4);
    let dir = create_test_dir(&fs, "d").unwrap();
    kassert!(dir.write_at(0, b"x") == Err(FsError::IsDirectory));
    let mut buf = [0u8; 4];
    kassert!(dir.read_at(0, &mut buf) == Err(FsError::IsDirectory));
    kassert!(dir.truncate(0) == Err(FsError::IsDirectory));
});
