//! quotafs 生命周期钩子测试

use super::*;
use crate::fs::quotafs::LifecycleEvent;
use crate::vfs::InodeType;
use crate::{kassert, test_case};
use alloc::vec;

test_case!(test_quotafs_hooks_fire_on_create, {
    let (fs, audit) = create_test_quotafs_audited(8);
    // 根目录
    kassert!(audit.created_count() == 1);

    let root = fs.root_inode();
    let file = root
        .create("f", FileMode::from_bits_truncate(0o644))
        .unwrap();
    root.mkdir("d", FileMode::from_bits_truncate(0o755)).unwrap();
    kassert!(audit.created_count() == 3);

    let ino = file.metadata().unwrap().inode_no;
    let events = audit.events();
    kassert!(events.contains(&LifecycleEvent::Created {
        ino,
        inode_type: InodeType::File,
    }));
    kassert!(audit.reclaimed_count() == 0);
});

test_case!(test_quotafs_hooks_not_fired_for_failed_create, {
    let (fs, audit) = create_test_quotafs_audited(8);
    let root = fs.root_inode();
    root.create("dup", FileMode::from_bits_truncate(0o644))
        .unwrap();
    let before = audit.created_count();

    kassert!(root.create("dup", FileMode::from_bits_truncate(0o644)).err()
        == Some(FsError::AlreadyExists));
    kassert!(root.create("", FileMode::from_bits_truncate(0o644)).err()
        == Some(FsError::InvalidArgument));
    kassert!(audit.created_count() == before);
});

test_case!(test_quotafs_hooks_fire_on_reclaim, {
    let (fs, audit) = create_test_quotafs_audited(8);
    let root = fs.root_inode();
    let file = create_test_file_with_content(&fs, "gone", &vec![9; PAGE_SIZE]).unwrap();
    let ino = file.metadata().unwrap().inode_no;

    kassert!(root.unlink("gone").is_ok());
    // 仍有引用，尚未回收
    kassert!(!audit.is_reclaimed(ino));

    drop(file);
    kassert!(audit.is_reclaimed(ino));
    kassert!(audit.events().last()
        == Some(&LifecycleEvent::Reclaimed {
            ino,
            inode_type: InodeType::File,
        }));
});

test_case!(test_quotafs_hooks_rejected_symlink_is_created_and_reclaimed, {
    let (fs, audit) = create_test_quotafs_audited(1);
    let root = fs.root_inode();
    create_test_file_with_content(&fs, "fill", &vec![1; PAGE_SIZE]).unwrap();
    let live = fs.live_inodes();

    kassert!(root.symlink("ln", "/target").err() == Some(FsError::NoMemory));
    kassert!(root.lookup("ln").is_err());
    kassert!(fs.live_inodes() == live);
    kassert!(audit.live_inodes() == live);
    kassert!(audit.reclaimed_count() == 1);
});

test_case!(test_quotafs_hooks_drop_fs_reclaims_everything, {
    let (fs, audit) = create_test_quotafs_audited(8);
    create_test_dir(&fs, "a").unwrap();
    create_test_file_with_content(&fs, "b", b"data").unwrap();
    let sub = fs.root_inode().lookup("a").unwrap();
    sub.create("c", FileMode::from_bits_truncate(0o644))
        .unwrap();
    drop(sub);

    kassert!(audit.live_inodes() == 4);
    drop(fs);
    kassert!(audit.live_inodes() == 0);
    kassert!(audit.created_count() == 4);
    kassert!(audit.reclaimed_count() == 4);
});

test_case!(test_quotafs_hooks_independent_of_ledger, {
    // 钩子在退还之后才触发，二者互不影响
    let (fs, audit) = create_test_quotafs_audited(4);
    let root = fs.root_inode();
    create_test_file_with_content(&fs, "x", &vec![1; 2 * PAGE_SIZE]).unwrap();
    kassert!(used_blocks(&fs) == 2);
    kassert!(root.unlink("x").is_ok());
    kassert!(used_blocks(&fs) == 0);
    kassert!(audit.reclaimed_count() == 1);
});
