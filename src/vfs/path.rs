//! 路径处理工具
use alloc::string::String;
use alloc::vec::Vec;

/// 规范化路径：合并重复的 `/`，处理 `.` 和 `..`，结果总是绝对路径
pub fn normalize_path(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            p => parts.push(p),
        }
    }

    let mut result = String::from("/");
    result.push_str(&parts.join("/"));
    result
}

/// 拆分为 (父目录, 文件名)
pub fn split_path(path: &str) -> (String, String) {
    let normalized = normalize_path(path);
    match normalized.rfind('/') {
        Some(0) => (String::from("/"), String::from(&normalized[1..])),
        Some(pos) => (
            String::from(&normalized[..pos]),
            String::from(&normalized[pos + 1..]),
        ),
        None => (String::from("/"), normalized),
    }
}

/// `prefix` 是否为 `path` 的路径前缀（按组件比较）
pub fn is_path_prefix(prefix: &str, path: &str) -> bool {
    if prefix == "/" {
        return path.starts_with('/');
    }
    path == prefix || (path.starts_with(prefix) && path[prefix.len()..].starts_with('/'))
}
