use std::collections::HashSet;
use std::sync::Mutex;

/// 去重且有上限的结果收集器
///
/// 上限不变量只在 `try_insert` 的临界区内保证：容量检查、去重检查和
/// 插入在同一次加锁中完成，并发写入者不可能把集合撑过上限。
#[derive(Debug)]
pub struct DiscoverySet {
    found: Mutex<HashSet<String>>,
    max_count: Option<usize>,
}

impl DiscoverySet {
    /// 创建收集器，`max_count` 为 None 表示不限制
    pub fn new(max_count: Option<usize>) -> Self {
        DiscoverySet {
            found: Mutex::new(HashSet::new()),
            max_count,
        }
    }

    /// 原子的检查并插入
    ///
    /// 未达上限且名称不存在时插入并返回 true，否则不做任何修改返回
    /// false。达到上限后返回 false 是预期行为，不是错误。
    pub fn try_insert(&self, name: &str) -> bool {
        let mut found = match self.found.lock() {
            Ok(found) => found,
            Err(_) => return false,
        };

        if let Some(max) = self.max_count {
            if found.len() >= max {
                return false;
            }
        }

        if found.contains(name) {
            return false;
        }

        found.insert(name.to_string())
    }

    /// 当前结果数量，供调度循环做粗略的提前退出判断
    pub fn len(&self) -> usize {
        match self.found.lock() {
            Ok(found) => found.len(),
            Err(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 按字典序导出全部结果，应在所有写入者结束后调用
    pub fn snapshot_sorted(&self) -> Vec<String> {
        let mut names: Vec<String> = match self.found.lock() {
            Ok(found) => found.iter().cloned().collect(),
            Err(_) => Vec::new(),
        };
        names.sort();
        names
    }
}
