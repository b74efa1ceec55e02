//! LocalStorage 封装模块
//!
//! `KeyValueStore` 抽象出键值存储，浏览器实现通过 `gloo-storage` 的原始句柄
//! 原样读写字符串（不做 JSON 包装），测试使用内存实现。

#[cfg(test)]
use std::{cell::RefCell, collections::HashMap, rc::Rc};

use gloo_storage::{LocalStorage, Storage};

use crate::logging::log_warn;

/// 键值存储特性
///
/// 写入失败只记录日志，不向调用方传播：持久化失败不应阻断界面。
pub trait KeyValueStore {
    /// 获取存储的字符串值，键不存在或发生错误时返回 `None`
    fn get(&self, key: &str) -> Option<String>;

    /// 设置存储值
    fn set(&self, key: &str, value: &str);

    /// 删除存储的键值对
    fn remove(&self, key: &str);
}

/// 浏览器 LocalStorage
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = LocalStorage::raw().set_item(key, value) {
            log_warn!("[Storage] failed to write {}: {:?}", key, e);
        }
    }

    fn remove(&self, key: &str) {
        if let Err(e) = LocalStorage::raw().remove_item(key) {
            log_warn!("[Storage] failed to remove {}: {:?}", key, e);
        }
    }
}

/// 内存存储（克隆后共享同一份数据）
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}
