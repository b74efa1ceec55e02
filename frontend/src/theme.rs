//! 主题模块
//!
//! 亮/暗主题偏好，持久化在 `theme-v2` 键下，并同步到
//! `<html data-theme="...">`。

use core::fmt;

use leptos::prelude::*;
use promanager_shared::STORAGE_THEME_KEY;

use crate::logging::log_warn;
use crate::web::{BrowserStorage, KeyValueStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// 解析存储值，未知值回退为亮色
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ThemeStore<S> {
    storage: S,
}

impl<S: KeyValueStore> ThemeStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn load(&self) -> Theme {
        Theme::parse(self.storage.get(STORAGE_THEME_KEY).as_deref())
    }

    pub fn save(&self, theme: Theme) {
        self.storage.set(STORAGE_THEME_KEY, theme.as_str());
    }
}

/// 主题上下文
#[derive(Clone, Copy)]
pub struct ThemeContext {
    theme: RwSignal<Theme>,
}

impl ThemeContext {
    /// 读取已保存的主题，并在每次变化时持久化和应用到文档
    pub fn new() -> Self {
        let store = ThemeStore::new(BrowserStorage);
        let theme = RwSignal::new(store.load());

        Effect::new(move |_| {
            let current = theme.get();
            apply_to_document(current);
            store.save(current);
        });

        Self { theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme.get()
    }

    pub fn toggle(&self) {
        self.theme.update(|theme| *theme = theme.toggled());
    }
}

impl Default for ThemeContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_theme() -> ThemeContext {
    use_context::<ThemeContext>().expect("ThemeContext should be provided")
}

fn apply_to_document(theme: Theme) {
    let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };
    if let Err(e) = root.set_attribute("data-theme", theme.as_str()) {
        log_warn!("[Theme] failed to apply theme: {:?}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::MemoryStorage;

    #[test]
    fn test_toggle_is_an_involution() {
        for theme in [Theme::Light, Theme::Dark] {
            assert_ne!(theme.toggled(), theme);
            assert_eq!(theme.toggled().toggled(), theme);
        }
    }

    #[test]
    fn test_parse_falls_back_to_light() {
        assert_eq!(Theme::parse(Some("dark")), Theme::Dark);
        assert_eq!(Theme::parse(Some("light")), Theme::Light);
        assert_eq!(Theme::parse(Some("solarized")), Theme::Light);
        assert_eq!(Theme::parse(None), Theme::Light);
    }

    #[test]
    fn test_store_persists_toggled_value() {
        let storage = MemoryStorage::new();
        let store = ThemeStore::new(storage.clone());
        assert_eq!(store.load(), Theme::Light);

        let next = store.load().toggled();
        store.save(next);
        assert_eq!(storage.get(STORAGE_THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(store.load(), Theme::Dark);

        store.save(store.load().toggled());
        assert_eq!(store.load(), Theme::Light);
    }
}
