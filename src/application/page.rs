//! The page as a value: what a browser would show, without a browser.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::role::{ListId, SectionId};
use crate::domain::theme::Theme;

use super::posts::PostListState;
use super::toast::ToastStack;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostForm {
    pub title: String,
    pub content: String,
    pub class_id: Option<u64>,
}

impl PostForm {
    pub fn is_blank(&self) -> bool {
        self.title.is_empty() && self.content.is_empty() && self.class_id.is_none()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub theme: Theme,
    pub theme_toggle_label: &'static str,
    pub visible_section: SectionId,
    pub header_visible: bool,
    pub logout_visible: bool,
    pub welcome: Option<String>,
    pub post_lists: BTreeMap<ListId, PostListState>,
    pub post_form: PostForm,
    pub toasts: ToastStack,
}

impl Page {
    /// A freshly loaded page: login section only.
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            theme_toggle_label: theme.toggle_label(),
            visible_section: SectionId::Login,
            header_visible: false,
            logout_visible: false,
            welcome: None,
            post_lists: BTreeMap::new(),
            post_form: PostForm::default(),
            toasts: ToastStack::default(),
        }
    }

    /// Hide every section, then show `section`. Lists of hidden sections go
    /// with them.
    pub fn show_only(&mut self, section: SectionId) {
        self.visible_section = section;
        let visible = section.list();
        self.post_lists.retain(|list, _| Some(*list) == visible);
    }

    pub fn is_visible(&self, section: SectionId) -> bool {
        self.visible_section == section
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.theme_toggle_label = theme.toggle_label();
    }

    /// Replace everything previously shown in `list`. A list outside the
    /// visible section has nowhere to be shown and is dropped.
    pub fn set_list(&mut self, list: ListId, state: PostListState) {
        if self.visible_section.list() == Some(list) {
            self.post_lists.insert(list, state);
        }
    }

    pub fn list(&self, list: ListId) -> Option<&PostListState> {
        self.post_lists.get(&list)
    }
}
