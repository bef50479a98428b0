use std::time::Instant;

use askama::Template;

use crate::application::error::AppError;
use crate::application::page::Page;
use crate::application::posts::{PostCard, PostListState};
use crate::config::OutputFormat;
use crate::domain::role::{ListId, SectionId};

#[derive(Template)]
#[template(path = "page.txt", escape = "none")]
pub struct PageTemplate {
    pub view: PageView,
}

#[derive(Debug, Clone)]
pub struct PageView {
    pub theme: &'static str,
    pub toggle_label: &'static str,
    pub toasts: Vec<ToastLine>,
    pub welcome: Option<String>,
    pub logout_visible: bool,
    pub section_id: &'static str,
    pub section_title: &'static str,
    pub login_prompt: bool,
    pub lists: Vec<ListView>,
    pub form: Option<FormView>,
}

#[derive(Debug, Clone)]
pub struct ToastLine {
    pub kind: &'static str,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct ListView {
    pub element_id: &'static str,
    pub notice: Option<String>,
    pub cards: Vec<CardView>,
}

#[derive(Debug, Clone)]
pub struct CardView {
    pub title: String,
    pub content: String,
    pub byline: String,
    pub delete: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FormView {
    pub title: String,
    pub content: String,
    pub class_id: String,
}

impl PageView {
    pub fn from_page(page: &Page, now: Instant) -> Self {
        let section = page.visible_section;
        let toasts = page
            .toasts
            .visible(now)
            .map(|toast| ToastLine {
                kind: toast.kind.as_str(),
                text: toast.text.clone(),
            })
            .collect();
        let lists = page
            .post_lists
            .iter()
            .map(|(list, state)| ListView::from_state(*list, state))
            .collect();
        let form = (section == SectionId::TeacherDashboard).then(|| FormView {
            title: page.post_form.title.clone(),
            content: page.post_form.content.clone(),
            class_id: page
                .post_form
                .class_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
        });

        Self {
            theme: page.theme.as_str(),
            toggle_label: page.theme_toggle_label,
            toasts,
            welcome: page.header_visible.then(|| page.welcome.clone()).flatten(),
            logout_visible: page.logout_visible,
            section_id: section.element_id(),
            section_title: section.title(),
            login_prompt: section == SectionId::Login,
            lists,
            form,
        }
    }
}

impl ListView {
    fn from_state(list: ListId, state: &PostListState) -> Self {
        Self {
            element_id: list.element_id(),
            notice: state.notice().map(str::to_string),
            cards: state.cards().iter().map(CardView::from_card).collect(),
        }
    }
}

impl CardView {
    fn from_card(card: &PostCard) -> Self {
        Self {
            title: card.title.clone(),
            content: card.content.clone(),
            byline: card.byline(),
            delete: card
                .delete
                .map(|control| format!("[{} #{}]", control.label, control.post_id)),
        }
    }
}

pub fn render_template<T: Template>(template: T) -> Result<String, AppError> {
    template
        .render()
        .map_err(|err| AppError::render(format!("template rendering failed: {err}")))
}

pub fn render_text(page: &Page) -> Result<String, AppError> {
    render_template(PageTemplate {
        view: PageView::from_page(page, Instant::now()),
    })
}

pub fn render_json(page: &Page) -> Result<String, AppError> {
    serde_json::to_string_pretty(page)
        .map_err(|err| AppError::render(format!("failed to serialize page: {err}")))
}

pub fn render_page(page: &Page, format: OutputFormat) -> Result<String, AppError> {
    match format {
        OutputFormat::Text => render_text(page),
        OutputFormat::Json => render_json(page),
    }
}
