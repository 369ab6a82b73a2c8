//! Plain-text rendering of the page: banner, login state, form, list.

use std::fmt::Write as _;

use client_core::BlogApp;
use shared::domain::BlogId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub position: usize,
    pub id: BlogId,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: u64,
    pub deletable: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub banner: String,
    pub username: Option<String>,
    pub form_open: bool,
    pub rows: Vec<Row>,
}

impl Page {
    pub async fn from_app(app: &BlogApp, form_open: bool) -> Self {
        let rows = app
            .blogs
            .display()
            .into_iter()
            .enumerate()
            .map(|(index, blog)| Row {
                position: index + 1,
                id: blog.id.clone(),
                title: blog.title.clone(),
                author: blog.author.clone(),
                url: blog.url.clone(),
                likes: blog.likes,
                deletable: app.can_delete(blog),
            })
            .collect();

        Self {
            banner: app.notifier.text().await,
            username: app.current_user().map(|user| user.username.clone()),
            form_open,
            rows,
        }
    }
}

pub fn render_banner(banner: &str) -> Option<String> {
    if banner.is_empty() {
        None
    } else {
        Some(format!("*** {banner} ***"))
    }
}

pub fn render(page: &Page) -> String {
    let mut out = String::new();
    if let Some(banner) = render_banner(&page.banner) {
        let _ = writeln!(out, "{banner}");
    }

    let Some(username) = &page.username else {
        let _ = writeln!(out, "Log in to application");
        let _ = writeln!(out, "  login <username> [password]");
        return out;
    };

    let _ = writeln!(out, "Blogs");
    let _ = writeln!(out, "{username} logged in");
    if page.form_open {
        let _ = writeln!(out, "[create new] title / author / url  (create | cancel)");
    } else {
        let _ = writeln!(out, "[create blog]  (new)");
    }

    let _ = writeln!(out, "Current blogs");
    if page.rows.is_empty() {
        let _ = writeln!(out, "  (none yet)");
    }
    for row in &page.rows {
        let controls = if row.deletable {
            "[like] [delete]"
        } else {
            "[like]"
        };
        let _ = writeln!(
            out,
            "{:>4}. {} {} - {} likes {controls}",
            format!("#{}", row.position),
            row.title,
            row.author,
            row.likes
        );
        let _ = writeln!(out, "      {} ({})", row.url, row.id);
    }
    out
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
