//! The toggle-able create blog form.

use client_core::{BlogApp, ClientError};
use shared::domain::{Blog, BlogDraft};

#[derive(Debug, Default)]
pub struct CreateForm {
    open: bool,
}

impl CreateForm {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Closes the form before the request goes out; it stays closed whatever
    /// the outcome. Errors are already on the banner.
    pub async fn submit(
        &mut self,
        app: &mut BlogApp,
        draft: &BlogDraft,
    ) -> Result<Blog, ClientError> {
        self.close();
        app.create(draft).await
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
