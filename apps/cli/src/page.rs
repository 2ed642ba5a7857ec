//! Page skeleton satisfying the selector contract, built in memory.

use client_core::{Document, ElementSpec, MemoryDocument, NodeId};
use serde::Serialize;
use shared::selectors::{LIKED_CLASS, SUBMIT_NEW_POST_ID, UNLIKED_CLASS};

pub struct PageSkeleton {
    pub doc: MemoryDocument,
    likes: NodeId,
    modal: NodeId,
    close: NodeId,
    like_buttons: Vec<NodeId>,
    pub compose_link: NodeId,
    pub submit: NodeId,
}

#[derive(Debug, Serialize)]
pub struct PageSnapshot {
    pub likes: String,
    pub liked_buttons: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modal_html: Option<String>,
    pub modal_closed: bool,
    pub reloads: usize,
}

impl PageSkeleton {
    /// `buttons` are `(button id, liked)` pairs; `fields` fill the new-message form.
    pub fn build(buttons: &[(String, bool)], fields: &[(String, String)]) -> Self {
        let doc = MemoryDocument::new();
        let body = doc.body();

        let likes = doc.append(body, ElementSpec::new("a").id("likes"));
        let messages = doc.append(body, ElementSpec::new("form").id("messages-form"));
        let like_buttons = buttons
            .iter()
            .map(|(id, liked)| {
                let class = if *liked { LIKED_CLASS } else { UNLIKED_CLASS };
                doc.append(
                    messages,
                    ElementSpec::new("button").id(id.as_str()).class("btn").class(class),
                )
            })
            .collect();

        let compose_link = doc.append(body, ElementSpec::new("a").id("new-msg-link"));
        let modal = doc.append(body, ElementSpec::new("div").class("modal-half"));
        let region = doc.append(body, ElementSpec::new("div").class("new-msg-form"));
        let form = doc.append(region, ElementSpec::new("form").id("new-msg-form"));
        for (name, value) in fields {
            doc.append(
                form,
                ElementSpec::new("input")
                    .attr("name", name.as_str())
                    .attr("value", value.as_str()),
            );
        }
        let submit = doc.append(form, ElementSpec::new("button").id(SUBMIT_NEW_POST_ID));
        let close = doc.append(region, ElementSpec::new("button").id("close-new-msg-form"));

        let page = Self {
            doc,
            likes,
            modal,
            close,
            like_buttons,
            compose_link,
            submit,
        };
        let initial = page.doc.query_all(shared::selectors::LIKED_BUTTONS).len();
        page.doc.set_text(&page.likes, &initial.to_string());
        page
    }

    pub fn like_button(&self, index: usize) -> Option<NodeId> {
        self.like_buttons.get(index).copied()
    }

    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            likes: self.doc.text(self.likes),
            liked_buttons: self
                .like_buttons
                .iter()
                .filter(|button| self.doc.has_class(button, LIKED_CLASS))
                .filter_map(|button| self.doc.id(button))
                .collect(),
            modal_html: self.doc.inner_html(self.modal),
            modal_closed: self.doc.clicks().contains(&self.close),
            reloads: self.doc.reload_count(),
        }
    }
}

#[cfg(test)]
#[path = "tests/page_tests.rs"]
mod tests;
