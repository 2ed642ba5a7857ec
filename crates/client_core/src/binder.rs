//! Click handling for the message page: like toggles, the compose modal and
//! new-message submission.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use shared::{
    domain::{LikeState, MessageId},
    protocol::{FormBody, HttpRequest},
    selectors::{
        BUTTONS, CLOSE_NEW_MESSAGE_FORM, LIKED_BUTTONS, LIKED_CLASS, LIKES_DISPLAY, MESSAGES_FORM,
        MODAL_BODY, NEW_MESSAGE_FORM, NEW_MESSAGE_LINK, NEW_MESSAGE_REGION, SUBMIT_NEW_POST_ID,
        UNLIKED_CLASS,
    },
};
use tracing::{debug, info, warn};

use crate::{
    dom::{ClickEvent, Document},
    error::BinderError,
    form,
    inflight::InflightGuard,
    transport::HttpTransport,
};

/// What happens to the create-message request relative to the page reload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubmitPolicy {
    /// Dispatch the request, then close and reload without waiting.
    #[default]
    FireAndForget,
    /// Wait for the request; close and reload only if it succeeded.
    AwaitThenReload,
}

impl FromStr for SubmitPolicy {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "fire-and-forget" | "fire_and_forget" => Ok(Self::FireAndForget),
            "await-then-reload" | "await_then_reload" => Ok(Self::AwaitThenReload),
            other => Err(format!(
                "unknown submit policy {other:?} (expected fire-and-forget or await-then-reload)"
            )),
        }
    }
}

impl fmt::Display for SubmitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FireAndForget => f.write_str("fire-and-forget"),
            Self::AwaitThenReload => f.write_str("await-then-reload"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinderOptions {
    pub submit_policy: SubmitPolicy,
    /// Suppress repeated toggles for a message while one is in flight.
    pub dedupe_likes: bool,
}

impl Default for BinderOptions {
    fn default() -> Self {
        Self {
            submit_policy: SubmitPolicy::default(),
            dedupe_likes: true,
        }
    }
}

/// Element handles the binder is attached to.
#[derive(Debug, Clone)]
pub struct PageElements<E> {
    pub likes_display: E,
    pub messages_form: E,
    pub modal_body: E,
    pub new_message_link: E,
    pub new_message_region: E,
}

impl<E> PageElements<E> {
    /// Looks up every bound element once; fails on the first one missing.
    pub fn resolve<D>(doc: &D) -> Result<Self, BinderError>
    where
        D: Document<Element = E>,
    {
        let find = |selector: &'static str| {
            doc.query(selector)
                .ok_or(BinderError::MissingElement(selector))
        };
        Ok(Self {
            likes_display: find(LIKES_DISPLAY)?,
            messages_form: find(MESSAGES_FORM)?,
            modal_body: find(MODAL_BODY)?,
            new_message_link: find(NEW_MESSAGE_LINK)?,
            new_message_region: find(NEW_MESSAGE_REGION)?,
        })
    }
}

/// Work selected by `route_click`, still to be performed.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickAction<E> {
    ToggleLike { button: E },
    LoadComposeForm,
    SubmitNewMessage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LikeOutcome {
    Ignored,
    /// Another toggle for the same message had not settled yet.
    Suppressed { message_id: MessageId },
    Toggled {
        message_id: MessageId,
        state: LikeState,
        likes: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ComposeOutcome {
    Ignored,
    Loaded { bytes: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitOutcome {
    Ignored,
    Submitted { policy: SubmitPolicy },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionOutcome {
    Like(LikeOutcome),
    Compose(ComposeOutcome),
    Submit(SubmitOutcome),
}

pub struct UiEventBinder<D: Document, T> {
    doc: D,
    transport: T,
    page: PageElements<D::Element>,
    options: BinderOptions,
    inflight: InflightGuard,
}

impl<D, T> UiEventBinder<D, T>
where
    D: Document,
    T: HttpTransport,
{
    pub fn new(
        doc: D,
        transport: T,
        page: PageElements<D::Element>,
        options: BinderOptions,
    ) -> Self {
        Self {
            doc,
            transport,
            page,
            options,
            inflight: InflightGuard::new(),
        }
    }

    /// Resolves the page elements from `doc` and binds to them.
    pub fn bind(doc: D, transport: T, options: BinderOptions) -> Result<Self, BinderError> {
        let page = PageElements::resolve(&doc)?;
        info!(
            submit_policy = %options.submit_policy,
            dedupe_likes = options.dedupe_likes,
            "page behavior bound"
        );
        Ok(Self::new(doc, transport, page, options))
    }

    pub fn document(&self) -> &D {
        &self.doc
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn page(&self) -> &PageElements<D::Element> {
        &self.page
    }

    pub fn options(&self) -> BinderOptions {
        self.options
    }

    /// Writes the number of liked buttons into the likes display.
    pub fn update_num_likes(&self) -> usize {
        let likes = self.doc.query_all(LIKED_BUTTONS).len();
        self.doc.set_text(&self.page.likes_display, &likes.to_string());
        likes
    }

    /// Synchronous half of click handling: picks the action for `event` and
    /// prevents its default when there is one.
    ///
    /// Clicks anywhere inside a like button are prevented even though only a
    /// click on the button itself toggles; otherwise a click on the button's
    /// icon would submit `#messages-form` natively.
    pub fn route_click(
        &self,
        event: &ClickEvent<D::Element>,
    ) -> Option<ClickAction<D::Element>> {
        let action = if self.is_compose_click(event) {
            ClickAction::LoadComposeForm
        } else if self.is_inside_like_button(event) {
            event.prevent_default();
            let button = self.like_button(event)?;
            ClickAction::ToggleLike { button }
        } else if self.is_submit_click(event) {
            ClickAction::SubmitNewMessage
        } else {
            return None;
        };
        event.prevent_default();
        Some(action)
    }

    pub async fn perform(
        &self,
        action: ClickAction<D::Element>,
    ) -> Result<ActionOutcome, BinderError> {
        match action {
            ClickAction::ToggleLike { button } => {
                self.toggle_like(&button).await.map(ActionOutcome::Like)
            }
            ClickAction::LoadComposeForm => {
                self.load_compose_form().await.map(ActionOutcome::Compose)
            }
            ClickAction::SubmitNewMessage => {
                self.submit_new_message().await.map(ActionOutcome::Submit)
            }
        }
    }

    pub async fn handle_click(
        &self,
        event: &ClickEvent<D::Element>,
    ) -> Result<Option<ActionOutcome>, BinderError> {
        match self.route_click(event) {
            Some(action) => self.perform(action).await.map(Some),
            None => Ok(None),
        }
    }

    /// Like-toggle listener for clicks inside the message container.
    pub async fn handle_like(
        &self,
        event: &ClickEvent<D::Element>,
    ) -> Result<LikeOutcome, BinderError> {
        if self.is_inside_like_button(event) {
            event.prevent_default();
        }
        let Some(button) = self.like_button(event) else {
            return Ok(LikeOutcome::Ignored);
        };
        self.toggle_like(&button).await
    }

    /// Compose-link listener: loads the new-message form into the modal.
    pub async fn show_new_message(
        &self,
        event: &ClickEvent<D::Element>,
    ) -> Result<ComposeOutcome, BinderError> {
        if !self.is_compose_click(event) {
            return Ok(ComposeOutcome::Ignored);
        }
        event.prevent_default();
        self.load_compose_form().await
    }

    /// New-message region listener: submits only from the submit button.
    pub async fn post_new_message(
        &self,
        event: &ClickEvent<D::Element>,
    ) -> Result<SubmitOutcome, BinderError> {
        if !self.is_submit_click(event) {
            return Ok(SubmitOutcome::Ignored);
        }
        event.prevent_default();
        self.submit_new_message().await
    }

    fn like_button(&self, event: &ClickEvent<D::Element>) -> Option<D::Element> {
        let target = event.target();
        (self.doc.contains(&self.page.messages_form, target) && self.doc.is_button(target))
            .then(|| target.clone())
    }

    /// Whether the click landed on, or inside, a button of the message list.
    fn is_inside_like_button(&self, event: &ClickEvent<D::Element>) -> bool {
        let target = event.target();
        self.doc.contains(&self.page.messages_form, target)
            && self.doc.query_all(BUTTONS).iter().any(|button| {
                self.doc.contains(&self.page.messages_form, button)
                    && self.doc.contains(button, target)
            })
    }

    fn is_compose_click(&self, event: &ClickEvent<D::Element>) -> bool {
        self.doc.contains(&self.page.new_message_link, event.target())
    }

    fn is_submit_click(&self, event: &ClickEvent<D::Element>) -> bool {
        let target = event.target();
        self.doc.contains(&self.page.new_message_region, target)
            && self.doc.id(target).as_deref() == Some(SUBMIT_NEW_POST_ID)
    }

    async fn toggle_like(&self, button: &D::Element) -> Result<LikeOutcome, BinderError> {
        let message_id: MessageId = self.doc.id(button).unwrap_or_default().parse()?;

        let ticket = if self.options.dedupe_likes {
            let Some(ticket) = self.inflight.acquire(message_id) else {
                debug!(%message_id, "like toggle already in flight; ignoring click");
                return Ok(LikeOutcome::Suppressed { message_id });
            };
            self.doc.set_disabled(button, true);
            Some(ticket)
        } else {
            None
        };

        let result = self.transport.send(HttpRequest::toggle_like(message_id)).await;
        if let Some(ticket) = ticket {
            self.doc.set_disabled(button, false);
            drop(ticket);
        }
        if let Err(err) = result {
            warn!(%message_id, "like toggle failed; button left unchanged: {err}");
            return Err(err.into());
        }

        self.doc.toggle_class(button, LIKED_CLASS);
        self.doc.toggle_class(button, UNLIKED_CLASS);
        let likes = self.update_num_likes();
        let state = LikeState::from_liked(self.doc.has_class(button, LIKED_CLASS));
        info!(%message_id, ?state, likes, "like toggled");
        Ok(LikeOutcome::Toggled {
            message_id,
            state,
            likes,
        })
    }

    async fn load_compose_form(&self) -> Result<ComposeOutcome, BinderError> {
        let response = self
            .transport
            .send(HttpRequest::new_message_form())
            .await
            .map_err(|err| {
                warn!("loading new-message form failed: {err}");
                err
            })?;
        self.doc.set_inner_html(&self.page.modal_body, &response.body);
        debug!(bytes = response.body.len(), "new-message form loaded");
        Ok(ComposeOutcome::Loaded {
            bytes: response.body.len(),
        })
    }

    async fn submit_new_message(&self) -> Result<SubmitOutcome, BinderError> {
        let body = match self.doc.query(NEW_MESSAGE_FORM) {
            Some(form) => form::serialize(&self.doc.form_controls(&form)),
            None => {
                warn!(
                    selector = NEW_MESSAGE_FORM,
                    "new-message form missing; posting empty body"
                );
                FormBody::empty()
            }
        };
        let request = HttpRequest::create_message(body);
        let policy = self.options.submit_policy;

        match policy {
            SubmitPolicy::FireAndForget => self.transport.dispatch(request),
            SubmitPolicy::AwaitThenReload => {
                self.transport.send(request).await.map_err(|err| {
                    warn!("creating message failed; keeping the modal open: {err}");
                    err
                })?;
            }
        }

        match self.doc.query(CLOSE_NEW_MESSAGE_FORM) {
            Some(close) => self.doc.click(&close),
            None => warn!(selector = CLOSE_NEW_MESSAGE_FORM, "close control missing"),
        }
        self.doc.reload();
        info!(%policy, "new message submitted; page reloading");
        Ok(SubmitOutcome::Submitted { policy })
    }
}

#[cfg(test)]
#[path = "tests/binder_tests.rs"]
mod tests;
