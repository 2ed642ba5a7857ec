//! Page behavior layer for the message page.
//!
//! `UiEventBinder` turns clicks into HTTP calls and local DOM updates. The
//! page and the network are reached only through the [`Document`] and
//! [`HttpTransport`] seams, so the same binder drives the browser (see the
//! `web` app), the headless CLI and the tests.

pub mod binder;
pub mod dom;
pub mod error;
pub mod form;
pub mod inflight;
pub mod memory;
pub mod transport;

pub use binder::{
    ActionOutcome, BinderOptions, ClickAction, ComposeOutcome, LikeOutcome, PageElements,
    SubmitOutcome, SubmitPolicy, UiEventBinder,
};
pub use dom::{ClickEvent, Document};
pub use error::{BinderError, TransportError};
pub use form::{ControlKind, FormControl};
pub use memory::{ElementSpec, MemoryDocument, NodeId};
pub use transport::{HttpTransport, ReqwestTransport};
