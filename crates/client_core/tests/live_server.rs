//! Drives the binder through `ReqwestTransport` against an in-process server.

use std::time::Duration;

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
    Router,
};
use client_core::{
    ActionOutcome, BinderError, BinderOptions, ClickEvent, ComposeOutcome, Document, ElementSpec,
    LikeOutcome, MemoryDocument, NodeId, ReqwestTransport, SubmitOutcome, SubmitPolicy,
    UiEventBinder,
};
use shared::domain::{LikeState, MessageId};
use tokio::{
    net::TcpListener,
    sync::mpsc,
};

const FORM_HTML: &str = r#"<form id="new-msg-form"><textarea name="text"></textarea><button id="submit-new-post">Add my message!</button></form>"#;

#[derive(Debug, PartialEq, Eq)]
enum Seen {
    Like(i64),
    Create { content_type: String, body: String },
}

#[derive(Clone)]
struct ServerState {
    seen: mpsc::UnboundedSender<Seen>,
    create_delay: Option<Duration>,
}

async fn toggle_like(State(state): State<ServerState>, Path(id): Path<i64>) -> StatusCode {
    if id == 500 {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    let _ = state.seen.send(Seen::Like(id));
    StatusCode::OK
}

async fn new_message_form() -> Html<&'static str> {
    Html(FORM_HTML)
}

async fn create_message(
    State(state): State<ServerState>,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    if let Some(delay) = state.create_delay {
        tokio::time::sleep(delay).await;
    }
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let _ = state.seen.send(Seen::Create { content_type, body });
    Redirect::to("/users/1")
}

async fn user_page() -> Html<&'static str> {
    Html("<html></html>")
}

async fn spawn_page_server(
    create_delay: Option<Duration>,
) -> Result<(String, mpsc::UnboundedReceiver<Seen>)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (tx, rx) = mpsc::unbounded_channel();
    let state = ServerState {
        seen: tx,
        create_delay,
    };
    let app = Router::new()
        .route("/messages/:id/like", post(toggle_like))
        .route("/messages/new", get(new_message_form).post(create_message))
        .route("/users/:id", get(user_page))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), rx))
}

struct Page {
    doc: MemoryDocument,
    likes: NodeId,
    unliked: NodeId,
    failing: NodeId,
    modal: NodeId,
    link: NodeId,
    submit: NodeId,
    close: NodeId,
}

fn build_page() -> Page {
    let doc = MemoryDocument::new();
    let body = doc.body();
    let likes = doc.append(body, ElementSpec::new("a").id("likes").text("0"));
    let messages = doc.append(body, ElementSpec::new("form").id("messages-form"));
    let unliked = doc.append(
        messages,
        ElementSpec::new("button").id("42").class("btn-secondary"),
    );
    let failing = doc.append(
        messages,
        ElementSpec::new("button").id("500").class("btn-secondary"),
    );
    let link = doc.append(body, ElementSpec::new("a").id("new-msg-link"));
    let modal = doc.append(body, ElementSpec::new("div").class("modal-half"));
    let region = doc.append(body, ElementSpec::new("div").class("new-msg-form"));
    let form = doc.append(region, ElementSpec::new("form").id("new-msg-form"));
    doc.append(
        form,
        ElementSpec::new("textarea")
            .attr("name", "text")
            .text("Hello from the other side"),
    );
    let submit = doc.append(form, ElementSpec::new("button").id("submit-new-post"));
    let close = doc.append(region, ElementSpec::new("button").id("close-new-msg-form"));
    Page {
        doc,
        likes,
        unliked,
        failing,
        modal,
        link,
        submit,
        close,
    }
}

fn bind(
    page: &Page,
    server_url: &str,
    options: BinderOptions,
) -> UiEventBinder<MemoryDocument, ReqwestTransport> {
    let transport = ReqwestTransport::new(server_url).expect("transport");
    UiEventBinder::bind(page.doc.clone(), transport, options).expect("bind")
}

#[tokio::test]
async fn like_round_trip_against_live_server() {
    let (server_url, mut seen) = spawn_page_server(None).await.expect("spawn server");
    let page = build_page();
    let binder = bind(&page, &server_url, BinderOptions::default());

    let outcome = binder
        .handle_click(&ClickEvent::new(page.unliked))
        .await
        .expect("like");

    assert_eq!(seen.recv().await, Some(Seen::Like(42)));
    assert_eq!(
        outcome,
        Some(ActionOutcome::Like(LikeOutcome::Toggled {
            message_id: MessageId(42),
            state: LikeState::Liked,
            likes: 1,
        }))
    );
    assert_eq!(page.doc.text(page.likes), "1");
}

#[tokio::test]
async fn server_error_surfaces_and_leaves_button_alone() {
    let (server_url, _seen) = spawn_page_server(None).await.expect("spawn server");
    let page = build_page();
    let binder = bind(&page, &server_url, BinderOptions::default());

    let err = binder
        .handle_like(&ClickEvent::new(page.failing))
        .await
        .expect_err("must fail");

    match err {
        BinderError::Transport(err) => assert_eq!(err.status(), Some(500)),
        other => panic!("unexpected error: {other}"),
    }
    assert!(page.doc.has_class(&page.failing, "btn-secondary"));
    assert_eq!(page.doc.text(page.likes), "0");
}

#[tokio::test]
async fn compose_inserts_server_fragment_verbatim() {
    let (server_url, _seen) = spawn_page_server(None).await.expect("spawn server");
    let page = build_page();
    let binder = bind(&page, &server_url, BinderOptions::default());

    let outcome = binder
        .show_new_message(&ClickEvent::new(page.link))
        .await
        .expect("compose");

    assert_eq!(
        outcome,
        ComposeOutcome::Loaded {
            bytes: FORM_HTML.len()
        }
    );
    assert_eq!(page.doc.inner_html(page.modal).as_deref(), Some(FORM_HTML));
}

#[tokio::test]
async fn fire_and_forget_reloads_before_the_server_sees_the_post() {
    let (server_url, mut seen) =
        spawn_page_server(Some(Duration::from_millis(200)))
            .await
            .expect("spawn server");
    let page = build_page();
    let binder = bind(&page, &server_url, BinderOptions::default());

    let outcome = binder
        .post_new_message(&ClickEvent::new(page.submit))
        .await
        .expect("submit");

    assert_eq!(
        outcome,
        SubmitOutcome::Submitted {
            policy: SubmitPolicy::FireAndForget
        }
    );
    assert_eq!(page.doc.reload_count(), 1);
    assert_eq!(page.doc.clicks(), vec![page.close]);
    assert!(seen.try_recv().is_err());

    binder.transport().flush().await;
    assert_eq!(
        seen.recv().await,
        Some(Seen::Create {
            content_type: "application/x-www-form-urlencoded".to_string(),
            body: "text=Hello+from+the+other+side".to_string(),
        })
    );
}

#[tokio::test]
async fn await_then_reload_follows_the_redirect() {
    let (server_url, mut seen) = spawn_page_server(None).await.expect("spawn server");
    let page = build_page();
    let options = BinderOptions {
        submit_policy: SubmitPolicy::AwaitThenReload,
        ..BinderOptions::default()
    };
    let binder = bind(&page, &server_url, options);

    binder
        .post_new_message(&ClickEvent::new(page.submit))
        .await
        .expect("submit");

    assert!(matches!(seen.try_recv(), Ok(Seen::Create { .. })));
    assert_eq!(page.doc.reload_count(), 1);
}
