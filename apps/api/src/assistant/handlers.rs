//! Axum route handlers for the job assistant page and its JSON twin.

use axum::{extract::State, http::StatusCode, response::Html, Form, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::session::{SessionError, SessionId};
use crate::state::AppState;
use crate::ui::{Outcome, PageView, EMPTY_INPUT_WARNING};

pub const SESSION_COOKIE: &str = "job_assistant_session";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SubmitForm {
    #[serde(default)]
    pub job_description: String,
}

/// The session always comes from the cookie, never from the body.
#[derive(Debug, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub response: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Session cookie
// ────────────────────────────────────────────────────────────────────────────

/// Reads the session id from the cookie jar, minting one when absent or malformed.
fn ensure_session(jar: CookieJar) -> (CookieJar, SessionId) {
    if let Some(id) = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| SessionId::parse(cookie.value()))
    {
        return (jar, id);
    }

    let id = SessionId::new();
    let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    (jar.add(cookie), id)
}

/// Runs one conversation turn for `session_id`.
async fn ask(state: &AppState, session_id: SessionId, message: &str) -> Result<String, SessionError> {
    let session = state.sessions.session(session_id).await;
    let started = std::time::Instant::now();
    let reply = session
        .ask(
            state.agents.as_ref(),
            &state.profile,
            &state.config.agent_user_id,
            message,
        )
        .await;

    match &reply {
        Ok(_) => info!(
            "Session {session_id}: agent replied in {}ms",
            started.elapsed().as_millis()
        ),
        Err(e) => warn!("Session {session_id}: request failed: {e}"),
    }
    reply
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /
pub async fn handle_index(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), AppError> {
    let (jar, _) = ensure_session(jar);
    let page = state.renderer.render(&PageView::default())?;
    Ok((jar, Html(page)))
}

/// POST /
///
/// Blank input renders a warning and never touches the session store or the agent
/// service. Service failures are rendered on the page with a matching status code.
pub async fn handle_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SubmitForm>,
) -> Result<(StatusCode, CookieJar, Html<String>), AppError> {
    let (jar, session_id) = ensure_session(jar);

    if form.job_description.trim().is_empty() {
        let page = state.renderer.render(&PageView {
            job_description: form.job_description,
            outcome: Outcome::Warning(EMPTY_INPUT_WARNING.to_string()),
        })?;
        return Ok((StatusCode::OK, jar, Html(page)));
    }

    let (status, outcome) = match ask(&state, session_id, &form.job_description).await {
        Ok(text) => (StatusCode::OK, Outcome::Response(text)),
        Err(e) => {
            let err = AppError::from(e);
            (err.status(), Outcome::Error(err.public_message()))
        }
    };

    let page = state.renderer.render(&PageView {
        job_description: form.job_description,
        outcome,
    })?;
    Ok((status, jar, Html(page)))
}

/// POST /api/v1/assistant/messages
pub async fn handle_message(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<MessageBody>,
) -> Result<(CookieJar, Json<MessageResponse>), AppError> {
    if body.message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    let (jar, session_id) = ensure_session(jar);
    let response = ask(&state, session_id, &body.message).await?;

    Ok((jar, Json(MessageResponse { response })))
}
