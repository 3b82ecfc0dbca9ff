//! Serve command - runs the Jotter web server.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use axum::{
    Form, Json, Router,
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use signal_hook::flag as signal_flag;
use tower_cookies::{Cookie, CookieManagerLayer, Cookies};
use tracing_subscriber::EnvFilter;

use jotter::{
    Identity, Instance, NoteId, User,
    backend::{InMemory, Sqlite},
    validation::validate_login,
};

use crate::backend::{create_backend, snapshot_path};
use crate::cli::ServeArgs;
use crate::session::{Flash, SessionStore, SessionToken};
use crate::templates;

const SESSION_COOKIE: &str = "jotter_session";

/// Shared application state
#[derive(Clone)]
struct AppState {
    instance: Instance,
    sessions: SessionStore,
}

/// Sign-up form data
#[derive(Deserialize)]
struct SignUpForm {
    #[serde(default)]
    email: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    password: String,
    #[serde(default, rename = "confirm-password")]
    confirm_password: String,
}

/// Login form data
#[derive(Deserialize)]
struct LoginForm {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Deserialize)]
struct HomeQuery {
    new_user: Option<String>,
}

#[derive(Deserialize)]
struct AddNoteForm {
    #[serde(default)]
    note: String,
}

#[derive(Deserialize)]
struct EditNoteForm {
    #[serde(default, rename = "noteId")]
    note_id: String,
    #[serde(default)]
    note: String,
}

#[derive(Deserialize)]
struct DeleteNoteRequest {
    #[serde(rename = "noteId")]
    note_id: NoteId,
}

/// Run the Jotter server
pub async fn run(args: &ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("jotter=info".parse()?))
        .init();

    let backend_box = create_backend(args).await?;
    let instance = Instance::open(backend_box);

    let app = router(instance.clone(), SessionStore::new());

    // Bind server
    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        backend = instance.backend().kind(),
        "Jotter listening on http://{local_addr}"
    );
    println!("Jotter started on http://{local_addr}");
    println!();
    println!("Available endpoints:");
    println!("  GET/POST /sign-up      - Create an account");
    println!("  GET/POST /login        - Sign in");
    println!("  GET      /logout       - Sign out");
    println!("  GET/POST /             - List and add notes (requires login)");
    println!("  POST     /edit-note    - Edit a note (requires login)");
    println!("  POST     /delete-note  - Delete a note (requires login)");
    println!("  GET      /health       - Health check");
    println!();
    println!("Press Ctrl+C to shutdown");

    // Set up graceful shutdown signal handling
    let term_signal = Arc::new(AtomicBool::new(false));
    for signal in signal_hook::consts::TERM_SIGNALS {
        signal_flag::register(*signal, Arc::clone(&term_signal))?;
    }
    let data_dir = args.data_dir.clone();

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            // Wait for shutdown signal
            while !term_signal.load(Ordering::Relaxed) {
                tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
            }

            tracing::info!("Shutdown signal received, closing storage...");

            let in_memory = instance.backend().as_any().downcast_ref::<InMemory>();
            let sqlite = instance.backend().as_any().downcast_ref::<Sqlite>();

            // Save database on shutdown (only needed for InMemory backend)
            if let Some(in_memory_backend) = in_memory {
                let json_path = snapshot_path(&data_dir);
                match in_memory_backend.save_to_file(&json_path).await {
                    Ok(_) => {
                        tracing::info!("Database saved to {}", json_path.display());
                        println!("\nDatabase saved successfully");
                    }
                    Err(e) => {
                        tracing::error!("Failed to save database: {e:?}");
                        eprintln!("Failed to save database: {e:?}");
                    }
                }
            } else if let Some(sqlite) = sqlite {
                sqlite.close().await;
                tracing::info!("SQLite pool closed");
            }
        })
        .await?;

    println!("Server shut down");
    Ok(())
}

/// Build the application router around an instance and a session store
fn router(instance: Instance, sessions: SessionStore) -> Router {
    Router::new()
        .route("/", get(handle_home).post(handle_add_note))
        .route("/sign-up", get(handle_signup_page).post(handle_signup_submit))
        .route("/login", get(handle_login_page).post(handle_login_submit))
        .route("/logout", get(handle_logout))
        .route("/delete-note", post(handle_delete_note))
        .route("/edit-note", post(handle_edit_note))
        .route("/health", get(handle_health_endpoint))
        .layer(CookieManagerLayer::new())
        .with_state(AppState {
            instance,
            sessions,
        })
}

// ============================================================================
// Session helpers
// ============================================================================

fn session_token(cookies: &Cookies) -> Option<SessionToken> {
    cookies
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

/// Resolve the session cookie to a signed-in user.
async fn current_user(state: &AppState, cookies: &Cookies) -> Option<(SessionToken, User)> {
    let token = session_token(cookies)?;
    let user_id = state.sessions.user_id(&token).await?;

    match state.instance.accounts().get(user_id).await {
        Ok(Some(user)) => Some((token, user)),
        Ok(None) => {
            tracing::warn!(%user_id, "Session refers to a missing user");
            None
        }
        Err(e) => {
            tracing::error!(%user_id, "Failed to load session user: {e}");
            None
        }
    }
}

/// Replace any existing session with a fresh one for `user`.
async fn start_session(state: &AppState, cookies: &Cookies, user: &User) -> SessionToken {
    if let Some(old) = session_token(cookies) {
        state.sessions.destroy_session(&old).await;
    }

    let token = state.sessions.create_session(user).await;
    let mut cookie = Cookie::new(SESSION_COOKIE, token.clone());
    cookie.set_http_only(true);
    cookie.set_path("/");
    cookies.add(cookie);
    token
}

/// Flashes waiting on the caller's session, if it has one.
async fn pending_flashes(state: &AppState, cookies: &Cookies) -> Vec<Flash> {
    match session_token(cookies) {
        Some(token) => state.sessions.take_flashes(&token).await,
        None => Vec::new(),
    }
}

fn to_login() -> Response {
    Redirect::to("/login").into_response()
}

// ============================================================================
// Authentication Handlers
// ============================================================================

/// Handler for GET /sign-up - Show sign-up page
async fn handle_signup_page(State(state): State<AppState>, cookies: Cookies) -> Html<String> {
    let flashes = pending_flashes(&state, &cookies).await;
    Html(templates::signup_page(&flashes))
}

/// Handler for POST /sign-up - Validate and create an account
async fn handle_signup_submit(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<SignUpForm>,
) -> Response {
    let result = state
        .instance
        .accounts()
        .sign_up(&form.email, &form.name, &form.password, &form.confirm_password)
        .await;

    match result {
        Ok(user) => {
            let token = start_session(&state, &cookies, &user).await;
            state
                .sessions
                .flash(&token, Flash::success("Account created successfully!"))
                .await;
            Redirect::to("/?new_user=true").into_response()
        }
        Err(e) => {
            let message = if e.is_validation_error() || e.is_conflict() {
                e.to_string()
            } else {
                tracing::error!("Failed to create account: {e}");
                "An error occurred creating your account.".to_string()
            };
            let mut flashes = pending_flashes(&state, &cookies).await;
            flashes.push(Flash::error(message));
            Html(templates::signup_page(&flashes)).into_response()
        }
    }
}

/// Handler for GET /login - Show login page
async fn handle_login_page(State(state): State<AppState>, cookies: Cookies) -> Html<String> {
    let flashes = pending_flashes(&state, &cookies).await;
    Html(templates::login_page(&flashes))
}

/// Handler for POST /login - Process login
async fn handle_login_submit(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<LoginForm>,
) -> Response {
    let result = match validate_login(&form.email, &form.password) {
        Ok(()) => {
            state
                .instance
                .accounts()
                .authenticate(&form.email, &form.password)
                .await
        }
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(user) => {
            let token = start_session(&state, &cookies, &user).await;
            state
                .sessions
                .flash(&token, Flash::success("Logged in successfully!"))
                .await;
            Redirect::to("/?new_user=false").into_response()
        }
        Err(e) => {
            let message = if e.is_validation_error() || e.is_authentication_error() {
                e.to_string()
            } else {
                tracing::error!("Failed to log in: {e}");
                "An error occurred logging in.".to_string()
            };
            let mut flashes = pending_flashes(&state, &cookies).await;
            flashes.push(Flash::error(message));
            Html(templates::login_page(&flashes)).into_response()
        }
    }
}

/// Handler for GET /logout - Sign the session out
async fn handle_logout(State(state): State<AppState>, cookies: Cookies) -> Response {
    let Some((token, user)) = current_user(&state, &cookies).await else {
        return to_login();
    };

    state.sessions.sign_out(&token).await;
    state
        .sessions
        .flash(&token, Flash::success("Logged out successfully."))
        .await;
    tracing::info!(user_id = %user.user_id(), "User logged out");
    to_login()
}

// ============================================================================
// Note Handlers
// ============================================================================

async fn render_home(state: &AppState, token: &str, user: &User, new_user: bool) -> Response {
    let notes = match state.instance.notes().list_notes(user.id).await {
        Ok(notes) => notes,
        Err(e) => {
            tracing::error!(user_id = %user.id, "Failed to list notes: {e}");
            state
                .sessions
                .flash(token, Flash::error("An error occurred loading your notes."))
                .await;
            Vec::new()
        }
    };
    let flashes = state.sessions.take_flashes(token).await;
    Html(templates::home_page(user, &notes, &flashes, new_user)).into_response()
}

/// Handler for GET / - List the caller's notes
async fn handle_home(
    State(state): State<AppState>,
    cookies: Cookies,
    Query(query): Query<HomeQuery>,
) -> Response {
    let Some((token, user)) = current_user(&state, &cookies).await else {
        return to_login();
    };

    let new_user = query.new_user.as_deref() == Some("true");
    render_home(&state, &token, &user, new_user).await
}

/// Handler for POST / - Add a note
async fn handle_add_note(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<AddNoteForm>,
) -> Response {
    let Some((token, user)) = current_user(&state, &cookies).await else {
        return to_login();
    };

    let flash = match state.instance.notes().add_note(user.id, &form.note).await {
        Ok(_) => Flash::success("Note Added!"),
        Err(e) if e.is_validation_error() => Flash::error(e.to_string()),
        Err(e) => {
            tracing::error!(user_id = %user.id, "Failed to add note: {e}");
            Flash::error("An error occurred adding your note.")
        }
    };
    state.sessions.flash(&token, flash).await;

    render_home(&state, &token, &user, false).await
}

/// Handler for POST /delete-note - Delete a note, silently ignoring
/// missing or foreign notes
///
/// The body is JSON but sent without a JSON content type, so it is parsed by hand.
/// Storage failures are flashed for the page reload that follows.
async fn handle_delete_note(
    State(state): State<AppState>,
    cookies: Cookies,
    body: Bytes,
) -> Response {
    let Some((token, user)) = current_user(&state, &cookies).await else {
        return to_login();
    };

    let request: DeleteNoteRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, format!("Invalid request: {e}")).into_response();
        }
    };

    if let Err(e) = state
        .instance
        .notes()
        .delete_note(user.id, request.note_id)
        .await
    {
        tracing::error!(user_id = %user.id, note_id = %request.note_id, "Failed to delete note: {e}");
        state
            .sessions
            .flash(&token, Flash::error("An error occurred deleting your note."))
            .await;
    }

    Json(serde_json::json!({})).into_response()
}

/// Handler for POST /edit-note - Replace a note's text
async fn handle_edit_note(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<EditNoteForm>,
) -> Response {
    let Some((token, user)) = current_user(&state, &cookies).await else {
        return to_login();
    };

    let edited = match form.note_id.parse::<NoteId>() {
        Ok(note_id) => state
            .instance
            .notes()
            .edit_note(user.id, note_id, &form.note)
            .await
            .map_err(|e| {
                if e.is_persistence_error() {
                    tracing::error!(user_id = %user.id, %note_id, "Failed to edit note: {e}");
                } else {
                    tracing::debug!(user_id = %user.id, %note_id, "Refused note edit: {e}");
                }
            }),
        Err(_) => {
            tracing::debug!(user_id = %user.id, "Edit with malformed note id");
            Err(())
        }
    };

    let flash = match edited {
        Ok(_) => Flash::success("Note updated successfully!"),
        Err(()) => Flash::error("Error updating note."),
    };
    state.sessions.flash(&token, flash).await;

    Redirect::to("/").into_response()
}

// ============================================================================
// Health Handler
// ============================================================================

/// Health check response
#[derive(serde::Serialize)]
struct HealthResponse {
    status: &'static str,
    backend: &'static str,
}

/// Handler for GET /health - Health check endpoint
async fn handle_health_endpoint(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        backend: state.instance.backend().kind(),
    })
}
