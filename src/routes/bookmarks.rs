use askama::Template;
use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request, State},
    http::{header, request::Parts, StatusCode},
    response::{Html, IntoResponse},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::models::{Bookmark, NewBookmark, ValidationError};
use crate::repo::BookmarkRepo;
use crate::AppState;

#[derive(Template)]
#[template(path = "bookmarks/list.html")]
struct BookmarkListTemplate {
    bookmarks: Vec<Bookmark>,
    styles_hash: &'static str,
}

#[derive(Template)]
#[template(path = "bookmarks/bookmark.html")]
struct BookmarkTemplate {
    bookmark: Bookmark,
}

/// Raw create fields as they arrive on the wire. Absent fields decode as empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BookmarkForm {
    pub title: String,
    pub url: String,
    pub description: String,
    pub tags: String,
}

impl BookmarkForm {
    pub fn parse(self) -> Result<NewBookmark, ValidationError> {
        NewBookmark::new(self.title, self.url, self.description, self.tags)
    }
}

/// Validated create input, read from a urlencoded form or a JSON body
/// depending on `Content-Type`.
pub struct BookmarkInput(pub NewBookmark);

impl<S> FromRequest<S> for BookmarkInput
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        let form = if is_json {
            let Json(form) = Json::<BookmarkForm>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            form
        } else {
            let Form(form) = Form::<BookmarkForm>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            form
        };

        Ok(Self(form.parse()?))
    }
}

/// Integer bookmark id from the path.
pub struct BookmarkId(pub i64);

impl<S> FromRequestParts<S> for BookmarkId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        Ok(Self(id))
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_bookmarks))
        .route("/bookmarks", post(create_bookmark))
        .route("/bookmarks/delete/{id}", post(delete_bookmark))
}

async fn list_bookmarks(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let bookmarks = BookmarkRepo::new(&state.db)
        .list()
        .await
        .map_err(|e| AppError::repo("Error fetching bookmarks", e))?;

    let template = BookmarkListTemplate {
        bookmarks,
        styles_hash: crate::STYLES_HASH,
    };
    Ok(Html(template.render()?))
}

async fn create_bookmark(
    State(state): State<AppState>,
    BookmarkInput(new): BookmarkInput,
) -> Result<impl IntoResponse, AppError> {
    let bookmark = BookmarkRepo::new(&state.db)
        .insert(&new)
        .await
        .map_err(|e| AppError::repo("Error adding bookmark", e))?;

    tracing::info!(id = bookmark.id, "bookmark added");

    let template = BookmarkTemplate { bookmark };
    Ok(Html(template.render()?))
}

async fn delete_bookmark(
    State(state): State<AppState>,
    BookmarkId(id): BookmarkId,
) -> Result<impl IntoResponse, AppError> {
    BookmarkRepo::new(&state.db)
        .delete(id)
        .await
        .map_err(|e| AppError::repo("Error deleting bookmark", e))?;

    // htmx swaps the item out on an empty 200
    Ok(StatusCode::OK)
}
