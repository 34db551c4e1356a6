use axum::{
    extract::{Path as AxumPath, State},
    response::Response,
    routing::get,
    Router,
};

use crate::errors::WikiError;
use crate::resource::{guess_mimetype, FileType};
use crate::types::AppState;
use crate::utils::{ensure_safe_path, normalize_path};
use crate::views::{raw_response, render_page};

/// Prefix of raw file links. Page names never start with `+`.
pub const RAW_PREFIX: &str = "/+raw";
/// Prefix of skin assets.
pub const STATIC_PREFIX: &str = "/+static";

/// Routes served by the wiki
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_root))
        .route(&format!("{}/*path", RAW_PREFIX), get(handle_raw))
        .route(&format!("{}/*path", STATIC_PREFIX), get(handle_static))
        .route("/*path", get(handle_path))
        .with_state(state)
}

/// Handle root path requests
pub async fn handle_root(State(state): State<AppState>) -> Result<Response, WikiError> {
    serve_page(&state, "/")
}

/// Handle path requests
pub async fn handle_path(
    State(state): State<AppState>,
    AxumPath(path): AxumPath<String>,
) -> Result<Response, WikiError> {
    serve_page(&state, &path)
}

fn serve_page(state: &AppState, path: &str) -> Result<Response, WikiError> {
    log::info!("Path request received: '{}'", path);
    let start_time = std::time::Instant::now();

    let page = state.server.get_page(path)?;
    log::debug!(
        "Resolved '{}' to {:?} (backing path: {:?})",
        page.path(),
        page.file_type(),
        page.resource().map(|r| r.path.as_str())
    );
    let resp = render_page(state.server.as_ref(), &state.skin, &page)?;

    log::info!("Served '{}' in {}ms", page.path(), start_time.elapsed().as_millis());
    Ok(resp)
}

/// Serve a backing file byte-for-byte, with no wiki suffix inference
pub async fn handle_raw(
    State(state): State<AppState>,
    AxumPath(path): AxumPath<String>,
) -> Result<Response, WikiError> {
    log::info!("Raw request received: '{}'", path);
    let info = state.server.get_info(&path)?;
    match (&info.status, &info.resource) {
        (FileType::TextFile | FileType::BinaryFile, Some(handle)) => {
            let bytes = state.server.store().read_bytes(handle)?;
            Ok(raw_response(bytes, info.mimetype))
        }
        _ => {
            log::warn!("Raw path not found: '{}'", info.path);
            Err(WikiError::NotFound)
        }
    }
}

/// Handle static file requests
pub async fn handle_static(
    State(state): State<AppState>,
    AxumPath(path): AxumPath<String>,
) -> Result<Response, WikiError> {
    ensure_safe_path(&path)?;
    let normalized = normalize_path(&path);
    let requested = state.static_dir.join(&normalized);

    if !requested.is_file() {
        log::warn!("Static asset not found: {:?}", requested);
        return Err(WikiError::NotFound);
    }

    let bytes = std::fs::read(&requested)?;
    Ok(raw_response(bytes, guess_mimetype(&normalized)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::Arc;

    use axum::http::{header, StatusCode};
    use axum::response::IntoResponse;

    use crate::components::Skin;
    use crate::store::MemoryFileStore;

    fn state(static_dir: &Path) -> AppState {
        let store = MemoryFileStore::with_content([
            ("readme.txt", Some("read me")),
            ("image.png", Some("png bytes")),
            ("docs/guide.txt", Some("guide")),
            ("raw/Notes.txt", Some("a page under raw")),
        ]);
        AppState::new(Arc::new(store), Skin::builtin(), static_dir.to_path_buf())
    }

    fn status(result: Result<Response, WikiError>) -> StatusCode {
        result.into_response().status()
    }

    #[tokio::test]
    async fn raw_serves_files_with_their_mimetype() -> Result<(), WikiError> {
        let dir = tempfile::tempdir()?;
        let resp = handle_raw(State(state(dir.path())), AxumPath("image.png".into())).await?;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "image/png");

        let resp = handle_raw(State(state(dir.path())), AxumPath("readme.txt".into())).await?;
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "text/plain; charset=utf-8");
        Ok(())
    }

    #[tokio::test]
    async fn raw_does_not_infer_the_wiki_suffix() -> Result<(), WikiError> {
        let dir = tempfile::tempdir()?;
        let resp = handle_raw(State(state(dir.path())), AxumPath("readme".into())).await;
        assert!(matches!(resp, Err(WikiError::NotFound)));
        let resp = handle_raw(State(state(dir.path())), AxumPath("docs".into())).await;
        assert_eq!(status(resp), StatusCode::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn static_assets_stay_inside_their_directory() -> Result<(), WikiError> {
        let dir = tempfile::tempdir()?;
        std::fs::create_dir(dir.path().join("css"))?;
        std::fs::write(dir.path().join("css").join("wikkid.css"), "body {}")?;

        let asset = AxumPath("css/wikkid.css".to_string());
        let resp = handle_static(State(state(dir.path())), asset).await?;
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "text/css; charset=utf-8");

        let resp = handle_static(State(state(dir.path())), AxumPath("../x".into())).await;
        assert_eq!(status(resp), StatusCode::BAD_REQUEST);
        let resp = handle_static(State(state(dir.path())), AxumPath("css/none.css".into())).await;
        assert_eq!(status(resp), StatusCode::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn pages_named_like_routes_are_still_served() -> Result<(), WikiError> {
        let dir = tempfile::tempdir()?;
        let _ = router(state(dir.path()));
        let resp = handle_path(State(state(dir.path())), AxumPath("raw/Notes".into())).await?;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(RAW_PREFIX.starts_with("/+") && STATIC_PREFIX.starts_with("/+"));
        Ok(())
    }
}
