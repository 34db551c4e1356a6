//! One view per page variant.

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
};
use log::debug;

use crate::components::{NavigationComponent, Skin};
use crate::errors::WikiError;
use crate::handlers::RAW_PREFIX;
use crate::page::{DirectoryListing, FilePage, MissingPage, Page};
use crate::render::render_wiki_text;
use crate::resource::FileType;
use crate::server::Server;
use crate::store::FileStore;
use crate::types::TemplateContext;
use crate::utils::{escape_attr, escape_html};

const OCTET_STREAM: &str = "application/octet-stream";

/// Render `page` into an HTTP response.
pub fn render_page<S: FileStore>(
    server: &Server<S>,
    skin: &Skin,
    page: &Page,
) -> Result<Response, WikiError> {
    debug!("Rendering {:?} view for '{}'", page.file_type(), page.path());
    let title = page.title();
    match page {
        Page::Wiki(file) => {
            let text = read_text(server, page)?;
            let result = render_wiki_text(&text);
            let body = format!("{}{}", page_actions(file), result.html);
            let title = result.title.unwrap_or(title);
            Ok(html_page(skin, &file.path, &title, &body, &result.toc).into_response())
        }
        Page::OtherText(file) => {
            let text = read_text(server, page)?;
            let body = format!(
                "<h1>{}</h1>{}<pre class=\"source\"><code>{}</code></pre>",
                escape_html(&file.display_name),
                page_actions(file),
                escape_html(&text)
            );
            Ok(html_page(skin, &file.path, &title, &body, "").into_response())
        }
        Page::Binary(file) => {
            let bytes = server.read_page_bytes(page)?.unwrap_or_default();
            Ok(raw_response(bytes, file.mimetype))
        }
        Page::DirectoryListing(listing) => {
            let body = directory_listing_html(listing);
            Ok(html_page(skin, &listing.path, &title, &body, "").into_response())
        }
        Page::Missing(missing) => {
            let body = missing_page_html(missing);
            let html = html_page(skin, &missing.path, &title, &body, "");
            Ok((StatusCode::NOT_FOUND, html).into_response())
        }
    }
}

/// Raw bytes served with their MIME type.
pub fn raw_response(bytes: Vec<u8>, mimetype: Option<&str>) -> Response {
    let mut resp = Response::new(Body::from(bytes));
    let content_type = mimetype
        .and_then(|m| {
            let value = if m.starts_with("text/") {
                format!("{}; charset=utf-8", m)
            } else {
                m.to_string()
            };
            HeaderValue::from_str(&value).ok()
        })
        .unwrap_or_else(|| HeaderValue::from_static(OCTET_STREAM));
    resp.headers_mut().insert(header::CONTENT_TYPE, content_type);
    resp
}

fn read_text<S: FileStore>(server: &Server<S>, page: &Page) -> Result<String, WikiError> {
    let bytes = server.read_page_bytes(page)?.unwrap_or_default();
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn html_page(
    skin: &Skin,
    logical_path: &str,
    title: &str,
    content: &str,
    toc: &str,
) -> Html<String> {
    let sidebar = NavigationComponent::new().build_sidebar_html(logical_path, toc);
    Html(skin.render(&TemplateContext {
        title: title.to_string(),
        content: content.to_string(),
        sidebar,
    }))
}

fn page_actions(file: &FilePage) -> String {
    format!(
        "<div class=\"page-actions\"><a href=\"{}\" class=\"action-raw\">View source</a></div>",
        escape_attr(&format!("{}/{}", RAW_PREFIX, file.resource.path))
    )
}

fn directory_listing_html(listing: &DirectoryListing) -> String {
    let mut html = format!("<h1>{}</h1>", escape_html(&listing.path));
    let parent = listing.path.rsplit_once('/').map(|(p, _)| p).unwrap_or("");
    let back = if parent.is_empty() { "/" } else { parent };
    html.push_str(&format!("<p><a href=\"{}\">Up</a></p>", escape_attr(back)));

    html.push_str("<ul class=\"listing\">\n");
    for entry in &listing.entries {
        let (class, display) = match entry.file_type {
            FileType::Directory => ("dir", format!("{}/", entry.display_name)),
            FileType::TextFile => ("text", entry.display_name.clone()),
            FileType::BinaryFile | FileType::Missing => ("binary", entry.display_name.clone()),
        };
        html.push_str(&format!(
            "  <li class=\"{}\"><a href=\"{}\">{}</a></li>\n",
            class,
            escape_attr(&entry.href()),
            escape_html(&display)
        ));
    }
    html.push_str("</ul>\n");
    html
}

fn missing_page_html(missing: &MissingPage) -> String {
    format!(
        concat!(
            "<div class=\"missing-page\"><h1>{}</h1>",
            "<p class=\"missing-message\">This page does not exist yet.</p>",
            "<p class=\"create-page\">Create it by adding <code>{}</code> to the wiki.</p></div>",
        ),
        escape_html(&missing.path),
        escape_html(&missing.write_filename)
    )
}
