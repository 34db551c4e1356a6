use std::fs;
use std::path::{Path, PathBuf};
use log::{debug, info, warn};

use crate::types::TemplateContext;
use crate::utils::escape_html;

const STYLE: &str = "<link rel=\"stylesheet\" href=\"/+static/css/wikkid.css\">";

/// HTML shell every rendered page is wrapped in.
///
/// A skin named `foo` is read from `<skins_dir>/foo/base.html`; the file may
/// use the `{{TITLE}}`, `{{STYLE}}`, `{{SIDEBAR}}` and `{{CONTENT}}`
/// placeholders. Without the file an inline shell is used.
#[derive(Debug, Clone)]
pub struct Skin {
    name: String,
    base: Option<String>,
}

impl Skin {
    /// Load a skin by name
    pub fn load(skins_dir: &Path, name: &str) -> Self {
        let base_path: PathBuf = skins_dir.join(name).join("base.html");
        let base = match fs::read_to_string(&base_path) {
            Ok(base) => {
                info!("Loaded skin '{}' from {:?}", name, base_path);
                Some(base)
            }
            Err(e) => {
                warn!("Skin template {:?} unavailable ({}), using built-in shell", base_path, e);
                None
            }
        };
        Self { name: name.to_string(), base }
    }

    /// Skin that always uses the built-in shell.
    pub fn builtin() -> Self {
        Self { name: "builtin".to_string(), base: None }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn render(&self, context: &TemplateContext) -> String {
        debug!("Rendering '{}' with skin '{}'", context.title, self.name);
        let title = escape_html(&context.title);
        match &self.base {
            Some(base) => base
                .replace("{{TITLE}}", &title)
                .replace("{{STYLE}}", STYLE)
                .replace("{{SIDEBAR}}", &context.sidebar)
                .replace("{{CONTENT}}", &context.content),
            None => format!(
                concat!(
                    "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\">",
                    "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">",
                    "<title>{}</title>{}</head><body><div class=\"layout\">",
                    "<aside class=\"sidebar\">{}</aside><main class=\"content\">{}</main>",
                    "</div></body></html>",
                ),
                title, STYLE, context.sidebar, context.content
            ),
        }
    }
}
