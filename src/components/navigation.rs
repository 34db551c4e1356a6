use crate::utils::{escape_attr, escape_html};

/// Component for the sidebar: breadcrumbs for the current page plus the
/// page's table of contents when it has one.
pub struct NavigationComponent;

impl NavigationComponent {
    pub fn new() -> Self {
        Self
    }

    /// Build sidebar HTML for a logical path
    pub fn build_sidebar_html(&self, logical_path: &str, toc: &str) -> String {
        let mut html = String::new();
        html.push_str("<div class=\"sidebar-nav\">");
        html.push_str(&self.breadcrumbs(logical_path));
        if !toc.is_empty() {
            html.push_str("<div class=\"sidebar-toc\">");
            html.push_str("<h4 class=\"sidebar-toc-title\">On This Page</h4>");
            html.push_str(toc);
            html.push_str("</div>");
        }
        html.push_str("</div>");
        html
    }

    /// Links to every ancestor of `logical_path`, the root first.
    pub fn breadcrumbs(&self, logical_path: &str) -> String {
        let mut html = String::from("<ol class=\"breadcrumbs\"><li><a href=\"/\">Home</a></li>");
        let mut href = String::new();
        for segment in logical_path.split('/').filter(|s| !s.is_empty()) {
            href.push('/');
            href.push_str(segment);
            html.push_str(&format!(
                "<li><a href=\"{}\">{}</a></li>",
                escape_attr(&href),
                escape_html(segment)
            ));
        }
        html.push_str("</ol>");
        html
    }
}

impl Default for NavigationComponent {
    fn default() -> Self {
        Self::new()
    }
}
