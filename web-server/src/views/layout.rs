//! Page shell: head, styles, sidebar navigation

use health_assistant_core::constants::APP_NAME;
use health_assistant_core::DomainId;

use super::escape;

const STYLE: &str = r#"
body { margin: 0; font-family: -apple-system, "Segoe UI", Roboto, sans-serif; color: #262730; display: flex; min-height: 100vh; }
nav { width: 260px; background: #f0f2f6; padding: 1.5rem 1rem; box-sizing: border-box; }
nav h2 { font-size: 1.1rem; margin: 0 0 1rem; }
nav a { display: block; padding: 0.55rem 0.75rem; margin-bottom: 0.25rem; border-radius: 6px; color: #262730; text-decoration: none; }
nav a.active { background: #ff4b4b; color: #fff; }
main { flex: 1; padding: 2rem 3rem; }
form .grid { display: grid; gap: 1rem 1.5rem; }
form .cols-3 { grid-template-columns: repeat(3, 1fr); }
form .cols-5 { grid-template-columns: repeat(5, 1fr); }
label { display: block; font-size: 0.9rem; margin-bottom: 0.3rem; }
input, select { width: 100%; padding: 0.45rem; box-sizing: border-box; border: 1px solid #d0d3d9; border-radius: 6px; }
button { margin-top: 1.5rem; padding: 0.55rem 1.2rem; border: 1px solid #d0d3d9; border-radius: 6px; background: #fff; cursor: pointer; }
.notice { margin-top: 1.5rem; padding: 0.9rem 1rem; border-radius: 6px; }
.notice p { margin: 0.2rem 0; }
.notice-risk { background: #fff3cd; color: #7a5b00; }
.notice-clear { background: #dff5e3; color: #1e6b34; }
.notice-error { background: #ffe1e1; color: #8a1c1c; }
.notice-warning { background: #fff3cd; color: #7a5b00; }
"#;

fn nav(active: Option<DomainId>) -> String {
    let mut html = format!("<nav><h2>{}</h2>", escape(APP_NAME));
    for domain in DomainId::ALL {
        let class = if Some(domain) == active { " class=\"active\"" } else { "" };
        html.push_str(&format!(
            "<a href=\"/{}\"{}>{}</a>",
            domain.as_str(),
            class,
            escape(domain.title())
        ));
    }
    html.push_str("</nav>");
    html
}

/// Full document around `body`; `body` must already be escaped
pub(super) fn page(title: &str, active: Option<DomainId>, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{title} - {app}</title><style>{STYLE}</style></head>\
         <body>{nav}<main>{body}</main></body></html>",
        title = escape(title),
        app = escape(APP_NAME),
        nav = nav(active),
    )
}

pub fn not_found_page(slug: &str) -> String {
    let body = format!(
        "<h1>Page not found</h1><p>There is no prediction page called '{}'.</p>",
        escape(slug)
    );
    page("Not found", None, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_marks_active_page() {
        let html = nav(Some(DomainId::HeartDisease));
        assert!(html.contains("<a href=\"/heart_disease\" class=\"active\">Heart Disease Prediction</a>"));
        assert!(html.contains("<a href=\"/diabetes\">"));
        assert!(html.contains("<a href=\"/parkinsons\">"));
    }

    #[test]
    fn test_not_found_escapes_slug() {
        let html = not_found_page("<img src=x>");
        assert!(html.contains("&lt;img src=x&gt;"));
        assert!(!html.contains("class=\"active\""));
    }
}
