//! HTML rendering of the portfolio page.

use chrono::DateTime;
use folio_config::config::Config;
use folio_github::RepoSummary;

use crate::{selection::Showcase, view::ViewState};

const STYLESHEET: &str = r#"
:root { color-scheme: dark; }
* { box-sizing: border-box; }
body { margin: 0; min-height: 100vh; font-family: system-ui, sans-serif; color: #fff;
  background: linear-gradient(to bottom, #0b0f19, #0c1222, #0b0f19); }
a { color: inherit; text-decoration: none; }
nav { position: sticky; top: 0; z-index: 40; border-bottom: 1px solid rgba(255,255,255,.1);
  background: rgba(0,0,0,.2); backdrop-filter: blur(8px); }
.wrap { margin: 0 auto; max-width: 72rem; padding: 1rem; }
.bar { display: flex; align-items: center; justify-content: space-between; gap: 1.5rem; }
.brand { font-size: 1.125rem; font-weight: 700; }
.links, .icons { display: flex; gap: 1.5rem; font-size: .875rem; }
.links a, .icons a { opacity: .8; }
.links a:hover, .icons a:hover { opacity: 1; }
section { margin: 0 auto; max-width: 72rem; padding: 4rem 1rem; }
h1 { font-size: 3rem; font-weight: 800; line-height: 1.1; margin: 0; }
h2 { font-size: 2rem; font-weight: 800; margin: 0 0 2rem; }
.accent { background: linear-gradient(to right, #e879f9, #a78bfa, #38bdf8);
  -webkit-background-clip: text; background-clip: text; color: transparent; }
.hero { display: grid; gap: 2rem; align-items: center; grid-template-columns: repeat(auto-fit, minmax(18rem, 1fr)); }
.tagline, .muted { color: rgba(255,255,255,.75); }
.actions { display: flex; flex-wrap: wrap; gap: .75rem; margin-top: 1.5rem; }
.button { display: inline-flex; gap: .5rem; border-radius: .75rem; padding: .5rem 1rem; font-weight: 500;
  border: 1px solid rgba(255,255,255,.2); }
.button.primary { background: #fff; color: #000; }
.portrait { width: 300px; height: 420px; margin: 0 auto; overflow: hidden; border-radius: 1rem;
  border: 2px solid rgba(217,70,239,.4); }
.portrait img { width: 100%; height: 100%; object-fit: cover; }
.grid { display: grid; gap: 1.5rem; grid-template-columns: repeat(auto-fill, minmax(18rem, 1fr)); }
.card { display: flex; flex-direction: column; justify-content: space-between; border-radius: 1rem;
  padding: 1.25rem; border: 1px solid rgba(255,255,255,.1);
  background: linear-gradient(to bottom right, rgba(255,255,255,.05), rgba(255,255,255,.02)); }
.card h3 { margin: 0; font-size: 1.125rem; }
.card .head { display: flex; justify-content: space-between; gap: .75rem; }
.card .meta { display: flex; flex-wrap: wrap; align-items: center; gap: .75rem; margin-top: 1.25rem;
  font-size: .75rem; color: rgba(255,255,255,.7); }
.card .updated { margin-left: auto; }
.pill { border-radius: 9999px; padding: .25rem .75rem; border: 1px solid rgba(255,255,255,.15);
  background: rgba(255,255,255,.05); }
.error { color: #fb7185; }
.about { display: grid; gap: 2rem; grid-template-columns: repeat(auto-fit, minmax(18rem, 1fr)); }
.highlights { border-radius: 1rem; padding: 1.5rem; border: 1px solid rgba(255,255,255,.1); }
.contact { display: flex; flex-wrap: wrap; gap: 1rem; }
footer { border-top: 1px solid rgba(255,255,255,.1); padding: 2rem 0; text-align: center;
  font-size: .875rem; color: rgba(255,255,255,.6); }
"#;

const NO_DESCRIPTION: &str = "No description provided.";
const NO_REPOSITORIES: &str = "No repositories found. Make sure your GitHub username is correct.";

/// Escapes text for use in HTML element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Formats an RFC 3339 timestamp as e.g. `Mar 4, 2025`.
///
/// Falls back to the raw string if it does not parse.
pub fn format_updated(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|date| date.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// Renders the complete page for the given state.
pub fn render_page(config: &Config, state: &ViewState, showcase: &Showcase, year: i32) -> String {
    let name = escape(config.name());
    let mut out = String::with_capacity(16 * 1024);

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    out.push_str(&format!("<title>{name} | Portfolio</title>\n"));
    out.push_str(&format!("<style>{STYLESHEET}</style>\n"));
    out.push_str("</head>\n<body>\n");

    render_nav(&mut out, config);
    render_hero(&mut out, config);
    render_featured(&mut out, state, showcase);
    render_top(&mut out, state, showcase);
    render_about(&mut out, config);
    render_contact(&mut out, config);

    out.push_str(&format!("<footer>&copy; {year} {name}.</footer>\n"));
    out.push_str("</body>\n</html>\n");
    out
}

fn github_profile(config: &Config) -> String {
    format!("https://github.com/{}", config.github_username())
}

fn render_nav(out: &mut String, config: &Config) {
    out.push_str("<nav><div class=\"wrap bar\">\n");
    out.push_str(&format!(
        "<a href=\"#home\" class=\"brand\">{}</a>\n",
        escape(config.name())
    ));
    out.push_str(
        "<div class=\"links\"><a href=\"#projects\">Projects</a><a href=\"#about\">About</a><a \
         href=\"#contact\">Contact</a></div>\n",
    );

    out.push_str("<div class=\"icons\">");
    out.push_str(&format!(
        "<a href=\"{}\" target=\"_blank\" rel=\"noreferrer\" aria-label=\"GitHub\">GitHub</a>",
        escape(&github_profile(config))
    ));
    if let Some(linkedin) = config.linkedin_url() {
        out.push_str(&format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noreferrer\" \
             aria-label=\"LinkedIn\">LinkedIn</a>",
            escape(linkedin)
        ));
    }
    if let Some(email) = config.email() {
        out.push_str(&format!(
            "<a href=\"mailto:{}\" aria-label=\"Email\">Email</a>",
            escape(email)
        ));
    }
    out.push_str("</div>\n</div></nav>\n");
}

fn render_hero(out: &mut String, config: &Config) {
    let name = escape(config.name());

    out.push_str("<section id=\"home\"><div class=\"hero\">\n<div>\n");
    out.push_str(&format!(
        "<h1>{name}<br><span class=\"accent\">Portfolio</span></h1>\n"
    ));
    out.push_str(&format!(
        "<p class=\"tagline\">{}</p>\n",
        escape(config.tagline())
    ));

    out.push_str("<div class=\"actions\">");
    out.push_str(&format!(
        "<a class=\"button primary\" href=\"{}\" target=\"_blank\" rel=\"noreferrer\">View \
         GitHub</a>",
        escape(&github_profile(config))
    ));
    if let Some(resume) = config.resume_url() {
        out.push_str(&format!(
            "<a class=\"button\" href=\"{}\">Resume</a>",
            escape(resume.trim())
        ));
    }
    out.push_str("</div>\n</div>\n");

    if let Some(avatar) = config.avatar() {
        out.push_str(&format!(
            "<div class=\"portrait\"><img src=\"{}\" alt=\"{name}\"></div>\n",
            escape(avatar)
        ));
    }
    out.push_str("</div></section>\n");
}

fn render_featured(out: &mut String, state: &ViewState, showcase: &Showcase) {
    out.push_str("<section id=\"projects\">\n<h2>Featured Projects</h2>\n");

    if state.loading {
        out.push_str("<p class=\"muted\">Loading projects…</p>\n");
    }
    if let Some(error) = &state.error {
        out.push_str(&format!("<p class=\"error\">{}</p>\n", escape(error)));
    }

    if state.is_settled() && state.error.is_none() {
        out.push_str("<div class=\"grid\">\n");
        if showcase.featured.is_empty() {
            out.push_str(
                "<div class=\"card\"><div><h3>My featured projects</h3><p class=\"muted\">List \
                 your best repository names under <code>featured</code> in the config file to \
                 pin them here.</p></div></div>\n",
            );
        }
        for repo in &showcase.featured {
            render_card(out, repo);
        }
        out.push_str("</div>\n");
    }
    out.push_str("</section>\n");
}

fn render_top(out: &mut String, state: &ViewState, showcase: &Showcase) {
    out.push_str("<section>\n<h2>Top Repositories</h2>\n");

    if state.is_settled() && state.error.is_none() {
        out.push_str("<div class=\"grid\">\n");
        for repo in &showcase.top {
            render_card(out, repo);
        }
        out.push_str("</div>\n");

        if showcase.top.is_empty() {
            out.push_str(&format!("<p class=\"muted\">{NO_REPOSITORIES}</p>\n"));
        }
    }
    out.push_str("</section>\n");
}

/// Renders one repository card.
pub fn render_card(out: &mut String, repo: &RepoSummary) {
    let url = escape(&repo.url);
    let description = repo
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or(NO_DESCRIPTION);

    out.push_str("<div class=\"card\">\n<div>\n<div class=\"head\">");
    out.push_str(&format!(
        "<h3><a href=\"{url}\" target=\"_blank\" rel=\"noreferrer\">{}</a></h3>",
        escape(&repo.name)
    ));
    out.push_str(&format!(
        "<a href=\"{url}\" target=\"_blank\" rel=\"noreferrer\" aria-label=\"Open on \
         GitHub\">&#8599;</a>"
    ));
    out.push_str("</div>\n");
    out.push_str(&format!(
        "<p class=\"muted\">{}</p>\n</div>\n",
        escape(description)
    ));

    out.push_str("<div class=\"meta\">");
    out.push_str(&format!(
        "<span aria-label=\"Stars\">&#9733; {}</span>",
        repo.popularity
    ));
    out.push_str(&format!(
        "<span aria-label=\"Forks\">&#9095; {}</span>",
        repo.forks
    ));
    if let Some(language) = repo.language.as_deref().filter(|l| !l.is_empty()) {
        out.push_str(&format!("<span class=\"pill\">{}</span>", escape(language)));
    }
    if let Some(updated) = &repo.updated {
        out.push_str(&format!(
            "<span class=\"updated\">Updated {}</span>",
            escape(&format_updated(updated))
        ));
    }
    out.push_str("</div>\n</div>\n");
}

fn render_about(out: &mut String, config: &Config) {
    let about = config.about();

    out.push_str("<section id=\"about\">\n<h2>About</h2>\n<div class=\"about\">\n<div>\n");
    for paragraph in about.paragraphs() {
        out.push_str(&format!(
            "<p class=\"muted\">{}</p>\n",
            escape(paragraph)
        ));
    }
    if !about.interests().is_empty() {
        out.push_str(&format!(
            "<p class=\"muted\">Interests: {}.</p>\n",
            escape(&about.interests().join(", "))
        ));
    }
    out.push_str("</div>\n");

    if !about.highlights().is_empty() {
        out.push_str("<div class=\"highlights\">\n<h3>Highlights</h3>\n<ul>\n");
        for highlight in about.highlights() {
            out.push_str(&format!("<li>{}</li>\n", escape(highlight)));
        }
        out.push_str("</ul>\n</div>\n");
    }
    out.push_str("</div>\n</section>\n");
}

fn render_contact(out: &mut String, config: &Config) {
    out.push_str("<section id=\"contact\">\n<h2>Contact</h2>\n<div class=\"contact\">\n");
    out.push_str(&format!(
        "<a class=\"button\" href=\"{}\" target=\"_blank\" rel=\"noreferrer\">github.com/{}</a>\n",
        escape(&github_profile(config)),
        escape(config.github_username())
    ));
    if let Some(linkedin) = config.linkedin_url() {
        out.push_str(&format!(
            "<a class=\"button\" href=\"{}\" target=\"_blank\" rel=\"noreferrer\">LinkedIn</a>\n",
            escape(linkedin)
        ));
    }
    if let Some(email) = config.email() {
        let email = escape(email);
        out.push_str(&format!(
            "<a class=\"button\" href=\"mailto:{email}\">{email}</a>\n"
        ));
    }
    out.push_str("</div>\n</section>\n");
}
