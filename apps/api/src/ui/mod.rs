//! HTML rendering for the job assistant page.

use anyhow::Context;
use minijinja::{context, Environment, Value};
use pulldown_cmark::{html, Event, Options, Parser};

use crate::errors::AppError;

const INDEX_TEMPLATE: &str = include_str!("templates/index.html");

pub const PAGE_TITLE: &str = "Lyzr Job Assistant";
pub const FOOTER: &str = "Powered by Lyzr and OpenAI";
pub const EMPTY_INPUT_WARNING: &str = "Please provide Job Description...";
pub const EMPTY_RESPONSE_NOTICE: &str = "The agent returned an empty response. Please try again.";

/// What the page shows below the form after a submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Outcome {
    #[default]
    Empty,
    Warning(String),
    Error(String),
    /// Raw agent response text (Markdown).
    Response(String),
}

/// One render of the page.
#[derive(Debug, Clone, Default)]
pub struct PageView {
    pub job_description: String,
    pub outcome: Outcome,
}

pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self, AppError> {
        let mut env = Environment::new();
        // `.html` templates are auto-escaped.
        env.add_template("index.html", INDEX_TEMPLATE)
            .context("Failed to compile page template")?;
        Ok(Self { env })
    }

    pub fn render(&self, view: &PageView) -> Result<String, AppError> {
        let (warning, error, response_html) = match &view.outcome {
            Outcome::Empty => (None, None, Value::UNDEFINED),
            Outcome::Warning(msg) => (Some(msg.as_str()), None, Value::UNDEFINED),
            Outcome::Error(msg) => (None, Some(msg.as_str()), Value::UNDEFINED),
            Outcome::Response(text) if text.trim().is_empty() => {
                (Some(EMPTY_RESPONSE_NOTICE), None, Value::UNDEFINED)
            }
            Outcome::Response(text) => (
                None,
                None,
                Value::from_safe_string(markdown_to_html(&format!("\n\n{text}"))),
            ),
        };

        let template = self
            .env
            .get_template("index.html")
            .context("Page template missing")?;
        let page = template
            .render(context! {
                title => PAGE_TITLE,
                footer => FOOTER,
                job_description => view.job_description.as_str(),
                warning => warning,
                error => error,
                response_html => response_html,
            })
            .context("Failed to render page")?;
        Ok(page)
    }
}

/// Renders agent Markdown to HTML. Raw HTML in the source is shown as text.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let events = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::new();
    html::push_html(&mut out, events);
    out
}
