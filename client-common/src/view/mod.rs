//! HTML fragments for the toolkit pages, rendered with minijinja.
//!
//! Template names end in `.html` so every interpolated value is escaped,
//! except where a template explicitly marks content as `safe`.

use std::sync::OnceLock;

use minijinja::{context, Environment};
use strum_macros::{AsRefStr, Display, EnumIter};

mod fragments;
mod templates;

pub use fragments::{
    breach_list, checksum_result, feedback_list, loading, password_report, strength_meter, verify_result,
};

pub type Result<T> = std::result::Result<T, minijinja::Error>;

/// Bootstrap contextual classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Kind {
    Primary,
    Secondary,
    Success,
    Danger,
    Warning,
    Info,
    Light,
    Dark,
}

fn env() -> &'static Environment<'static> {
    static ENV: OnceLock<Environment<'static>> = OnceLock::new();
    ENV.get_or_init(|| {
        let mut env = Environment::new();
        for (name, source) in templates::ALL {
            // templates are compiled in, a syntax error is a programming bug caught by the tests
            if let Err(e) = env.add_template(name, source) {
                tracing::error!("invalid template {}: {}", name, e);
            }
        }
        env
    })
}

pub(crate) fn render(name: &str, ctx: minijinja::Value) -> Result<String> {
    env().get_template(name)?.render(ctx)
}

pub fn alert(message: &str, kind: Kind, auto_dismiss: bool) -> Result<String> {
    render("alert.html", context! { message, kind => kind.as_ref(), auto_dismiss })
}

pub fn info_card(title: &str, content_html: &str, kind: Kind) -> Result<String> {
    let header_text = if kind == Kind::Light { Kind::Dark } else { kind };
    render(
        "info_card.html",
        context! { title, content => content_html, kind => kind.as_ref(), header_text => header_text.as_ref() },
    )
}

/// `value` is a percentage, clamped to 0-100.
pub fn progress_bar(value: u32, kind: Kind) -> Result<String> {
    render("progress_bar.html", context! { value => value.min(100), kind => kind.as_ref() })
}
