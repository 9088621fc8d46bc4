//! Page templates.
//!
//! Templates are compiled into the binary and registered into a fresh
//! environment per render, together with the `link` and `link_type`
//! functions bound to that render's [`Linker`].

use std::sync::{Arc, Mutex};

use minijinja::{Environment, ErrorKind, Value};
use stylist_tree::ResolveError;

use crate::error::RenderError;
use crate::link::Linker;
use crate::view::PageView;

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");
const SECTION_TEMPLATE: &str = include_str!("../templates/section.html");
const PARAMS_TEMPLATE: &str = include_str!("../templates/params.html");

/// First resolver failure raised inside a template function.
type FailureSlot = Arc<Mutex<Option<ResolveError>>>;

/// Render the page view through `index.html`.
pub(crate) fn render_page(page: &PageView<'_>, linker: Linker) -> Result<String, RenderError> {
    let failure = FailureSlot::default();
    let env = environment(linker, &failure)?;

    let result = env.get_template("index.html").and_then(|tmpl| tmpl.render(page));

    result.map_err(|err| match take_failure(&failure) {
        Some(resolve) => RenderError::Resolve(resolve),
        None => RenderError::Template(err),
    })
}

fn environment(
    linker: Linker,
    failure: &FailureSlot,
) -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template("index.html", INDEX_TEMPLATE)?;
    env.add_template("section.html", SECTION_TEMPLATE)?;
    env.add_template("params.html", PARAMS_TEMPLATE)?;

    let link = {
        let linker = linker.clone();
        let failure = Arc::clone(failure);
        move |name: &str| -> Result<Value, minijinja::Error> {
            linker
                .link(name)
                .map(Value::from_safe_string)
                .map_err(|err| record_failure(&failure, err))
        }
    };
    env.add_function("link", link);

    let failure = Arc::clone(failure);
    env.add_function(
        "link_type",
        move |expr: &str| -> Result<Value, minijinja::Error> {
            linker
                .link_type(expr)
                .map(Value::from_safe_string)
                .map_err(|err| record_failure(&failure, err))
        },
    );

    Ok(env)
}

fn record_failure(slot: &FailureSlot, err: ResolveError) -> minijinja::Error {
    let error = minijinja::Error::new(ErrorKind::InvalidOperation, err.to_string());
    if let Ok(mut slot) = slot.lock()
        && slot.is_none()
    {
        *slot = Some(err);
    }
    error
}

fn take_failure(slot: &FailureSlot) -> Option<ResolveError> {
    slot.lock().ok().and_then(|mut slot| slot.take())
}
