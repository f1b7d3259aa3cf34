use url::Url;

use crate::attributes::Attributes;
use crate::context::RenderContext;
use crate::handler::OsisTagHandler;
use crate::osis::{attr, element};

/// `<figure src="images/map.png"/>` becomes an `<img>` pointing into the module directory.
#[derive(Debug, Default)]
pub struct FigureHandler;

impl FigureHandler {
    pub fn new() -> Self {
        Self
    }
}

/// Joins `src` onto the module directory. The base is treated as a directory even without a
/// trailing slash; anything that cannot be joined is passed through as written.
pub fn resolve_image_src(base: Option<&Url>, src: &str) -> String {
    let Some(base) = base else {
        return src.to_string();
    };
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let dir = format!("{}/", base.path());
        base.set_path(&dir);
    }
    match base.join(src) {
        Ok(resolved) => resolved.into(),
        Err(err) => {
            tracing::debug!(src, %err, "could not resolve figure path");
            src.to_string()
        }
    }
}

impl OsisTagHandler for FigureHandler {
    fn tag_name(&self) -> &'static str {
        element::FIGURE
    }

    fn start(&mut self, attrs: &Attributes, cx: &mut RenderContext<'_>) {
        let Some(src) = attrs.get(attr::SRC).filter(|src| !src.is_empty()) else {
            tracing::debug!("figure without src");
            return;
        };
        let src = resolve_image_src(cx.params.module_base_path.as_ref(), src);
        cx.writer.write(&format!("<img src='{src}'/>"));
    }

    fn end(&mut self, _cx: &mut RenderContext<'_>) {}
}
