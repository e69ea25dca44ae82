//! minijinja-backed template renderer.

use minijinja::{Environment, UndefinedBehavior};
use tracing::{debug, instrument};

use modelsmith_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::{RenderContext, TemplateName},
    error::{SmithError, SmithResult},
};

/// Built-in template sources, one per [`TemplateName`].
const BUILTIN: [(TemplateName, &str); 5] = [
    (
        TemplateName::Constants,
        include_str!("templates/constants.java.j2"),
    ),
    (
        TemplateName::Properties,
        include_str!("templates/properties.java.j2"),
    ),
    (
        TemplateName::LinkMapper,
        include_str!("templates/link-mapper.java.j2"),
    ),
    (
        TemplateName::RestEndpoints,
        include_str!("templates/rest-endpoints.java.j2"),
    ),
    (
        TemplateName::Resource,
        include_str!("templates/resource.java.j2"),
    ),
];

/// Renders the named templates with strict undefined handling: a template
/// that touches a field missing from its data record fails.
pub struct JinjaRenderer {
    env: Environment<'static>,
}

impl JinjaRenderer {
    /// Renderer over the built-in templates.
    pub fn new() -> SmithResult<Self> {
        Self::from_sources(BUILTIN)
    }

    /// Renderer over an explicit set of templates.
    pub fn from_sources(
        sources: impl IntoIterator<Item = (TemplateName, &'static str)>,
    ) -> SmithResult<Self> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);

        for (name, source) in sources {
            env.add_template(name.as_str(), source)
                .map_err(|e| rendering_failed(name.as_str(), e))?;
        }

        Ok(Self { env })
    }
}

impl TemplateRenderer for JinjaRenderer {
    #[instrument(skip_all, fields(template = %context.template()))]
    fn render(&self, context: &RenderContext) -> SmithResult<String> {
        let name = context.template().as_str();
        let template = self
            .env
            .get_template(name)
            .map_err(|e| rendering_failed(name, e))?;

        let output = template
            .render(context.data())
            .map_err(|e| rendering_failed(name, e))?;

        debug!(bytes = output.len(), "Rendered");
        Ok(output)
    }
}

fn rendering_failed(template: &str, e: minijinja::Error) -> SmithError {
    ApplicationError::RenderingFailed {
        template: template.to_string(),
        reason: e.to_string(),
    }
    .into()
}
