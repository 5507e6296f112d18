use anyhow::{Context as _, Result};
use tera::{Context, Tera};

use crate::models::Synthesis;

/// File extension of operator-supplied templates
pub const TEMPLATE_EXTENSION: &str = "j2";

/// Renders a synthesis result through the operator's templates.
///
/// Template files live under the templates directory at
/// `<platform>/<template-name>.j2`, matching [`Synthesis::template_name`].
/// The template syntax belongs to the operator; this only feeds the
/// resolved variable table into it.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Load every `*.j2` file below `dir`
    pub fn from_dir(dir: &str) -> Result<Self> {
        let pattern = format!("{}/**/*.{}", dir.trim_end_matches('/'), TEMPLATE_EXTENSION);
        let tera = Tera::new(&pattern)
            .with_context(|| format!("Failed to load templates from {}", dir))?;
        Ok(Self { tera })
    }

    /// Build from in-memory `(template_name, content)` pairs
    pub fn from_templates<'a>(
        templates: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(
            templates
                .into_iter()
                .map(|(name, content)| (file_name(name), content)),
        )
        .context("Invalid template")?;
        Ok(Self { tera })
    }

    pub fn template_count(&self) -> usize {
        self.tera.get_template_names().count()
    }

    pub fn has_template(&self, template_name: &str) -> bool {
        self.tera.get_template(&file_name(template_name)).is_ok()
    }

    pub fn render(&self, synthesis: &Synthesis) -> Result<String> {
        let mut context = Context::new();
        for var in synthesis.variables.resolved() {
            context.insert(var.name, &var.value);
        }

        let file = file_name(&synthesis.template_name);
        self.tera
            .render(&file, &context)
            .with_context(|| format!("Template rendering failed for {}", file))
    }
}

fn file_name(template_name: &str) -> String {
    format!("{}.{}", template_name, TEMPLATE_EXTENSION)
}
