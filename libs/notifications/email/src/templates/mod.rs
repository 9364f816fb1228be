//! Email template management with Handlebars
//!
//! Supports:
//! - Variables: `{{name}}` (HTML-escaped) and `{{{name}}}` (raw)
//! - Loops: `{{#each items}}...{{/each}}`
//! - Partials: `{{> fragment}}` registered with [`TemplateEngine::register_partial`]
//!
//! Strict mode is on: referencing a field the data does not carry is a
//! render error rather than an empty string.

use eyre::{eyre, Result};
use handlebars::Handlebars;
use serde::Serialize;
use std::collections::HashMap;

/// Rendered template result
#[derive(Debug, Clone)]
pub struct RenderedTemplate {
    pub subject: String,
    pub body_text: Option<String>,
    pub body_html: Option<String>,
}

/// Email template definition
#[derive(Clone, Debug)]
pub struct EmailTemplate {
    pub name: String,
    /// Subject line; not HTML, so use `{{{var}}}` to avoid entity escaping
    pub subject: String,
    pub body_text: Option<String>,
    pub body_html: Option<String>,
}

impl EmailTemplate {
    pub fn html(
        name: impl Into<String>,
        subject: impl Into<String>,
        body_html: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            subject: subject.into(),
            body_text: None,
            body_html: Some(body_html.into()),
        }
    }
}

/// Handlebars-based template engine
pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
    templates: HashMap<String, EmailTemplate>,
}

impl TemplateEngine {
    /// Create an empty engine
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);

        Self {
            handlebars,
            templates: HashMap::new(),
        }
    }

    /// Register a template
    pub fn register(&mut self, template: EmailTemplate) -> Result<()> {
        self.handlebars
            .register_template_string(&format!("{}_subject", template.name), &template.subject)
            .map_err(|e| eyre!("Failed to register subject template: {}", e))?;

        if let Some(text) = &template.body_text {
            self.handlebars
                .register_template_string(&format!("{}_text", template.name), text)
                .map_err(|e| eyre!("Failed to register text template: {}", e))?;
        }

        if let Some(html) = &template.body_html {
            self.handlebars
                .register_template_string(&format!("{}_html", template.name), html)
                .map_err(|e| eyre!("Failed to register HTML template: {}", e))?;
        }

        self.templates.insert(template.name.clone(), template);
        Ok(())
    }

    /// Register a fragment that templates include with `{{> name}}`
    pub fn register_partial(&mut self, name: &str, source: &str) -> Result<()> {
        self.handlebars
            .register_partial(name, source)
            .map_err(|e| eyre!("Failed to register partial '{}': {}", name, e))
    }

    /// Render a template by name
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<RenderedTemplate> {
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| eyre!("Template not found: {}", name))?;

        let subject = self
            .handlebars
            .render(&format!("{}_subject", name), data)
            .map_err(|e| eyre!("Failed to render subject: {}", e))?;

        let body_text = if template.body_text.is_some() {
            Some(
                self.handlebars
                    .render(&format!("{}_text", name), data)
                    .map_err(|e| eyre!("Failed to render text: {}", e))?,
            )
        } else {
            None
        };

        let body_html = if template.body_html.is_some() {
            Some(
                self.handlebars
                    .render(&format!("{}_html", name), data)
                    .map_err(|e| eyre!("Failed to render HTML: {}", e))?,
            )
        } else {
            None
        };

        Ok(RenderedTemplate {
            subject,
            body_text,
            body_html,
        })
    }

    /// Check if a template exists
    pub fn has_template(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_custom_template() {
        let mut engine = TemplateEngine::new();

        engine
            .register(EmailTemplate {
                name: "custom".to_string(),
                subject: "Custom: {{{title}}}".to_string(),
                body_text: Some("{{content}}".to_string()),
                body_html: None,
            })
            .unwrap();

        let rendered = engine
            .render("custom", &json!({ "title": "Test", "content": "Hello World" }))
            .unwrap();

        assert_eq!(rendered.subject, "Custom: Test");
        assert_eq!(rendered.body_text.unwrap(), "Hello World");
        assert!(rendered.body_html.is_none());
        assert!(engine.has_template("custom"));
    }

    #[test]
    fn test_html_body_escapes_but_subject_does_not() {
        let mut engine = TemplateEngine::new();
        engine
            .register(EmailTemplate::html(
                "greeting",
                "Hello {{{name}}}",
                "<p>Hello {{name}}</p>",
            ))
            .unwrap();

        let rendered = engine
            .render("greeting", &json!({ "name": "Joe's <b>Grill</b>" }))
            .unwrap();

        assert_eq!(rendered.subject, "Hello Joe's <b>Grill</b>");
        let html = rendered.body_html.unwrap();
        assert!(html.contains("&lt;b&gt;Grill&lt;/b&gt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_partials_are_shared() {
        let mut engine = TemplateEngine::new();
        engine
            .register_partial("list", "<ul>{{#each items}}<li>{{this}}</li>{{/each}}</ul>")
            .unwrap();
        engine
            .register(EmailTemplate::html("a", "A", "<h1>A</h1>{{> list}}"))
            .unwrap();
        engine
            .register(EmailTemplate::html("b", "B", "<h1>B</h1>{{> list}}"))
            .unwrap();

        let data = json!({ "items": ["x", "y"] });
        for name in ["a", "b"] {
            let html = engine.render(name, &data).unwrap().body_html.unwrap();
            assert!(html.contains("<ul><li>x</li><li>y</li></ul>"));
        }
    }

    #[test]
    fn test_missing_template_and_field_are_errors() {
        let mut engine = TemplateEngine::new();
        assert!(engine.render("nope", &json!({})).is_err());

        engine
            .register(EmailTemplate::html("strict", "S", "<p>{{missing}}</p>"))
            .unwrap();
        assert!(engine.render("strict", &json!({})).is_err());
    }
}
