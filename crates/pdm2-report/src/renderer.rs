//! Report rendering
//!
//! The layout lives in `templates/report.html` and is compiled into the
//! crate. Rendering is a pure function of the model: the whole document is
//! produced in memory or not at all.

use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use pdm2_core::Model;
use crate::context::ReportContext;

/// The report layout
pub const REPORT_TEMPLATE: &str = include_str!("../templates/report.html");

const TEMPLATE_NAME: &str = "report.html";

/// Error during report rendering
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to render report: {0}")]
    Template(#[from] minijinja::Error),
}

/// Renders models to the HTML report
pub struct ReportRenderer {
    env: Environment<'static>,
}

impl ReportRenderer {
    /// Create a renderer with the built-in layout
    pub fn new() -> Result<Self, RenderError> {
        Self::with_template(REPORT_TEMPLATE)
    }

    /// Create a renderer from a layout source
    ///
    /// Every interpolated value is HTML-escaped and unknown variables are
    /// errors rather than empty strings.
    pub fn with_template(source: &'static str) -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_template(TEMPLATE_NAME, source)?;

        Ok(Self { env })
    }

    /// Render the report for a model
    pub fn render(&self, model: &Model) -> Result<String, RenderError> {
        let context = ReportContext::from_model(model);
        let html = self
            .env
            .get_template(TEMPLATE_NAME)?
            .render(context.to_minijinja_value())?;

        tracing::debug!(
            model = %model.name,
            tables = context.tables.len(),
            bytes = html.len(),
            "rendered report"
        );

        Ok(html)
    }
}

/// Render a model with the built-in layout
pub fn render(model: &Model) -> Result<String, RenderError> {
    ReportRenderer::new()?.render(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdm2_core::{Column, Key, PrimaryKeyRef, Table};
    use pretty_assertions::assert_eq;

    /// Cell contents of every column row in the detail sections
    fn column_rows(html: &str) -> Vec<Vec<&str>> {
        let details = &html[html.find("表结构：").unwrap()..];
        details
            .split("<tr>")
            .skip(1)
            .filter(|row| row.contains("<td>"))
            .map(|row| {
                row.split("<td>")
                    .skip(1)
                    .map(|cell| &cell[..cell.find("</td>").unwrap()])
                    .collect()
            })
            .collect()
    }

    fn demo_model() -> Model {
        let mut model = Model::new("Demo").with_file_name("demo.pdm");
        model.author = "A".into();
        model.version = "1.0".into();

        let mut user = Table::new("User", "TB_USER");
        user.columns = vec![
            Column::new("o5", "id", "id").with_data_type("int").with_mandatory("1"),
            Column::new("o6", "name", "name").with_data_type("varchar(64)"),
        ];
        user.keys = vec![Key::new("o7", ["o5"])];
        user.primary_key = Some(PrimaryKeyRef::new("o7"));
        model.tables.push(user);
        model
    }

    #[test]
    fn metadata_block() {
        let mut model = demo_model();
        model.comment = "sales".into();
        model.dbms.shortcut.name = "MySQL 5.0".into();

        let html = render(&model).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Demo - Powered by pdm2</title>"));
        assert!(html.contains("<td>作者：</td>"));
        assert!(html.contains("<td>A</td>"));
        assert!(html.contains("<td>1.0</td>"));
        assert!(html.contains("<td>demo.pdm</td>"));
        assert!(html.contains("<td>sales</td>"));
        assert!(html.contains("<td>MySQL 5.0</td>"));
        assert!(html.contains(r#"<a href="http://pdm2.caffol.com/" target="_blank">pdm2 v0.1.0</a>"#));
    }

    #[test]
    fn table_of_contents_and_anchors() {
        let html = render(&demo_model()).unwrap();

        assert!(html.contains(r##"<td><a href="#TB_USER">User</a></td>"##));
        assert!(html.contains(r##"<a href="#TB_USER" id="list_TB_USER">TB_USER</a>"##));
        assert!(html.contains(r#"id="TB_USER">User（TB_USER）</a>"#));
        assert!(html.contains(r##"<a href="#list_TB_USER">返回</a>"##));
    }

    #[test]
    fn column_rows_mark_primary_key_and_empty_mandatory() {
        let html = render(&demo_model()).unwrap();

        assert_eq!(
            column_rows(&html),
            vec![
                vec!["是", "id", "id", "int", "", "", ""],
                vec!["", "name", "name", "varchar(64)", "是", "", ""],
            ]
        );
    }

    #[test]
    fn no_primary_key_reference_marks_nothing() {
        let mut model = demo_model();
        model.tables[0].primary_key = None;

        let html = render(&model).unwrap();

        assert!(column_rows(&html).iter().all(|row| row[0].is_empty()));
    }

    #[test]
    fn sections_follow_table_order() {
        let mut model = demo_model();
        model.tables.insert(0, Table::new("Audit", "TB_AUDIT"));
        model.tables.push(Table::new("Role", "TB_ROLE"));

        let html = render(&model).unwrap();

        let list: Vec<_> = ["list_TB_AUDIT", "list_TB_USER", "list_TB_ROLE"]
            .iter()
            .map(|id| html.find(&format!("id=\"{id}\"")).unwrap())
            .collect();
        assert!(list.windows(2).all(|w| w[0] < w[1]));

        let sections: Vec<_> = ["TB_AUDIT", "TB_USER", "TB_ROLE"]
            .iter()
            .map(|code| html.find(&format!("id=\"{code}\">")).unwrap())
            .collect();
        assert!(sections.windows(2).all(|w| w[0] < w[1]));
        assert!(list[2] < sections[0]);

        assert_eq!(html.matches("class=\"table_name\"").count(), 3);
        assert_eq!(html.matches("返回</a>").count(), 3);
    }

    #[test]
    fn empty_model_renders() {
        let html = render(&Model::default()).unwrap();

        assert!(html.contains("<title> - Powered by pdm2</title>"));
        assert_eq!(html.matches("id=\"list_").count(), 0);
        assert!(column_rows(&html).is_empty());
    }

    #[test]
    fn reserved_characters_are_escaped() {
        let mut model = demo_model();
        model.tables[0].comment = "a < b & \"c\"".into();
        model.tables[0].columns[1].comment = "<script>alert(1)</script>".into();

        let html = render(&model).unwrap();

        assert!(html.contains("<td>a &lt; b &amp; &quot;c&quot;</td>"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let model = demo_model();
        let renderer = ReportRenderer::new().unwrap();

        assert_eq!(renderer.render(&model).unwrap(), renderer.render(&model).unwrap());
    }

    #[test]
    fn unknown_variable_is_an_error() {
        let renderer = ReportRenderer::with_template("{{ missing.field }}").unwrap();
        let err = renderer.render(&demo_model()).unwrap_err();

        assert!(err.to_string().starts_with("failed to render report"));
    }

    #[test]
    fn broken_template_is_an_error() {
        assert!(ReportRenderer::with_template("{% for table in tables %}").is_err());
    }
}
