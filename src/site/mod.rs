//! Interactive survey page generation.
//!
//! Renders a validated survey into a single self-contained HTML page: the
//! questions are presented one at a time, the total score is mapped onto a
//! result band, and the outcome is charted (Chart.js) and exportable as an
//! image (html-to-image). Both libraries are loaded by the page from a CDN.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tera::Tera;

use crate::score::ScoreModel;
use crate::survey::SurveyDocument;

/// Embedded page template and stylesheet
pub mod embedded {
    pub const SURVEY_HTML: &str = include_str!("../../templates/site/survey.html");
    pub const STYLES_CSS: &str = include_str!("../../templates/site/styles.css");
}

pub const CHART_JS_URL: &str = "https://cdn.jsdelivr.net/npm/chart.js@4.4.0/dist/chart.umd.js";
pub const HTML_TO_IMAGE_URL: &str =
    "https://cdn.jsdelivr.net/npm/html-to-image@1.11.11/dist/html-to-image.js";

/// Score facts the page script needs
#[derive(Debug, Clone, serde::Serialize)]
struct PageStats {
    question_count: usize,
    min_score: i64,
    max_score: i64,
}

/// A source as listed on the page; `href` is only set for http(s) links
#[derive(Debug, Clone, serde::Serialize)]
struct SourceLink {
    name: String,
    year: i32,
    href: Option<String>,
}

fn source_links(doc: &SurveyDocument) -> Vec<SourceLink> {
    doc.metadata
        .data_source
        .iter()
        .map(|source| SourceLink {
            name: source.name.clone(),
            year: source.year,
            href: url::Url::parse(&source.url)
                .ok()
                .filter(|url| matches!(url.scheme(), "http" | "https"))
                .map(|_| source.url.clone()),
        })
        .collect()
}

/// Convert markdown to HTML using pulldown-cmark
fn markdown_to_html(markdown: &str) -> String {
    use pulldown_cmark::{html, Options, Parser};

    let parser = Parser::new_ext(markdown, Options::empty());
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

/// Serialize the survey for embedding inside a `<script>` element.
///
/// `<`, `>` and `&` are written as unicode escapes so no string value can
/// close the element early; the result is still valid JSON.
pub fn embed_json(doc: &SurveyDocument) -> Result<String> {
    let json = serde_json::to_string(doc).context("Failed to serialize survey for the page")?;
    Ok(json
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}

/// Copy of `doc` with `metadata.sampleSize` clamped into `[min, max]`
pub fn clamp_sample_size(doc: &SurveyDocument, min: u64, max: u64) -> SurveyDocument {
    let mut clamped = doc.clone();
    let size = clamped.metadata.sample_size;
    clamped.metadata.sample_size = size.clamp(min, max.max(min));
    if clamped.metadata.sample_size != size {
        tracing::info!(
            from = size,
            to = clamped.metadata.sample_size,
            "clamped sample size for the page"
        );
    }
    clamped
}

/// Where the page for survey `id` is written
pub fn page_path(output_dir: &Path, id: &str) -> PathBuf {
    output_dir.join(id).join("index.html")
}

/// Survey page renderer
pub struct PageGenerator {
    tera: Tera,
    lang: String,
}

impl PageGenerator {
    /// Create a generator using the embedded template
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template("survey.html", embedded::SURVEY_HTML)
            .context("Failed to load embedded survey template")?;

        Ok(Self {
            tera,
            lang: "en".to_string(),
        })
    }

    /// Set the page's `lang` attribute
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Render the page for a survey
    pub fn render(&self, doc: &SurveyDocument, score: &ScoreModel) -> Result<String> {
        let stats = PageStats {
            question_count: score.question_count(),
            min_score: score.min_possible,
            max_score: score.max_possible,
        };

        let mut context = tera::Context::new();
        context.insert("survey", doc);
        context.insert("survey_json", &embed_json(doc)?);
        context.insert("description_html", &markdown_to_html(&doc.description));
        context.insert("stats", &stats);
        context.insert("sources", &source_links(doc));
        context.insert("styles", embedded::STYLES_CSS);
        context.insert("lang", &self.lang);
        context.insert("version", env!("CARGO_PKG_VERSION"));
        context.insert("chart_js_url", CHART_JS_URL);
        context.insert("html_to_image_url", HTML_TO_IMAGE_URL);

        self.tera
            .render("survey.html", &context)
            .with_context(|| format!("Failed to render page for survey '{}'", doc.id))
    }

    /// Render the page and write it to `<output_dir>/<id>/index.html`
    pub fn write(
        &self,
        id: &str,
        doc: &SurveyDocument,
        score: &ScoreModel,
        output_dir: &Path,
    ) -> Result<PathBuf> {
        let html = self.render(doc, score)?;

        let path = page_path(output_dir, id);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
        fs::write(&path, html)
            .with_context(|| format!("Failed to write page: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "page written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::fixtures::valid_doc;
    use crate::score::MinScoreDefinition;
    use tempfile::TempDir;

    fn render(doc: &SurveyDocument) -> String {
        let score = ScoreModel::compute(doc, MinScoreDefinition::default());
        PageGenerator::new().unwrap().render(doc, &score).unwrap()
    }

    #[test]
    fn test_markdown_to_html() {
        let html = markdown_to_html("Compared with **real** data.");
        assert_eq!(html.trim(), "<p>Compared with <strong>real</strong> data.</p>");
    }

    #[test]
    fn test_render_contains_survey_and_libraries() {
        let doc = valid_doc();
        let html = render(&doc);

        assert!(html.contains("<title>How Healthy Are Your Sleep Habits?</title>"));
        assert!(html.contains(CHART_JS_URL));
        assert!(html.contains(HTML_TO_IMAGE_URL));
        assert!(html.contains("const MAX_SCORE = 22;"));
        assert!(html.contains("<strong>real survey data</strong>"));
        assert!(html.contains("based on 127 real responses"));
        assert!(html.contains("function parseRange(range)"));
    }

    #[test]
    fn test_lang_attribute() {
        let doc = valid_doc();
        let score = ScoreModel::compute(&doc, MinScoreDefinition::default());

        assert!(render(&doc).contains("<html lang=\"en\">"));
        let html = PageGenerator::new()
            .unwrap()
            .with_lang("ro")
            .render(&doc, &score)
            .unwrap();
        assert!(html.contains("<html lang=\"ro\">"));
    }

    #[test]
    fn test_title_is_escaped() {
        let mut doc = valid_doc();
        doc.title = "Sleep & <b>you</b>".to_string();
        let html = render(&doc);
        assert!(html.contains("<title>Sleep &amp; &lt;b&gt;you&lt;&#x2F;b&gt;</title>"));
    }

    #[test]
    fn test_only_http_sources_are_linked() {
        let mut doc = valid_doc();
        doc.metadata.data_source[1].url = "javascript:alert(1)".to_string();
        let html = render(&doc);

        assert!(html.contains("href=\"https:&#x2F;&#x2F;www.thensf.org"));
        assert!(!html.contains("href=\"javascript"));
        assert!(html.contains("<li>Short Sleep Duration Among US Adults (2022)</li>"));
    }

    #[test]
    fn test_embedded_json_cannot_close_script() {
        let mut doc = valid_doc();
        doc.questions[0].text = "</script><script>alert(1)</script>".to_string();

        let json = embed_json(&doc).unwrap();
        assert!(!json.contains("</script>"));

        let back: SurveyDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_clamp_sample_size() {
        let mut doc = valid_doc();
        doc.metadata.sample_size = 4000;
        assert_eq!(clamp_sample_size(&doc, 25, 600).metadata.sample_size, 600);

        doc.metadata.sample_size = 3;
        assert_eq!(clamp_sample_size(&doc, 25, 600).metadata.sample_size, 25);

        doc.metadata.sample_size = 127;
        let clamped = clamp_sample_size(&doc, 25, 600);
        assert_eq!(clamped, doc);
    }

    #[test]
    fn test_write_creates_page_directory() {
        let tmp = TempDir::new().unwrap();
        let doc = valid_doc();
        let score = ScoreModel::compute(&doc, MinScoreDefinition::default());

        let path = PageGenerator::new()
            .unwrap()
            .write("sleep-habits", &doc, &score, tmp.path())
            .unwrap();

        assert_eq!(path, tmp.path().join("sleep-habits").join("index.html"));
        let html = fs::read_to_string(path).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
    }
}
