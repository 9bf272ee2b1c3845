//! Dashboard Page
//!
//! Wraps a populated [`Document`] in the full HTML page: usage charts on top,
//! the volume card container below.

use super::markup::{Markup, RenderMode};
use crate::charts::ChartPanel;
use crate::dom::{Document, VOLUME_LIST_ID};

const STYLESHEET: &str = "https://maxcdn.bootstrapcdn.com/bootstrap/3.3.7/css/bootstrap.min.css";
const CHART_JS: &str = "https://cdn.jsdelivr.net/npm/chart.js@4/dist/chart.umd.min.js";

/// Heading used when no title is configured
pub const DEFAULT_PAGE_TITLE: &str = "Polly Storage Dashboard";

/// Renders the dashboard page around a document
#[derive(Debug, Clone)]
pub struct DashboardPage<'a> {
    title: &'a str,
    charts: &'a ChartPanel,
    container_id: &'a str,
    notice: Option<&'a str>,
}

impl<'a> DashboardPage<'a> {
    pub fn new(charts: &'a ChartPanel) -> Self {
        Self {
            title: DEFAULT_PAGE_TITLE,
            charts,
            container_id: VOLUME_LIST_ID,
            notice: None,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    pub fn container_id(mut self, id: &'a str) -> Self {
        self.container_id = id;
        self
    }

    /// Message shown above the volume list, e.g. when the inventory failed to load
    pub fn notice(mut self, notice: Option<&'a str>) -> Self {
        self.notice = notice;
        self
    }

    pub fn render(&self, doc: &Document) -> String {
        let cards = doc
            .get_element_by_id(self.container_id)
            .map(|c| c.inner_html())
            .unwrap_or_default();

        let mut m = Markup::with_capacity(RenderMode::Escaped, 4096 + cards.len());

        m.raw("<!DOCTYPE html>");
        m.open("html", &[("lang", "en")]);
        m.open("head", &[]);
        m.void("meta", &[("charset", "utf-8")]);
        m.element("title", &[], self.title);
        m.void("link", &[("rel", "stylesheet"), ("href", STYLESHEET)]);
        m.close("head");

        m.open("body", &[]);
        m.open("div", &[("class", "container-fluid")]);
        m.element("h2", &[], self.title);

        m.open("div", &[("class", "row"), ("id", "charts")]);
        for widget in self.charts.widgets() {
            m.open("div", &[("class", "col-xs-6 col-md-2")])
                .open("canvas", &[("id", widget.canvas_id)])
                .close("canvas")
                .close("div");
        }
        m.close("div");

        if let Some(notice) = self.notice {
            m.element(
                "div",
                &[("class", "alert alert-warning"), ("id", "volumeListNotice")],
                notice,
            );
        }

        m.open("div", &[("class", "row"), ("id", self.container_id)]);
        m.raw(&cards);
        m.close("div");

        m.close("div");

        m.open("script", &[("src", CHART_JS)]).close("script");
        m.open("script", &[]);
        m.raw("const dashboardCharts = ");
        m.raw(&script_json(&self.charts.to_json()));
        m.raw(";\nfor (const [id, config] of Object.entries(dashboardCharts.charts)) {\n");
        m.raw("  const canvas = document.getElementById(id);\n");
        m.raw("  if (canvas) { new Chart(canvas, config); }\n}\n");
        m.close("script");

        m.close("body");
        m.close("html");

        m.finish()
    }
}

/// Serialize JSON so it cannot terminate the surrounding `<script>` element
fn script_json(value: &serde_json::Value) -> String {
    value.to_string().replace("</", "<\\/")
}
