//! Volume Card Rendering
//!
//! Maps one [`VolumeRecord`] to a self-contained detail card.

use std::fmt;

use super::markup::{Markup, RenderMode};
use crate::inventory::VolumeRecord;

/// Image shown beside every volume card
pub const DEFAULT_VOLUME_IMAGE: &str = "../images/volume.png";

/// A rendered markup block for one volume
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    html: String,
}

impl Fragment {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.html
    }

    pub fn into_string(self) -> String {
        self.html
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.html)
    }
}

/// Renders volume records into detail cards.
///
/// Rendering is pure: the same record and settings always give the same
/// fragment, and no field shape can make it fail.
#[derive(Debug, Clone)]
pub struct RecordRenderer {
    mode: RenderMode,
    image_src: String,
}

impl Default for RecordRenderer {
    fn default() -> Self {
        Self::new(RenderMode::default())
    }
}

impl RecordRenderer {
    pub fn new(mode: RenderMode) -> Self {
        Self {
            mode,
            image_src: DEFAULT_VOLUME_IMAGE.to_string(),
        }
    }

    /// Use a different card image
    pub fn image_src(mut self, src: impl Into<String>) -> Self {
        self.image_src = src.into();
        self
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn render(&self, record: &VolumeRecord) -> Fragment {
        let rows = [
            ("ID:", record.id_text()),
            ("Size:", record.size_text()),
            ("Type:", record.type_text()),
            ("Service:", record.service_name_text()),
            ("Provider:", record.storage_provider_name_text()),
            ("AZ:", record.availability_zone_text()),
            ("Scheduler:", record.scheduler_text()),
        ];

        let mut m = Markup::with_capacity(self.mode, 768);

        m.open("div", &[("class", "col-xs-6 col-md-3")]);
        m.open("h4", &[])
            .element("center", &[], &record.name_text())
            .close("h4");

        m.open("div", &[("class", "col-md-4 center-block")])
            .void(
                "img",
                &[
                    ("src", self.image_src.as_str()),
                    ("width", "150%"),
                    ("class", "img-responsive center-block"),
                ],
            )
            .close("div");

        m.open("div", &[("class", "col-md-8")]);
        m.open("table", &[("width", "100%")]);
        for (caption, value) in &rows {
            m.open("tr", &[]).element("td", &[], caption);
            // Value cells lead with a single space
            m.open("td", &[]).raw(" ").text(value).close("td");
            m.close("tr");
        }
        m.close("table");
        m.close("div");

        m.close("div");

        Fragment::new(m.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> VolumeRecord {
        VolumeRecord::from_value(json!({
            "id": "v1",
            "name": "Vol1",
            "size": "100GB",
            "type": "ssd",
            "serviceName": "svcA",
            "storageProviderName": "providerX",
            "availabilityZone": "az1",
            "scheduler": "sched1"
        }))
    }

    #[test]
    fn test_card_layout() {
        let html = RecordRenderer::default().render(&sample()).into_string();

        assert!(html.starts_with(r#"<div class="col-xs-6 col-md-3"><h4><center>Vol1</center></h4>"#));
        assert!(html.contains(r#"<img src="../images/volume.png" width="150%" class="img-responsive center-block">"#));
        assert!(html.contains("<tr><td>ID:</td><td> v1</td></tr>"));
        assert!(html.contains("<tr><td>Scheduler:</td><td> sched1</td></tr>"));
        assert!(html.ends_with("</table></div></div>"));
    }

    #[test]
    fn test_caption_order() {
        let html = RecordRenderer::default().render(&sample()).into_string();

        let captions = ["ID:", "Size:", "Type:", "Service:", "Provider:", "AZ:", "Scheduler:"];
        let positions: Vec<usize> = captions.iter().map(|c| html.find(c).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_missing_fields_placeholder() {
        let record = VolumeRecord::from_value(json!({ "id": "v9" }));
        let html = RecordRenderer::default().render(&record).into_string();

        assert!(html.contains("<center>undefined</center>"));
        assert!(html.contains("<td>Size:</td><td> undefined</td>"));
        assert_eq!(html.matches("undefined").count(), 7);
    }

    #[test]
    fn test_verbatim_embeds_unmodified() {
        let record = VolumeRecord::from_value(json!({
            "id": "<id & co>",
            "size": "  1 TiB ",
            "type": "\"quoted\"",
            "serviceName": "ünïcode",
            "storageProviderName": "<b>p</b>",
            "availabilityZone": "a'z",
            "scheduler": "s>1"
        }));
        let html = RecordRenderer::new(RenderMode::Verbatim).render(&record).into_string();

        for value in ["<id & co>", "  1 TiB ", "\"quoted\"", "ünïcode", "<b>p</b>", "a'z", "s>1"] {
            assert!(html.contains(&format!("<td> {}</td>", value)), "missing {}", value);
        }
    }

    #[test]
    fn test_escaped_blocks_injection() {
        let record = VolumeRecord::from_value(json!({
            "name": "<script>alert(1)</script>",
            "id": "v1"
        }));
        let html = RecordRenderer::default().render(&record).into_string();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_plain_values_identical_in_both_modes() {
        let escaped = RecordRenderer::new(RenderMode::Escaped).render(&sample());
        let verbatim = RecordRenderer::new(RenderMode::Verbatim).render(&sample());
        assert_eq!(escaped, verbatim);
    }

    #[test]
    fn test_custom_image() {
        let html = RecordRenderer::default()
            .image_src("/static/disk.svg")
            .render(&sample())
            .into_string();
        assert!(html.contains(r#"src="/static/disk.svg""#));
    }
}
