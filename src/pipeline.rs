//! Fetch-Render-Append Pipeline
//!
//! Drives one inventory fetch into a document: every record is rendered and
//! appended in response order. The only suspension point is the fetch;
//! rendering and appending run to completion under an exclusive borrow of the
//! document, so records never interleave.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::config::Config;
use crate::dom::{DomAppender, DomError, Document};
use crate::inventory::{InventoryError, InventoryFetcher, InventorySource, VolumeRecord};
use crate::render::RecordRenderer;

/// What happens when the inventory cannot be fetched or parsed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Return the error to the caller
    #[default]
    Surface,
    /// Append nothing and report success with zero records
    Silent,
}

/// What a repeated run does with children from earlier runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefreshPolicy {
    /// Keep earlier children; a second run doubles the list
    #[default]
    Append,
    /// Clear the container before appending a successful response
    Replace,
}

impl std::str::FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "surface" => Ok(FailurePolicy::Surface),
            "silent" => Ok(FailurePolicy::Silent),
            other => Err(format!("Unknown failure policy: {}. Use: surface, silent", other)),
        }
    }
}

impl std::str::FromStr for RefreshPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "append" => Ok(RefreshPolicy::Append),
            "replace" => Ok(RefreshPolicy::Replace),
            other => Err(format!("Unknown refresh policy: {}. Use: append, replace", other)),
        }
    }
}

/// Pipeline behavior switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    pub failure: FailurePolicy,
    pub refresh: RefreshPolicy,
}

/// Outcome of one pipeline run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    /// Records received from the source
    pub fetched: usize,
    /// Fragments appended by this run
    pub appended: usize,
    /// Children in the container after this run
    pub children: usize,
}

/// Errors surfaced by a pipeline run
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    Dom(#[from] DomError),
}

/// Fetches the inventory and renders it into a document
pub struct InventoryPipeline {
    source: Arc<dyn InventorySource>,
    renderer: RecordRenderer,
    appender: DomAppender,
    options: PipelineOptions,
}

impl InventoryPipeline {
    pub fn new(source: Arc<dyn InventorySource>) -> Self {
        Self {
            source,
            renderer: RecordRenderer::default(),
            appender: DomAppender::default(),
            options: PipelineOptions::default(),
        }
    }

    /// Build the HTTP-backed pipeline described by `config`
    pub fn from_config(config: &Config) -> Result<Self, InventoryError> {
        let fetcher = InventoryFetcher::new(config.inventory.client_config())?;

        Ok(Self::new(Arc::new(fetcher))
            .renderer(RecordRenderer::new(config.render.mode).image_src(&config.render.volume_image))
            .appender(DomAppender::new(&config.dashboard.container_id))
            .options(config.dashboard.pipeline_options()))
    }

    pub fn renderer(mut self, renderer: RecordRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn appender(mut self, appender: DomAppender) -> Self {
        self.appender = appender;
        self
    }

    pub fn options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn container_id(&self) -> &str {
        self.appender.container_id()
    }

    pub fn source(&self) -> &Arc<dyn InventorySource> {
        &self.source
    }

    /// Retrieve the inventory without touching any document
    pub async fn fetch(&self) -> Result<Vec<VolumeRecord>, InventoryError> {
        self.source.fetch().await
    }

    /// Fetch, then render and append every record into `doc`
    pub async fn run(&self, doc: &mut Document) -> Result<PipelineReport, PipelineError> {
        let fetched = self.fetch().await;
        self.apply(fetched, doc)
    }

    /// Apply a fetch outcome to `doc`, honoring the failure and refresh policies.
    ///
    /// Split from [`run`](Self::run) so callers can fetch without holding a
    /// lock on a shared document.
    pub fn apply(
        &self,
        fetched: Result<Vec<VolumeRecord>, InventoryError>,
        doc: &mut Document,
    ) -> Result<PipelineReport, PipelineError> {
        let records = match fetched {
            Ok(records) => records,
            Err(e) => match self.options.failure {
                FailurePolicy::Surface => {
                    tracing::warn!(
                        source = %self.source.describe(),
                        error = %e,
                        "Volume inventory unavailable"
                    );
                    return Err(e.into());
                }
                FailurePolicy::Silent => {
                    tracing::debug!(
                        source = %self.source.describe(),
                        error = %e,
                        "Volume inventory unavailable, rendering nothing"
                    );
                    let children = doc
                        .get_element_by_id(self.container_id())
                        .map(|c| c.len())
                        .unwrap_or(0);
                    return Ok(PipelineReport {
                        children,
                        ..Default::default()
                    });
                }
            },
        };

        if self.options.refresh == RefreshPolicy::Replace {
            if let Some(container) = doc.get_element_by_id_mut(self.container_id()) {
                container.clear();
            }
        }

        let mut report = PipelineReport {
            fetched: records.len(),
            ..Default::default()
        };

        for record in &records {
            let fragment = self.renderer.render(record);
            report.children = self.appender.append(doc, fragment)?;
            report.appended += 1;
        }

        if records.is_empty() {
            report.children = doc
                .get_element_by_id(self.container_id())
                .map(|c| c.len())
                .unwrap_or(0);
        }

        tracing::info!(
            fetched = report.fetched,
            appended = report.appended,
            children = report.children,
            "Volume list rendered"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::VOLUME_LIST_ID;
    use crate::inventory::{parse_inventory, InventoryResult};
    use crate::render::RenderMode;
    use async_trait::async_trait;

    /// Serves a fixed response body, or a fixed HTTP status
    struct StaticSource {
        body: &'static str,
        status: Option<u16>,
    }

    impl StaticSource {
        fn body(body: &'static str) -> Arc<dyn InventorySource> {
            Arc::new(Self { body, status: None })
        }

        fn failing(status: u16) -> Arc<dyn InventorySource> {
            Arc::new(Self { body: "", status: Some(status) })
        }
    }

    #[async_trait]
    impl InventorySource for StaticSource {
        fn describe(&self) -> String {
            "static".to_string()
        }

        async fn fetch(&self) -> InventoryResult<Vec<VolumeRecord>> {
            match self.status {
                Some(status) => Err(InventoryError::Status { status }),
                None => parse_inventory(self.body.as_bytes()),
            }
        }
    }

    const THREE: &str = r#"[
        {"id":"v1","name":"Vol1"},
        {"id":"v2","name":"Vol2"},
        {"id":"v3","name":"Vol3"}
    ]"#;

    fn children(doc: &Document) -> Vec<String> {
        doc.get_element_by_id(VOLUME_LIST_ID)
            .unwrap()
            .children()
            .iter()
            .map(|f| f.to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_appends_in_response_order() {
        let pipeline = InventoryPipeline::new(StaticSource::body(THREE));
        let mut doc = Document::dashboard();

        let report = pipeline.run(&mut doc).await.unwrap();
        assert_eq!(
            report,
            PipelineReport {
                fetched: 3,
                appended: 3,
                children: 3
            }
        );

        let html = children(&doc);
        assert!(html[0].contains("<td> v1</td>"));
        assert!(html[1].contains("<td> v2</td>"));
        assert!(html[2].contains("<td> v3</td>"));
    }

    #[tokio::test]
    async fn test_empty_response_leaves_container_unchanged() {
        let pipeline = InventoryPipeline::new(StaticSource::body("[]"));
        let mut doc = Document::dashboard();

        let report = pipeline.run(&mut doc).await.unwrap();
        assert_eq!(report, PipelineReport::default());
        assert!(children(&doc).is_empty());
    }

    #[tokio::test]
    async fn test_second_run_duplicates_children() {
        let pipeline = InventoryPipeline::new(StaticSource::body(THREE));
        let mut doc = Document::dashboard();

        pipeline.run(&mut doc).await.unwrap();
        let report = pipeline.run(&mut doc).await.unwrap();

        assert_eq!(report.appended, 3);
        assert_eq!(report.children, 6);
        assert_eq!(children(&doc)[0], children(&doc)[3]);
    }

    #[tokio::test]
    async fn test_replace_policy_keeps_single_copy() {
        let pipeline = InventoryPipeline::new(StaticSource::body(THREE)).options(PipelineOptions {
            refresh: RefreshPolicy::Replace,
            ..Default::default()
        });
        let mut doc = Document::dashboard();

        pipeline.run(&mut doc).await.unwrap();
        let report = pipeline.run(&mut doc).await.unwrap();

        assert_eq!(report.children, 3);
        assert_eq!(children(&doc).len(), 3);
    }

    #[tokio::test]
    async fn test_replace_policy_with_empty_response_clears_list() {
        let mut doc = Document::dashboard();
        InventoryPipeline::new(StaticSource::body(THREE))
            .run(&mut doc)
            .await
            .unwrap();
        assert_eq!(children(&doc).len(), 3);

        let emptied = InventoryPipeline::new(StaticSource::body("[]")).options(PipelineOptions {
            refresh: RefreshPolicy::Replace,
            ..Default::default()
        });
        let report = emptied.run(&mut doc).await.unwrap();

        assert_eq!(report, PipelineReport::default());
        assert_eq!(report.appended, 0);
        assert_eq!(report.children, 0);
        assert!(children(&doc).is_empty());
    }

    #[tokio::test]
    async fn test_replace_policy_keeps_children_on_failure() {
        let mut doc = Document::dashboard();
        InventoryPipeline::new(StaticSource::body(THREE))
            .run(&mut doc)
            .await
            .unwrap();

        let failing = InventoryPipeline::new(StaticSource::failing(503)).options(PipelineOptions {
            failure: FailurePolicy::Silent,
            refresh: RefreshPolicy::Replace,
        });
        let report = failing.run(&mut doc).await.unwrap();

        assert_eq!(report.appended, 0);
        assert_eq!(report.children, 3);
    }

    #[tokio::test]
    async fn test_surface_policy_returns_error() {
        let pipeline = InventoryPipeline::new(StaticSource::failing(500));
        let mut doc = Document::dashboard();

        let err = pipeline.run(&mut doc).await.unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Inventory(InventoryError::Status { status: 500 })
        ));
        assert!(children(&doc).is_empty());
    }

    #[tokio::test]
    async fn test_silent_policy_renders_nothing() {
        let pipeline = InventoryPipeline::new(StaticSource::body("not json")).options(
            PipelineOptions {
                failure: FailurePolicy::Silent,
                ..Default::default()
            },
        );
        let mut doc = Document::dashboard();

        let report = pipeline.run(&mut doc).await.unwrap();
        assert_eq!(report, PipelineReport::default());
        assert!(children(&doc).is_empty());
    }

    #[tokio::test]
    async fn test_missing_container_is_an_error() {
        let pipeline = InventoryPipeline::new(StaticSource::body(THREE));
        let mut doc = Document::new();

        let err = pipeline.run(&mut doc).await.unwrap_err();
        assert!(matches!(err, PipelineError::Dom(DomError::ContainerMissing { .. })));
    }

    #[tokio::test]
    async fn test_custom_renderer_and_container() {
        let pipeline = InventoryPipeline::new(StaticSource::body(r#"[{"name":"<i>x</i>"}]"#))
            .renderer(RecordRenderer::new(RenderMode::Verbatim))
            .appender(DomAppender::new("cards"));
        let mut doc = Document::with_container("cards");

        pipeline.run(&mut doc).await.unwrap();

        let cards = doc.get_element_by_id("cards").unwrap();
        assert!(cards.inner_html().contains("<center><i>x</i></center>"));
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("silent".parse::<FailurePolicy>().unwrap(), FailurePolicy::Silent);
        assert_eq!("Replace".parse::<RefreshPolicy>().unwrap(), RefreshPolicy::Replace);
        assert!("sometimes".parse::<RefreshPolicy>().is_err());
    }
}
