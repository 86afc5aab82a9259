use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinSet;

use crate::api::TemplateSource;
use crate::error::Result;
use crate::models::{Catalog, DownloadResult, RunSummary};
use crate::output::{self, WriteMode};
use crate::ui::Reporter;

/// Merged output shared by every download task.
///
/// Content and count live under one lock so a block and its count are
/// always added together.
#[derive(Debug, Default)]
struct Aggregator {
    inner: Mutex<Merged>,
}

#[derive(Debug, Default)]
struct Merged {
    content: String,
    count: usize,
}

impl Aggregator {
    async fn push(&self, content: &str) {
        let mut merged = self.inner.lock().await;
        merged.content.push_str(content);
        merged.content.push('\n');
        merged.count += 1;
    }

    async fn take(&self) -> (String, usize) {
        let mut merged = self.inner.lock().await;
        let content = std::mem::take(&mut merged.content);
        (content, merged.count)
    }
}

/// Turns requested template names into one merged blob.
///
/// The catalog is fetched once, every resolved name is downloaded in its own
/// task, and successful bodies are appended in the order downloads finish.
pub struct FetchCoordinator {
    source: Arc<dyn TemplateSource>,
    reporter: Reporter,
}

impl FetchCoordinator {
    pub fn new(source: Arc<dyn TemplateSource>, reporter: Reporter) -> Self {
        Self { source, reporter }
    }

    /// Fetches the catalog, then downloads and merges `requested`.
    ///
    /// Fails only when the catalog cannot be resolved. Unknown names and failed
    /// downloads are reported and left out of the result.
    pub async fn run(&self, requested: &[String]) -> Result<RunSummary> {
        let catalog = self.source.fetch_catalog().await?;
        Ok(self.download_all(&catalog, requested).await)
    }

    /// Runs `requested` and writes the merged blocks to `path`.
    ///
    /// The file is left untouched when the catalog fails or nothing was
    /// downloaded.
    pub async fn run_and_save(
        &self,
        requested: &[String],
        path: &Path,
        mode: WriteMode,
    ) -> Result<RunSummary> {
        let summary = self.run(requested).await?;

        if !summary.missed.is_empty() || !summary.failed.is_empty() {
            log::info!(
                "skipped {} unknown and {} failed: {:?} {:?}",
                summary.missed.len(),
                summary.failed.len(),
                summary.missed,
                summary.failed
            );
        }

        if summary.success_count > 0 {
            output::save_content(path, &summary.merged, mode)?;
        } else {
            log::info!("nothing downloaded, leaving {} untouched", path.display());
        }

        Ok(summary)
    }

    async fn download_all(&self, catalog: &Catalog, requested: &[String]) -> RunSummary {
        let aggregator = Arc::new(Aggregator::default());
        let mut tasks = JoinSet::new();
        let mut missed = Vec::new();

        for arg in requested {
            let key = arg.to_lowercase();

            let Some(name) = catalog.resolve(&key) else {
                self.reporter.miss(&key, catalog.suggest(&key));
                missed.push(key);
                continue;
            };

            let name = name.to_string();
            let arg = arg.clone();
            let source = Arc::clone(&self.source);
            let aggregator = Arc::clone(&aggregator);
            let reporter = self.reporter;

            tasks.spawn(async move {
                match source.fetch_template(&name).await {
                    Ok(content) => {
                        aggregator.push(&content).await;
                        reporter.success(&name);
                        DownloadResult::Downloaded {
                            name,
                            bytes: content.len(),
                        }
                    }
                    Err(e) => {
                        log::warn!("{}", e);
                        reporter.failure(&arg);
                        DownloadResult::Failed {
                            arg,
                            reason: e.to_string(),
                        }
                    }
                }
            });
        }

        let mut failed = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(DownloadResult::Downloaded { name, bytes }) => {
                    log::debug!("{} merged ({} bytes)", name, bytes);
                }
                Ok(DownloadResult::Failed { arg, reason }) => {
                    log::debug!("{} left out: {}", arg, reason);
                    failed.push(arg);
                }
                Err(e) => log::error!("download task did not finish: {}", e),
            }
        }

        let (merged, success_count) = aggregator.take().await;

        RunSummary {
            merged,
            success_count,
            missed,
            failed,
        }
    }
}
