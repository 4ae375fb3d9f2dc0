//! PDF snapshot export using headless Chrome/Chromium.
//!
//! Each call launches its own browser, loads the rendered HTML via a
//! `file://` URL, prints an A4 PDF next to it, and tears the browser down
//! before returning. No browser process is shared across renders.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
use futures_util::StreamExt;
use tracing::{debug, info, warn};

/// A4 paper size in inches, matching a `format: "A4"` print.
const A4_WIDTH_INCHES: f64 = 8.27;
const A4_HEIGHT_INCHES: f64 = 11.69;

/// One-shot PDF exporter.
///
/// Holds only configuration; the browser is acquired and released inside
/// [`PdfExporter::export`].
#[derive(Debug, Clone)]
pub struct PdfExporter {
    /// Path to Chrome/Chromium executable (None for auto-detection).
    chrome_path: Option<String>,
    /// Page load / request timeout.
    timeout: Duration,
}

impl PdfExporter {
    #[must_use]
    pub fn new(chrome_path: Option<String>, timeout: Duration) -> Self {
        Self {
            chrome_path,
            timeout,
        }
    }

    /// Load the HTML file and write its A4 PDF snapshot alongside it.
    ///
    /// Returns the path of the written PDF.
    ///
    /// # Errors
    ///
    /// Returns an error if the browser cannot be launched, the page fails to
    /// load, or the PDF cannot be written.
    pub async fn export(&self, html_path: &Path) -> Result<PathBuf> {
        let absolute = std::fs::canonicalize(html_path)
            .with_context(|| format!("Failed to resolve HTML path: {}", html_path.display()))?;
        let url = format!("file://{}", absolute.display());
        let pdf_path = html_path.with_extension("pdf");

        debug!(url = %url, "Launching headless browser for PDF export");

        let mut config_builder = BrowserConfig::builder()
            .request_timeout(self.timeout)
            .no_sandbox()
            .disable_default_args()
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--disable-extensions")
            .arg("--mute-audio")
            .arg("--hide-scrollbars");

        if let Some(ref chrome_path) = self.chrome_path {
            config_builder = config_builder.chrome_executable(chrome_path);
        }

        let browser_config = config_builder
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build browser config: {e}"))?;

        let (mut browser, mut handler) = Browser::launch(browser_config)
            .await
            .context("Failed to launch browser")?;

        // Drive CDP events in the background for the lifetime of this export
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser handler error: {e}");
                }
            }
        });

        let result = Self::print_page(&browser, &url, &pdf_path).await;

        if let Err(e) = browser.close().await {
            warn!("Failed to close browser: {e}");
        }
        handler_task.abort();

        result?;
        info!(path = %pdf_path.display(), "PDF snapshot written");
        Ok(pdf_path)
    }

    async fn print_page(browser: &Browser, url: &str, pdf_path: &Path) -> Result<()> {
        let page = browser
            .new_page(url)
            .await
            .context("Failed to open rendered HTML")?;

        page.wait_for_navigation()
            .await
            .context("Navigation timeout")?;

        // Give remote avatars a moment to load before snapshotting
        tokio::time::sleep(Duration::from_millis(500)).await;

        let params = PrintToPdfParams {
            print_background: Some(true),
            paper_width: Some(A4_WIDTH_INCHES),
            paper_height: Some(A4_HEIGHT_INCHES),
            ..Default::default()
        };

        let pdf_data = page.pdf(params).await.context("Failed to print PDF")?;

        tokio::fs::write(pdf_path, &pdf_data)
            .await
            .with_context(|| format!("Failed to write PDF to {}", pdf_path.display()))?;

        if let Err(e) = page.close().await {
            warn!("Failed to close page: {e}");
        }

        Ok(())
    }
}
