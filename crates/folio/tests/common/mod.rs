#![allow(dead_code, reason = "Each test binary uses a different subset of helpers")]
use anyhow::{Result, anyhow};
use core::time::Duration;
use dom::NodeId;
use folio::cli::to_file_url;
use folio::{FolioConfig, Page};
use std::fs;
use std::path::PathBuf;

/// Returns the directory containing HTML fixtures for integration tests.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

pub fn init_logging() {
    let _ignored = env_logger::builder().is_test(true).try_init();
}

/// Load a fixture page at document-ready; carousels are not mounted yet.
pub fn load_page(name: &str) -> Result<Page> {
    init_logging();
    let path = fixtures_dir().join(name);
    let html = fs::read_to_string(&path)?;
    Page::from_html(&html, Some(to_file_url(&path)?), FolioConfig::default())
}

/// Load a fixture page and advance past the carousel mount delay.
pub fn mounted_page(name: &str) -> Result<Page> {
    let mut page = load_page(name)?;
    page.advance(ms(500))?;
    if !page.carousels_mounted() {
        return Err(anyhow!("carousels did not mount at 500ms"));
    }
    Ok(page)
}

pub const fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

/// The `nth` match of `selector`, or an error naming the selector.
pub fn node(page: &Page, selector: &str, nth: usize) -> Result<NodeId> {
    page.find(selector, nth)
        .ok_or_else(|| anyhow!("no match for {selector:?} at {nth}"))
}

/// Position classes of the given items, one string per item.
pub fn positions(page: &Page, items: &[NodeId]) -> Vec<String> {
    let document = page.document();
    items
        .iter()
        .map(|&item| {
            ["active", "prev", "next", "far-prev", "far-next"]
                .into_iter()
                .filter(|class| document.has_class(item, class))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}
