//! Query and mutation behaviour over a parsed fixture page.

use anyhow::{Result, anyhow};
use dom::{Document, NodeId, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, parse_document};
use std::fs;
use std::path::PathBuf;
use url::Url;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn load_fixture(name: &str) -> Result<Document> {
    let _ignored = env_logger::builder().is_test(true).try_init();
    let path = fixtures_dir().join(name);
    let html = fs::read_to_string(&path)?;
    let url = Url::from_file_path(&path)
        .map_err(|()| anyhow!("Invalid file path for URL: {}", path.display()))?;
    parse_document(&html, Some(url))
}

fn first(document: &Document, selector: &str) -> Result<NodeId> {
    document
        .query_selector(document.root(), selector)
        .ok_or_else(|| anyhow!("no match for {selector}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_selector_all_respects_scope_and_order() -> Result<()> {
        let document = load_fixture("queries.html")?;
        let all_items = document.query_selector_all(document.root(), ".portfolio-item");
        assert_eq!(all_items.len(), 3);

        let work = document
            .element_by_id("work")
            .ok_or_else(|| anyhow!("missing #work"))?;
        let work_items = document.query_selector_all(work, ".portfolio-grid > .portfolio-item");
        assert_eq!(work_items.len(), 2);
        assert_eq!(document.attribute(work_items[0], "data-index"), Some("0"));
        assert_eq!(document.attribute(work_items[1], "data-index"), Some("1"));

        let sections = document.query_selector_all(document.root(), "section.portfolio, #more-work");
        assert_eq!(sections.len(), 2);
        Ok(())
    }

    #[test]
    fn closest_is_inclusive_and_walks_up() -> Result<()> {
        let document = load_fixture("queries.html")?;
        let label = first(&document, ".label")?;
        let button = document
            .closest(label, ".view-project")
            .ok_or_else(|| anyhow!("label should sit inside a button"))?;
        assert_eq!(document.closest(button, ".view-project"), Some(button));

        let section = document
            .closest(label, "section")
            .ok_or_else(|| anyhow!("label should sit inside a section"))?;
        assert_eq!(document.element_id(section), Some("work"));
        assert_eq!(document.closest(label, "#more-work"), None);
        Ok(())
    }

    #[test]
    fn attribute_selectors_and_urls() -> Result<()> {
        let document = load_fixture("queries.html")?;
        let with_images = document.query_selector_all(document.root(), "[data-project-images]");
        assert_eq!(with_images.len(), 1);

        let image = first(&document, "img[alt=Two]")?;
        let src = document
            .attribute(image, "src")
            .ok_or_else(|| anyhow!("image without src"))?;
        let resolved = document.resolve_url(src);
        assert!(resolved.starts_with("file://"));
        assert!(resolved.ends_with("/tests/fixtures/img/two.png"));
        Ok(())
    }

    #[test]
    fn scroll_requests_are_recorded_then_drained() -> Result<()> {
        let mut document = load_fixture("queries.html")?;
        let image = first(&document, ".project-image")?;
        let options = ScrollIntoViewOptions {
            behavior: ScrollBehavior::Smooth,
            block: ScrollLogicalPosition::Nearest,
            inline: ScrollLogicalPosition::Center,
        };
        document.scroll_into_view(image, options);
        assert_eq!(document.pending_scroll_requests().len(), 1);

        let drained = document.take_scroll_requests();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].node, image);
        assert_eq!(drained[0].options, options);
        assert!(document.pending_scroll_requests().is_empty());
        Ok(())
    }

    #[test]
    fn removed_nodes_leave_queries() -> Result<()> {
        let mut document = load_fixture("queries.html")?;
        let grid = first(&document, "#work .portfolio-grid")?;
        document.remove_children(grid);
        assert_eq!(document.query_selector_all(document.root(), ".portfolio-item").len(), 1);

        let more = document
            .element_by_id("more-work")
            .ok_or_else(|| anyhow!("missing #more-work"))?;
        document.remove_node(more);
        assert!(document.query_selector(document.root(), ".portfolio-item").is_none());
        assert!(document.element_by_id("more-work").is_none());
        Ok(())
    }
}
