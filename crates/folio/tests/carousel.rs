//! Carousel mounting, classification and click navigation on the fixture page.

use anyhow::Result;

mod common;

#[cfg(test)]
mod tests {
    use super::*;
    use super::common::{load_page, ms, mounted_page, node, positions};

    #[test]
    fn carousels_mount_after_delay_and_skip_sections_without_grid() -> Result<()> {
        let mut page = load_page("portfolio.html")?;
        assert!(!page.carousels_mounted());
        assert!(page.carousels().is_empty());

        page.advance(ms(499))?;
        assert!(page.carousels().is_empty());
        page.advance(ms(1))?;

        assert!(page.carousels_mounted());
        assert_eq!(page.carousels().len(), 2);
        let archive = node(&page, "#archive", 0)?;
        assert!(page.carousels().iter().all(|carousel| carousel.section() != archive));
        Ok(())
    }

    #[test]
    fn mount_reveals_items_and_builds_controls() -> Result<()> {
        let page = mounted_page("portfolio.html")?;
        let document = page.document();
        let carousel = &page.carousels()[0];

        for &item in carousel.items() {
            assert!(!document.has_class(item, "reveal-up"));
            assert!(document.has_class(item, "revealed"));
        }

        let prev = carousel.prev_button();
        assert_eq!(document.class_list(prev), vec!["carousel-nav", "prev-btn"]);
        assert_eq!(document.text_content(prev), "\u{2039}");
        assert_eq!(document.attribute(prev, "aria-label"), Some("Previous project"));
        let next = carousel.next_button();
        assert_eq!(document.text_content(next), "\u{203a}");
        assert_eq!(document.attribute(next, "aria-label"), Some("Next project"));

        let indicators = carousel.indicators();
        assert_eq!(indicators.len(), 4);
        for (index, &indicator) in indicators.iter().enumerate() {
            assert_eq!(document.attribute(indicator, "data-index"), Some(index.to_string().as_str()));
            assert_eq!(document.has_class(indicator, "active"), index == 0);
        }

        let grid_children: Vec<_> = document.children(carousel.grid()).collect();
        assert_eq!(grid_children.len(), 7);
        assert_eq!(grid_children[4], prev);
        assert_eq!(grid_children[5], next);
        assert!(document.has_class(grid_children[6], "carousel-indicators"));
        Ok(())
    }

    #[test]
    fn initial_classes_resolve_even_tie_toward_next() -> Result<()> {
        let page = mounted_page("portfolio.html")?;
        let work = &page.carousels()[0];
        assert_eq!(
            positions(&page, work.items()),
            vec!["active", "next", "far-next", "prev"]
        );

        let more = &page.carousels()[1];
        assert_eq!(positions(&page, more.items()), vec!["active", "next", "prev"]);
        Ok(())
    }

    #[test]
    fn next_then_prev_is_identity_and_wraps() -> Result<()> {
        let mut page = mounted_page("portfolio.html")?;
        let next = node(&page, "#work .next-btn", 0)?;
        let prev = node(&page, "#work .prev-btn", 0)?;

        page.click(next)?;
        assert_eq!(page.carousels()[0].current_index(), 1);
        let items = page.carousels()[0].items().to_vec();
        assert_eq!(positions(&page, &items), vec!["prev", "active", "next", "far-next"]);

        page.click(prev)?;
        assert_eq!(page.carousels()[0].current_index(), 0);
        assert_eq!(positions(&page, &items), vec!["active", "next", "far-next", "prev"]);

        page.click(prev)?;
        assert_eq!(page.carousels()[0].current_index(), 3);
        assert_eq!(positions(&page, &items), vec!["next", "far-next", "prev", "active"]);
        page.click(next)?;
        assert_eq!(page.carousels()[0].current_index(), 0);

        assert_eq!(page.carousels()[1].current_index(), 0);
        Ok(())
    }

    #[test]
    fn indicator_click_jumps_and_relabels() -> Result<()> {
        let mut page = mounted_page("portfolio.html")?;
        let third = node(&page, "#work .carousel-indicator", 2)?;
        page.click(third)?;

        let carousel = &page.carousels()[0];
        assert_eq!(carousel.current_index(), 2);
        assert_eq!(
            positions(&page, carousel.items()),
            vec!["far-next", "prev", "active", "next"]
        );
        let active_indicators: Vec<_> = carousel
            .indicators()
            .iter()
            .filter(|&&indicator| page.document().has_class(indicator, "active"))
            .collect();
        assert_eq!(active_indicators, vec![&carousel.indicators()[2]]);
        Ok(())
    }

    #[test]
    fn clicking_side_items_navigates_but_view_triggers_do_not() -> Result<()> {
        let mut page = mounted_page("portfolio.html")?;

        let second_image = node(&page, "#work .portfolio-item img", 1)?;
        page.click(second_image)?;
        assert_eq!(page.carousels()[0].current_index(), 1);

        let active_item = page.carousels()[0].items()[1];
        page.click(active_item)?;
        assert_eq!(page.carousels()[0].current_index(), 1);

        let label = node(&page, "#work .label", 0)?;
        page.click(label)?;
        assert_eq!(page.carousels()[0].current_index(), 1);
        assert!(page.modal().is_some_and(|modal| modal.is_open()));
        Ok(())
    }
}
