//! Project preview modal bound to `#project-modal`.
//!
//! One instance serves the whole document. It is opened from any
//! `.view-project` trigger, shows a main image with an optional thumbnail
//! strip, and drops its content a short while after closing.

use crate::classes;
use crate::config::FolioConfig;
use crate::page::Task;
use crate::timers::TimerQueue;
use anyhow::Error;
use core::time::Duration;
use dom::{
    Document, NodeId, Propagation, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};
use log::{debug, trace};

/// Presentation variant picked from the section that holds the trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StyleMode {
    /// Square logo presentation.
    #[default]
    Logo,
    /// Wide screenshot presentation.
    Thumbnail,
}

impl StyleMode {
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Logo => classes::MODAL_LOGO,
            Self::Thumbnail => classes::MODAL_THUMBNAIL,
        }
    }
}

/// Split a `data-project-images` value into trimmed, non-empty sources.
pub fn parse_image_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|src| !src.is_empty())
        .map(str::to_owned)
        .collect()
}

const THUMB_SCROLL: ScrollIntoViewOptions = ScrollIntoViewOptions {
    behavior: ScrollBehavior::Smooth,
    block: ScrollLogicalPosition::Nearest,
    inline: ScrollLogicalPosition::Center,
};

#[derive(Debug)]
pub struct ModalController {
    modal: NodeId,
    close_button: Option<NodeId>,
    main_image: Option<NodeId>,
    prev_button: Option<NodeId>,
    next_button: Option<NodeId>,
    thumbnails: Option<NodeId>,
    images: Vec<String>,
    current_index: usize,
    style_mode: StyleMode,
    is_open: bool,
    thumbnail_section_id: String,
    clear_delay: Duration,
}

impl ModalController {
    /// Bind to `#project-modal`. Missing sub-regions only disable the feature that uses them.
    pub fn attach(document: &Document, config: &FolioConfig) -> Option<Self> {
        let modal = document.element_by_id(classes::MODAL_ID)?;
        let region = |selector: &str| document.query_selector(modal, selector);
        let controller = Self {
            modal,
            close_button: region(classes::MODAL_CLOSE),
            main_image: region(classes::MODAL_MAIN_IMAGE),
            prev_button: region(classes::MODAL_PREV),
            next_button: region(classes::MODAL_NEXT),
            thumbnails: region(classes::MODAL_THUMBNAILS),
            images: Vec::new(),
            current_index: 0,
            style_mode: StyleMode::default(),
            is_open: false,
            thumbnail_section_id: config.thumbnail_section_id.clone(),
            clear_delay: config.modal_clear_delay(),
        };
        debug!(
            "modal: attached (close={}, main={}, nav={}, thumbs={})",
            controller.close_button.is_some(),
            controller.main_image.is_some(),
            controller.prev_button.is_some() || controller.next_button.is_some(),
            controller.thumbnails.is_some()
        );
        Some(controller)
    }

    pub const fn modal(&self) -> NodeId {
        self.modal
    }

    pub const fn main_image(&self) -> Option<NodeId> {
        self.main_image
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub const fn current_index(&self) -> usize {
        self.current_index
    }

    pub const fn style_mode(&self) -> StyleMode {
        self.style_mode
    }

    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    /// Thumbnail elements currently in the strip, in image order.
    pub fn thumbnail_nodes(&self, document: &Document) -> Vec<NodeId> {
        self.thumbnails
            .map(|container| {
                document
                    .children(container)
                    .filter(|&child| document.has_class(child, classes::MODAL_THUMB))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Images for `trigger`: its own non-empty list, else the enclosing item's
    /// project image. An empty `src` counts as no image.
    fn collect_images(&self, document: &Document, trigger: NodeId) -> Vec<String> {
        if let Some(raw) = document
            .attribute(trigger, classes::PROJECT_IMAGES_ATTR)
            .filter(|raw| !raw.is_empty())
        {
            return parse_image_list(raw);
        }
        document
            .closest(trigger, classes::PORTFOLIO_ITEM)
            .and_then(|item| document.query_selector(item, classes::PROJECT_IMAGE))
            .and_then(|image| document.attribute(image, "src"))
            .map(str::trim)
            .filter(|src| !src.is_empty())
            .map(|src| vec![document.resolve_url(src)])
            .unwrap_or_default()
    }

    fn style_for(&self, document: &Document, trigger: NodeId) -> StyleMode {
        let in_thumbnail_section = document
            .closest(trigger, "section")
            .and_then(|section| document.element_id(section))
            .is_some_and(|id| id == self.thumbnail_section_id);
        if in_thumbnail_section {
            StyleMode::Thumbnail
        } else {
            StyleMode::Logo
        }
    }

    /// Open for `trigger`. Returns false, leaving the modal as it was, when no
    /// image can be found for the trigger.
    ///
    /// # Errors
    /// Returns an error if the thumbnail strip cannot be rebuilt.
    pub fn open(&mut self, document: &mut Document, trigger: NodeId) -> Result<bool, Error> {
        let images = self.collect_images(document, trigger);
        if images.is_empty() {
            debug!("modal: trigger {trigger:?} has no images, not opening");
            return Ok(false);
        }
        self.images = images;
        self.current_index = 0;

        self.style_mode = self.style_for(document, trigger);
        document.remove_classes(self.modal, &[classes::MODAL_LOGO, classes::MODAL_THUMBNAIL]);
        document.add_class(self.modal, self.style_mode.class_name());

        self.generate_thumbnails(document)?;
        self.render(document);

        document.add_class(self.modal, classes::ACTIVE);
        if let Some(body) = document.body() {
            document.set_style_property(body, "overflow", "hidden");
        }
        self.is_open = true;
        debug!(
            "modal: opened with {} images ({:?})",
            self.images.len(),
            self.style_mode
        );
        Ok(true)
    }

    /// Hide the modal now and schedule the content clear.
    pub fn close(&mut self, document: &mut Document, timers: &mut TimerQueue<Task>) {
        document.remove_class(self.modal, classes::ACTIVE);
        if let Some(body) = document.body() {
            document.set_style_property(body, "overflow", "");
        }
        self.is_open = false;
        timers.set_timeout(self.clear_delay, Task::ClearModal);
        debug!("modal: closed, clearing in {:?}", self.clear_delay);
    }

    /// Deferred half of [`ModalController::close`]. Skipped if the modal was
    /// opened again in the meantime.
    pub fn clear_content(&mut self, document: &mut Document) {
        if self.is_open {
            trace!("modal: re-opened before clear, keeping content");
            return;
        }
        if let Some(main) = self.main_image {
            document.set_attribute(main, "src", "");
        }
        if let Some(container) = self.thumbnails {
            document.remove_children(container);
        }
        self.images.clear();
        self.current_index = 0;
        debug!("modal: content cleared");
    }

    pub fn next_image(&mut self, document: &mut Document) {
        if self.images.is_empty() {
            return;
        }
        self.current_index = (self.current_index + 1) % self.images.len();
        self.render(document);
    }

    pub fn prev_image(&mut self, document: &mut Document) {
        let total = self.images.len();
        if total == 0 {
            return;
        }
        self.current_index = (self.current_index + total - 1) % total;
        self.render(document);
    }

    /// Select the image at `index` (a thumbnail position).
    pub fn show_image(&mut self, document: &mut Document, index: usize) {
        if index < self.images.len() {
            self.current_index = index;
            self.render(document);
        }
    }

    /// Sync the main image, nav visibility and the active thumbnail to the cursor.
    pub fn render(&self, document: &mut Document) {
        let Some(src) = self.images.get(self.current_index) else {
            return;
        };
        if let Some(main) = self.main_image {
            document.set_attribute(main, "src", src);
        }
        let display = if self.images.len() > 1 { "flex" } else { "none" };
        for button in [self.prev_button, self.next_button].into_iter().flatten() {
            document.set_style_property(button, "display", display);
        }
        for (index, thumb) in self.thumbnail_nodes(document).into_iter().enumerate() {
            let is_current = index == self.current_index;
            document.toggle_class(thumb, classes::ACTIVE, is_current);
            if is_current {
                document.scroll_into_view(thumb, THUMB_SCROLL);
            }
        }
    }

    /// Rebuild the thumbnail strip; single-image sets get no strip.
    ///
    /// # Errors
    /// Returns an error if a thumbnail cannot be attached to the container.
    pub fn generate_thumbnails(&self, document: &mut Document) -> Result<(), Error> {
        let Some(container) = self.thumbnails else {
            return Ok(());
        };
        document.remove_children(container);
        if self.images.len() <= 1 {
            return Ok(());
        }
        for src in &self.images {
            let thumb = document.create_element("img");
            document.set_attribute(thumb, "src", src);
            document.set_attribute(thumb, "class", classes::MODAL_THUMB);
            document.append_child(container, thumb)?;
        }
        Ok(())
    }

    /// Click handling for nodes owned by the modal.
    pub fn handle_click(
        &mut self,
        document: &mut Document,
        timers: &mut TimerQueue<Task>,
        node: NodeId,
        target: NodeId,
    ) -> Propagation {
        if let Some(position) = self
            .thumbnail_nodes(document)
            .iter()
            .position(|&thumb| thumb == node)
        {
            self.show_image(document, position);
            return Propagation::Stop;
        }
        if Some(node) == self.prev_button {
            self.prev_image(document);
            return Propagation::Stop;
        }
        if Some(node) == self.next_button {
            self.next_image(document);
            return Propagation::Stop;
        }
        if Some(node) == self.close_button || (node == self.modal && target == self.modal) {
            self.close(document, timers);
        }
        Propagation::Continue
    }

    /// Document-level delegation: open for clicks on or inside a `.view-project` trigger.
    ///
    /// # Errors
    /// Returns an error if opening fails to rebuild the thumbnail strip.
    pub fn handle_document_click(
        &mut self,
        document: &mut Document,
        target: NodeId,
    ) -> Result<bool, Error> {
        match document.closest(target, classes::VIEW_PROJECT) {
            Some(trigger) => self.open(document, trigger),
            None => Ok(false),
        }
    }

    /// Document-level keydown: `Escape` closes an open modal.
    pub fn handle_key(&mut self, document: &mut Document, timers: &mut TimerQueue<Task>, key: &str) {
        if key == "Escape" && document.has_class(self.modal, classes::ACTIVE) {
            self.close(document, timers);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_list_is_trimmed_and_filtered() {
        assert_eq!(
            parse_image_list("a.png, b.png ,c.png"),
            vec!["a.png", "b.png", "c.png"]
        );
        assert_eq!(parse_image_list(" , ,"), Vec::<String>::new());
        assert_eq!(parse_image_list("only.png"), vec!["only.png"]);
    }

    #[test]
    fn style_mode_classes() {
        assert_eq!(StyleMode::default(), StyleMode::Logo);
        assert_eq!(StyleMode::Logo.class_name(), "modal-logo");
        assert_eq!(StyleMode::Thumbnail.class_name(), "modal-thumbnail");
    }
}
