//! Circular project carousel mounted on a `.portfolio` section.
//!
//! Every item carries exactly one position class relative to the current
//! slide. Navigation controls and indicators are created at mount time and
//! appended to the section's grid; autoplay is an interval timer owned by
//! the controller.

use crate::classes;
use crate::page::Task;
use crate::timers::{TimerId, TimerQueue};
use anyhow::Error;
use core::time::Duration;
use dom::{Document, EventKind, NodeId};
use log::{debug, warn};

/// Position of an item relative to the current slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlidePosition {
    Active,
    Prev,
    Next,
    FarPrev,
    FarNext,
}

impl SlidePosition {
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Active => classes::ACTIVE,
            Self::Prev => classes::PREV,
            Self::Next => classes::NEXT,
            Self::FarPrev => classes::FAR_PREV,
            Self::FarNext => classes::FAR_NEXT,
        }
    }
}

/// Classify `index` relative to `current` in a ring of `total` items.
///
/// The signed distance is wrapped into `[-total/2, total/2]`; when `total` is
/// even an item exactly opposite the current one counts as ahead of it.
/// This departs from a strict `diff < -total/2` wrap, which would call that
/// item behind when its index is lower: with two items the other one is always
/// `next`, and with four the opposite one is always `far-next`.
pub fn classify(index: usize, current: usize, total: usize) -> SlidePosition {
    let total_signed = total as isize;
    let mut diff = index as isize - current as isize;
    if 2 * diff > total_signed {
        diff -= total_signed;
    }
    if 2 * diff < -total_signed {
        diff += total_signed;
    }
    if total % 2 == 0 && 2 * diff == -total_signed {
        diff = -diff;
    }
    match diff {
        0 => SlidePosition::Active,
        -1 => SlidePosition::Prev,
        1 => SlidePosition::Next,
        ..=-2 => SlidePosition::FarPrev,
        2.. => SlidePosition::FarNext,
    }
}

#[derive(Debug)]
pub struct CarouselController {
    /// Index of this carousel in the page's carousel list; carried by autoplay tasks.
    slot: usize,
    section: NodeId,
    grid: NodeId,
    items: Vec<NodeId>,
    prev_button: NodeId,
    next_button: NodeId,
    indicators: Vec<NodeId>,
    current_index: usize,
    autoplay: Option<TimerId>,
    interval: Duration,
}

impl CarouselController {
    /// Mount a carousel on `section`.
    ///
    /// Returns `Ok(None)` and leaves the document untouched when the section
    /// has no `.portfolio-grid` or no `.portfolio-item`s.
    ///
    /// # Errors
    /// Returns an error if the generated controls cannot be attached to the grid.
    pub fn mount(
        document: &mut Document,
        timers: &mut TimerQueue<Task>,
        section: NodeId,
        slot: usize,
        interval: Duration,
    ) -> Result<Option<Self>, Error> {
        let grid = document.query_selector(section, classes::PORTFOLIO_GRID);
        let items = document.query_selector_all(section, classes::PORTFOLIO_ITEM);
        let Some(grid) = grid.filter(|_| !items.is_empty()) else {
            debug!(
                "carousel: section {:?} has no grid or items, staying inert",
                document.element_id(section)
            );
            return Ok(None);
        };
        debug!(
            "carousel: mounting on section {:?} with {} items",
            document.element_id(section),
            items.len()
        );

        for &item in &items {
            document.remove_class(item, classes::REVEAL_UP);
            document.add_class(item, classes::REVEALED);
        }

        let prev_button = Self::create_nav(document, classes::PREV_BTN, "\u{2039}", "Previous project")?;
        let next_button = Self::create_nav(document, classes::NEXT_BTN, "\u{203a}", "Next project")?;
        let indicator_strip = document.create_element("div");
        document.set_attribute(indicator_strip, "class", classes::CAROUSEL_INDICATORS);
        let mut indicators = Vec::with_capacity(items.len());
        for index in 0..items.len() {
            let indicator = document.create_element("div");
            document.set_attribute(indicator, "class", classes::CAROUSEL_INDICATOR);
            document.set_attribute(indicator, "data-index", &index.to_string());
            document.append_child(indicator_strip, indicator)?;
            indicators.push(indicator);
        }
        document.append_child(grid, prev_button)?;
        document.append_child(grid, next_button)?;
        document.append_child(grid, indicator_strip)?;

        let mut carousel = Self {
            slot,
            section,
            grid,
            items,
            prev_button,
            next_button,
            indicators,
            current_index: 0,
            autoplay: None,
            interval,
        };
        carousel.update(document);
        carousel.start_autoplay(timers);
        Ok(Some(carousel))
    }

    fn create_nav(
        document: &mut Document,
        direction: &str,
        glyph: &str,
        label: &str,
    ) -> Result<NodeId, Error> {
        let button = document.create_element("div");
        document.set_attribute(button, "class", &format!("{} {direction}", classes::CAROUSEL_NAV));
        document.set_attribute(button, "aria-label", label);
        document.set_text_content(button, glyph)?;
        Ok(button)
    }

    pub const fn section(&self) -> NodeId {
        self.section
    }

    pub const fn grid(&self) -> NodeId {
        self.grid
    }

    pub fn items(&self) -> &[NodeId] {
        &self.items
    }

    pub const fn prev_button(&self) -> NodeId {
        self.prev_button
    }

    pub const fn next_button(&self) -> NodeId {
        self.next_button
    }

    pub fn indicators(&self) -> &[NodeId] {
        &self.indicators
    }

    pub const fn current_index(&self) -> usize {
        self.current_index
    }

    /// Handle of the live autoplay timer, if any.
    pub const fn autoplay(&self) -> Option<TimerId> {
        self.autoplay
    }

    /// Re-apply position classes to every item and the active flag to indicators.
    pub fn update(&self, document: &mut Document) {
        let total = self.items.len();
        for (index, &item) in self.items.iter().enumerate() {
            document.remove_classes(item, &classes::SLIDE_POSITIONS);
            let position = classify(index, self.current_index, total);
            document.add_class(item, position.class_name());
        }
        for (index, &indicator) in self.indicators.iter().enumerate() {
            document.toggle_class(indicator, classes::ACTIVE, index == self.current_index);
        }
    }

    pub fn next_slide(&mut self, document: &mut Document, timers: &mut TimerQueue<Task>) {
        self.current_index = (self.current_index + 1) % self.items.len();
        debug!("carousel {}: next -> {}", self.slot, self.current_index);
        self.update(document);
        self.reset_autoplay(timers);
    }

    pub fn prev_slide(&mut self, document: &mut Document, timers: &mut TimerQueue<Task>) {
        let total = self.items.len();
        self.current_index = (self.current_index + total - 1) % total;
        debug!("carousel {}: prev -> {}", self.slot, self.current_index);
        self.update(document);
        self.reset_autoplay(timers);
    }

    /// Jump to `index`. Out-of-range indices are ignored.
    pub fn go_to_slide(
        &mut self,
        document: &mut Document,
        timers: &mut TimerQueue<Task>,
        index: usize,
    ) {
        if index >= self.items.len() {
            warn!(
                "carousel {}: ignoring go_to_slide({index}) with {} items",
                self.slot,
                self.items.len()
            );
            return;
        }
        self.current_index = index;
        debug!("carousel {}: go to {index}", self.slot);
        self.update(document);
        self.reset_autoplay(timers);
    }

    /// Start the autoplay interval, replacing any live one.
    pub fn start_autoplay(&mut self, timers: &mut TimerQueue<Task>) {
        if let Some(previous) = self.autoplay.take() {
            timers.cancel(previous);
        }
        let id = timers.set_interval(self.interval, Task::Autoplay {
            carousel: self.slot,
        });
        self.autoplay = Some(id);
    }

    pub fn stop_autoplay(&mut self, timers: &mut TimerQueue<Task>) {
        if let Some(previous) = self.autoplay.take() {
            timers.cancel(previous);
        }
    }

    pub fn reset_autoplay(&mut self, timers: &mut TimerQueue<Task>) {
        self.stop_autoplay(timers);
        self.start_autoplay(timers);
    }

    /// React to a click reaching `node` on its way up from `target`.
    /// Returns true when the carousel consumed the click at this node.
    pub fn handle_click(
        &mut self,
        document: &mut Document,
        timers: &mut TimerQueue<Task>,
        node: NodeId,
        target: NodeId,
    ) -> bool {
        if node == self.prev_button {
            self.prev_slide(document, timers);
            return true;
        }
        if node == self.next_button {
            self.next_slide(document, timers);
            return true;
        }
        if let Some(index) = self.indicators.iter().position(|&indicator| indicator == node) {
            self.go_to_slide(document, timers, index);
            return true;
        }
        if let Some(index) = self.items.iter().position(|&item| item == node) {
            if document.closest(target, classes::VIEW_PROJECT).is_some() {
                return false;
            }
            if !document.has_class(node, classes::ACTIVE) {
                self.go_to_slide(document, timers, index);
                return true;
            }
        }
        false
    }

    /// Pause autoplay while the pointer is over the section.
    pub fn handle_pointer(&mut self, timers: &mut TimerQueue<Task>, node: NodeId, kind: &EventKind) {
        if node != self.section {
            return;
        }
        match kind {
            EventKind::PointerEnter => {
                debug!("carousel {}: pointer entered, pausing", self.slot);
                self.stop_autoplay(timers);
            }
            EventKind::PointerLeave => {
                debug!("carousel {}: pointer left, resuming", self.slot);
                self.start_autoplay(timers);
            }
            EventKind::Click | EventKind::KeyDown { .. } => {}
        }
    }
}
