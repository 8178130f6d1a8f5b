//! The page event loop: owns the document, the timer queue and the controllers.
//!
//! Input events are dispatched along the document propagation path and
//! offered to the modal first, then to every carousel, at each node. The
//! document-level modal trigger runs when a click reaches the root.

use crate::carousel::CarouselController;
use crate::classes;
use crate::config::FolioConfig;
use crate::modal::ModalController;
use crate::timers::TimerQueue;
use anyhow::Error;
use core::time::Duration;
use dom::events::propagation_path;
use dom::{Document, EventKind, NodeId, ScrollRequest, parse_document};
use log::{debug, info, warn};
use url::Url;

/// Deferred work scheduled on the page's timer queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Mount a carousel on every `.portfolio` section.
    MountCarousels,
    /// Autoplay tick for the carousel at this index.
    Autoplay { carousel: usize },
    /// Deferred modal content clear after close.
    ClearModal,
}

pub struct Page {
    document: Document,
    config: FolioConfig,
    timers: TimerQueue<Task>,
    carousels: Vec<CarouselController>,
    modal: Option<ModalController>,
    carousels_mounted: bool,
}

impl Page {
    /// Parse `html` and bring the page to document-ready.
    ///
    /// # Errors
    /// Returns an error if the HTML cannot be parsed.
    pub fn from_html(html: &str, base_url: Option<Url>, config: FolioConfig) -> Result<Self, Error> {
        let document = parse_document(html, base_url)?;
        Ok(Self::from_document(document, config))
    }

    /// Document ready: attach the modal and schedule carousel mounting.
    pub fn from_document(document: Document, config: FolioConfig) -> Self {
        let mut timers = TimerQueue::new();
        let modal = ModalController::attach(&document, &config);
        if modal.is_none() {
            debug!("page: no #project-modal, preview disabled");
        }
        timers.set_timeout(config.carousel_mount_delay(), Task::MountCarousels);
        info!(
            "page: ready (base {:?}), carousels mount in {:?}",
            document.base_url().map(Url::as_str),
            config.carousel_mount_delay()
        );
        Self {
            document,
            config,
            timers,
            carousels: Vec::new(),
            modal,
            carousels_mounted: false,
        }
    }

    pub const fn document(&self) -> &Document {
        &self.document
    }

    pub const fn config(&self) -> &FolioConfig {
        &self.config
    }

    pub fn carousels(&self) -> &[CarouselController] {
        &self.carousels
    }

    pub const fn modal(&self) -> Option<&ModalController> {
        self.modal.as_ref()
    }

    pub const fn carousels_mounted(&self) -> bool {
        self.carousels_mounted
    }

    /// Virtual time since document ready.
    pub const fn now(&self) -> Duration {
        self.timers.now()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Drain scroll requests recorded by the controllers.
    pub fn take_scroll_requests(&mut self) -> Vec<ScrollRequest> {
        self.document.take_scroll_requests()
    }

    /// Advance the virtual clock, running every timer that falls due on the
    /// way, including timers scheduled by earlier ones.
    ///
    /// # Errors
    /// Returns an error if a mounted carousel cannot attach its controls.
    pub fn advance(&mut self, duration: Duration) -> Result<(), Error> {
        let until = self.timers.now().saturating_add(duration);
        while let Some((_, task)) = self.timers.pop_due(until) {
            self.run_task(task)?;
        }
        self.timers.advance_to(until);
        Ok(())
    }

    fn run_task(&mut self, task: Task) -> Result<(), Error> {
        match task {
            Task::MountCarousels => self.mount_carousels()?,
            Task::Autoplay { carousel } => {
                if let Some(controller) = self.carousels.get_mut(carousel) {
                    controller.next_slide(&mut self.document, &mut self.timers);
                }
            }
            Task::ClearModal => {
                if let Some(modal) = self.modal.as_mut() {
                    modal.clear_content(&mut self.document);
                }
            }
        }
        Ok(())
    }

    fn mount_carousels(&mut self) -> Result<(), Error> {
        let sections = self
            .document
            .query_selector_all(self.document.root(), classes::PORTFOLIO_SECTION);
        for section in sections {
            let slot = self.carousels.len();
            if let Some(carousel) = CarouselController::mount(
                &mut self.document,
                &mut self.timers,
                section,
                slot,
                self.config.autoplay_interval(),
            )? {
                self.carousels.push(carousel);
            }
        }
        self.carousels_mounted = true;
        info!("page: mounted {} carousel(s)", self.carousels.len());
        Ok(())
    }

    // -----------------------
    // Input
    // -----------------------

    /// Click on `target`, bubbling to the document root.
    ///
    /// # Errors
    /// Returns an error if the modal fails to rebuild its thumbnails.
    pub fn click(&mut self, target: NodeId) -> Result<(), Error> {
        debug!("page: click on {target:?}");
        let path = propagation_path(&self.document, target, &EventKind::Click);
        let root = self.document.root();
        for node in path {
            if let Some(modal) = self.modal.as_mut() {
                let propagation =
                    modal.handle_click(&mut self.document, &mut self.timers, node, target);
                if propagation.is_stopped() {
                    return Ok(());
                }
            }
            for carousel in &mut self.carousels {
                carousel.handle_click(&mut self.document, &mut self.timers, node, target);
            }
            if let Some(modal) = self.modal.as_mut().filter(|_| node == root) {
                modal.handle_document_click(&mut self.document, target)?;
            }
        }
        Ok(())
    }

    /// Keydown delivered to the document.
    pub fn key_down(&mut self, key: &str) {
        debug!("page: keydown {key:?}");
        if let Some(modal) = self.modal.as_mut() {
            modal.handle_key(&mut self.document, &mut self.timers, key);
        }
    }

    /// Pointer entering `target` (`mouseenter`, no bubbling).
    pub fn pointer_enter(&mut self, target: NodeId) {
        self.pointer(target, &EventKind::PointerEnter);
    }

    /// Pointer leaving `target` (`mouseleave`, no bubbling).
    pub fn pointer_leave(&mut self, target: NodeId) {
        self.pointer(target, &EventKind::PointerLeave);
    }

    fn pointer(&mut self, target: NodeId, kind: &EventKind) {
        debug!("page: {} on {target:?}", kind.type_name());
        if !self.document.is_element(target) {
            warn!("page: {} target {target:?} is not an element", kind.type_name());
            return;
        }
        for node in propagation_path(&self.document, target, kind) {
            for carousel in &mut self.carousels {
                carousel.handle_pointer(&mut self.timers, node, kind);
            }
        }
    }

    /// Resolve a selector for input helpers: the `nth` match in document order.
    pub fn find(&self, selector: &str, nth: usize) -> Option<NodeId> {
        self.document
            .query_selector_all(self.document.root(), selector)
            .get(nth)
            .copied()
    }
}
