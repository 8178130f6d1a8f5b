//! Class names and selectors shared between the page markup, the stylesheet
//! and the controllers.

pub const ACTIVE: &str = "active";
pub const PREV: &str = "prev";
pub const NEXT: &str = "next";
pub const FAR_PREV: &str = "far-prev";
pub const FAR_NEXT: &str = "far-next";

/// Every slide position class, removed together before a new one is applied.
pub const SLIDE_POSITIONS: [&str; 5] = [ACTIVE, PREV, NEXT, FAR_PREV, FAR_NEXT];

pub const REVEAL_UP: &str = "reveal-up";
pub const REVEALED: &str = "revealed";

pub const PORTFOLIO_SECTION: &str = ".portfolio";
pub const PORTFOLIO_GRID: &str = ".portfolio-grid";
pub const PORTFOLIO_ITEM: &str = ".portfolio-item";
pub const PROJECT_IMAGE: &str = ".project-image";

pub const CAROUSEL_NAV: &str = "carousel-nav";
pub const PREV_BTN: &str = "prev-btn";
pub const NEXT_BTN: &str = "next-btn";
pub const CAROUSEL_INDICATORS: &str = "carousel-indicators";
pub const CAROUSEL_INDICATOR: &str = "carousel-indicator";

pub const VIEW_PROJECT: &str = ".view-project";
pub const PROJECT_IMAGES_ATTR: &str = "data-project-images";

pub const MODAL_ID: &str = "project-modal";
pub const MODAL_CLOSE: &str = ".modal-close";
pub const MODAL_MAIN_IMAGE: &str = ".modal-main-image";
pub const MODAL_PREV: &str = ".modal-prev";
pub const MODAL_NEXT: &str = ".modal-next";
pub const MODAL_THUMBNAILS: &str = ".modal-thumbnails";
pub const MODAL_THUMB: &str = "modal-thumb";
pub const MODAL_LOGO: &str = "modal-logo";
pub const MODAL_THUMBNAIL: &str = "modal-thumbnail";
