//! Runtime configuration for the presentation layer.
//!
//! Timing constants and the style-mode section id can be loaded from
//! environment variables or constructed programmatically.

use core::time::Duration;
use std::env;

/// Default delay between document ready and carousel mount.
pub const DEFAULT_CAROUSEL_MOUNT_DELAY_MS: u64 = 500;
/// Default autoplay period.
pub const DEFAULT_AUTOPLAY_INTERVAL_MS: u64 = 5000;
/// Default delay before a closed modal drops its content.
pub const DEFAULT_MODAL_CLEAR_DELAY_MS: u64 = 300;
/// Section whose triggers open the modal in thumbnail mode.
pub const DEFAULT_THUMBNAIL_SECTION_ID: &str = "more-work";

/// Timing and presentation settings for a [`crate::Page`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FolioConfig {
    /// Delay after document ready before carousels are mounted
    pub carousel_mount_delay_ms: u64,
    /// Autoplay period in milliseconds (minimum 1ms)
    pub autoplay_interval_ms: u64,
    /// Delay after close before the modal's image and thumbnails are cleared
    pub modal_clear_delay_ms: u64,
    /// `id` of the section whose triggers select the thumbnail style
    pub thumbnail_section_id: String,
}

impl FolioConfig {
    /// Construct a new `FolioConfig` with explicit values.
    ///
    /// An `autoplay_interval_ms` of zero is raised to 1ms so an interval
    /// timer can never fire in a loop without the clock advancing.
    #[inline]
    #[must_use]
    pub const fn new(
        carousel_mount_delay_ms: u64,
        autoplay_interval_ms: u64,
        modal_clear_delay_ms: u64,
        thumbnail_section_id: String,
    ) -> Self {
        let interval = if autoplay_interval_ms < 1 {
            1
        } else {
            autoplay_interval_ms
        };
        Self {
            carousel_mount_delay_ms,
            autoplay_interval_ms: interval,
            modal_clear_delay_ms,
            thumbnail_section_id,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `FOLIO_CAROUSEL_MOUNT_DELAY_MS` (default: 500)
    /// - `FOLIO_AUTOPLAY_INTERVAL_MS` (default: 5000, minimum 1)
    /// - `FOLIO_MODAL_CLEAR_DELAY_MS` (default: 300)
    /// - `FOLIO_THUMBNAIL_SECTION` (default: `more-work`)
    ///
    /// Unparsable values fall back to their defaults.
    #[inline]
    #[must_use]
    pub fn from_env() -> Self {
        let carousel_mount_delay_ms =
            millis_from_env("FOLIO_CAROUSEL_MOUNT_DELAY_MS", DEFAULT_CAROUSEL_MOUNT_DELAY_MS);
        let autoplay_interval_ms =
            millis_from_env("FOLIO_AUTOPLAY_INTERVAL_MS", DEFAULT_AUTOPLAY_INTERVAL_MS);
        let modal_clear_delay_ms =
            millis_from_env("FOLIO_MODAL_CLEAR_DELAY_MS", DEFAULT_MODAL_CLEAR_DELAY_MS);
        let thumbnail_section_id = env::var("FOLIO_THUMBNAIL_SECTION")
            .ok()
            .map(|val| val.trim().to_owned())
            .filter(|val| !val.is_empty())
            .unwrap_or_else(|| DEFAULT_THUMBNAIL_SECTION_ID.to_owned());
        Self::new(
            carousel_mount_delay_ms,
            autoplay_interval_ms,
            modal_clear_delay_ms,
            thumbnail_section_id,
        )
    }

    #[inline]
    #[must_use]
    pub const fn carousel_mount_delay(&self) -> Duration {
        Duration::from_millis(self.carousel_mount_delay_ms)
    }

    #[inline]
    #[must_use]
    pub const fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_interval_ms)
    }

    #[inline]
    #[must_use]
    pub const fn modal_clear_delay(&self) -> Duration {
        Duration::from_millis(self.modal_clear_delay_ms)
    }
}

impl Default for FolioConfig {
    #[inline]
    fn default() -> Self {
        Self::new(
            DEFAULT_CAROUSEL_MOUNT_DELAY_MS,
            DEFAULT_AUTOPLAY_INTERVAL_MS,
            DEFAULT_MODAL_CLEAR_DELAY_MS,
            DEFAULT_THUMBNAIL_SECTION_ID.to_owned(),
        )
    }
}

fn millis_from_env(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|val| val.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_timings() {
        let config = FolioConfig::default();
        assert_eq!(config.carousel_mount_delay(), Duration::from_millis(500));
        assert_eq!(config.autoplay_interval(), Duration::from_secs(5));
        assert_eq!(config.modal_clear_delay(), Duration::from_millis(300));
        assert_eq!(config.thumbnail_section_id, "more-work");
    }

    #[test]
    fn zero_interval_is_clamped() {
        let config = FolioConfig::new(0, 0, 0, String::from("gallery"));
        assert_eq!(config.autoplay_interval_ms, 1);
        assert_eq!(config.carousel_mount_delay_ms, 0);
    }
}
