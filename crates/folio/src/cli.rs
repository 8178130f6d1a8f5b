//! Core of the `folio` binary: load a page file, replay a script, snapshot the result.

use crate::config::FolioConfig;
use crate::page::Page;
use crate::script::parse_script;
use anyhow::{Context as _, Error, anyhow};
use core::time::Duration;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Parsed command line: `folio <page.html> [script.json]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub page: PathBuf,
    pub script: Option<PathBuf>,
}

impl Invocation {
    /// Parse arguments after the program name.
    ///
    /// # Errors
    /// Returns a usage error for a missing page path or extra arguments.
    pub fn from_args<I>(args: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let page = args
            .next()
            .map(PathBuf::from)
            .ok_or_else(|| anyhow!("usage: folio <page.html> [script.json]"))?;
        let script = args.next().map(PathBuf::from);
        if let Some(extra) = args.next() {
            return Err(anyhow!("unexpected argument {extra:?}; usage: folio <page.html> [script.json]"));
        }
        Ok(Self { page, script })
    }
}

/// Convert a local file path to a `file://` URL, canonicalizing when possible.
///
/// # Errors
/// Returns an error when the path cannot be expressed as a file URL.
pub fn to_file_url(path: &Path) -> Result<Url, Error> {
    let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    Url::from_file_path(&canonical)
        .map_err(|()| anyhow!("Invalid file path for URL: {}", canonical.display()))
}

/// Load the page, replay the script (or just let carousels mount) and return
/// the final document as pretty JSON.
///
/// # Errors
/// Returns an error when a file cannot be read or parsed, or a script step fails.
pub fn run(invocation: &Invocation, config: FolioConfig) -> Result<String, Error> {
    let html = fs::read_to_string(&invocation.page)
        .with_context(|| format!("failed to read {}", invocation.page.display()))?;
    let base_url = to_file_url(&invocation.page)?;
    let mount_delay = config.carousel_mount_delay();
    let mut page = Page::from_html(&html, Some(base_url), config)?;

    match &invocation.script {
        Some(script_path) => {
            let json = fs::read_to_string(script_path)
                .with_context(|| format!("failed to read {}", script_path.display()))?;
            let steps = parse_script(&json)?;
            info!("replaying {} step(s) from {}", steps.len(), script_path.display());
            page.run_script(&steps)?;
        }
        None => page.advance(mount_delay.saturating_add(Duration::from_millis(1)))?,
    }

    for request in page.take_scroll_requests() {
        info!(
            "scroll request: {:?} ({:?})",
            request.node, request.options
        );
    }
    Ok(page.document().to_json_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|&arg| arg.to_owned()).collect()
    }

    #[test]
    fn invocation_accepts_page_and_optional_script() -> Result<(), Error> {
        let page_only = Invocation::from_args(args(&["index.html"]))?;
        assert_eq!(page_only.page, PathBuf::from("index.html"));
        assert_eq!(page_only.script, None);

        let with_script = Invocation::from_args(args(&["index.html", "steps.json"]))?;
        assert_eq!(with_script.script, Some(PathBuf::from("steps.json")));
        Ok(())
    }

    #[test]
    fn invocation_rejects_missing_and_extra_arguments() {
        assert!(Invocation::from_args(args(&[])).is_err());
        assert!(Invocation::from_args(args(&["a", "b", "c"])).is_err());
    }
}
