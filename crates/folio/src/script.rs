//! Interaction scripts replayed against a [`Page`].
//!
//! A script is a JSON array of steps tagged by `action`:
//!
//! ```json
//! [
//!   { "action": "wait", "ms": 600 },
//!   { "action": "click", "selector": ".view-project", "nth": 1 },
//!   { "action": "key", "key": "Escape" }
//! ]
//! ```

use crate::page::Page;
use anyhow::{Context as _, Error, anyhow};
use core::time::Duration;
use dom::NodeId;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Click {
        selector: String,
        #[serde(default)]
        nth: usize,
    },
    Key {
        key: String,
    },
    PointerEnter {
        selector: String,
        #[serde(default)]
        nth: usize,
    },
    PointerLeave {
        selector: String,
        #[serde(default)]
        nth: usize,
    },
    Wait {
        ms: u64,
    },
}

/// Parse a script document.
///
/// # Errors
/// Returns an error if `json` is not an array of known steps.
pub fn parse_script(json: &str) -> Result<Vec<Step>, Error> {
    serde_json::from_str(json).context("invalid interaction script")
}

fn resolve(page: &Page, selector: &str, nth: usize) -> Result<NodeId, Error> {
    page.find(selector, nth)
        .ok_or_else(|| anyhow!("selector {selector:?} has no match at index {nth}"))
}

impl Page {
    /// Apply one step.
    ///
    /// # Errors
    /// Returns an error if the step's selector matches nothing or the step fails.
    pub fn run_step(&mut self, step: &Step) -> Result<(), Error> {
        debug!("script: {step:?}");
        match step {
            Step::Click { selector, nth } => {
                let target = resolve(self, selector, *nth)?;
                self.click(target)?;
            }
            Step::Key { key } => self.key_down(key),
            Step::PointerEnter { selector, nth } => {
                let target = resolve(self, selector, *nth)?;
                self.pointer_enter(target);
            }
            Step::PointerLeave { selector, nth } => {
                let target = resolve(self, selector, *nth)?;
                self.pointer_leave(target);
            }
            Step::Wait { ms } => self.advance(Duration::from_millis(*ms))?,
        }
        Ok(())
    }

    /// Apply `steps` in order, stopping at the first failure.
    ///
    /// # Errors
    /// Returns the first failing step's error, annotated with its position.
    pub fn run_script(&mut self, steps: &[Step]) -> Result<(), Error> {
        for (index, step) in steps.iter().enumerate() {
            self.run_step(step)
                .with_context(|| format!("script step {index} ({step:?}) failed"))?;
        }
        Ok(())
    }
}
