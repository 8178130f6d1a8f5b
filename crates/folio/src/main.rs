//! `folio <page.html> [script.json]`: replay interactions against a page and
//! print the resulting document as JSON.

use env_logger::{Builder, Env};
use folio::FolioConfig;
use folio::cli::{Invocation, run};
use log::error;
use std::env;
use std::io::{self, Write as _};
use std::process::exit;

fn main() {
    let _log_init: Result<(), _> = Builder::from_env(Env::default().filter_or("RUST_LOG", "warn"))
        .is_test(false)
        .try_init();

    let outcome = Invocation::from_args(env::args().skip(1))
        .and_then(|invocation| run(&invocation, FolioConfig::from_env()));
    match outcome {
        Ok(snapshot) => {
            let mut stdout = io::stdout().lock();
            if let Err(err) = writeln!(stdout, "{snapshot}") {
                error!("error: failed to write snapshot: {err}");
                exit(1);
            }
        }
        Err(err) => {
            error!("error: {err:#}");
            exit(1);
        }
    }
}
