//! Evidence sources
//!
//! One [`EvidenceSource`] per documentation or introspection channel. Every
//! source absorbs its own failures: a missing binary, non-zero exit, I/O
//! error or timeout all become `None`.
//!
//! | Tool | Query | Truncated |
//! |------|-------|-----------|
//! | `brew_info` | `brew info <name>` | no |
//! | `man_page` | `man <name>`, formatting stripped | yes |
//! | `info_page` | `info <name>` | yes |
//! | `tldr_page` | first of `tlrc` / `tldr` on `PATH` | yes |
//! | `help_flag` | `<name> --help` | yes |
//! | `probe` | `PATH` lookup + `file --brief --mime` | yes |
//! | `script_source` | contents of a text executable | yes |

pub mod brew;
pub mod classify;
pub mod help;
pub mod info;
pub mod man;
pub mod probe;
pub mod process;
pub mod script;
pub mod tldr;

pub use brew::BrewInfo;
pub use classify::looks_binary;
pub use help::HelpFlag;
pub use info::InfoPage;
pub use man::ManPage;
pub use probe::Probe;
pub use process::{CommandResolver, ProcessOutput, ProcessRunner, path_resolver};
pub use script::ScriptSource;
pub use tldr::{TldrPage, TldrProvider};

use std::sync::Arc;
use tips_domain::EvidenceSource;

/// `None` for output that is blank after trimming.
fn non_empty(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// All built-in sources, sharing one process runner.
pub fn default_sources(
    runner: ProcessRunner,
    tldr_providers: Vec<TldrProvider>,
) -> Vec<Arc<dyn EvidenceSource>> {
    vec![
        Arc::new(BrewInfo::new(runner.clone())),
        Arc::new(ManPage::new(runner.clone())),
        Arc::new(InfoPage::new(runner.clone())),
        Arc::new(TldrPage::new(runner.clone()).with_providers(tldr_providers)),
        Arc::new(HelpFlag::new(runner.clone())),
        Arc::new(Probe::new(runner)),
        Arc::new(ScriptSource::new()),
    ]
}
