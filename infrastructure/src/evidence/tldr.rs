//! Community tldr examples from the first installed client

use super::non_empty;
use super::process::{CommandResolver, ProcessRunner, path_resolver};
use tips_domain::ToolName;
use tips_domain::tool::evidence::{EvidenceSource, TLDR_PAGE};
use tracing::debug;

/// One tldr client and the flags that make its output plain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TldrProvider {
    pub program: String,
    pub args: Vec<String>,
}

impl TldrProvider {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Provider for a client known by name; unknown clients get no flags.
    pub fn named(program: &str) -> Self {
        match program {
            "tlrc" => Self::new("tlrc", &["--no-color", "--quiet"]),
            "tldr" => Self::new("tldr", &["-q"]),
            other => Self::new(other, &[]),
        }
    }

    /// `tlrc`, then `tldr`
    pub fn defaults() -> Vec<Self> {
        vec![Self::named("tlrc"), Self::named("tldr")]
    }
}

pub struct TldrPage {
    runner: ProcessRunner,
    providers: Vec<TldrProvider>,
    resolve: CommandResolver,
}

impl TldrPage {
    pub fn new(runner: ProcessRunner) -> Self {
        Self {
            runner,
            providers: TldrProvider::defaults(),
            resolve: path_resolver(),
        }
    }

    pub fn with_providers(mut self, providers: Vec<TldrProvider>) -> Self {
        self.providers = providers;
        self
    }

    pub fn with_resolver(mut self, resolve: CommandResolver) -> Self {
        self.resolve = resolve;
        self
    }
}

impl EvidenceSource for TldrPage {
    fn name(&self) -> &str {
        TLDR_PAGE
    }

    fn description(&self) -> &str {
        "Local tldr page with common usage examples"
    }

    /// Only the first installed client is queried. If it fails the page
    /// is absent; the next client is not tried.
    fn lookup(&self, tool: &ToolName) -> Option<String> {
        let (provider, path) = self
            .providers
            .iter()
            .find_map(|p| (self.resolve)(&p.program).map(|path| (p, path)))?;

        let program = path.to_string_lossy();
        let mut args: Vec<&str> = provider.args.iter().map(String::as_str).collect();
        args.push(tool.as_str());

        let output = self.runner.run(&program, &args)?;
        if !output.success() {
            debug!("{} has no page for {}", provider.program, tool);
            return None;
        }
        non_empty(output.stdout_lossy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Arc;

    /// Resolver mapping provider names to real executables.
    fn resolver(map: &[(&str, &str)]) -> CommandResolver {
        let map: HashMap<String, PathBuf> = map
            .iter()
            .filter_map(|(name, real)| Some((name.to_string(), which::which(real).ok()?)))
            .collect();
        Arc::new(move |name: &str| map.get(name).cloned())
    }

    fn name() -> ToolName {
        ToolName::new("rg").unwrap()
    }

    #[test]
    fn test_provider_flags() {
        assert_eq!(
            TldrProvider::named("tlrc").args,
            ["--no-color", "--quiet"]
        );
        assert_eq!(TldrProvider::named("tldr").args, ["-q"]);
        assert!(TldrProvider::named("other").args.is_empty());
    }

    #[test]
    fn test_secondary_used_when_primary_missing() {
        let source = TldrPage::new(ProcessRunner::default()).with_resolver(resolver(&[("tldr", "echo")]));

        let page = source.lookup(&name()).unwrap();
        assert_eq!(page.trim(), "-q rg");
    }

    #[test]
    fn test_primary_failure_does_not_fall_back() {
        let source = TldrPage::new(ProcessRunner::default())
            .with_resolver(resolver(&[("tlrc", "false"), ("tldr", "echo")]));

        assert_eq!(source.lookup(&name()), None);
    }

    #[test]
    fn test_primary_preferred() {
        let source = TldrPage::new(ProcessRunner::default())
            .with_resolver(resolver(&[("tlrc", "echo"), ("tldr", "true")]));

        assert_eq!(
            source.lookup(&name()).unwrap().trim(),
            "--no-color --quiet rg"
        );
    }

    #[test]
    fn test_no_provider_is_absent() {
        let source = TldrPage::new(ProcessRunner::default()).with_resolver(resolver(&[]));
        assert_eq!(source.lookup(&name()), None);
    }

    #[test]
    fn test_configured_providers() {
        let source = TldrPage::new(ProcessRunner::default())
            .with_providers(vec![TldrProvider::named("tldr")])
            .with_resolver(resolver(&[("tlrc", "echo")]));
        assert_eq!(source.lookup(&name()), None);
    }
}
