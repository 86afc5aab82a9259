use crossterm::style::Stylize;
use std::path::Path;

/// Prints run progress to stdout.
///
/// Per-item lines are printed as each item settles, so concurrent tasks
/// write through the same reporter.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    quiet: bool,
}

impl Reporter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Top-level progress line, e.g. `> Downloading choices from @github/gitignore`.
    pub fn status(&self, message: &str) {
        if !self.quiet {
            println!("{}", status_line(message));
        }
    }

    pub fn success(&self, name: &str) {
        if !self.quiet {
            println!("{}", success_line(name));
        }
    }

    /// A requested name with no catalog entry.
    pub fn miss(&self, key: &str, suggestion: Option<&str>) {
        if !self.quiet {
            println!("{}", miss_line(key, suggestion));
        }
    }

    /// A resolved name whose download failed.
    pub fn failure(&self, arg: &str) {
        if !self.quiet {
            println!("{}", failure_line(arg));
        }
    }

    /// Final count. Always printed, even when quiet.
    pub fn summary(&self, count: usize, output: &Path) {
        println!("{}", summary_line(count, output));
    }
}

fn status_line(message: &str) -> String {
    format!("{} {}", ">".bold(), message)
}

fn success_line(name: &str) -> String {
    format!("  {} {}", "✔".green(), name)
}

fn miss_line(key: &str, suggestion: Option<&str>) -> String {
    match suggestion {
        Some(hint) => {
            let hint = format!("(did you mean {}?)", hint);
            format!("  {} {} {}", "✖".red(), key, hint.dim())
        }
        None => format!("  {} {}", "✖".red(), key),
    }
}

fn failure_line(arg: &str) -> String {
    format!("  {} {} (download failed)", "✖".red(), arg)
}

fn summary_line(count: usize, output: &Path) -> String {
    let noun = if count == 1 { "entry" } else { "entries" };
    format!("{} Added {} {} to {}", ">".bold(), count, noun, output.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_lines_carry_marker_and_name() {
        let ok = success_line("Node");
        assert!(ok.contains('✔'));
        assert!(ok.ends_with(" Node"));

        let failed = failure_line("rust");
        assert!(failed.contains('✖'));
        assert!(failed.ends_with("rust (download failed)"));
    }

    #[test]
    fn miss_line_mentions_suggestion() {
        assert!(miss_line("java", None).ends_with(" java"));

        let hinted = miss_line("pythn", Some("Python"));
        assert!(hinted.contains("pythn"));
        assert!(hinted.contains("did you mean Python?"));
    }

    #[test]
    fn summary_pluralizes() {
        let path = Path::new(".gitignore");
        assert!(summary_line(1, path).ends_with("Added 1 entry to .gitignore"));
        assert!(summary_line(2, path).ends_with("Added 2 entries to .gitignore"));
        assert!(summary_line(0, path).ends_with("Added 0 entries to .gitignore"));
    }
}
