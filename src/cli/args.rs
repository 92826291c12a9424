//! Command-line argument parsing for the chatstream CLI.

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Check the service health and exit
    Health,
    /// Interactive chat session (default)
    Chat,
}

/// Parsed command plus overrides for the environment configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub command: CliCommand,
    /// `--url <base>` or `--url=<base>`
    pub base_url: Option<String>,
}

/// Parse command-line arguments.
///
/// `--version` wins over everything else. Unknown flags are ignored.
///
/// # Examples
///
/// ```
/// use chatstream::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["chatstream".to_string(), "--health".to_string()];
/// assert_eq!(parse_args(args.into_iter()).command, CliCommand::Health);
/// ```
pub fn parse_args<I>(args: I) -> CliArgs
where
    I: Iterator<Item = String>,
{
    let mut parsed = CliArgs {
        command: CliCommand::Chat,
        base_url: None,
    };

    // Skip the program name
    let mut args = args.skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => {
                parsed.command = CliCommand::Version;
                return parsed;
            }
            "--health" => parsed.command = CliCommand::Health,
            "--url" => parsed.base_url = args.next(),
            other => {
                if let Some(url) = other.strip_prefix("--url=") {
                    parsed.base_url = Some(url.to_string());
                }
            }
        }
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        let mut all = vec!["chatstream".to_string()];
        all.extend(list.iter().map(|s| s.to_string()));
        all.into_iter()
    }

    #[test]
    fn test_parse_version_flag() {
        assert_eq!(parse_args(args(&["--version"])).command, CliCommand::Version);
    }

    #[test]
    fn test_parse_version_short_flag() {
        assert_eq!(parse_args(args(&["-V"])).command, CliCommand::Version);
    }

    #[test]
    fn test_version_wins_over_health() {
        assert_eq!(
            parse_args(args(&["--health", "--version"])).command,
            CliCommand::Version
        );
    }

    #[test]
    fn test_parse_health_flag() {
        let parsed = parse_args(args(&["--health"]));
        assert_eq!(parsed.command, CliCommand::Health);
        assert_eq!(parsed.base_url, None);
    }

    #[test]
    fn test_parse_url_separate_value() {
        let parsed = parse_args(args(&["--url", "http://svc:9000"]));
        assert_eq!(parsed.command, CliCommand::Chat);
        assert_eq!(parsed.base_url.as_deref(), Some("http://svc:9000"));
    }

    #[test]
    fn test_parse_url_equals_value() {
        let parsed = parse_args(args(&["--url=http://svc:9000", "--health"]));
        assert_eq!(parsed.command, CliCommand::Health);
        assert_eq!(parsed.base_url.as_deref(), Some("http://svc:9000"));
    }

    #[test]
    fn test_parse_url_missing_value() {
        assert_eq!(parse_args(args(&["--url"])).base_url, None);
    }

    #[test]
    fn test_parse_no_args() {
        let parsed = parse_args(args(&[]));
        assert_eq!(parsed.command, CliCommand::Chat);
        assert_eq!(parsed.base_url, None);
    }

    #[test]
    fn test_parse_unknown_flag() {
        assert_eq!(parse_args(args(&["--unknown"])).command, CliCommand::Chat);
    }
}
