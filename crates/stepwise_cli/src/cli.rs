use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "stepwise")]
#[command(about = "Prints the default story configuration and resolves story paths")]
#[command(version)]
pub struct Cli {
    /// Absolute directory for rolling log files; file logging is off when unset
    #[arg(long, env = "STEPWISE_LOG_DIR")]
    pub log_dir: Option<String>,

    /// Log level, defaults to the build-mode level
    #[arg(long, env = "STEPWISE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Story names to resolve to story paths
    pub stories: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;

    #[test]
    fn flags_and_story_names_parse() {
        let cli = Cli::try_parse_from([
            "stepwise",
            "--log-dir",
            "/tmp/stepwise-logs",
            "--log-level",
            "debug",
            "BuyCar",
            "sell_car",
        ])
        .expect("valid arguments");

        assert_eq!(cli.log_dir.as_deref(), Some("/tmp/stepwise-logs"));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert_eq!(cli.stories, vec!["BuyCar", "sell_car"]);
    }

    #[test]
    fn unknown_flags_are_rejected() {
        let err = Cli::try_parse_from(["stepwise", "--dry"]).expect_err("unknown flag");
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }
}
