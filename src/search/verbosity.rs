/// How much the command line tool logs to stderr.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Errors only
    Silent,
    /// Graph build, search start and outcome
    Normal,
    /// Adds one line per update call
    Verbose,
    /// Adds every reparented cell
    Debug,
}

impl From<Verbosity> for tracing::Level {
    fn from(value: Verbosity) -> Self {
        match value {
            Verbosity::Silent => tracing::Level::ERROR,
            Verbosity::Normal => tracing::Level::INFO,
            Verbosity::Verbose => tracing::Level::DEBUG,
            Verbosity::Debug => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_grow_with_verbosity() {
        let levels: Vec<tracing::Level> = [
            Verbosity::Silent,
            Verbosity::Normal,
            Verbosity::Verbose,
            Verbosity::Debug,
        ]
        .into_iter()
        .map(Into::into)
        .collect();
        // tracing orders levels by verbosity, TRACE being the greatest.
        assert!(levels.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
