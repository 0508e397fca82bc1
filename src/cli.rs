use clap::Parser;
use std::path::PathBuf;

/// Word suggestion relay backed by the Datamuse API
#[derive(Debug, Clone, Parser)]
#[command(name = "suggest-relay", version, about)]
pub struct Cli {
    /// Address to bind (overrides HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides PORT)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Directory holding index.html and frontend assets (overrides FRONTEND_DIR)
    #[arg(long)]
    pub frontend_dir: Option<PathBuf>,

    /// Upstream word API base URL (overrides UPSTREAM_URL)
    #[arg(long)]
    pub upstream_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from(["suggest-relay", "--port", "8080", "--frontend-dir", "web"]);
        assert_eq!(cli.port, Some(8080));
        assert_eq!(cli.frontend_dir, Some(PathBuf::from("web")));
        assert!(cli.host.is_none());
    }
}
