use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "linktitle", about = "Resolve page titles and emit markdown links", version)]
pub struct Cli {
    /// URLs to resolve.
    #[arg(value_name = "URL", required = true)]
    pub urls: Vec<String>,

    /// Print only the resolved title, not the markdown link.
    #[arg(long = "title-only")]
    pub title_only: bool,

    /// Override the configured maximum title length (0 = unlimited).
    #[arg(long = "max-length")]
    pub max_length: Option<usize>,

    /// Enable debug logging on stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
