mod cli;

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use url::Url;

use linktitle::blacklist;
use linktitle::config::Config;
use linktitle::markdown::{escape_markdown, is_url, shorten_title};
use linktitle::resolve::TitlePipeline;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    init_logging(args.verbose);

    let cfg = Config::load();
    let pipeline = TitlePipeline::from_config(&cfg);
    let max_len = args.max_length.unwrap_or_else(|| cfg.maximum_title_length());

    for raw in &args.urls {
        let url = raw.trim();
        if !is_url(url) {
            eprintln!("skipping {url}: not an absolute URL");
            continue;
        }

        let title = if blacklist::is_blacklisted(&cfg, url) {
            Url::parse(url)
                .ok()
                .and_then(|u| u.host_str().map(str::to_string))
                .unwrap_or_else(|| url.to_string())
        } else {
            pipeline.resolve(url).await
        };
        let title = shorten_title(&escape_markdown(&title), max_len);

        if args.title_only {
            println!("{title}");
        } else {
            println!("[{title}]({url})");
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "linktitle=debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // Logs on stderr so stdout stays clean for the emitted links.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
