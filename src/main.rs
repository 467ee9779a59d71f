use clap::Parser;
use pagecheck::{
    CheckConfig, Error, PageVisualChecker, Result, StrategyKind, VerificationReport,
    VerificationRequest, Viewport,
};
use std::path::PathBuf;
use url::Url;

/// Verify the visual state of a local static page with a headless browser
#[derive(Parser, Debug)]
#[command(name = "pagecheck", version, about)]
struct Cli {
    /// Document to verify: a path resolved against --root, or a full URL
    #[arg(long)]
    page: String,

    /// Selector for the element expected to become visible
    #[arg(long)]
    selector: String,

    /// Output path for the screenshot
    #[arg(long)]
    out: PathBuf,

    /// Directory the page path is resolved against
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Probe strategy: 'browser' (screenshots) or 'dom' (static check only)
    #[arg(long, default_value = "browser")]
    strategy: StrategyKind,

    /// Page-load timeout in milliseconds
    #[arg(long, default_value_t = 30_000)]
    timeout_ms: u64,

    /// Element-visibility wait budget in milliseconds
    #[arg(long, default_value_t = 10_000)]
    wait_timeout_ms: u64,

    /// Viewport as WIDTHxHEIGHT
    #[arg(long, default_value = "1280x720", value_parser = parse_viewport)]
    viewport: Viewport,

    /// Print the verification report as JSON
    #[arg(long)]
    json: bool,
}

fn parse_viewport(s: &str) -> std::result::Result<Viewport, String> {
    let (w, h) = s
        .split_once('x')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", s))?;
    let width: u32 = w.parse().map_err(|_| format!("invalid width '{}'", w))?;
    let height: u32 = h.parse().map_err(|_| format!("invalid height '{}'", h))?;
    if width == 0 || height == 0 {
        return Err("viewport dimensions must be non-zero".to_string());
    }
    Ok(Viewport { width, height })
}

fn run(cli: &Cli) -> Result<VerificationReport> {
    let config = CheckConfig {
        viewport: cli.viewport,
        timeout_ms: cli.timeout_ms,
        wait_timeout_ms: cli.wait_timeout_ms,
        strategy: cli.strategy,
        ..Default::default()
    };

    let request = if cli.page.contains("://") {
        let url = Url::parse(&cli.page)
            .map_err(|e| Error::Config(format!("Invalid page URL '{}': {}", cli.page, e)))?;
        VerificationRequest::from_url(url, &cli.selector, &cli.out)?
    } else {
        VerificationRequest::for_document(&cli.root, &cli.page, &cli.selector, &cli.out)?
    };

    PageVisualChecker::new(config).verify(&request)
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(report) => {
            if cli.json {
                match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("pagecheck: failed to encode report: {}", e);
                        std::process::exit(1);
                    }
                }
            } else {
                println!(
                    "verified '{}' on {} -> {} ({} bytes, {}ms)",
                    report.selector,
                    report.page_url,
                    report.output_path.display(),
                    report.bytes_written,
                    report.elapsed_ms
                );
            }
        }
        Err(e) => {
            eprintln!("pagecheck: {}", e);
            std::process::exit(1);
        }
    }
}
