use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use webcheck::client::{CrawlRequest, FacadeClient, FormsCrawlRequest, LoginCrawlRequest};
use webcheck::runner::RunOptions;
use webcheck::{report, runner};

#[derive(Parser)]
#[command(name = "webcheck")]
#[command(author = "NL Team")]
#[command(version = "0.1.0")]
#[command(about = "Browser session test orchestration CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run scenario suite file(s) or directory
    Run {
        /// Path to a suite file or a directory of suites
        path: PathBuf,

        /// Run the browser headless (suite header value used if omitted)
        #[arg(long)]
        headless: Option<bool>,

        /// Default wait window for page-state conditions (ms)
        #[arg(short, long)]
        timeout_ms: Option<u64>,

        /// Write a JSON run report to this path
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Re-render a saved run report
    Report {
        /// Path to a run report JSON
        results: PathBuf,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Send requests to the remote crawl service
    Crawl {
        #[command(subcommand)]
        command: CrawlCommands,
    },
}

#[derive(Subcommand)]
enum CrawlCommands {
    /// Crawl a single page
    Page {
        url: String,

        /// Base URL of the crawl service
        #[arg(long, default_value = "http://localhost:7000/api")]
        service: String,
    },

    /// Crawl a page behind a login form
    Login {
        url: String,

        #[arg(long, default_value = "#username")]
        username_selector: String,

        #[arg(long, default_value = "#password")]
        password_selector: String,

        #[arg(long, default_value = "#submit")]
        submit_selector: String,

        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,

        /// Base URL of the crawl service
        #[arg(long, default_value = "http://localhost:7000/api")]
        service: String,
    },

    /// Extract form definitions from a page
    Forms {
        url: String,

        /// Base URL of the crawl service
        #[arg(long, default_value = "http://localhost:7000/api")]
        service: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            path,
            headless,
            timeout_ms,
            report,
        } => {
            println!(
                "{} Running suites from: {}",
                "▶".green().bold(),
                path.display()
            );
            if let Some(h) = headless {
                println!("  Headless: {}", h.to_string().cyan());
            }
            if let Some(t) = timeout_ms {
                println!("  Timeout: {}", format!("{t} ms").cyan());
            }
            if let Some(ref p) = report {
                println!("  Report: {}", p.display().to_string().cyan());
            }

            let options = RunOptions {
                headless,
                timeout_ms,
                report,
            };
            let summary = runner::run_suite(&path, &options).await?;

            if summary.failed + summary.errored > 0 {
                std::process::exit(1);
            }
        }

        Commands::Report {
            results,
            format,
            output,
        } => {
            println!(
                "{} Generating {} report from: {}",
                "📊".to_string().blue(),
                format.cyan(),
                results.display()
            );
            report::generate_report(&results, &format, output.as_deref()).await?;
        }

        Commands::Crawl { command } => match command {
            CrawlCommands::Page { url, service } => {
                let client = FacadeClient::new(&service);
                let response = client.crawl(&CrawlRequest { url }).await?;
                print_envelope(response)?;
            }

            CrawlCommands::Login {
                url,
                username_selector,
                password_selector,
                submit_selector,
                username,
                password,
                service,
            } => {
                let client = FacadeClient::new(&service);
                let response = client
                    .crawl_login(&LoginCrawlRequest {
                        url,
                        username_selector,
                        password_selector,
                        submit_selector,
                        username,
                        password,
                    })
                    .await?;
                print_envelope(response)?;
            }

            CrawlCommands::Forms { url, service } => {
                let client = FacadeClient::new(&service);
                let response = client.crawl_forms(&FormsCrawlRequest { url }).await?;
                print_envelope(response)?;
            }
        },
    }

    Ok(())
}

fn print_envelope(response: webcheck::client::CrawlResponse) -> anyhow::Result<()> {
    match response.into_result() {
        Ok(data) => {
            println!("{}", serde_json::to_string_pretty(&data)?);
            Ok(())
        }
        Err(err) => {
            eprintln!("{} {err}", "✗".red().bold());
            std::process::exit(1);
        }
    }
}
