//! Command-line client for stock-report
//!
//! Collects ticker symbols interactively and asks the report server for a
//! report on them.
//!
//! # Usage
//!
//! ```bash
//! # Interactive
//! cargo run --bin report-cli -p report-cli
//!
//! # One shot
//! cargo run --bin report-cli -p report-cli -- --generate AAPL TSLA
//! ```

mod client;
mod commands;
mod error;
mod form;

use clap::Parser;
use client::{CREATING_MESSAGE, DEFAULT_ENDPOINT, ReportClient, SENDING_MESSAGE};
use commands::Command;
use form::{Submission, TickerForm};
use std::io::{self, BufRead, Write};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "report-cli")]
#[command(about = "Collect stock tickers and request a report", long_about = None)]
struct Args {
    /// Report endpoint
    #[arg(long, env = "REPORT_SERVER_URL", default_value = DEFAULT_ENDPOINT)]
    server: String,

    /// Generate the report right away instead of starting the prompt
    #[arg(short, long)]
    generate: bool,

    /// Tickers to add before anything else
    tickers: Vec<String>,
}

/// Submit one value and show the refreshed form
fn add_ticker(form: &mut TickerForm, input: &str) {
    if let Submission::Accepted(ticker) = form.submit(input) {
        info!("Added ticker {}", ticker);
    }
    println!("{}", form.render());
}

/// Request the report and show the result; the session ends afterwards
async fn generate_report(form: &TickerForm, client: &ReportClient) {
    println!("{SENDING_MESSAGE}");
    let outcome = client.request_report(form.tickers()).await;

    if outcome.is_report() {
        println!("{CREATING_MESSAGE}\n");
        println!("{}", outcome.message());
    } else {
        eprintln!("{}", outcome.message());
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    report_utils::init_tracing_with("warn");

    let args = Args::parse();
    let client = ReportClient::new(args.server);
    info!("Using report endpoint {}", client.endpoint());
    let mut form = TickerForm::new();

    for ticker in &args.tickers {
        add_ticker(&mut form, ticker.trim());
    }

    if args.generate {
        if form.can_generate() {
            generate_report(&form, &client).await;
            return Ok(());
        }
        anyhow::bail!("no valid ticker given, nothing to report on");
    }

    if args.tickers.is_empty() {
        println!("{}", form.render());
    }
    println!("{}\n", Command::help_text());

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("ticker> ");
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            println!();
            break;
        }

        match Command::parse(&input) {
            Ok(Command::Add { ticker }) => add_ticker(&mut form, &ticker),
            Ok(Command::Generate) => {
                if form.can_generate() {
                    generate_report(&form, &client).await;
                    break;
                }
                println!("Add at least one ticker before generating a report.");
            }
            Ok(Command::Help) => println!("{}", Command::help_text()),
            Ok(Command::Exit) => break,
            Err(e) => eprintln!("{e}"),
        }
    }

    Ok(())
}
