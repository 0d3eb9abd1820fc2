use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "econ-cli")]
#[command(about = "Query a running Economic Data API instance", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Bearer token for authenticated endpoints.
    #[arg(short, long, default_value = "")]
    token: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service health
    Health,
    /// Latest economic indicators (GDP, inflation, ...)
    Economic,
    /// Latest interest rates
    Rates,
    /// Latest market indicators
    Market,
    /// List indicators available for custom reports
    Indicators,
    /// Generate a custom report
    Report {
        /// Comma-separated logical keys, e.g. gdp,sp500
        #[arg(long)]
        indicators: String,
        #[arg(long)]
        start_date: String,
        #[arg(long)]
        end_date: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    if !cli.token.is_empty() {
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", cli.token))?,
        );
    }

    match cli.command {
        Commands::Health => {
            let res = client
                .get(format!("{}/api/health", cli.url))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Economic => {
            let res = client
                .get(format!("{}/api/economic-indicators", cli.url))
                .headers(headers)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Rates => {
            let res = client
                .get(format!("{}/api/interest-rates", cli.url))
                .headers(headers)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Market => {
            let res = client
                .get(format!("{}/api/market-indicators", cli.url))
                .headers(headers)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Indicators => {
            let res = client
                .get(format!("{}/api/custom-report/available-indicators", cli.url))
                .headers(headers)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Report {
            indicators,
            start_date,
            end_date,
        } => {
            let keys: Vec<&str> = indicators.split(',').map(str::trim).collect();
            let body = json!({
                "indicators": keys,
                "start_date": start_date,
                "end_date": end_date,
            });
            let res = client
                .post(format!("{}/api/custom-report", cli.url))
                .headers(headers)
                .json(&body)
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
