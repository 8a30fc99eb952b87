use anyhow::Context;
use clap::Parser;
use limitprobe_core::config::HarnessConfig;
use limitprobe_core::scenario;

#[derive(Parser)]
#[command(
    name = "limitprobe",
    about = "Verify that a gateway's rate limits are isolated per service and per identity",
    version
)]
struct Cli {
    /// Base URL of the gateway under test
    #[arg(long, env = "API_GW_BASE_URL", default_value = "http://localhost:8085")]
    api_base_url: String,

    /// Base URL of the auth service issuing bearer tokens
    #[arg(long, env = "AUTH_GW_BASE_URL", default_value = "http://localhost:8084")]
    auth_base_url: String,

    #[arg(long, env = "AUTH_USERNAME", default_value = "user_all")]
    username: String,

    #[arg(long, env = "AUTH_PASSWORD", default_value = "123")]
    password: String,

    /// Requests per burst; must exceed the limiter's per-window quota
    #[arg(long, env = "BURST_REQUESTS", default_value = "8")]
    burst_requests: u32,

    #[arg(long, env = "USERS_PATH", default_value = "/api/v1/users")]
    users_path: String,

    #[arg(long, env = "ORDERS_PATH", default_value = "/api/v1/orders")]
    orders_path: String,

    /// Rate-window length of the limiter under test, in milliseconds
    #[arg(long, env = "WINDOW_MS", default_value = "1000")]
    window_ms: u64,

    /// How far past the window boundary to start a burst, in milliseconds
    #[arg(long, env = "ALIGN_MARGIN_MS", default_value = "30")]
    align_margin_ms: u64,

    /// Per-request timeout, in milliseconds
    #[arg(long, env = "REQUEST_TIMEOUT_MS", default_value = "5000")]
    request_timeout_ms: u64,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = HarnessConfig {
        api_base_url: cli.api_base_url,
        auth_base_url: cli.auth_base_url,
        username: cli.username,
        password: cli.password,
        burst_requests: cli.burst_requests,
        users_path: cli.users_path,
        orders_path: cli.orders_path,
        window_ms: cli.window_ms,
        align_margin_ms: cli.align_margin_ms,
        request_timeout_ms: cli.request_timeout_ms,
    };

    let outcome = scenario::run(&config).context("run aborted")?;

    // The report always reaches stdout before the pass/fail decision.
    println!("{}", serde_json::to_string_pretty(&outcome.report)?);

    if !outcome.passed() {
        anyhow::bail!("rate-limit checks failed: {}", outcome.failures.join("; "));
    }
    Ok(())
}
