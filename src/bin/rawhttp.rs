//! `rawhttp [METHOD] URL` - send one GET or POST and print the response.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use rawhttp::network::application::http::{Client, ClientOptions, Error, Method, USER_AGENT};
use rawhttp::network::transport::tcp::Timeouts;
use rawhttp::network::transport::{SystemResolver, TcpConnector};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "rawhttp")]
#[command(about = "Send a GET or POST request over a raw TCP socket", long_about = None)]
#[command(version, arg_required_else_help = true)]
#[command(override_usage = "rawhttp [OPTIONS] [METHOD] <URL>")]
struct Cli {
    /// GET or POST; taken as the URL when it is the only argument
    #[arg(value_name = "METHOD")]
    first: String,

    /// Target URL, e.g. http://example.com:8080/path
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// Form field sent with POST, as KEY=VALUE (repeatable)
    #[arg(short = 'd', long = "data", value_name = "KEY=VALUE", value_parser = parse_pair)]
    data: Vec<(String, String)>,

    /// User-Agent header sent with GET
    #[arg(long, default_value = USER_AGENT, env = "RAWHTTP_USER_AGENT")]
    user_agent: String,

    /// Give up connecting after this many milliseconds (unset or 0: wait forever)
    #[arg(long = "connect-timeout-ms", env = "RAWHTTP_CONNECT_TIMEOUT_MS")]
    connect_timeout_ms: Option<u64>,

    /// Give up on a silent peer after this many milliseconds (unset or 0: wait forever)
    #[arg(long = "read-timeout-ms", env = "RAWHTTP_READ_TIMEOUT_MS")]
    read_timeout_ms: Option<u64>,

    /// Log every step of the exchange
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// `(method, url)`; a lone argument is a URL fetched with GET.
    fn target(&self) -> (&str, &str) {
        match &self.url {
            Some(url) => (self.first.as_str(), url.as_str()),
            None => (Method::Get.as_str(), self.first.as_str()),
        }
    }

    fn timeouts(&self) -> Timeouts {
        Timeouts {
            connect: self.connect_timeout_ms.map(Duration::from_millis),
            read: self.read_timeout_ms.map(Duration::from_millis),
            write: None,
        }
    }
}

fn parse_pair(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got `{s}`"))
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "rawhttp=debug" } else { "rawhttp=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let (method, url) = cli.target();
    if Method::from_command(method) == Method::Get && !cli.data.is_empty() {
        tracing::warn!("form data is only sent with POST, ignoring it");
    }

    let form: Vec<(&str, &str)> = cli
        .data
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    let options = ClientOptions {
        user_agent: &cli.user_agent,
    };
    let mut client = Client::with_options(
        TcpConnector::with_timeouts(cli.timeouts()),
        SystemResolver,
        options,
    );

    match client.command(url, method, Some(form.as_slice())) {
        Ok(response) => {
            println!("{}", response.status_code);
            println!();
            println!("{}", response.body);
            ExitCode::SUCCESS
        }
        Err(Error::ResolutionFailure) => {
            eprintln!("Hostname could not be resolved. Exiting");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("rawhttp: {e}");
            ExitCode::FAILURE
        }
    }
}
