//! Influxmon CLI
//!
//! Command-line interface for discovering and collecting InfluxDB internal
//! metrics.
//!
//! # Usage
//!
//! ```bash
//! influxmon --help
//! influxmon discover
//! influxmon --host db1 collect intel/influxdb/stat/httpd/req --interval 10
//! ```

#![deny(unsafe_code)]

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use influxmon_collector::{Collector, MetricRequest, PLUGIN_NAME, PLUGIN_VERSION};
use influxmon_shared::config::{ConfigBag, ConfigPolicy};
use influxmon_shared::models::Namespace;

/// Influxmon CLI - InfluxDB internal metrics collector
#[derive(Parser)]
#[command(name = "influxmon")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Database host
    #[arg(long, env = "INFLUXMON_HOST")]
    host: Option<String>,

    /// Database HTTP API port
    #[arg(long, env = "INFLUXMON_PORT")]
    port: Option<u16>,

    /// User name
    #[arg(short, long, env = "INFLUXMON_USER")]
    user: Option<String>,

    /// Password
    #[arg(short, long, env = "INFLUXMON_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List every available metric namespace
    Discover {
        /// Print the namespaces as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Collect metric values as JSON lines
    Collect {
        /// Namespaces to collect (`intel/influxdb/<kind>/<series>/<column>`);
        /// all discovered metrics when omitted
        namespaces: Vec<String>,

        /// Seconds between cycles; a single cycle when omitted
        #[arg(short, long)]
        interval: Option<u64>,

        /// Stop after this many cycles
        #[arg(short, long)]
        count: Option<u64>,
    },
}

impl Cli {
    /// Builds the configuration bag, filling unset items from the policy.
    fn config_bag(&self) -> ConfigBag {
        let mut bag = ConfigBag::new();
        if let Some(host) = &self.host {
            bag.set("host", host.as_str());
        }
        if let Some(port) = self.port {
            bag.set("port", i64::from(port));
        }
        if let Some(user) = &self.user {
            bag.set("user", user.as_str());
        }
        if let Some(password) = &self.password {
            bag.set("password", password.as_str());
        }
        ConfigPolicy::collector().apply_defaults(&mut bag);
        bag
    }
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn parse_namespace(raw: &str) -> Namespace {
    Namespace::new(raw.trim_matches('/').split('/'))
}

fn discover(collector: &Collector, config: &ConfigBag, json: bool) -> Result<()> {
    let namespaces = collector
        .discover(config)
        .context("metric discovery failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&namespaces)?);
    } else {
        for namespace in namespaces {
            println!("{namespace}");
        }
    }
    Ok(())
}

fn collect(
    collector: &Collector,
    config: &ConfigBag,
    namespaces: &[String],
    interval: Option<u64>,
    count: Option<u64>,
) -> Result<()> {
    let namespaces: Vec<Namespace> = if namespaces.is_empty() {
        collector
            .discover(config)
            .context("metric discovery failed")?
    } else {
        namespaces.iter().map(|raw| parse_namespace(raw)).collect()
    };

    let requests: Vec<MetricRequest> = namespaces
        .into_iter()
        .map(|namespace| MetricRequest::new(namespace).with_config(config.clone()))
        .collect();

    let cycles = match (interval, count) {
        (_, Some(count)) => count,
        (Some(_), None) => u64::MAX,
        (None, None) => 1,
    };

    for cycle in 0..cycles {
        if cycle > 0 {
            if let Some(secs) = interval {
                std::thread::sleep(Duration::from_secs(secs));
            }
        }

        match collector.collect(&requests) {
            Ok(metrics) => {
                for metric in metrics {
                    println!("{}", serde_json::to_string(&metric)?);
                }
            }
            // A failed cycle is not fatal while polling on an interval.
            Err(e) if interval.is_some() => {
                tracing::error!(error = %e, cycle, "Collection cycle failed");
            }
            Err(e) => return Err(e).context("metric collection failed"),
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    // A missing .env file is fine.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let config = cli.config_bag();
    let collector = Collector::with_http();

    match &cli.command {
        Some(Commands::Discover { json }) => discover(&collector, &config, *json),
        Some(Commands::Collect {
            namespaces,
            interval,
            count,
        }) => collect(&collector, &config, namespaces, *interval, *count),
        None => {
            println!(
                "Influxmon CLI v{} ({PLUGIN_NAME} collector v{PLUGIN_VERSION})",
                env!("CARGO_PKG_VERSION")
            );
            println!("Use --help for usage information");
            Ok(())
        }
    }
}
