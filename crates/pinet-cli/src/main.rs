//! PiNet CLI
//!
//! Command-line interface for the PiNet network utility API

use std::time::Duration;

use clap::{Parser, Subcommand};
use color_eyre::Result;
use pinet_client::{HealthStatus, PingAndWakeResult, PingResult, PiNetClient, WakeOnLanResult};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pinet")]
#[command(about = "Ping and wake hosts through a PiNet API", long_about = None)]
struct Cli {
    /// Base URL of the PiNet API
    #[arg(long, env = "PINET_API_URL")]
    url: String,

    /// API key sent as X-API-Key
    #[arg(long, env = "PINET_API_KEY", hide_env_values = true, default_value = "")]
    api_key: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "10")]
    timeout: u64,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check whether the PiNet service is running
    Health,
    /// Check whether a host answers ping
    Ping {
        /// IP address to ping
        ip_address: String,
    },
    /// Send a Wake-on-LAN packet
    Wake {
        /// MAC address of the host to wake
        mac_address: String,
    },
    /// Ping a host and wake it if it is offline
    #[command(name = "ping-and-wake")]
    PingAndWake {
        /// IP address to ping
        ip_address: String,
        /// MAC address to wake
        mac_address: String,
        /// Only report status, never send a packet
        #[arg(long)]
        no_wake: bool,
    },
}

/// Human-readable rendering of a command result
trait Report: Serialize {
    fn report(&self) -> String;
}

impl Report for HealthStatus {
    fn report(&self) -> String {
        format!(
            "Service: {}\nStatus: {}\nRunning: {}",
            self.service, self.status, self.is_running
        )
    }
}

impl Report for PingResult {
    fn report(&self) -> String {
        format!(
            "IP: {}\nOnline: {}\nStatus: {}",
            self.ip_address, self.is_online, self.status
        )
    }
}

impl Report for WakeOnLanResult {
    fn report(&self) -> String {
        format!(
            "MAC: {}\nSuccess: {}\nMessage: {}",
            self.mac_address, self.success, self.message
        )
    }
}

impl Report for PingAndWakeResult {
    fn report(&self) -> String {
        let mut out = format!(
            "IP: {}\nWas online: {}\nWoL sent: {}",
            self.ip_address, self.was_online, self.wol_sent
        );
        if let Some(wol) = &self.wol_result {
            out.push_str(&format!("\nWoL success: {}\nWoL message: {}", wol.success, wol.message));
        }
        out
    }
}

fn print(result: &impl Report, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        println!("{}", result.report());
    }
    Ok(())
}

async fn run(client: &PiNetClient, command: &Commands, json: bool) -> Result<()> {
    match command {
        Commands::Health => print(&client.check_health().await?, json),
        Commands::Ping { ip_address } => print(&client.is_host_online(ip_address).await?, json),
        Commands::Wake { mac_address } => print(&client.wake_host(mac_address).await?, json),
        Commands::PingAndWake {
            ip_address,
            mac_address,
            no_wake,
        } => {
            let result = client
                .ping_and_wake(ip_address, mac_address, !no_wake)
                .await?;
            print(&result, json)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut client = PiNetClient::new(&cli.url, &cli.api_key)?
        .with_timeout(Duration::from_secs(cli.timeout));
    let result = run(&client, &cli.command, cli.json).await;
    client.close();

    result
}
