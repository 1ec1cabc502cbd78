//! Command-line interface definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "orbit-agent")]
#[command(about = "Orbit Protocol intent router", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
	/// Path to configuration file (TOML, JSON or YAML)
	#[arg(short, long, env = "ORBIT_CONFIG")]
	pub config: Option<PathBuf>,

	/// Log filter override, e.g. "debug" or "orbit_routing=trace,info"
	#[arg(short, long)]
	pub log_level: Option<String>,

	#[command(subcommand)]
	pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
	/// Start the HTTP service (default)
	Start,

	/// Validate the configuration and exit
	Validate,

	/// Resolve a single instruction and print the swap route as JSON
	Resolve {
		/// Trading instruction, e.g. "Swap 100 USDC to ETH on Optimism"
		#[arg(short, long)]
		text: String,

		/// Wallet address the route is built for
		#[arg(short, long, default_value = "0x0000000000000000000000000000000000000000")]
		address: String,
	},
}
