//! Command implementations for the carbon footprint CLI.
//!
//! `serve` runs the estimation proxy, `estimate` plays the client against a
//! running proxy, and `reference` prints the offline factor-based estimate.

use std::net::SocketAddr;

use cfp_core::gateway::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use cfp_ui::transport::DEFAULT_PROXY_URL;
use clap::Subcommand;

pub mod estimate;
pub mod form;
pub mod reference;
pub mod serve;

use form::FormArgs;

#[derive(Subcommand)]
pub enum Command {
    /// Run the estimation proxy (reads the credential from LOVABLE_API_KEY)
    Serve {
        /// Address to listen on
        #[arg(short, long, default_value = "127.0.0.1:8787")]
        bind: SocketAddr,

        /// Chat-completion endpoint
        #[arg(long, default_value = DEFAULT_ENDPOINT)]
        endpoint: String,

        /// Model identifier sent upstream
        #[arg(long, default_value = DEFAULT_MODEL)]
        model: String,
    },

    /// Submit lifestyle data to a running proxy and print the analysis
    Estimate {
        /// URL of the estimation proxy
        #[arg(short, long, default_value = DEFAULT_PROXY_URL)]
        proxy_url: String,

        #[command(flatten)]
        form: FormArgs,
    },

    /// Print the deterministic estimate implied by the reference emission factors
    Reference {
        #[command(flatten)]
        form: FormArgs,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Serve {
            bind,
            endpoint,
            model,
        } => serve::run_serve(bind, endpoint, model).await,
        Command::Estimate { proxy_url, form } => {
            estimate::run_estimate(&proxy_url, form.into_input()).await
        }
        Command::Reference { form } => reference::run_reference(&form.into_input()),
    }
}
