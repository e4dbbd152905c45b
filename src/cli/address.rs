//! Address command handler
//!
//! Runs the same operations as the HTTP API directly against the configured
//! database.

use crate::address::{Address, AddressInput};
use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::store::{Database, Session};
use clap::{Args, Subcommand};
use serde::Serialize;

/// Address command arguments
#[derive(Args)]
pub struct AddressArgs {
    #[command(subcommand)]
    pub command: AddressCommand,

    /// SQLite database URL (defaults to the configured database)
    #[arg(long, global = true)]
    pub database: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

/// Address subcommands
#[derive(Subcommand)]
pub enum AddressCommand {
    /// List every address
    List,
    /// Show a single address
    Show {
        /// Address ID
        id: i64,
    },
    /// Addresses within a distance of a stored address
    Near {
        /// Latitude of the stored center address
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        /// Longitude of the stored center address
        #[arg(allow_negative_numbers = true)]
        lon: f64,
        /// Maximum distance in kilometers
        distance: f64,
    },
    /// Pairs of addresses within a distance of each other
    Pairs {
        /// Maximum distance in kilometers
        distance: f64,
    },
    /// Add an address
    Add {
        /// Latitude in degrees
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        /// Longitude in degrees
        #[arg(allow_negative_numbers = true)]
        lon: f64,
        /// Display name
        #[arg(long, short = 'n')]
        name: Option<String>,
    },
    /// Overwrite an address (a missing --name clears the name)
    Update {
        /// Address ID
        id: i64,
        /// Latitude in degrees
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        /// Longitude in degrees
        #[arg(allow_negative_numbers = true)]
        lon: f64,
        /// Display name
        #[arg(long, short = 'n')]
        name: Option<String>,
    },
    /// Delete an address
    Delete {
        /// Address ID
        id: i64,
    },
}

/// Run the address command
pub async fn run(args: AddressArgs) -> Result<()> {
    let config = Config::load()?;
    let url = match args.database {
        Some(url) => url,
        None => config.database_url()?,
    };

    let database = Database::connect(&url, config.database.max_connections).await?;
    let mut session = database.session().await?;
    let result = execute(args.command, &mut session, args.json).await;

    drop(session);
    database.close().await;

    println!("{}", result?);
    Ok(())
}

/// Perform one subcommand and render its output
async fn execute(command: AddressCommand, session: &mut Session, json: bool) -> Result<String> {
    match command {
        AddressCommand::List => {
            let addresses = session.all().await?;
            render(&addresses, json, || render_list(&addresses))
        }
        AddressCommand::Show { id } => {
            let address = session.get(id).await?.ok_or(Error::NotFound)?;
            render(&address, json, || address.to_string())
        }
        AddressCommand::Near { lat, lon, distance } => {
            let center = Coordinates::new(lat, lon);
            center.validate()?;
            let addresses = session.within_radius(center, distance).await?;
            render(&addresses, json, || render_list(&addresses))
        }
        AddressCommand::Pairs { distance } => {
            let pairs = session.pairs_within(distance).await?;
            render(&pairs, json, || render_pairs(&pairs))
        }
        AddressCommand::Add { lat, lon, name } => {
            let input = AddressInput::new(name, lat, lon);
            input.validate()?;
            let address = session.insert(&input).await?;
            render(&address, json, || format!("Added {}", address))
        }
        AddressCommand::Update { id, lat, lon, name } => {
            let input = AddressInput::new(name, lat, lon);
            input.validate()?;
            let address = session.update(id, &input).await?;
            render(&address, json, || format!("Updated {}", address))
        }
        AddressCommand::Delete { id } => {
            session.delete(id).await?;
            render(&id, json, || format!("Deleted #{}", id))
        }
    }
}

/// JSON when requested, otherwise the text produced by `text`
fn render<T: Serialize, F: FnOnce() -> String>(value: &T, json: bool, text: F) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(text())
    }
}

fn render_list(addresses: &[Address]) -> String {
    if addresses.is_empty() {
        return "No addresses.".to_string();
    }

    addresses
        .iter()
        .map(|a| format!("  {}", a))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_pairs(pairs: &[(Address, Address)]) -> String {
    if pairs.is_empty() {
        return "No pairs.".to_string();
    }

    pairs
        .iter()
        .map(|(a, b)| {
            let km = crate::coord::distance::haversine_distance(a.coords(), b.coords());
            format!("  {}  <->  {}  ({:.2} km)", a, b, km)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
