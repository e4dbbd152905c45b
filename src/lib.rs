//! geo-addresses: Address Book with Proximity Queries
//!
//! A library, CLI and HTTP service that stores named latitude/longitude
//! addresses in SQLite and answers two questions about them using the
//! haversine great-circle distance.
//!
//! ## Features
//!
//! - Create, list, update and delete addresses
//! - Addresses within a distance of a stored address
//! - All pairs of addresses within a distance of each other
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use geo_addresses::coord::Coordinates;
//! use geo_addresses::coord::distance::{find_all_pairs_within, haversine_distance};
//!
//! let paris = Coordinates::new(48.8566, 2.3522);
//! let london = Coordinates::new(51.5074, -0.1278);
//! let berlin = Coordinates::new(52.5200, 13.4050);
//!
//! let km = haversine_distance(paris, london);
//! println!("Paris to London: {:.1} km", km);
//!
//! let points = [paris, london, berlin];
//! let close = find_all_pairs_within(&points, 500.0);
//! assert_eq!(close.len(), 1);
//! ```

pub mod address;
pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod server;
pub mod store;

// Re-export commonly used types
pub use address::{Address, AddressInput};
pub use config::Config;
pub use coord::{Coordinates, Located};
pub use error::{Error, Result};
pub use store::{Database, Session};
