//! Address storage
//!
//! A SQLite connection pool ([`Database`]) and the per-request handle
//! ([`Session`]) that every read and write goes through. A session holds one
//! pooled connection and hands it back to the pool when dropped.

use crate::address::{Address, AddressInput};
use crate::coord::distance::{find_all_pairs_within, find_within_radius};
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Sqlite;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

/// URL of a private in-memory database
pub const MEMORY_URL: &str = "sqlite::memory:";

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS addresses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT,
    lat REAL NOT NULL,
    lon REAL NOT NULL
)";

/// Connection pool for the address database
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if needed) the database at `url` and ensure the schema exists
    ///
    /// In-memory databases live only as long as their connection, so they are
    /// pinned to a single connection that is never recycled.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let pool_options = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let pool = pool_options.connect_with(options).await?;
        let database = Self { pool };
        database.migrate().await?;

        info!("Opened address database at {}", url);
        Ok(database)
    }

    /// Open a fresh in-memory database
    pub async fn in_memory() -> Result<Self> {
        Self::connect(MEMORY_URL, 1).await
    }

    /// Create the addresses table if it does not exist
    async fn migrate(&self) -> Result<()> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    /// Check out a connection for the duration of one unit of work
    pub async fn session(&self) -> Result<Session> {
        let conn = self.pool.acquire().await?;
        Ok(Session { conn })
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// One checked-out connection to the address database
pub struct Session {
    conn: PoolConnection<Sqlite>,
}

impl Session {
    /// Every stored address, ordered by id
    pub async fn all(&mut self) -> Result<Vec<Address>> {
        let addresses = sqlx::query_as::<_, Address>(
            "SELECT id, name, lat, lon FROM addresses ORDER BY id",
        )
        .fetch_all(&mut *self.conn)
        .await?;

        debug!("Fetched {} addresses", addresses.len());
        Ok(addresses)
    }

    /// Address with the given id
    pub async fn get(&mut self, id: i64) -> Result<Option<Address>> {
        let address = sqlx::query_as::<_, Address>(
            "SELECT id, name, lat, lon FROM addresses WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(address)
    }

    /// First address (lowest id) stored at exactly these coordinates
    pub async fn find_by_coordinates(&mut self, coords: Coordinates) -> Result<Option<Address>> {
        let address = sqlx::query_as::<_, Address>(
            "SELECT id, name, lat, lon FROM addresses WHERE lat = ? AND lon = ? ORDER BY id LIMIT 1",
        )
        .bind(coords.lat)
        .bind(coords.lon)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(address)
    }

    /// Store a new address and return it with its assigned id
    pub async fn insert(&mut self, input: &AddressInput) -> Result<Address> {
        let result = sqlx::query("INSERT INTO addresses (name, lat, lon) VALUES (?, ?, ?)")
            .bind(input.name.as_deref())
            .bind(input.lat)
            .bind(input.lon)
            .execute(&mut *self.conn)
            .await?;

        let address = Address {
            id: result.last_insert_rowid(),
            name: input.name.clone(),
            lat: input.lat,
            lon: input.lon,
        };

        debug!("Inserted address {}", address);
        Ok(address)
    }

    /// Overwrite every field of an existing address
    ///
    /// Returns [`Error::NotFound`] if no address has this id.
    pub async fn update(&mut self, id: i64, input: &AddressInput) -> Result<Address> {
        let result = sqlx::query("UPDATE addresses SET name = ?, lat = ?, lon = ? WHERE id = ?")
            .bind(input.name.as_deref())
            .bind(input.lat)
            .bind(input.lon)
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound);
        }

        let address = Address {
            id,
            name: input.name.clone(),
            lat: input.lat,
            lon: input.lon,
        };

        debug!("Updated address {}", address);
        Ok(address)
    }

    /// Remove an address
    ///
    /// Returns [`Error::NotFound`] if no address has this id.
    pub async fn delete(&mut self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = ?")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound);
        }

        debug!("Deleted address #{}", id);
        Ok(())
    }

    /// Addresses within `max_distance_km` of the stored address at `center`
    ///
    /// `center` must match a stored address exactly, otherwise
    /// [`Error::NotFound`]. Addresses sharing the center's exact coordinates
    /// are left out. Results keep id order.
    pub async fn within_radius(
        &mut self,
        center: Coordinates,
        max_distance_km: f64,
    ) -> Result<Vec<Address>> {
        let origin = self
            .find_by_coordinates(center)
            .await?
            .ok_or(Error::NotFound)?;

        let addresses = self.all().await?;
        let nearby: Vec<Address> = find_within_radius(&addresses, origin.coords(), max_distance_km)
            .into_iter()
            .cloned()
            .collect();

        debug!(
            "{} of {} addresses within {} km of {}",
            nearby.len(),
            addresses.len(),
            max_distance_km,
            origin
        );
        Ok(nearby)
    }

    /// Every pair of stored addresses at most `max_distance_km` apart
    pub async fn pairs_within(&mut self, max_distance_km: f64) -> Result<Vec<(Address, Address)>> {
        let addresses = self.all().await?;

        let pairs: Vec<(Address, Address)> = find_all_pairs_within(&addresses, max_distance_km)
            .into_iter()
            .map(|(a, b)| (a.clone(), b.clone()))
            .collect();

        debug!("{} address pairs within {} km", pairs.len(), max_distance_km);
        Ok(pairs)
    }
}
