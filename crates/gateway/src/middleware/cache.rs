//! Redis connection used for rate limiting.

use redis::{aio::ConnectionManager, AsyncCommands, RedisError};
use tracing::debug;

use common::AppResult;

/// Cache key prefix for rate limiting
const CACHE_PREFIX_RATE_LIMIT: &str = "rate_limit:";

/// Redis cache wrapper.
pub struct Cache {
    conn: ConnectionManager,
}

impl Cache {
    /// Connect to Redis.
    pub async fn connect(url: &str) -> Result<Self, RedisError> {
        debug!("Connecting to Redis at {}", url);
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }

    /// Round-trip a PING.
    pub async fn ping(&self) -> AppResult<()> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    /// Increment the fixed-window counter for `identifier`.
    /// Returns (current_count, allowed).
    pub async fn check_rate_limit(
        &self,
        identifier: &str,
        max_requests: u64,
        window_seconds: u64,
    ) -> AppResult<(u64, bool)> {
        let key = format!("{}{}", CACHE_PREFIX_RATE_LIMIT, identifier);
        let mut conn = self.conn.clone();

        let count: u64 = conn.incr(&key, 1).await?;

        // First hit opens the window
        if count == 1 {
            conn.expire::<_, ()>(&key, window_seconds as i64).await?;
        }

        Ok((count, count <= max_requests))
    }
}
