//! # Catalog API Entry Point
//!
//! ## Startup Sequence
//! 1. Initialize tracing (stderr)
//! 2. Load configuration from the environment
//! 3. Connect to the database & run migrations
//! 4. Serve commands from stdin until EOF
//! 5. Close the pool
//!
//! ```bash
//! echo '{"command":"createCategory","args":{"name":"Electronics"}}' | catalog-api
//! # {"status":201,"body":{"id":1,"name":"Electronics",...}}
//! ```

use catalog_api::{dispatch, init_tracing, ApiConfig, AppState};
use catalog_db::Database;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Catalog API");

    let config = ApiConfig::load()?;
    info!(
        db_path = %config.db_path.display(),
        max_connections = config.max_connections,
        "Configuration loaded"
    );

    let db = Database::new(config.db_config()).await?;
    info!("Database connected");

    let state = AppState::new(db);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let reply = dispatch(&state, line).await;
        let mut out = serde_json::to_vec(&reply)?;
        out.push(b'\n');
        stdout.write_all(&out).await?;
        stdout.flush().await?;
    }

    info!("Input closed, shutting down");
    state.db().close().await;
    Ok(())
}
