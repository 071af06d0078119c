use std::time::Duration;

use clap::Parser;

#[derive(Parser, Clone, Debug)]
#[command(name = "mongocrud-script", about = "Runs a fixed insert / find / update / delete sequence against MongoDB")]
pub struct Cli {
    /// MongoDB connection string
    #[arg(long, default_value = "mongodb://localhost:27017", env = "MONGODB_URI")]
    pub uri: String,

    /// Database holding the collection
    #[arg(long, default_value = "mydb", env = "MONGODB_DATABASE")]
    pub database: String,

    /// Collection the scenario runs against
    #[arg(long, default_value = "users", env = "MONGODB_COLLECTION")]
    pub collection: String,

    /// Bound on connecting and the initial ping
    #[arg(long, default_value_t = 10, env = "CONNECT_TIMEOUT_SECS")]
    pub connect_timeout_secs: u64,

    /// Deadline for each individual store call
    #[arg(long, default_value_t = 10, env = "OPERATION_TIMEOUT_SECS")]
    pub operation_timeout_secs: u64,
}

impl Cli {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn operation_timeout(&self) -> Duration {
        Duration::from_secs(self.operation_timeout_secs)
    }
}
