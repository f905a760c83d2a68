use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Bridge listening host
    #[arg(long, env = "FSBRIDGE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Bridge listening port, 0 picks a free one
    #[arg(short, long, env = "FSBRIDGE_PORT", default_value_t = 0)]
    pub port: u16,

    /// Path prefix of the operation endpoints
    #[arg(short, long, env = "FSBRIDGE_BASE", default_value = "/fs")]
    pub base: String,

    /// Directory to change into before serving; relative paths resolve against it
    #[arg(short, long, env = "FSBRIDGE_WORKDIR")]
    pub workdir: Option<PathBuf>,

    /// Largest accepted request body in bytes
    #[arg(long, env = "FSBRIDGE_BODY_LIMIT", default_value_t = 64 * 1024 * 1024)]
    pub body_limit: usize,
}
