//! File upload example
//!
//! Uploads a local file to a tus server in chunks.
//!
//! Run with: cargo run --example upload_file -- http://localhost:1080/files/ ./video.mp4 [chunk_mib]

use anyhow::{bail, Context};
use tus_client::{ClientConfig, TusClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let (Some(endpoint), Some(path)) = (args.next(), args.next()) else {
        bail!("usage: upload_file <endpoint> <path> [chunk_mib]");
    };

    let mut config = ClientConfig::default().with_retry_delay_ms(250);
    if let Some(mib) = args.next() {
        let mib: usize = mib.parse().context("chunk size must be a number of MiB")?;
        config = config.with_chunk_size(mib * 1024 * 1024);
    }

    println!("tus Upload Example");
    println!("==================\n");

    let client = TusClient::with_config(&endpoint, config)
        .await
        .with_context(|| format!("cannot connect to {}", endpoint))?;
    println!("Server extensions: {:?}", client.capabilities().extensions);

    let upload = client
        .upload_file(&path)
        .await
        .with_context(|| format!("upload of {} failed", path))?;

    println!("Uploaded {} bytes to {}", upload.length, upload.location);
    Ok(())
}
