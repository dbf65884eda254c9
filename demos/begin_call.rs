use std::io;

use verimor::{BeginCall, BeginCallOptions, PhoneNumber, VerimorClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = VerimorClient::from_env()?;

    let source = std::env::var("VERIMOR_SOURCE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "VERIMOR_SOURCE environment variable is required",
        )
    })?;
    let destination = std::env::var("VERIMOR_DESTINATION").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "VERIMOR_DESTINATION environment variable is required",
        )
    })?;

    let request = BeginCall::new(
        PhoneNumber::normalize(source)?,
        PhoneNumber::normalize(destination)?,
        BeginCallOptions::default(),
    );

    let response = client.begin_call(request).await?;
    println!(
        "session_id: {:?}, status: {:?}",
        response.session_id, response.status
    );

    Ok(())
}
