use verimor::{AreaCode, AvailableNumbers, VerimorClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = VerimorClient::from_env()?;

    let request = match std::env::var("VERIMOR_AREA_CODE") {
        Ok(code) => AvailableNumbers::new(AreaCode::new(code)?),
        Err(_) => AvailableNumbers::default(),
    };

    let response = client.available_numbers(request).await?;
    println!("found {} numbers", response.numbers.len());
    for number in &response.numbers {
        println!("{number}");
    }

    Ok(())
}
