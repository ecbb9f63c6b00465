use std::error::Error;

#[rocket::main]
async fn main() -> Result<(), Box<dyn Error>> {
    schedo::logging::init_tracing();

    let _rocket = schedo::build()?.launch().await?;

    Ok(())
}
