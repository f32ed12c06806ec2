use anyhow::Result;
use naturedopes::{Client, config};

fn main() -> Result<()> {
    // Example program that calls the library API.
    // Uses the stored config, or API_URL / API_KEY when none has been saved.
    let cfg = config::load()?;
    let client = Client::from_config(&cfg)?;

    let species = std::env::args().nth(1).unwrap_or_else(|| "Quercus robur".to_string());
    let images = client.search_images(&species, 0)?;

    println!("{} image(s) of {}", images.len(), species);
    for image in images {
        println!(
            "  #{} at ({:.5}, {:.5}) -> {}",
            image.id, image.gps_lat, image.gps_long, image.image_path
        );
    }
    Ok(())
}
