//! Encode a few landmarks, store them, and query by region and neighbourhood.

use geotrie::compute::geohash;
use geotrie::{DB, GeotrieError, Location};

fn main() -> Result<(), GeotrieError> {
    env_logger::init();

    let landmarks = [
        ("Anakena Beach", Location::new(-27.07332578863511, -109.32321101199314)),
        ("Saint Peter's Basilica", Location::new(41.90216070037718, 12.453725061736066)),
        ("Red Square", Location::new(55.753730934309345, 37.61990186254636)),
        ("Sydney Opera House", Location::new(-33.85684190426881, 151.21525191838856)),
        ("Zocalo", Location::new(19.43265922422016, -99.13317967733457)),
    ];

    let db = DB::memory()?;
    for (name, location) in landmarks {
        let hash = db.insert_at(location, "name", name)?;
        let cell = geohash::decode(&hash);
        println!("{:<24} {} cell {}", name, hash, cell);
    }

    let zocalo = geohash::encode(19.43265922422016, -99.13317967733457, 12);
    println!("\nNeighbours of {}:", zocalo.truncate(6));
    for (direction, neighbor) in geohash::neighbors(&zocalo.truncate(6)).iter() {
        println!("  {:<2} {}", direction, neighbor);
    }

    let nearby = db.neighbors_data(zocalo.truncate(6).as_str())?;
    println!(
        "\nStored near Zocalo: {}",
        serde_json::to_string_pretty(&nearby).unwrap_or_default()
    );

    match db.get_all_children("9q") {
        Err(e) if e.is_not_found() => println!("Nothing stored under 9q ({})", e),
        other => println!("Unexpected: {:?}", other),
    }

    println!("\n{:?}", db.stats());
    Ok(())
}
