use geobox::{DEFAULT_GEOSTRING_PRECISION, Geobox, GeoboxError};

fn main() -> Result<(), GeoboxError> {
    env_logger::init();

    let lon = 12.481563961993402;
    let lat = 41.87643118161227;

    let gbox = Geobox::try_new(lon, lat)?;
    log::debug!("encoded ({}, {}) at depth {}", lon, lat, gbox.depth());

    println!("Code: {}", gbox.code());
    println!("Binary: {:064b}", gbox.code());
    println!("ID: {}", gbox.id());
    println!(
        "Geostring: {}",
        gbox.geostring(DEFAULT_GEOSTRING_PRECISION)
    );

    let bounds = gbox.bounds();
    println!(
        "Cell: ({}, {}) - ({}, {})",
        bounds.min().x,
        bounds.min().y,
        bounds.max().x,
        bounds.max().y
    );

    Ok(())
}
