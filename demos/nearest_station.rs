//! Finds the station nearest a coordinate and prints its daily summaries.
//!
//! `cargo run --example nearest_station -- 32.75 -97.33`

use stationwx::{DataSource, LatLon, StationWeather, WeatherError};
use std::env;

#[tokio::main]
async fn main() -> Result<(), WeatherError> {
    env_logger::init();
    let client = StationWeather::new()?;

    let args: Vec<f64> = env::args().skip(1).filter_map(|a| a.parse().ok()).collect();
    let location = match args.as_slice() {
        [lat, lon] => Some(LatLon(*lat, *lon)),
        _ => None,
    };

    let nearest = client
        .nearest_station()
        .maybe_location(location)
        .call()
        .await?;
    if nearest.is_fallback() {
        println!("No location given, showing {}", nearest.station.station_id);
    } else if let Some(km) = nearest.distance_km {
        println!(
            "Nearest station: {} ({}), {:.1} km away",
            nearest.station.station_name, nearest.station.station_id, km
        );
    }

    let report = client.report().station(&nearest.station).call().await?;
    if let DataSource::Fallback { reason } = &report.source {
        println!("Failed to fetch station weather data ({reason}). Showing default values.");
    }

    for day in &report.summaries {
        println!(
            "{}  min {:>5.1}  max {:>5.1}  humidity {:>3}  wind {:>4.1}",
            day.date, day.temp_min, day.temp_max, day.humidity, day.wind_speed
        );
    }
    if let Some(hourly) = &report.hourly {
        println!("\nHourly temperatures on {}:", hourly.date());
        for reading in hourly.readings() {
            println!("  {:<10} {:>5.1}", reading.time, reading.temperature);
        }
    }
    if let Some(now) = &report.current {
        println!(
            "\nLatest: {} at {}, wind {:.1} {}",
            now.temperature.map_or("n/a".to_string(), |t| format!("{t:.1}")),
            now.timestamp,
            now.wind_speed,
            now.wind_direction
        );
    }
    Ok(())
}
