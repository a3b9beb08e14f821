//! Reads search terms from stdin, one per line, and prints matching stations
//! once typing pauses.

use stationwx::{RecordStore, SearchHistory, SearchRecord, StationWeather, WeatherError};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<(), WeatherError> {
    env_logger::init();
    let client = StationWeather::new()?;
    let (input, mut debouncer) = client.search_input();
    let mut history = SearchHistory::new();

    let typing = async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            input.edit(line);
        }
    };

    let searching = async {
        while let Some(query) = debouncer.settled().await {
            let hits = client.search().query(&query).call().await?;
            println!("{} match(es) for {:?}", hits.len(), query);
            for station in hits.iter().take(10) {
                println!("  {:<6} {}", station.station_id, station.station_name);
            }
            if let Some(first) = hits.into_iter().next() {
                history.add(SearchRecord::now(first));
            }
        }
        Ok::<_, WeatherError>(())
    };

    let ((), result) = tokio::join!(typing, searching);
    result?;

    println!("\nRecent stations:");
    for record in history.list() {
        println!("  {} ({})", record.station.station_id, record.searched_at);
    }
    Ok(())
}
