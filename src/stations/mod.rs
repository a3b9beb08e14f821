pub mod debounce;
pub mod directory;
pub mod error;
pub mod locate_station;
pub mod search_index;
