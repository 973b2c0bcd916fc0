use serde::de::DeserializeOwned;
use std::{
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
    time::Instant,
};
use thiserror::Error;
use tracing::{debug, warn};
use zip::ZipArchive;

mod config;
mod data;
pub mod models;
pub use config::*;
pub use data::*;
pub use models::*;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Could not find file with name: {0}")]
    FileNotFound(String),
}

#[derive(Default, Debug, Clone)]
pub enum StorageType {
    #[default]
    None,
    Zip(PathBuf),
    Directory(PathBuf),
}

/// Reads the tables of a GTFS feed stored as a zip archive or an unpacked directory.
#[derive(Default, Debug, Clone)]
pub struct Gtfs {
    config: Config,
    storage: StorageType,
}

impl Gtfs {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(mut self, config: self::Config) -> Self {
        self.config = config;
        self
    }

    pub fn from_zip<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.storage = StorageType::Zip(path.as_ref().to_path_buf());
        self
    }

    pub fn from_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.storage = StorageType::Directory(path.as_ref().to_path_buf());
        self
    }

    /// Picks zip or directory storage from what is found at `path`.
    pub fn from_path<P: AsRef<Path>>(self, path: P) -> Self {
        if path.as_ref().is_dir() {
            self.from_directory(path)
        } else {
            self.from_zip(path)
        }
    }

    pub fn stream_stops<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, GtfsStop)),
    {
        self.stream(&self.config.stops_path, f)
    }

    pub fn stream_routes<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, GtfsRoute)),
    {
        self.stream(&self.config.routes_path, f)
    }

    pub fn stream_trips<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, GtfsTrip)),
    {
        self.stream(&self.config.trips_path, f)
    }

    pub fn stream_stop_times<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, GtfsStopTime)),
    {
        self.stream(&self.config.stop_times_path, f)
    }

    pub fn stream_calendar<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, GtfsCalendar)),
    {
        self.stream(&self.config.calendar_path, f)
    }

    pub fn stream_shapes<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, GtfsShape)),
    {
        self.stream(&self.config.shapes_path, f)
    }

    /// Reads every table the router needs into memory.
    /// `shapes.txt` is optional, every other table is required.
    pub fn load(&self) -> Result<GtfsData, self::Error> {
        let now = Instant::now();
        let mut data = GtfsData::new();
        self.stream_stops(|(_, stop)| data.stops.push(stop))?;
        self.stream_routes(|(_, route)| data.routes.push(route))?;
        self.stream_trips(|(_, trip)| data.trips.push(trip))?;
        self.stream_stop_times(|(_, stop_time)| data.stop_times.push(stop_time))?;
        self.stream_calendar(|(_, calendar)| data.calendar.push(calendar))?;
        match self.stream_shapes(|(_, shape)| data.shapes.push(shape)) {
            Err(self::Error::FileNotFound(name)) => {
                warn!("No {name} in feed, routes will have no lines");
            }
            result => result?,
        }
        debug!(
            "Read {} stops, {} routes, {} trips, {} stop times, {} services and {} shape points in {:?}",
            data.stops.len(),
            data.routes.len(),
            data.trips.len(),
            data.stop_times.len(),
            data.calendar.len(),
            data.shapes.len(),
            now.elapsed()
        );
        Ok(data)
    }

    fn stream<T, F>(&self, file_name: &str, f: F) -> Result<(), self::Error>
    where
        T: DeserializeOwned,
        F: FnMut((usize, T)),
    {
        match &self.storage {
            StorageType::None => Ok(()),
            StorageType::Zip(path) => stream_from_zip(path, file_name, f),
            StorageType::Directory(path) => {
                let file_path = path.join(file_name);
                if !file_path.is_file() {
                    return Err(self::Error::FileNotFound(file_name.to_string()));
                }
                stream_csv(File::open(file_path)?, file_name, f)
            }
        }
    }
}

fn stream_from_zip<T, F>(zip_path: &Path, file_name: &str, f: F) -> Result<(), self::Error>
where
    T: DeserializeOwned,
    F: FnMut((usize, T)),
{
    let zip_file = File::open(zip_path)?;
    let mut archive = ZipArchive::new(zip_file)?;
    let index = archive
        .index_for_name(file_name)
        .ok_or(self::Error::FileNotFound(file_name.to_string()))?;
    let file = archive.by_index(index)?;
    stream_csv(file, file_name, f)
}

/// Deserializes every row of a csv table.
/// Rows that fail to deserialize are skipped so one bad line does not sink the feed.
fn stream_csv<R, T, F>(reader: R, file_name: &str, f: F) -> Result<(), self::Error>
where
    R: Read,
    T: DeserializeOwned,
    F: FnMut((usize, T)),
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut skipped = 0usize;
    reader
        .deserialize()
        .filter_map(|row| match row {
            Ok(value) => Some(value),
            Err(err) => {
                debug!("Skipping row in {file_name}: {err}");
                skipped += 1;
                None
            }
        })
        .enumerate()
        .for_each(f);
    if skipped > 0 {
        warn!("Skipped {skipped} malformed rows in {file_name}");
    }
    Ok(())
}
