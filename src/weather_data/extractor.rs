use crate::weather_data::error::SeriesError;
use polars::prelude::*;

// Input frame
pub(crate) const COL_DATE: &str = "date";
pub(crate) const COL_TIME: &str = "time";
pub(crate) const COL_TEMP: &str = "temp";
pub(crate) const COL_DWPT: &str = "dwpt"; // Dew point
pub(crate) const COL_WSPD: &str = "wspd"; // Scalar wind speed, null without a wind vector

// Daily aggregates
pub(crate) const COL_POINTS: &str = "points";
pub(crate) const COL_TMIN: &str = "tmin";
pub(crate) const COL_TMAX: &str = "tmax";
pub(crate) const COL_TAVG: &str = "tavg";
pub(crate) const COL_DAVG: &str = "davg";
pub(crate) const COL_WAVG: &str = "wavg";
pub(crate) const COL_TEMP_N: &str = "temp_n";
pub(crate) const COL_DWPT_N: &str = "dwpt_n";
pub(crate) const COL_WSPD_N: &str = "wspd_n";

/// Typed access to the rows of one collected frame.
pub(crate) struct FrameReader<'a> {
    df: &'a DataFrame,
    station: &'a str,
}

impl<'a> FrameReader<'a> {
    pub(crate) fn new(df: &'a DataFrame, station: &'a str) -> Self {
        Self { df, station }
    }

    pub(crate) fn height(&self) -> usize {
        self.df.height()
    }

    fn column(&self, name: &str) -> Result<&'a Column, SeriesError> {
        self.df
            .column(name)
            .map_err(|e| SeriesError::ColumnNotFound {
                station: self.station.to_string(),
                column: name.to_string(),
                source: e,
            })
    }

    pub(crate) fn floats(&self, name: &str) -> Result<&'a Float64Chunked, SeriesError> {
        self.column(name)?
            .f64()
            .map_err(|e| self.polars_error(e))
    }

    pub(crate) fn strings(&self, name: &str) -> Result<&'a StringChunked, SeriesError> {
        self.column(name)?
            .str()
            .map_err(|e| self.polars_error(e))
    }

    pub(crate) fn counts(&self, name: &str) -> Result<&'a UInt32Chunked, SeriesError> {
        self.column(name)?
            .u32()
            .map_err(|e| self.polars_error(e))
    }

    fn polars_error(&self, source: PolarsError) -> SeriesError {
        SeriesError::PolarsError {
            station: self.station.to_string(),
            source,
        }
    }
}

/// A count cell as `usize`, treating null as zero.
pub(crate) fn get_count(ca: &UInt32Chunked, idx: usize) -> usize {
    ca.get(idx).unwrap_or(0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_reports_missing_column() {
        let df = df!(COL_DATE => ["2025-09-07"]).unwrap();
        let reader = FrameReader::new(&df, "GKY");
        assert_eq!(reader.height(), 1);
        assert_eq!(reader.strings(COL_DATE).unwrap().get(0), Some("2025-09-07"));
        let err = reader.floats(COL_TEMP).unwrap_err();
        assert!(matches!(err, SeriesError::ColumnNotFound { column, .. } if column == COL_TEMP));
    }

    #[test]
    fn test_reader_reports_wrong_dtype() {
        let df = df!(COL_DATE => ["2025-09-07"]).unwrap();
        let err = FrameReader::new(&df, "GKY").floats(COL_DATE).unwrap_err();
        assert!(matches!(err, SeriesError::PolarsError { .. }));
    }
}
