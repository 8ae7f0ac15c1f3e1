use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use titanic_svm_core::{Cell, Column, DataError, DataResult, Diagnostics, SharedDiagnostics, Table};

/// Field values read as missing, in addition to the empty field.
pub const NA_VALUES: &[&str] = &["NA", "N/A", "NaN", "nan", "null", "NULL", "None"];

/// Type a raw CSV field: missing marker, number, or text.
pub fn parse_cell(field: &str) -> Cell {
    if field.is_empty() || NA_VALUES.contains(&field) {
        return Cell::Missing;
    }
    match field.parse::<f64>() {
        Ok(v) => Cell::from(v),
        Err(_) => Cell::Text(field.to_string()),
    }
}

/// Read headed CSV data into a table. Cells are typed one by one.
pub fn read_table<R: Read>(reader: R) -> DataResult<Table> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| DataError::MalformedInput(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut cells: Vec<Vec<Cell>> = vec![Vec::new(); headers.len()];
    for result in rdr.records() {
        let record = result.map_err(|e| DataError::MalformedInput(e.to_string()))?;
        for (j, field) in record.iter().enumerate() {
            cells[j].push(parse_cell(field));
        }
    }

    Table::new(
        headers
            .into_iter()
            .zip(cells)
            .map(|(name, cells)| Column::new(name, cells))
            .collect(),
    )
}

/// Loads one CSV dataset from disk.
pub struct DatasetLoader {
    path: PathBuf,
    diagnostics: SharedDiagnostics,
}

impl DatasetLoader {
    pub fn new(path: impl Into<PathBuf>, diagnostics: SharedDiagnostics) -> Self {
        DatasetLoader {
            path: path.into(),
            diagnostics,
        }
    }

    /// Read the file into a table. A path that cannot be opened as a regular
    /// file is reported as `DatasetNotFound`, carrying the I/O cause.
    pub fn load(&self) -> DataResult<Table> {
        let not_found = |source: io::Error| DataError::DatasetNotFound {
            path: self.path.clone(),
            source,
        };
        let file = File::open(&self.path).map_err(not_found)?;
        let meta = file.metadata().map_err(not_found)?;
        if !meta.is_file() {
            return Err(not_found(io::Error::new(
                io::ErrorKind::InvalidInput,
                "not a regular file",
            )));
        }

        let table = read_table(file).map_err(|e| match e {
            DataError::MalformedInput(msg) => {
                DataError::MalformedInput(format!("{}: {}", self.path.display(), msg))
            }
            other => other,
        })?;
        let (rows, cols) = table.shape();
        self.diagnostics.debug(
            "loader",
            &format!("Loaded '{}' with shape ({}, {})", self.path.display(), rows, cols),
        );
        Ok(table)
    }
}

/// Write `(id, prediction)` rows with a header to `path`.
///
/// Parent directories are created when absent. The whole file is rendered in
/// memory and written with a single call.
pub fn write_predictions(
    path: &Path,
    ids: &Column,
    label_name: &str,
    predictions: &[f64],
    diagnostics: &dyn Diagnostics,
) -> DataResult<()> {
    if ids.len() != predictions.len() {
        return Err(DataError::DimensionMismatch(format!(
            "{} identifiers vs {} predictions",
            ids.len(),
            predictions.len()
        )));
    }

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if !dir.exists() {
            diagnostics.info("persist", &format!("Creating '{}' local directory.", dir.display()));
            fs::create_dir_all(dir).map_err(|source| DataError::Io {
                context: format!("creating directory '{}'", dir.display()),
                source,
            })?;
        }
    }

    let mut wtr = csv::Writer::from_writer(Vec::new());
    let csv_err = |e: csv::Error| DataError::MalformedInput(e.to_string());
    wtr.write_record([ids.name(), label_name]).map_err(csv_err)?;
    for (id, &p) in ids.cells().iter().zip(predictions) {
        let label = (p.round() as i64).to_string();
        wtr.write_record([id.to_string(), label]).map_err(csv_err)?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| DataError::MalformedInput(e.to_string()))?;

    fs::write(path, bytes).map_err(|source| DataError::Io {
        context: format!("writing predictions to '{}'", path.display()),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use titanic_svm_core::RecordingDiagnostics;

    #[test]
    fn test_parse_cell() {
        assert_eq!(parse_cell(""), Cell::Missing);
        assert_eq!(parse_cell("NaN"), Cell::Missing);
        assert_eq!(parse_cell("22"), Cell::Number(22.0));
        assert_eq!(parse_cell("7.25"), Cell::Number(7.25));
        assert_eq!(parse_cell("male"), Cell::Text("male".into()));
        assert_eq!(parse_cell("A/5 21171"), Cell::Text("A/5 21171".into()));
    }

    #[test]
    fn test_read_table() {
        let data = "PassengerId,Name,Age,Embarked\n1,\"Braund, Mr. Owen\",22,S\n2,Heikkinen,,\n";
        let t = read_table(data.as_bytes()).unwrap();
        assert_eq!(t.shape(), (2, 4));
        assert_eq!(t.column("Name").unwrap().cells()[0], Cell::Text("Braund, Mr. Owen".into()));
        assert_eq!(t.column("Age").unwrap().null_count(), 1);
        assert_eq!(t.column("Embarked").unwrap().cells()[1], Cell::Missing);
    }

    #[test]
    fn test_read_table_ragged_record() {
        let data = "a,b\n1,2\n3\n";
        assert!(matches!(read_table(data.as_bytes()), Err(DataError::MalformedInput(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");
        let loader = DatasetLoader::new(&path, RecordingDiagnostics::new());
        let err = loader.load().unwrap_err();
        assert!(matches!(err, DataError::DatasetNotFound { .. }));
        // The message carries the underlying I/O cause.
        assert!(err.to_string().contains("absent.csv"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_load_directory_is_not_a_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let loader = DatasetLoader::new(dir.path(), RecordingDiagnostics::new());
        assert!(matches!(loader.load(), Err(DataError::DatasetNotFound { .. })));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "x,y\n1,a\n2,b").unwrap();
        let loader = DatasetLoader::new(file.path(), RecordingDiagnostics::new());
        let t = loader.load().unwrap();
        assert_eq!(t.shape(), (2, 2));
    }

    #[test]
    fn test_write_predictions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out").join("predictions.csv");
        let ids = Column::from_numbers("PassengerId", &[4.0, 5.0, 6.0]);
        let diag = RecordingDiagnostics::new();

        write_predictions(&path, &ids, "Survived", &[0.0, 1.0, 1.0], diag.as_ref()).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "PassengerId,Survived\n4,0\n5,1\n6,1\n");
        assert!(diag.contains("Creating"));
    }

    #[test]
    fn test_write_predictions_length_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("predictions.csv");
        let ids = Column::from_numbers("PassengerId", &[4.0, 5.0]);
        let diag = RecordingDiagnostics::new();
        let res = write_predictions(&path, &ids, "Survived", &[1.0], diag.as_ref());
        assert!(matches!(res, Err(DataError::DimensionMismatch(_))));
        assert!(!path.exists());
    }
}
