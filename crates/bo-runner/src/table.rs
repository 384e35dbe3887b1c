//! Per-trial result tables and their CSV form.

use std::path::Path;

use bo_types::{BoError, BoResult};

/// One strategy's objective series, in iteration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultColumn {
    pub name: String,
    pub values: Vec<f64>,
}

/// The raw (non-cumulative) objective values of one trial, one column
/// per strategy name including `"Random"`, one row per iteration index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    columns: Vec<ResultColumn>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.columns.push(ResultColumn {
            name: name.into(),
            values,
        });
    }

    pub fn columns(&self) -> &[ResultColumn] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&ResultColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Number of rows (all columns share one length).
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    /// Write the table with a header row of strategy names.
    pub fn write_csv(&self, path: &Path) -> BoResult<()> {
        let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;

        writer
            .write_record(self.columns.iter().map(|c| c.name.as_str()))
            .map_err(csv_error)?;

        for row in 0..self.n_rows() {
            let record: Vec<String> = self
                .columns
                .iter()
                .map(|c| c.values[row].to_string())
                .collect();
            writer.write_record(&record).map_err(csv_error)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Read a table previously written by [`write_csv`](Self::write_csv).
    pub fn read_csv(path: &Path) -> BoResult<Self> {
        let mut reader = csv::Reader::from_path(path).map_err(csv_error)?;

        let names: Vec<String> = reader
            .headers()
            .map_err(csv_error)?
            .iter()
            .map(str::to_string)
            .collect();
        let mut columns: Vec<ResultColumn> = names
            .into_iter()
            .map(|name| ResultColumn {
                name,
                values: Vec::new(),
            })
            .collect();

        for record in reader.records() {
            let record = record.map_err(csv_error)?;
            for (column, field) in columns.iter_mut().zip(record.iter()) {
                let value: f64 = field
                    .parse()
                    .map_err(|e| BoError::Csv(format!("bad numeric cell '{field}': {e}")))?;
                column.values.push(value);
            }
        }

        Ok(Self { columns })
    }
}

fn csv_error(e: csv::Error) -> BoError {
    BoError::Csv(e.to_string())
}
