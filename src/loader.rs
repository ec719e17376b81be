//! Reading point datasets from delimited text.
//!
//! One point per record, one feature per field. Surrounding whitespace is ignored, as are blank
//! lines and lines starting with `#`. All points need the same amount of features.

use crate::{memory::*, GraspError, Result};
use csv::{ReaderBuilder, Trim};
use std::{fs::File, io::Read, path::Path};
use tracing::debug;

/// Options controlling how a dataset is parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Field delimiter. Default: `,`
    pub delimiter: u8,
    /// Skip the first record. Default: `false`
    pub has_headers: bool
}
impl Default for LoaderOptions {
    fn default() -> Self {
        Self { delimiter: b',', has_headers: false }
    }
}

/// Read the dataset stored at **path**, using [`LoaderOptions::default`].
pub fn read_points<T: Primitive>(path: impl AsRef<Path>) -> Result<PointSet<T>> {
    read_points_with(path, LoaderOptions::default())
}

pub fn read_points_with<T: Primitive>(path: impl AsRef<Path>, options: LoaderOptions) -> Result<PointSet<T>> {
    let path = path.as_ref();
    let points = parse_points(File::open(path)?, options)?;
    debug!(path = %path.display(), points = points.len(), dims = points.dims(), "loaded dataset");
    Ok(points)
}

/// Parse a dataset from any reader.
pub fn parse_points<T: Primitive, R: Read>(reader: R, options: LoaderOptions) -> Result<PointSet<T>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(options.has_headers)
        .comment(Some(b'#'))
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut samples: Vec<T> = Vec::new();
    let mut sample_dims = None;
    let mut sample_cnt = 0;
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        // A trailing delimiter leaves one empty field behind
        let fields: Vec<&str> = match record.iter().last() {
            Some("") => record.iter().take(record.len() - 1).collect(),
            _ => record.iter().collect()
        };
        if fields.is_empty() {
            continue;
        }
        match sample_dims {
            None => sample_dims = Some(fields.len()),
            Some(dims) if dims != fields.len() => return Err(GraspError::data_format(line,
                format!("expected {} features, found {}", dims, fields.len()))),
            Some(_) => {}
        }
        for (feature, field) in fields.into_iter().enumerate() {
            let value = field.parse::<f64>().ok()
                .filter(|v| v.is_finite())
                .and_then(<T as num::NumCast>::from)
                .ok_or_else(|| GraspError::data_format(line,
                    format!("feature {} ({:?}) is not a finite number", feature, field)))?;
            samples.push(value);
        }
        sample_cnt += 1;
    }

    let sample_dims = sample_dims.ok_or_else(|| GraspError::data_format(0, "dataset contains no points"))?;
    PointSet::new(samples, sample_cnt, sample_dims)
}
