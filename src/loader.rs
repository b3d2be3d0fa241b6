use crate::body::Body;
use crate::error::{MovieError, MovieResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const SNAPSHOT_PREFIX: &str = "data_batch";
const POSITION_COLUMNS: usize = 3;

/// On-disk encoding of the per-timestep snapshot files.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SnapshotFormat {
    /// Array of `{"position": [x, y, z]}` records, or a batch of such arrays
    #[default]
    Json,
    /// 2D array (bodies, columns) with the position in columns 0..3
    Npy,
}

impl SnapshotFormat {
    pub fn extension(self) -> &'static str {
        match self {
            SnapshotFormat::Json => "json",
            SnapshotFormat::Npy => "npy",
        }
    }
}

/// Positions of every body at one timestep.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub index: usize,
    pub bodies: Vec<Body>,
}

impl Snapshot {
    pub fn new(index: usize, bodies: Vec<Body>) -> Self {
        Self { index, bodies }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Largest distance of any body from the origin, 0 for an empty snapshot.
    pub fn max_position_norm(&self) -> f64 {
        self.bodies.iter().map(Body::radius).fold(0.0, f64::max)
    }
}

#[derive(Deserialize)]
struct BodyRecord {
    position: [f64; 3],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotDocument {
    Bodies(Vec<BodyRecord>),
    Batch(Vec<Vec<BodyRecord>>),
}

/// Reads consecutively numbered snapshot files out of one data directory.
#[derive(Clone, Debug)]
pub struct SnapshotLoader {
    data_dir: PathBuf,
    format: SnapshotFormat,
}

impl SnapshotLoader {
    pub fn new<P: Into<PathBuf>>(data_dir: P, format: SnapshotFormat) -> Self {
        Self {
            data_dir: data_dir.into(),
            format,
        }
    }

    pub fn snapshot_path(&self, index: usize) -> PathBuf {
        self.data_dir.join(format!(
            "{}{}.{}",
            SNAPSHOT_PREFIX,
            index,
            self.format.extension()
        ))
    }

    /// Index of the last snapshot in the run starting at 0.
    /// The scan stops at the first gap, so later files are never reached.
    pub fn find_last_index(&self) -> MovieResult<usize> {
        let mut next = 0;
        while self.snapshot_path(next).exists() {
            next += 1;
        }

        if next == 0 {
            return Err(MovieError::MissingSnapshot {
                index: 0,
                path: self.snapshot_path(0),
            });
        }

        log::debug!(
            "Found {} contiguous snapshots in {}",
            next,
            self.data_dir.display()
        );
        Ok(next - 1)
    }

    pub fn load(&self, index: usize) -> MovieResult<Snapshot> {
        let path = self.snapshot_path(index);
        let buffer = std::fs::read(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => MovieError::MissingSnapshot {
                index,
                path: path.clone(),
            },
            _ => MovieError::Io(e),
        })?;

        let bodies = match self.format {
            SnapshotFormat::Json => parse_json(&buffer, &path)?,
            SnapshotFormat::Npy => parse_npy(&buffer, &path)?,
        };

        if let Some(n) = bodies.iter().position(|b| !b.is_finite()) {
            return Err(malformed(&path, format!("body {} has a non-finite position", n)));
        }

        log::trace!("Loaded snapshot {}: {} bodies", index, bodies.len());
        Ok(Snapshot::new(index, bodies))
    }
}

fn malformed(path: &Path, reason: impl Into<String>) -> MovieError {
    MovieError::MalformedSnapshot {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

fn parse_json(buffer: &[u8], path: &Path) -> MovieResult<Vec<Body>> {
    let document: SnapshotDocument =
        serde_json::from_slice(buffer).map_err(|e| malformed(path, e.to_string()))?;

    let records = match document {
        SnapshotDocument::Bodies(records) => records,
        SnapshotDocument::Batch(batch) => batch
            .into_iter()
            .next()
            .ok_or_else(|| malformed(path, "batch holds no snapshot"))?,
    };

    Ok(records.into_iter().map(|r| Body::new(r.position)).collect())
}

fn parse_npy(buffer: &[u8], path: &Path) -> MovieResult<Vec<Body>> {
    use npyz::NpyFile;

    let npy = NpyFile::new(buffer).map_err(|e| malformed(path, e.to_string()))?;
    let shape = npy.shape().to_vec();
    if shape.len() != 2 {
        return Err(malformed(
            path,
            format!("expected a 2D array (bodies, columns), but got shape: {:?}", shape),
        ));
    }

    let num_bodies = shape[0] as usize;
    let columns = shape[1] as usize;
    if columns < POSITION_COLUMNS {
        return Err(malformed(
            path,
            format!("rows hold {} values, need at least {}", columns, POSITION_COLUMNS),
        ));
    }

    let column_major = matches!(npy.header().order(), npyz::Order::Fortran);
    let data = read_npy_floats(npy, buffer).map_err(|e| malformed(path, e.to_string()))?;

    // Fortran-ordered files store each column contiguously.
    let value = |body_idx: usize, column: usize| {
        if column_major {
            data[column * num_bodies + body_idx]
        } else {
            data[body_idx * columns + column]
        }
    };

    Ok((0..num_bodies)
        .map(|body_idx| {
            Body::new([value(body_idx, 0), value(body_idx, 1), value(body_idx, 2)])
        })
        .collect())
}

/// Accepts both `f8` and `f4` arrays.
fn read_npy_floats(npy: npyz::NpyFile<&[u8]>, buffer: &[u8]) -> std::io::Result<Vec<f64>> {
    match npy.into_vec::<f64>() {
        Ok(data) => Ok(data),
        Err(_) => {
            let data: Vec<f32> = npyz::NpyFile::new(buffer)?.into_vec()?;
            Ok(data.into_iter().map(f64::from).collect())
        }
    }
}
