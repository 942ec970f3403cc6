use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::data::pixel_buffer::PixelBuffer;
use log::debug;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PpmError {
    #[error("cannot create directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Binary PPM (P6) writer. Alpha is dropped.
#[derive(Debug, Default)]
pub struct PpmFilePresenter {}

impl PpmFilePresenter {
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }

    fn write(buffer: &PixelBuffer, path: &Path) -> io::Result<()> {
        let mut file = BufWriter::new(File::create(path)?);
        let dimensions = buffer.dimensions();

        // P6: binary RGB, then width, height and max colour value
        writeln!(file, "P6")?;
        writeln!(file, "{} {}", dimensions.width(), dimensions.height())?;
        writeln!(file, "255")?;
        file.write_all(&buffer.to_rgb())?;
        file.flush()
    }
}

impl FilePresenterPort for PpmFilePresenter {
    type Error = PpmError;

    fn present(&self, buffer: &PixelBuffer, filepath: impl AsRef<Path>) -> Result<(), PpmError> {
        let path = filepath.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| PpmError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        Self::write(buffer, path).map_err(|source| PpmError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("wrote {} frame to {}", buffer.dimensions(), path.display());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::dimensions::Dimensions;
    use crate::core::data::point::Point;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "mandelbrot-gradient-ppm-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_writes_header_and_rgb_payload() {
        let dir = scratch_dir("header");
        let path = dir.join("nested").join("frame.ppm");

        let mut buffer = PixelBuffer::new(Dimensions::new(2, 1).unwrap());
        buffer.set_pixel(Point { x: 0, y: 0 }, [255, 0, 0, 255]).unwrap();
        buffer.set_pixel(Point { x: 1, y: 0 }, [1, 2, 3, 255]).unwrap();

        PpmFilePresenter::new().present(&buffer, &path).unwrap();

        let bytes = fs::read(&path).unwrap();
        let mut expected = b"P6\n2 1\n255\n".to_vec();
        expected.extend_from_slice(&[255, 0, 0, 1, 2, 3]);
        assert_eq!(bytes, expected);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_unwritable_path_is_reported() {
        let dir = scratch_dir("blocked");
        fs::create_dir_all(&dir).unwrap();
        // a directory where the file should go
        let path = dir.join("frame.ppm");
        fs::create_dir_all(&path).unwrap();

        let buffer = PixelBuffer::new(Dimensions::new(1, 1).unwrap());
        let err = PpmFilePresenter::new().present(&buffer, &path).unwrap_err();

        assert!(matches!(err, PpmError::Write { .. }));

        fs::remove_dir_all(&dir).unwrap();
    }
}
