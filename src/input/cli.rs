use crate::config::{DEFAULT_POWER_FACTOR, RenderDefaults};
use crate::core::colour::stops::GradientStops;
use crate::core::data::dimensions::{DEFAULT_HEIGHT, DEFAULT_WIDTH, Dimensions};
use crate::core::data::render_request::{RenderRequest, RenderRequestError};
use crate::core::data::viewport::Viewport;
use crate::core::fractals::mandelbrot::locations::{FULL_SET, LocationTable};
use clap::Parser;
use serde::de::DeserializeOwned;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_OUTPUT: &str = "output/mandelbrot.ppm";

#[derive(Debug, Error)]
pub enum CliError {
    #[error("unknown location \"{0}\", try --list-locations")]
    UnknownLocation(String),
    #[error("cannot read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON in {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Request(#[from] RenderRequestError),
}

/// Renders the Mandelbrot set through a colour gradient into PPM files.
///
/// Example:
///   mandelbrot-gradient --location "Seahorse Valley" --width 1024 --height 768
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "mandelbrot-gradient", version, about)]
pub struct Cli {
    /// Favourite location to start from
    #[arg(long, default_value = FULL_SET)]
    pub location: String,

    /// Real part of the viewport centre, overrides the location
    #[arg(long, allow_hyphen_values = true)]
    pub center_x: Option<f64>,

    /// Imaginary part of the viewport centre, overrides the location
    #[arg(long, allow_hyphen_values = true)]
    pub center_y: Option<f64>,

    /// Zoom level, overrides the location
    #[arg(long)]
    pub zoom: Option<f64>,

    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: u32,

    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: u32,

    /// Exponent applied to the escape fraction before the gradient lookup
    #[arg(long, default_value_t = DEFAULT_POWER_FACTOR)]
    pub power_factor: f64,

    /// JSON array of colour stops
    #[arg(long, value_name = "FILE")]
    pub gradient: Option<PathBuf>,

    /// Complete render message as JSON, takes precedence over the flags above
    #[arg(long, value_name = "FILE")]
    pub request: Option<PathBuf>,

    #[arg(long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Render every favourite location into DIR
    #[arg(long, value_name = "DIR")]
    pub gallery: Option<PathBuf>,

    /// Print the favourite locations and exit
    #[arg(long)]
    pub list_locations: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    ListLocations,
    Render {
        request: RenderRequest,
        output: PathBuf,
    },
    Gallery {
        template: RenderRequest,
        directory: PathBuf,
    },
}

impl Cli {
    /// Resolves the flags into the one thing to do.
    pub fn command(&self, locations: &LocationTable<'_>) -> Result<CliCommand, CliError> {
        if self.list_locations {
            return Ok(CliCommand::ListLocations);
        }

        let request = self.request(locations)?;

        Ok(match &self.gallery {
            Some(directory) => CliCommand::Gallery {
                template: request,
                directory: directory.clone(),
            },
            None => CliCommand::Render {
                request,
                output: self.output.clone(),
            },
        })
    }

    pub fn request(&self, locations: &LocationTable<'_>) -> Result<RenderRequest, CliError> {
        if let Some(path) = &self.request {
            return read_json(path);
        }

        let base = locations
            .viewport(&self.location)
            .ok_or_else(|| CliError::UnknownLocation(self.location.clone()))?;
        let viewport = Viewport::new(
            self.center_x.unwrap_or(base.center_x),
            self.center_y.unwrap_or(base.center_y),
            self.zoom.unwrap_or(base.zoom),
        )
        .map_err(RenderRequestError::from)?;

        let gradient = match &self.gradient {
            Some(path) => read_json::<GradientStops>(path)?,
            None => RenderDefaults::default().gradient,
        };

        let dimensions =
            Dimensions::new(self.width, self.height).map_err(RenderRequestError::from)?;

        Ok(RenderRequest::new(
            viewport,
            dimensions,
            gradient,
            self.power_factor,
        )?)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&text).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}
