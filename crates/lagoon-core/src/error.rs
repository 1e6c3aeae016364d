use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid grid resolution {rows}x{cols}: both dimensions must be at least 2")]
    InvalidResolution { rows: u32, cols: u32 },
}

pub type Result<T> = std::result::Result<T, Error>;
