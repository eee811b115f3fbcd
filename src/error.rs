use thiserror::Error;

use crate::address::AddressError;
use crate::config::ConfigError;
use crate::curl::CurlError;
use crate::distribution::DistributionError;

/// Any error the crate can return.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Distribution(#[from] DistributionError),
    #[error(transparent)]
    Address(#[from] AddressError),
    #[error(transparent)]
    Curl(#[from] CurlError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
