//! Stateless helpers for the peer-to-peer lab: distribution samplers over an
//! injectable uniform source, an IPv4 endpoint value type, and a one-shot
//! HTTP helper.

pub mod address;
pub mod batch;
pub mod config;
pub mod curl;
pub mod distribution;
pub mod error;
pub mod random;

pub use address::{AddressError, Ipv4};
pub use batch::{sample_batch, Summary};
pub use config::{Config, ConfigError};
pub use curl::{curl, tf_flag, CurlError};
pub use distribution::{
    binomial_sample, exponential_sample, normal_sample, pareto_sample, poisson_sample,
    uniform_sample, Distribution, DistributionError, MAX_POISSON_LAMBDA,
};
pub use error::{Error, Result};
pub use random::{Random, UniformSource};
