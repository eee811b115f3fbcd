//! Samplers for the distributions the lab traffic generators draw from.
//!
//! Each sampler takes its uniform source explicitly and rejects parameters
//! outside the distribution's domain with [`DistributionError::InvalidParameter`].
//! They all use the plain textbook method, one draw at a time.

use std::f64::consts::PI;
use std::fmt;

use thiserror::Error;

use crate::random::UniformSource;

/// Raised before any draw when a parameter lies outside a sampler's domain.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DistributionError {
    #[error("invalid parameter {name} = {value}: expected {expected}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },
}

fn invalid(name: &'static str, value: f64, expected: &'static str) -> DistributionError {
    DistributionError::InvalidParameter {
        name,
        value,
        expected,
    }
}

/// Largest λ for which `e^-λ` is still a normal float.
pub const MAX_POISSON_LAMBDA: f64 = 700.0;

// Subnormal rates and shapes are rejected: dividing by them overflows.
fn check_positive(name: &'static str, value: f64) -> Result<(), DistributionError> {
    if value.is_normal() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(name, value, "a normal float > 0"))
    }
}

fn check_finite(name: &'static str, value: f64) -> Result<(), DistributionError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(name, value, "a finite value"))
    }
}

/// Poisson(λ) by Knuth's multiplication method.
///
/// Runs in O(λ) draws. λ is capped at [`MAX_POISSON_LAMBDA`]; beyond it the
/// threshold `e^-λ` leaves the normal float range and the counts come out
/// far too small.
pub fn poisson_sample<S>(src: &mut S, lambda: f64) -> Result<u64, DistributionError>
where
    S: UniformSource + ?Sized,
{
    Distribution::Poisson { lambda }.validate()?;
    // Rounds to 1.0 for tiny λ, where the first draw already ends the loop.
    let threshold = (-lambda).exp();
    let mut k = 0u64;
    let mut product = src.next_uniform();
    while product > threshold {
        k += 1;
        product *= src.next_uniform();
    }
    Ok(k)
}

/// Exponential(λ) by inverting the CDF.
///
/// For λ close to the smallest normal float a tail draw can exceed
/// `f64::MAX` and comes back as `+inf`.
pub fn exponential_sample<S>(src: &mut S, lambda: f64) -> Result<f64, DistributionError>
where
    S: UniformSource + ?Sized,
{
    Distribution::Exponential { lambda }.validate()?;
    let u = src.next_uniform();
    Ok(-(1.0 - u).ln() / lambda)
}

/// Normal(μ, σ) by the Box-Muller transform.
///
/// Consumes two draws and discards the sine half of the pair. `σ = 0` is
/// allowed and always yields `μ`.
pub fn normal_sample<S>(src: &mut S, mu: f64, sigma: f64) -> Result<f64, DistributionError>
where
    S: UniformSource + ?Sized,
{
    Distribution::Normal { mu, sigma }.validate()?;
    // 1 - u lies in (0, 1], keeping the log finite.
    let u1 = 1.0 - src.next_uniform();
    let u2 = src.next_uniform();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
    Ok(mu + sigma * z)
}

/// Binomial(n, p) by simulating all `n` Bernoulli trials.
///
/// This is O(n) per call on purpose: the result has the exact binomial
/// shape for every `n`, with no normal approximation.
pub fn binomial_sample<S>(src: &mut S, n: u64, p: f64) -> Result<u64, DistributionError>
where
    S: UniformSource + ?Sized,
{
    Distribution::Binomial { n, p }.validate()?;
    let mut successes = 0;
    for _ in 0..n {
        if src.next_uniform() < p {
            successes += 1;
        }
    }
    Ok(successes)
}

/// Uniform on `[a, b)`.
pub fn uniform_sample<S>(src: &mut S, a: f64, b: f64) -> Result<f64, DistributionError>
where
    S: UniformSource + ?Sized,
{
    Distribution::Uniform { a, b }.validate()?;
    let x = a + (b - a) * src.next_uniform();
    // a + (b - a) * u can round up onto b when the range is a few ulps wide.
    Ok(if x < b { x } else { next_down(b) })
}

/// The largest float strictly below a finite `x`.
fn next_down(x: f64) -> f64 {
    if x == 0.0 {
        -f64::from_bits(1)
    } else if x > 0.0 {
        f64::from_bits(x.to_bits() - 1)
    } else {
        f64::from_bits(x.to_bits() + 1)
    }
}

/// Pareto(xm, α) by inverting the CDF. Every sample is at least `xm`.
///
/// With a small α the far tail overflows, and such draws come back as `+inf`.
pub fn pareto_sample<S>(src: &mut S, xm: f64, alpha: f64) -> Result<f64, DistributionError>
where
    S: UniformSource + ?Sized,
{
    Distribution::Pareto { xm, alpha }.validate()?;
    let u = src.next_uniform();
    Ok(xm / (1.0 - u).powf(1.0 / alpha))
}

/// One of the supported distributions, with its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Distribution {
    Poisson { lambda: f64 },
    Exponential { lambda: f64 },
    Normal { mu: f64, sigma: f64 },
    Binomial { n: u64, p: f64 },
    Uniform { a: f64, b: f64 },
    Pareto { xm: f64, alpha: f64 },
}

impl Distribution {
    /// Checks the parameters without consuming any draws.
    pub fn validate(&self) -> Result<(), DistributionError> {
        match *self {
            Distribution::Poisson { lambda } => {
                check_positive("lambda", lambda)?;
                if lambda <= MAX_POISSON_LAMBDA {
                    Ok(())
                } else {
                    Err(invalid("lambda", lambda, "a value <= 700"))
                }
            }
            Distribution::Exponential { lambda } => check_positive("lambda", lambda),
            Distribution::Normal { mu, sigma } => {
                check_finite("mu", mu)?;
                if sigma.is_finite() && sigma >= 0.0 {
                    Ok(())
                } else {
                    Err(invalid("sigma", sigma, "a finite value >= 0"))
                }
            }
            Distribution::Binomial { p, .. } => {
                if (0.0..=1.0).contains(&p) {
                    Ok(())
                } else {
                    Err(invalid("p", p, "a probability in [0, 1]"))
                }
            }
            Distribution::Uniform { a, b } => {
                check_finite("a", a)?;
                check_finite("b", b)?;
                if a >= b {
                    Err(invalid("a", a, "a lower bound below b"))
                } else if !(b - a).is_finite() {
                    Err(invalid("b", b, "bounds whose difference is finite"))
                } else {
                    Ok(())
                }
            }
            Distribution::Pareto { xm, alpha } => {
                check_positive("xm", xm)?;
                check_positive("alpha", alpha)
            }
        }
    }

    /// Draws one sample. Integer-valued distributions are widened to `f64`.
    pub fn sample<S>(&self, src: &mut S) -> Result<f64, DistributionError>
    where
        S: UniformSource + ?Sized,
    {
        match *self {
            Distribution::Poisson { lambda } => poisson_sample(src, lambda).map(|k| k as f64),
            Distribution::Exponential { lambda } => exponential_sample(src, lambda),
            Distribution::Normal { mu, sigma } => normal_sample(src, mu, sigma),
            Distribution::Binomial { n, p } => binomial_sample(src, n, p).map(|k| k as f64),
            Distribution::Uniform { a, b } => uniform_sample(src, a, b),
            Distribution::Pareto { xm, alpha } => pareto_sample(src, xm, alpha),
        }
    }

    /// Theoretical mean, or `None` where it is infinite (Pareto with α <= 1).
    pub fn mean(&self) -> Option<f64> {
        match *self {
            Distribution::Poisson { lambda } => Some(lambda),
            Distribution::Exponential { lambda } => Some(1.0 / lambda),
            Distribution::Normal { mu, .. } => Some(mu),
            Distribution::Binomial { n, p } => Some(n as f64 * p),
            Distribution::Uniform { a, b } => Some((a + b) / 2.0),
            Distribution::Pareto { xm, alpha } if alpha > 1.0 => {
                Some(alpha * xm / (alpha - 1.0))
            }
            Distribution::Pareto { .. } => None,
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distribution::Poisson { lambda } => write!(f, "poisson(lambda={})", lambda),
            Distribution::Exponential { lambda } => write!(f, "exponential(lambda={})", lambda),
            Distribution::Normal { mu, sigma } => write!(f, "normal(mu={}, sigma={})", mu, sigma),
            Distribution::Binomial { n, p } => write!(f, "binomial(n={}, p={})", n, p),
            Distribution::Uniform { a, b } => write!(f, "uniform(a={}, b={})", a, b),
            Distribution::Pareto { xm, alpha } => write!(f, "pareto(xm={}, alpha={})", xm, alpha),
        }
    }
}
