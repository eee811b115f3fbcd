use std::io::{self, BufWriter, Write};

use clap::{Parser, Subcommand};
use kpl_helper::{curl, sample_batch, tf_flag, Config, Distribution, Ipv4, Result, Summary};
use log::{info, warn};

#[derive(Parser)]
#[clap(author, version, about = "Helpers for the peer-to-peer lab")]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Draw samples from a distribution and print a summary
    Sample {
        #[clap(subcommand)]
        dist: DistArgs,
        /// Number of samples [env: KPL_SAMPLE_COUNT, default 1000]
        #[clap(long, global = true)]
        count: Option<usize>,
        /// Seed for reproducible output [env: KPL_SEED]
        #[clap(long, global = true)]
        seed: Option<u64>,
        /// Print every sample, one per line
        #[clap(long, global = true)]
        raw: bool,
    },
    /// Send a single HTTP request and print the response body
    Curl {
        url: String,
        #[clap(short = 'X', long, default_value = "GET")]
        method: String,
        #[clap(short = 'd', long)]
        body: Option<String>,
    },
    /// Parse a host:port endpoint
    Addr { endpoint: String },
}

#[derive(Subcommand)]
enum DistArgs {
    Poisson {
        #[clap(long)]
        lambda: f64,
    },
    Exponential {
        #[clap(long)]
        lambda: f64,
    },
    Normal {
        #[clap(long, allow_hyphen_values = true)]
        mu: f64,
        #[clap(long)]
        sigma: f64,
    },
    Binomial {
        #[clap(long)]
        n: u64,
        #[clap(long)]
        p: f64,
    },
    Uniform {
        #[clap(long, allow_hyphen_values = true)]
        a: f64,
        #[clap(long, allow_hyphen_values = true)]
        b: f64,
    },
    Pareto {
        #[clap(long)]
        xm: f64,
        #[clap(long)]
        alpha: f64,
    },
}

impl From<DistArgs> for Distribution {
    fn from(args: DistArgs) -> Self {
        match args {
            DistArgs::Poisson { lambda } => Distribution::Poisson { lambda },
            DistArgs::Exponential { lambda } => Distribution::Exponential { lambda },
            DistArgs::Normal { mu, sigma } => Distribution::Normal { mu, sigma },
            DistArgs::Binomial { n, p } => Distribution::Binomial { n, p },
            DistArgs::Uniform { a, b } => Distribution::Uniform { a, b },
            DistArgs::Pareto { xm, alpha } => Distribution::Pareto { xm, alpha },
        }
    }
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Command::Sample {
            dist,
            count,
            seed,
            raw,
        } => {
            let dist = Distribution::from(dist);
            let count = count.unwrap_or(config.sample_count);
            let seed = seed.or(config.seed);
            let samples = sample_batch(&dist, count, seed)?;

            let mut out = BufWriter::new(io::stdout().lock());
            if raw {
                for x in &samples {
                    writeln!(out, "{}", x)?;
                }
            } else if let Some(summary) = Summary::of(&samples) {
                print_summary(&mut out, &dist, &summary)?;
            } else {
                warn!("no samples drawn for {}", dist);
            }
            out.flush()?;
        }
        Command::Curl { url, method, body } => {
            let response = curl(&url, &method, body.as_deref())?;
            println!("{}", response);
        }
        Command::Addr { endpoint } => {
            let ip: Ipv4 = endpoint.parse()?;
            let literal = ip.to_socket_addr().is_ok();
            info!("parsed {:?}", ip);
            println!("{} literal={}", ip, tf_flag(literal));
        }
    }
    Ok(())
}

fn print_summary(out: &mut impl Write, dist: &Distribution, s: &Summary) -> io::Result<()> {
    writeln!(out, "{}", dist)?;
    writeln!(out, "  count    {}", s.count)?;
    match dist.mean() {
        Some(expected) => writeln!(out, "  mean     {:.6} (expected {:.6})", s.mean, expected)?,
        None => writeln!(out, "  mean     {:.6} (expected: infinite)", s.mean)?,
    }
    writeln!(out, "  variance {:.6}", s.variance)?;
    writeln!(out, "  min      {:.6}", s.min)?;
    writeln!(out, "  max      {:.6}", s.max)?;
    Ok(())
}
