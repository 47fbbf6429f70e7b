//! EMD-HAT Command Line
//!
//! Compares two sample sets (binned into aligned histograms) or two
//! weight vectors over shared bins, and prints their thresholded EMD.

use clap::Parser;
use emdhat::*;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
enum Query {
    #[command(
        about = "Bin two sample sets over the left range and compare them",
        alias = "hist"
    )]
    Samples {
        #[arg(long, required = true, value_delimiter = ',', allow_negative_numbers = true)]
        left: Vec<f64>,
        #[arg(long, required = true, value_delimiter = ',', allow_negative_numbers = true)]
        right: Vec<f64>,
        #[arg(long, default_value_t = 10)]
        bins: usize,
        #[arg(long, default_value_t = -1., allow_negative_numbers = true)]
        penalty: f64,
        #[arg(long, default_value_t = EMD_SCALE)]
        scale: f64,
    },
    #[command(
        about = "Compare two weight vectors over bins 0..n with |i - j| ground distance",
        alias = "bins"
    )]
    Weights {
        #[arg(long, required = true, value_delimiter = ',')]
        left: Vec<f64>,
        #[arg(long, required = true, value_delimiter = ',')]
        right: Vec<f64>,
        #[arg(long, default_value_t = -1., allow_negative_numbers = true)]
        penalty: f64,
        #[arg(long, default_value_t = EMD_SCALE)]
        scale: f64,
    },
}

fn main() -> anyhow::Result<()> {
    log();
    let distance = match Query::parse() {
        Query::Samples {
            left,
            right,
            bins,
            penalty,
            scale,
        } => {
            anyhow::ensure!(bins > 0, "need at least one bin");
            let lhs = Histogram::from((left.as_slice(), bins));
            let rhs = Histogram::aligned(&right, bins, &lhs);
            log::info!("{:<32}{}", "left", lhs);
            log::info!("{:<32}{}", "right", rhs);
            let ref p = lhs.signature();
            let ref q = rhs.signature();
            EMDHat::from((p, q, &Absolute))
                .penalty(penalty)
                .scale(scale)
                .distance()?
        }
        Query::Weights {
            left,
            right,
            penalty,
            scale,
        } => {
            let ref p = Signature::from(left.as_slice());
            let ref q = Signature::from(right.as_slice());
            EMDHat::from((p, q, &Absolute))
                .penalty(penalty)
                .scale(scale)
                .distance()?
        }
    };
    match distance == DEGENERATE {
        true => log::warn!("{:<32}{:<32}", "degenerate input", "one side has no mass"),
        false => log::info!("{:<32}{:<32}", "emd-hat", distance),
    }
    println!("{}", distance);
    Ok(())
}
