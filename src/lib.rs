//! Thresholded Earth Mover's Distance between weighted signatures.
//!
//! Two signatures (weighted feature sets) are compared by solving an exact
//! transportation problem over a flow network whose per-unit cost is capped
//! by a threshold node, with any unmatched mass charged an extra penalty.
//! This is the EMD-HAT formulation of Pele & Werman.
//!
//! ```ignore
//! let p = Signature::from(vec![(Bin(0), 0.), (Bin(1), 1.)]);
//! let q = Signature::from(vec![(Bin(0), 1.), (Bin(1), 0.)]);
//! let d = EMDHat::from((&p, &q, &Absolute)).distance()?;
//! ```
pub mod emd;
pub mod signature;
pub mod transport;

pub use emd::*;
pub use signature::*;
pub use transport::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Floating point mass carried by a single feature of a signature.
pub type Mass = f64;
/// Floating point ground distance and transport cost.
pub type Distance = f64;
/// Fixed-point integer used for quantized masses, costs and flows.
pub type Quanta = i64;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing and benchmarking.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

// ============================================================================
// QUANTIZATION
// Floating point inputs are scaled onto a fixed integer grid so that the
// flow solver works in exact arithmetic.
// ============================================================================
/// Default quantization constant K. Masses and costs are both mapped onto [0, K].
pub const EMD_SCALE: f64 = 1e6;
/// Largest admissible K. A cost of K + 1 (the artificial edge) times a mass
/// of K must fit in a Quanta with room for summing over the network.
pub const EMD_SCALE_LIMIT: f64 = 1e9;
/// Returned when either signature carries no mass. The distance is undefined.
pub const DEGENERATE: Distance = Distance::INFINITY;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "cli")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}
