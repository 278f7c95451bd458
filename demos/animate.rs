//! Text-mode animation of a hull construction.
//!
//! Usage:
//! ```text
//! cargo run --example animate                           # randomized, 40 points
//! cargo run --example animate -- gift 100               # gift wrapping, 100 points
//! cargo run --example animate -- incremental 60 1234    # fixed seed
//! RUST_LOG=hullwright=debug cargo run --example animate # per-step engine events
//! ```

use hullwright::{Algorithm, HullConfig, HullError, HullStepper};

fn parse_algorithm(name: &str) -> Option<Algorithm> {
    match name {
        "gift" | "gift-wrapping" => Some(Algorithm::GiftWrapping),
        "incremental" => Some(Algorithm::Incremental),
        "randomized" => Some(Algorithm::RandomizedIncremental),
        _ => None,
    }
}

fn main() -> Result<(), HullError> {
    // Default: WARN for everything, INFO for hullwright.
    // Override with RUST_LOG env var (e.g. RUST_LOG=hullwright=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("hullwright=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let algorithm = args
        .first()
        .and_then(|name| parse_algorithm(name))
        .unwrap_or(Algorithm::RandomizedIncremental);
    let count = args.get(1).and_then(|n| n.parse().ok()).unwrap_or(40);
    let mut config = HullConfig::new();
    if let Some(seed) = args.get(2).and_then(|s| s.parse().ok()) {
        config = config.with_seed(seed);
    }

    let mut stepper = HullStepper::new(config)?;
    stepper.reset(algorithm, count)?;
    println!(
        "{algorithm}: {} points, seed {:?}, {} seed faces",
        stepper.points().len(),
        stepper.seed(),
        stepper.face_count()
    );

    let mut more = !stepper.is_finished();
    while more {
        more = stepper.advance()?;
        let mesh = stepper.mesh();
        println!(
            "step {:>4}: -{:<3} +{:<3} faces {:>4} (kept {:>4}), highlighted {}",
            stepper.cursor(),
            stepper.removed_faces().len(),
            stepper.created_faces().len(),
            stepper.face_count(),
            stepper.surviving_face_count(),
            mesh.highlighted.len(),
        );
        stepper.clear_removed_faces();
    }

    if let Some(hull) = stepper.hull() {
        println!(
            "done: {} vertices, {} edges, {} faces, euler {}",
            hull.vertex_count(),
            hull.edge_count(),
            hull.face_count(),
            hull.euler_characteristic()
        );
    }
    Ok(())
}
