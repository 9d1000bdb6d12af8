use anyhow::{Context, Result};
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use note_sort::{args::Args, scale, sort};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "note_sort=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let notes = match &args.notes {
        Some(notes) => notes.clone(),
        None => {
            let scale = scale::get_scale(&args.scale)
                .with_context(|| format!("Unknown scale `{}`", args.scale))?;
            scale::add_octaves(scale, args.start_octave, args.end_octave)
        }
    };

    let notes = match (args.shuffle, args.seed) {
        (false, _) => notes,
        (true, Some(seed)) => scale::scramble(&notes, &mut StdRng::seed_from_u64(seed)),
        (true, None) => scale::scramble(&notes, &mut rand::thread_rng()),
    };

    println!("Scrambled notes: {notes:?}");
    info!(notes = notes.len(), order = ?args.order, "Sorting");

    let device = (!args.silent).then_some(args.output_device.as_str());
    let sorted = sort::musical_merge_sort(&notes, args.tempo, args.order, device)?;

    println!("Sorted notes: {sorted:?}");
    Ok(())
}
