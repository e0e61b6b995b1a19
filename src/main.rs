use clap::{value_t, App, Arg, SubCommand};
use listrank::config::Config;
use listrank::{gen, task};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let matches = App::new("listrank")
        .about("External-memory ranking of a cyclic linked list")
        .arg(
            Arg::with_name("dir")
                .long("dir")
                .takes_value(true)
                .help("Working directory for input, output and temporaries"),
        )
        .arg(
            Arg::with_name("memory")
                .long("memory")
                .takes_value(true)
                .help("RAM budget in bytes"),
        )
        .arg(
            Arg::with_name("merge-rank")
                .long("merge-rank")
                .takes_value(true)
                .help("Fan-in of the external merge sort"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .takes_value(true)
                .help("Fixed RNG seed"),
        )
        .subcommand(
            SubCommand::with_name("gen")
                .about("Generate a random cyclic input and its expected ranking")
                .arg(Arg::with_name("SIZE").required(true).help("Number of nodes")),
        )
        .get_matches();

    let mut config = Config::new(
        matches
            .value_of("dir")
            .map(PathBuf::from)
            .unwrap_or_else(Config::default_dir),
    );
    if matches.is_present("memory") {
        config.budget = value_t!(matches, "memory", usize)?;
    }
    if matches.is_present("merge-rank") {
        config.merge_rank = value_t!(matches, "merge-rank", usize)?;
    }
    if matches.is_present("seed") {
        config.seed = Some(value_t!(matches, "seed", u64)?);
    }
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    if let Some(matches) = matches.subcommand_matches("gen") {
        let size = value_t!(matches, "SIZE", u32)?;
        gen::generate(&config, size, &mut rng)?;
    } else {
        task::run(&config, &mut rng)?;
    }
    Ok(())
}
