use arbitrary::{unstructured::Unstructured, Arbitrary};
use log::{debug, info};
use rand::{prelude::random, rngs::SmallRng, Rng, SeedableRng};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use structopt::StructOpt;

use std::time;

use osrb::RbTree;

/// Command line options.
#[derive(Clone, StructOpt)]
pub struct Opt {
    #[structopt(long = "seed")]
    seed: Option<u64>,

    #[structopt(long = "loads", default_value = "1000000")] // default 1M
    loads: usize,

    #[structopt(long = "dels", default_value = "0")]
    dels: usize,

    #[structopt(long = "gets", default_value = "0")]
    gets: usize,

    #[structopt(long = "selects", default_value = "0")]
    selects: usize,

    #[structopt(long = "log-level", default_value = "info")]
    log_level: LevelFilter,
}

fn main() {
    let opts = Opt::from_args();

    let (level, config) = (opts.log_level, Config::default());
    TermLogger::init(level, config, TerminalMode::Mixed, ColorChoice::Auto).ok();

    let seed = opts.seed.unwrap_or_else(random);
    info!("perf seed {}", seed);
    let mut rng = SmallRng::seed_from_u64(seed);

    let mut index: RbTree<u64> = RbTree::new();

    // initial load
    let start = time::Instant::now();
    for _i in 0..opts.loads {
        index.insert(rng.gen());
    }
    info!("loaded {} items in {:?}", opts.loads, start.elapsed());

    do_incremental(&mut rng, &opts, &mut index);

    let start = time::Instant::now();
    let n = index.iter().count();
    info!("iter for iterating {}, took {:?}", n, start.elapsed());

    let start = time::Instant::now();
    match index.validate() {
        Ok(stats) => info!("validate {:?}, took {:?}", stats, start.elapsed()),
        Err(err) => {
            println!("validate failed: {}", err);
            std::process::exit(1);
        }
    }
}

fn do_incremental(rng: &mut SmallRng, opts: &Opt, index: &mut RbTree<u64>) {
    let total = opts.dels + opts.gets + opts.selects;
    let mut counts = [0_usize; 3];

    let start = time::Instant::now();
    for _i in 0..total {
        let bytes = rng.gen::<[u8; 16]>();
        let mut uns = Unstructured::new(&bytes);

        let op = match uns.arbitrary() {
            Ok(op) => op,
            Err(err) => {
                debug!("skip op {}", err);
                continue;
            }
        };
        match op {
            Op::Del(key) if counts[0] < opts.dels => {
                counts[0] += 1;
                let rank = 1 + (key as usize) % index.len().max(1);
                if let Ok(node) = index.select(rank) {
                    index.delete(node).ok();
                }
            }
            Op::Get(key) if counts[1] < opts.gets => {
                counts[1] += 1;
                index.search(&key);
            }
            Op::Select(rank) if counts[2] < opts.selects => {
                counts[2] += 1;
                index.select(rank % (index.len() + 1)).ok();
            }
            Op::Del(_) | Op::Get(_) | Op::Select(_) => (),
        }
    }

    info!(
        "incremental dels:{} gets:{} selects:{}, took {:?}",
        counts[0],
        counts[1],
        counts[2],
        start.elapsed()
    );
}

#[derive(Clone, Debug, Arbitrary, Eq, PartialEq)]
enum Op {
    Del(u64),
    Get(u64),
    Select(usize),
}
