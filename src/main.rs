use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;

use bwt_rust::index::invert::{first_column, last_column, rank_tags, RankTag};
use bwt_rust::index::rotation::{build_rotations, sort_rotations};
use bwt_rust::index::DEFAULT_MAX_LEN;
use bwt_rust::util::alphabet::display;
use bwt_rust::{invert, transform, BwtOpt, FmIndex, Transformed};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "bwt-rust", author, version, about = "Burrows-Wheeler Transform, inversion and FM-index search", arg_required_else_help = true)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct GlobalOpts {
    /// Sentinel symbol terminating every sequence (single ASCII character)
    #[arg(long, global = true, default_value_t = '$')]
    sentinel: char,
    /// Reject inputs longer than this many symbols
    #[arg(long = "max-len", global = true, default_value_t = DEFAULT_MAX_LEN)]
    max_len: usize,
    /// Log construction details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute the BWT and suffix array of a sentinel-terminated sequence
    Transform {
        seq: String,
        /// Also print the unsorted and sorted rotation matrices
        #[arg(long)]
        matrix: bool,
    },
    /// Recover the original sequence from a BWT string
    Invert {
        bwt: String,
        /// Also print the first/last columns and their rank tags
        #[arg(long)]
        columns: bool,
    },
    /// Report every offset at which each pattern occurs
    Search {
        seq: String,
        #[arg(required = true)]
        patterns: Vec<String>,
        #[arg(short = 't', long = "threads", default_value_t = 1)]
        threads: usize,
    },
    /// Walk through transform, inversion and search on one sequence
    Demo {
        #[arg(default_value = "TAGACAGAGA$")]
        seq: String,
        #[arg(short, long, default_value = "AGA")]
        pattern: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);
    let opt = build_opt(&cli.global)?;
    match cli.command {
        Commands::Transform { seq, matrix } => run_transform(seq.as_bytes(), matrix, &opt).map(|_| ()),
        Commands::Invert { bwt, columns } => run_invert(bwt.as_bytes(), columns, &opt),
        Commands::Search { seq, patterns, threads } => run_search(seq.as_bytes(), &patterns, threads, &opt),
        Commands::Demo { seq, pattern } => run_demo(seq.as_bytes(), pattern.as_bytes(), &opt),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn build_opt(global: &GlobalOpts) -> Result<BwtOpt> {
    anyhow::ensure!(global.sentinel.is_ascii(), "sentinel '{}' is not a single ASCII character", global.sentinel);
    Ok(BwtOpt { sentinel: global.sentinel as u8, max_len: global.max_len })
}

fn print_matrix(rows: &[Vec<u8>]) {
    for row in rows {
        println!("{}", display(row));
    }
}

fn format_tags(tags: &[RankTag]) -> String {
    tags.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}

fn format_offsets(offsets: &[usize]) -> String {
    offsets.iter().map(ToString::to_string).collect::<Vec<_>>().join(",")
}

fn run_transform(seq: &[u8], matrix: bool, opt: &BwtOpt) -> Result<Transformed> {
    let t = transform(seq, opt).with_context(|| format!("cannot transform '{}'", display(seq)))?;
    if matrix {
        let rows = build_rotations(seq);
        println!("rotations:");
        print_matrix(&rows);
        println!("sorted:");
        print_matrix(&sort_rotations(rows, opt.sentinel));
    }
    println!("bwt: {}", display(&t.bwt));
    println!("sa: {}", format_offsets(&t.sa));
    Ok(t)
}

fn run_invert(bwt: &[u8], columns: bool, opt: &BwtOpt) -> Result<()> {
    if columns {
        let first = first_column(bwt, opt.sentinel);
        let last = last_column(bwt);
        println!("first: {}", display(&first));
        println!("last: {}", display(&last));
        println!("first tagged: {}", format_tags(&rank_tags(&first)));
        println!("last tagged: {}", format_tags(&rank_tags(&last)));
    }
    let seq = invert(bwt, opt).with_context(|| format!("cannot invert '{}'", display(bwt)))?;
    println!("sequence: {}", display(&seq));
    Ok(())
}

fn run_search(seq: &[u8], patterns: &[String], threads: usize, opt: &BwtOpt) -> Result<()> {
    let fm = FmIndex::build(seq, opt).with_context(|| format!("cannot index '{}'", display(seq)))?;
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .build()
        .context("cannot start search thread pool")?;
    let hits: Vec<(&String, Vec<usize>)> =
        pool.install(|| patterns.par_iter().map(|p| (p, fm.search(p.as_bytes()))).collect());
    for (pattern, offsets) in hits {
        println!("{}\t{}\t{}", pattern, offsets.len(), format_offsets(&offsets));
    }
    Ok(())
}

fn print_tables(fm: &FmIndex) {
    println!("fm index over {} (n = {}):", display(fm.bwt()), fm.len());
    let first = fm.first_occurrence();
    for c in fm.count_table().symbols() {
        let col = fm.count_table().column(c).unwrap_or_default();
        println!(
            "  {}  first={}  count=[{}]",
            c as char,
            first.get(c).unwrap_or_default(),
            format_offsets(col)
        );
    }
    println!("  sa=[{}]", format_offsets(fm.sa()));
}

fn run_demo(seq: &[u8], pattern: &[u8], opt: &BwtOpt) -> Result<()> {
    println!("sequence: {}", display(seq));
    println!();
    let t = run_transform(seq, true, opt)?;
    println!();
    run_invert(&t.bwt, true, opt)?;
    println!();
    let fm = FmIndex::from_parts(t.bwt, t.sa, opt.sentinel)?;
    print_tables(&fm);
    println!();
    println!("pattern: {}", display(pattern));
    println!("offsets: [{}]", format_offsets(&fm.search(pattern)));
    Ok(())
}
