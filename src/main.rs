use bitvector_genealogy::io::{open_source, write_matrix_tsv, write_newick, write_parents};
use bitvector_genealogy::relation::dissimilarity_matrix;
use bitvector_genealogy::{
    GenealogyError, MutationModel, MutationPercent, Population, SpanningMethod, infer_genealogy,
};
use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use log::info;
use std::path::PathBuf;
use std::time::Instant;

/// Infer a rooted genealogy from a population of N bit strings of length N
/// and print each genotype's parent index (-1 for none), one per line.
#[derive(Parser, Debug)]
#[command(name = "bitvector-genealogy", version, about = "Rooted genealogy of mutated bit vectors")]
struct Args {
    /// Bitwise probability of mutation as an integer percentage (0-100)
    percent: MutationPercent,

    /// Data file of N lines, each matching ^[01]{N}$ ('-' for stdin, '.gz' accepted)
    data: PathBuf,

    /// Population scale N (default: length of the first line)
    #[arg(short = 'n', long = "scale")]
    scale: Option<usize>,

    /// Spanning graph construction: greedy | kruskal
    #[arg(long = "method", value_enum, default_value_t = MethodArg::Greedy)]
    method: MethodArg,

    /// Output path for the parent array ('-' for stdout)
    #[arg(short = 'o', long = "output", default_value = "-")]
    output: PathBuf,

    /// Also write the pairwise dissimilarity matrix (TSV) here
    #[arg(long = "matrix")]
    matrix: Option<PathBuf>,

    /// Also write the rooted genealogy as Newick here
    #[arg(long = "newick")]
    newick: Option<PathBuf>,

    /// Verbose mode: progress messages on stderr
    #[arg(short = 'v', long = "verbose", default_value_t = false)]
    verbose: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum MethodArg { Greedy, Kruskal }

impl From<MethodArg> for SpanningMethod {
    fn from(m: MethodArg) -> Self {
        match m {
            MethodArg::Greedy => SpanningMethod::Greedy,
            MethodArg::Kruskal => SpanningMethod::Kruskal,
        }
    }
}

fn main() {
    let program = std::env::args().next().unwrap_or_else(|| "bitvector-genealogy".to_string());
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            eprintln!("{program}: Error: {}", usage_summary(&e.render().to_string()));
            std::process::exit(1);
        }
    };

    let level = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(&args) {
        Ok(()) => {}
        Err(e @ GenealogyError::InvalidPopulation { .. }) => {
            eprintln!("{program}: {e}");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("{program}: Error: {e}");
            std::process::exit(1);
        }
    }
}

fn run(args: &Args) -> bitvector_genealogy::Result<()> {
    let t0 = Instant::now();
    let source = open_source(&args.data)?;
    let population = Population::load(source, args.scale)?;
    info!("Reading population {:.3}s", t0.elapsed().as_secs_f64());

    let t1 = Instant::now();
    let genealogy = infer_genealogy(&population, args.percent, args.method.into())?;
    info!("Inferring genealogy {:.3}s", t1.elapsed().as_secs_f64());

    let newick = match &args.newick {
        Some(path) => Some((path, genealogy.to_newick()?)),
        None => None,
    };

    if let Some(path) = &args.matrix {
        let model = MutationModel::new(args.percent, population.scale());
        let names: Vec<String> = (0..population.scale()).map(|i| i.to_string()).collect();
        write_matrix_tsv(path, &names, &dissimilarity_matrix(&population, &model))?;
        info!("Wrote dissimilarity matrix to {}", path.display());
    }

    write_parents(&args.output, &genealogy)?;
    if let Some((path, tree)) = newick {
        write_newick(path, &tree)?;
        info!("Wrote Newick tree to {}", path.display());
    }
    Ok(())
}

/// Collapse a clap error into one line: the paragraph before the first
/// blank line, without clap's own `error:` prefix.
fn usage_summary(rendered: &str) -> String {
    let summary = rendered
        .lines()
        .take_while(|l| !l.trim().is_empty())
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ");
    summary.strip_prefix("error: ").unwrap_or(&summary).to_string()
}
