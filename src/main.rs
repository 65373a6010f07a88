use std::process::ExitCode;
use tanglegram::export::TangleLayout;
use tanglegram::newick::{self, to_newick};
use tanglegram::parser::ParsingError;
use tanglegram::untangle::{DEFAULT_MAX_LEAF_COUNT, UntangleConfig, Untangler};
use tanglegram::TangleTree;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Usage(&'static str),
    #[error("{path}: {source}")]
    Parsing { path: String, source: ParsingError },
    #[error("{0}: file contains no tree")]
    NoTree(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug)]
struct Args {
    left: String,
    right: String,
    json: bool,
    max_leaf_count: usize,
}

fn usage() -> &'static str {
    "tanglegram\n\
\n\
USAGE:\n\
  tanglegram [--json] [--max-leaf-count <n>] <left.nwk> <right.nwk>\n\
\n\
NOTES:\n\
  - Only the first tree of each file is used.\n\
  - Prints both untangled trees as Newick, left first; --json prints the layout instead.\n\
  - Set RUST_LOG (e.g. RUST_LOG=debug) to control log output on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut files = Vec::new();
    let mut json = false;
    let mut max_leaf_count = DEFAULT_MAX_LEAF_COUNT;

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--json" => json = true,
            "--max-leaf-count" => {
                let Some(n) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                max_leaf_count = n.parse::<usize>().map_err(|_| CliError::Usage(usage()))?;
            }
            other if other.starts_with("--") => return Err(CliError::Usage(usage())),
            path => files.push(path.to_string()),
        }
    }

    let [left, right]: [String; 2] = files.try_into().map_err(|_| CliError::Usage(usage()))?;
    Ok(Args {
        left,
        right,
        json,
        max_leaf_count,
    })
}

fn read_first_tree(path: &str) -> Result<TangleTree, CliError> {
    let trees = newick::parse_file(path).map_err(|source| CliError::Parsing {
        path: path.to_string(),
        source,
    })?;
    trees
        .into_iter()
        .next()
        .ok_or_else(|| CliError::NoTree(path.to_string()))
}

fn run(argv: &[String]) -> Result<(), CliError> {
    let args = parse_args(argv)?;
    let mut left = read_first_tree(&args.left)?;
    let mut right = read_first_tree(&args.right)?;
    left.set_name(args.left.clone());
    right.set_name(args.right.clone());

    let untangler =
        Untangler::new(UntangleConfig::default().with_max_leaf_count(args.max_leaf_count));
    let report = untangler.untangle(&mut left, &mut right);
    tracing::info!(
        initial = report.initial,
        result = report.after_layout,
        "Correlation of matched leaves"
    );

    if args.json {
        println!("{}", TangleLayout::from_trees(&left, &right).to_json()?);
    } else {
        println!("{}", to_newick(&left));
        println!("{}", to_newick(&right));
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let argv: Vec<String> = std::env::args().collect();
    match run(&argv) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Usage(msg)) => {
            eprint!("{msg}");
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
