use clap::Parser;
use std::path::PathBuf;

/// Detect singleton-like anti-patterns in compiled classes and render the
/// usage graph as GraphML.
#[derive(Parser, Debug)]
#[command(name = "singlemap")]
#[command(about = "Singleton anti-pattern detector and usage graph generator", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory of compiled classes, or a jar archive
    pub path: PathBuf,

    /// Output GraphML file
    pub output: PathBuf,

    /// Package prefix to restrict analysis to (dotted or slashed form)
    pub package: Option<String>,

    /// Minimum incoming usage edges required to draw a node; <= 0 draws
    /// every eligible node [default: 0]
    #[arg(short = 't', long)]
    pub threshold: Option<i64>,

    /// Enable verbose progress output
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Print statistics upon completion
    #[arg(short = 'S', long)]
    pub stats: bool,

    /// Add a statistics banner node to the graph
    #[arg(short = 'b', long)]
    pub banner: bool,

    /// Hide singletons
    #[arg(long)]
    pub no_singletons: bool,

    /// Hide hingletons
    #[arg(long)]
    pub no_hingletons: bool,

    /// Hide mingletons
    #[arg(long)]
    pub no_mingletons: bool,

    /// Hide fingletons
    #[arg(long)]
    pub no_fingletons: bool,

    /// Hide classes with no classification of their own
    #[arg(long)]
    pub no_others: bool,
}

impl Cli {
    /// Package prefix in internal slash form with a trailing separator;
    /// empty when no package was given.
    pub fn package_prefix(&self) -> String {
        match &self.package {
            Some(pkg) => normalize_package(pkg),
            None => String::new(),
        }
    }
}

/// Accepts `com.example.app`, `com/example/app` or either with a trailing
/// separator, always yielding `com/example/app/`.
pub fn normalize_package(package: &str) -> String {
    let mut prefix = package.replace('.', "/");
    if !prefix.is_empty() && !prefix.ends_with('/') {
        prefix.push('/');
    }
    prefix
}
