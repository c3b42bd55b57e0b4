use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use projgraph_csproj::Project;
use projgraph_graph::ProjectGraph;
use projgraph_loader::{root_namespace, LoaderConfig, ProjectLoader};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "projgraph")]
#[command(about = "Dependency graph of legacy .csproj trees", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Loader configuration (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and link every project under a directory
    Scan(ScanArgs),

    /// Show the projects a project depends on
    Deps(DepsArgs),

    /// Show the version of a package a project references
    PackageVersion(VersionArgs),

    /// Print the root namespace of one project file
    Namespace(NamespaceArgs),
}

#[derive(Args)]
struct ScanArgs {
    /// Root directory to scan
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Print the linked projects as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct DepsArgs {
    /// Root directory to scan
    root: PathBuf,

    /// Project key
    key: String,

    /// Follow dependencies this many levels deep
    #[arg(long, default_value_t = 1)]
    depth: usize,

    /// List dependents instead of dependencies
    #[arg(long)]
    reverse: bool,

    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct VersionArgs {
    /// Root directory to scan
    root: PathBuf,

    /// Project key
    key: String,

    /// Package id
    package: String,
}

#[derive(Args)]
struct NamespaceArgs {
    /// Project file
    path: PathBuf,
}

#[derive(Serialize)]
struct DependencyRow<'a> {
    key: &'a str,
    namespace: &'a str,
    path: &'a str,
    distance: usize,
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();

    let json_output = match &cli.command {
        Commands::Scan(args) => args.json,
        Commands::Deps(args) => args.json,
        _ => false,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Scan(args) => run_scan(args, config),
        Commands::Deps(args) => run_deps(args, config),
        Commands::PackageVersion(args) => run_version(args, config),
        Commands::Namespace(args) => run_namespace(args),
    }
}

fn load_config(path: Option<&Path>) -> Result<LoaderConfig> {
    match path {
        Some(path) => LoaderConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(LoaderConfig::default()),
    }
}

fn run_scan(args: ScanArgs, config: LoaderConfig) -> Result<()> {
    let loader = ProjectLoader::new(config)?;
    let projects = loader
        .load_all(&args.root)
        .with_context(|| format!("Failed to load projects under {}", args.root.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&projects)?);
        return Ok(());
    }

    eprintln!("{} projects", projects.len());
    for project in &projects {
        print_project(project);
    }
    Ok(())
}

fn print_project(project: &Project) {
    println!(
        "{:<30} {:<40} {:>3} refs {:>3} project refs {:>3} packages {:>4} files",
        project.key,
        project.root_namespace,
        project.references.len(),
        project.project_refs.len(),
        project.packages.len(),
        project.files.len()
    );
}

fn run_deps(args: DepsArgs, config: LoaderConfig) -> Result<()> {
    let loader = ProjectLoader::new(config)?;
    let graph: ProjectGraph = loader
        .load_graph(&args.root)
        .with_context(|| format!("Failed to load projects under {}", args.root.display()))?;

    let found: Vec<(&Project, usize)> = if args.reverse {
        graph
            .dependents(&args.key)?
            .into_iter()
            .map(|p| (p, 1))
            .collect()
    } else {
        graph.transitive_dependencies(&args.key, args.depth)?
    };

    let rows: Vec<DependencyRow<'_>> = found
        .iter()
        .map(|(project, distance)| DependencyRow {
            key: &project.key,
            namespace: &project.root_namespace,
            path: &project.full_path,
            distance: *distance,
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for row in &rows {
        println!(
            "{}{:<30} {}",
            "  ".repeat(row.distance.saturating_sub(1)),
            row.key,
            row.namespace
        );
    }
    Ok(())
}

fn run_version(args: VersionArgs, config: LoaderConfig) -> Result<()> {
    let loader = ProjectLoader::new(config)?;
    let graph = loader
        .load_graph(&args.root)
        .with_context(|| format!("Failed to load projects under {}", args.root.display()))?;

    match graph.referenced_version(&args.key, &args.package)? {
        Some(version) => println!("{version}"),
        None => {
            eprintln!("{} does not reference {}", args.key, args.package);
            std::process::exit(1);
        }
    }
    Ok(())
}

fn run_namespace(args: NamespaceArgs) -> Result<()> {
    let ns = root_namespace(&args.path)
        .with_context(|| format!("Failed to read {}", args.path.display()))?;
    println!("{ns}");
    Ok(())
}
