use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use jweave_instrument::{Blacklist, InstrumentConfig, Instrumenter};
use jweave_model::doc::ProgramDoc;
use jweave_model::{AnalysisContext, ClassModel};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static ALLOC: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[cfg(target_env = "msvc")]
#[global_allocator]
static ALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "jweave", about = "Trace-probe instrumenter for Jimple-style programs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show program summary
    Info {
        /// Path to the program YAML
        input: PathBuf,
    },
    /// Print a listing of every method body
    Dump {
        /// Path to the program YAML
        input: PathBuf,
    },
    /// Splice tracing probes into every eligible method
    Instrument {
        /// Path to the program YAML
        input: PathBuf,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Package blacklist file, one prefix per line
        #[arg(long)]
        package_blacklist: Option<PathBuf>,
        /// Class blacklist file, one short-name prefix per line
        #[arg(long)]
        class_blacklist: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Info { input } => cmd_info(&input),
        Commands::Dump { input } => cmd_dump(&input),
        Commands::Instrument {
            input,
            output,
            package_blacklist,
            class_blacklist,
        } => cmd_instrument(
            &input,
            output.as_deref(),
            package_blacklist.as_deref(),
            class_blacklist.as_deref(),
        ),
    }
}

fn load_program(path: &std::path::Path) -> Vec<ClassModel> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error reading {}: {e}", path.display());
            std::process::exit(1);
        }
    };
    let doc: ProgramDoc = match serde_yaml::from_str(&text) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error parsing {}: {e}", path.display());
            std::process::exit(1);
        }
    };
    doc.build()
}

fn cmd_info(input: &std::path::Path) {
    let classes = load_program(input);
    let methods: usize = classes.iter().map(|c| c.methods.len()).sum();
    let bodies: usize = classes
        .iter()
        .flat_map(|c| &c.methods)
        .filter(|m| m.has_body())
        .count();

    println!("=== Program Info ===");
    println!("Classes:          {}", classes.len());
    println!("Methods:          {methods}");
    println!("Method bodies:    {bodies}");
}

fn cmd_dump(input: &std::path::Path) {
    let classes = load_program(input);
    for class in &classes {
        println!("# ============================================");
        match &class.superclass {
            Some(superclass) => println!("class {} extends {superclass} {{", class.name),
            None => println!("class {} {{", class.name),
        }
        for method in &class.methods {
            println!("    {} {{", method.sub_signature());
            match &method.body {
                Some(body) => {
                    for unit in &body.units {
                        println!("        {unit}");
                    }
                }
                None => println!("        # (no body)"),
            }
            println!("    }}");
        }
        println!("}}");
        println!();
    }
}

fn cmd_instrument(
    input: &std::path::Path,
    output: Option<&std::path::Path>,
    package_blacklist: Option<&std::path::Path>,
    class_blacklist: Option<&std::path::Path>,
) {
    let mut classes = load_program(input);

    let mut ctx = AnalysisContext::with_runtime();
    ctx.declare_all(&classes);

    // File-provided entries on top of the framework defaults.
    let mut blacklist = Blacklist::from_files(package_blacklist, class_blacklist);
    let defaults = Blacklist::android_defaults();
    blacklist.packages.extend(defaults.packages);
    blacklist.classes.extend(defaults.classes);

    let instrumenter = Instrumenter::new(InstrumentConfig::default(), blacklist);
    let start = Instant::now();
    let summary = instrumenter.instrument_program(&ctx, &mut classes);
    log::info!(
        "instrumented {} methods ({} skipped, {} failed) in {:.2?}",
        summary.instrumented,
        summary.skipped,
        summary.failed,
        start.elapsed()
    );

    let doc = ProgramDoc::from_classes(&classes);
    let rendered = match serde_yaml::to_string(&doc) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error serializing program: {e}");
            std::process::exit(1);
        }
    };
    match output {
        Some(path) => {
            if let Err(e) = fs::write(path, &rendered) {
                eprintln!("Error writing {}: {e}", path.display());
                std::process::exit(1);
            }
        }
        None => print!("{rendered}"),
    }
}
