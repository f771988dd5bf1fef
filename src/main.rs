use anyhow::{Context, Result, bail};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use l5xtree::color::Rgb;
use l5xtree::model::LinkSummary;
use l5xtree::tree::print::render_ascii;
use l5xtree::{EditOptions, LinkOptions, Project};
use rayon::prelude::*;
use tracing::Level;
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(author, version, about = "Link L5X hardware I/O to program parameters", long_about = None)]
struct Cli {
    /// JSON file overriding extraction settings
    #[arg(long, value_name = "CONFIG", global = true)]
    config: Option<Utf8PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the I/O tree of an export
    Tree {
        #[arg(value_name = "L5X_FILE")]
        file: Utf8PathBuf,
    },
    /// Print the I/O tree (or the linked module list) as JSON
    Json {
        #[arg(value_name = "L5X_FILE")]
        file: Utf8PathBuf,
        /// Print the module records instead of the tree
        #[arg(long)]
        modules: bool,
        /// Background for every row ([r,g,b], #rrggbb or a name)
        #[arg(long, value_name = "COLOR")]
        color: Option<Rgb>,
    },
    /// Summarise every export under a directory
    Scan {
        #[arg(value_name = "DIR")]
        dir: Utf8PathBuf,
    },
    /// Edit one cell and save the document
    Edit {
        #[arg(value_name = "L5X_FILE")]
        file: Utf8PathBuf,
        /// Hardware field of the row to edit
        #[arg(long)]
        hardware: String,
        /// 0 = tag name, 1 = text, 2 = attributes (Key="Value" list)
        #[arg(long)]
        column: usize,
        #[arg(long)]
        value: String,
        /// Write here instead of overwriting the input
        #[arg(long)]
        output: Option<Utf8PathBuf>,
        /// Reject the edit when several source elements match the row
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let options = match &cli.config {
        Some(path) => LinkOptions::from_json_file(path)?,
        None => LinkOptions::default(),
    };

    match cli.command {
        Command::Tree { file } => {
            let project = Project::open(&file, &options)?;
            print!("{}", render_ascii(project.tree()));
        }
        Command::Json {
            file,
            modules,
            color,
        } => {
            let mut project = Project::open(&file, &options)?;
            project.tree_mut().set_color(color);
            let json = if modules {
                serde_json::to_string_pretty(project.modules())?
            } else {
                let tree = project.tree();
                serde_json::to_string_pretty(&tree.nested(tree.root()))?
            };
            println!("{}", json);
        }
        Command::Scan { dir } => scan(&dir, &options)?,
        Command::Edit {
            file,
            hardware,
            column,
            value,
            output,
            strict,
        } => {
            let mut project = Project::open(&file, &options)?
                .with_edit_options(EditOptions {
                    strict_identity: strict,
                });
            let node = project
                .tree()
                .find_hardware(&hardware)
                .with_context(|| format!("No row with hardware {:?}", hardware))?;
            if let Err(e) = project.try_set_data(node, column, &value) {
                bail!("Edit rejected: {}", e);
            }
            project.save(output.as_deref());
            if project.is_modified() {
                bail!("Edit applied but the document could not be saved");
            }
        }
    }
    Ok(())
}

fn scan(dir: &Utf8Path, options: &LinkOptions) -> Result<()> {
    let mut files: Vec<Utf8PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| Utf8PathBuf::from_path_buf(e.into_path()).ok())
        .filter(|p| {
            p.extension()
                .is_some_and(|x| x.eq_ignore_ascii_case("l5x") || x.eq_ignore_ascii_case("zip"))
        })
        .collect();
    files.sort();

    let results: Vec<(Utf8PathBuf, Result<LinkSummary>)> = files
        .into_par_iter()
        .map(|path| {
            let summary = Project::open(&path, options).map(|p| p.summary());
            (path, summary)
        })
        .collect();

    for (path, summary) in results {
        match summary {
            Ok(s) => println!(
                "{}: {} modules, {} points, {} linked, {} described",
                path, s.modules, s.points, s.linked, s.described
            ),
            Err(e) => println!("{}: error: {:#}", path, e),
        }
    }
    Ok(())
}
