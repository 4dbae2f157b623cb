use anyhow::Result;
use clap::{Parser, Subcommand};
use itertools::Itertools;
use std::path::PathBuf;
use tabletalk::command::Command;
use tabletalk::compare::compare_columns;
use tabletalk::dataset::PolarsDataset;
use tabletalk::resolver::IntentResolver;
use tabletalk::stats::{summarize, ColumnSummary};

#[derive(Parser)]
#[command(name = "tabletalk")]
#[command(about = "Conversational statistics over tabular datasets")]
struct Args {
    #[command(subcommand)]
    command: Cmd,

    /// Print structured JSON instead of plain text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Cmd {
    /// Resolve free text to the closest command in the vocabulary
    Resolve { text: String },

    /// Print the column summary for one column of a CSV dataset
    Stats { dataset: PathBuf, column: usize },

    /// Compare two numeric columns of a CSV dataset
    Compare {
        dataset: PathBuf,
        first: usize,
        second: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    match args.command {
        Cmd::Resolve { text } => {
            let resolver = IntentResolver::default();
            match resolver.resolve(&text) {
                Some(command) => println!("{}", command.phrase()),
                None => {
                    println!("UNRECOGNIZED");
                    eprintln!(
                        "Known commands: {}",
                        Command::ALL.iter().map(|c| c.phrase()).join(", ")
                    );
                }
            }
        }
        Cmd::Stats { dataset, column } => {
            let data = PolarsDataset::load(&dataset)?;
            let summary = summarize(&data, column)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary(&summary);
            }
        }
        Cmd::Compare { dataset, first, second } => {
            let data = PolarsDataset::load(&dataset)?;
            let (a, b) = compare_columns(&data, first, second)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&[&a, &b])?);
            } else {
                print_summary(&a);
                print_summary(&b);
            }
        }
    }

    Ok(())
}

fn print_summary(summary: &ColumnSummary) {
    match summary {
        ColumnSummary::Numeric { name, min, max, mean, std_dev } => {
            println!(
                "{}: numeric min={} max={} mean={} std_dev={}",
                name, min, max, mean, std_dev
            );
        }
        ColumnSummary::Categorical { name, distinct_count } => {
            println!("{}: categorical distinct_count={}", name, distinct_count);
        }
    }
}
