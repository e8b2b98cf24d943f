use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use svngraph::commands::graph::GraphCommand;

#[derive(Parser)]
#[command(
    name = "svngraph",
    version = "0.1.0",
    about = "Renders the branching history of a Subversion repository as a graph",
    long_about = "Reads the XML export produced by 'svn log --xml --verbose' and writes a \
    GraphML file showing how trunk, branches and tags were copied from one another.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(index = 1, help = "The XML log export to read")]
    input: PathBuf,
    #[arg(index = 2, help = "The GraphML file to write")]
    output: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let command = GraphCommand::new(Box::new(std::io::stdout()));
    command.run(&cli.input, &cli.output)
}
