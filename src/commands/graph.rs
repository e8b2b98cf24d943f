use crate::areas::export::LogExport;
use crate::artifacts::graph::BranchGraph;
use crate::artifacts::graph::graphml::write_graphml;
use anyhow::Context;
use colored::Colorize;
use std::cell::{RefCell, RefMut};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Runs the whole pipeline: load the export, trace the significant
/// revisions, build the branch graph and write it out as GraphML.
pub struct GraphCommand {
    writer: RefCell<Box<dyn std::io::Write>>,
}

impl GraphCommand {
    pub fn new(writer: Box<dyn std::io::Write>) -> Self {
        GraphCommand {
            writer: RefCell::new(writer),
        }
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn run(&self, input: &Path, output: &Path) -> anyhow::Result<()> {
        if !input.exists() {
            anyhow::bail!("the input file '{}' doesn't exist", input.display());
        }

        let export = LogExport::new(input.to_path_buf().into_boxed_path());
        let history = export.load()?;
        writeln!(self.writer(), "Parsed {} revisions", history.revision_count())?;

        let mut significant_count = 0usize;
        for revision in history.significant_revisions() {
            significant_count += 1;
            writeln!(
                self.writer(),
                "{} - {}",
                revision.number(),
                revision.message().unwrap_or("")
            )?;

            for update in revision.significant_updates() {
                match update.copy_source() {
                    Some(source) => writeln!(
                        self.writer(),
                        "  > {} {} from {}@{}",
                        update.action(),
                        update.path(),
                        source.path(),
                        source.revision()
                    )?,
                    None => {
                        writeln!(self.writer(), "  > {} {}", update.action(), update.path())?
                    }
                }
            }
        }

        let graph = BranchGraph::build(&history);
        for skipped in graph.skipped_updates() {
            let warning = format!(
                "Skipped an update of revision {}: no root recognized under '{}'",
                skipped.revision(),
                skipped.path()
            );
            writeln!(self.writer(), "{}", warning.yellow())?;
        }
        writeln!(self.writer(), "Found {} significant revisions", significant_count)?;

        // the output file only comes into existence once the graph is built,
        // so a failed run leaves nothing half-written behind
        let file = std::fs::File::create(output)
            .with_context(|| format!("failed to create the output file {}", output.display()))?;
        let mut out = BufWriter::new(file);
        write_graphml(&graph, &mut out)
            .with_context(|| format!("failed to write the graph to {}", output.display()))?;
        out.flush()
            .with_context(|| format!("failed to write the graph to {}", output.display()))?;

        writeln!(
            self.writer(),
            "Wrote {} nodes and {} edges to {}",
            graph.node_count(),
            graph.edge_count(),
            output.display()
        )?;

        Ok(())
    }
}
