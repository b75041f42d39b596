//! `egonet decompose` command - Split a graph into ego-network components.

use std::io::{self, Stdout, Write};
use std::path::PathBuf;

use colored::Colorize;
use egonet_graph::{decompose, Component, ComponentSink, DirectorySink, Result as GraphResult};
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::ProjectConfig;
use crate::error::{CliError, CliResult};

use super::{max_degree, read_input, validate_budget, Label};

/// Command-line overrides for the decomposition parameters.
#[derive(Debug, Default)]
pub struct Overrides {
    pub prefix: Option<String>,
    pub output: Option<String>,
    pub max_components: Option<usize>,
    pub depth: Option<u32>,
}

/// Writes components through a [`DirectorySink`] and reports each one.
///
/// Report lines go to `out`. While a visible bar is drawn they are
/// written with the bar suspended; a hidden bar (stderr not a terminal)
/// leaves the lines untouched.
struct ProgressSink<W: Write> {
    inner: DirectorySink,
    pb: Option<ProgressBar>,
    out: W,
}

impl ProgressSink<Stdout> {
    fn new(inner: DirectorySink, rounds: usize, quiet: bool) -> Self {
        let pb = (!quiet).then(|| {
            let pb = ProgressBar::new(rounds as u64);
            let style = ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓▒░  ");
            pb.set_style(style);
            pb
        });
        Self::with_output(inner, pb, io::stdout())
    }
}

impl<W: Write> ProgressSink<W> {
    /// `pb == None` suppresses all reporting.
    fn with_output(inner: DirectorySink, pb: Option<ProgressBar>, out: W) -> Self {
        Self { inner, pb, out }
    }

    fn finish(&self) {
        if let Some(pb) = &self.pb {
            pb.finish_and_clear();
        }
    }
}

impl<W: Write> ComponentSink<Label> for ProgressSink<W> {
    fn persist(&mut self, component: &Component<Label>) -> GraphResult<()> {
        self.inner.persist(component)?;

        let Self { inner, pb, out } = self;
        let Some(pb) = pb else {
            return Ok(());
        };
        let line = format!(
            "  {} #{:<4} {:>8} nodes  {}",
            "✓".bright_green(),
            component.id,
            component.graph.node_count(),
            inner.path_for(&component.name).display()
        );
        if pb.is_hidden() {
            writeln!(out, "{}", line)?;
        } else {
            pb.suspend(|| writeln!(out, "{}", line))?;
        }
        pb.set_message(component.name.clone());
        pb.inc(1);
        Ok(())
    }
}

/// Execute the `decompose` command.
pub fn execute(
    input: &str,
    overrides: Overrides,
    config_path: Option<&str>,
    quiet: bool,
) -> CliResult<()> {
    let project = ProjectConfig::load(config_path)?;

    let mut config = project.decompose;
    if let Some(prefix) = overrides.prefix {
        config.prefix = prefix;
    }
    if let Some(max) = overrides.max_components {
        config.max_components = max;
    }
    if let Some(depth) = overrides.depth {
        config.depth = depth;
    }
    validate_budget(config.max_components)?;

    let output_dir: PathBuf = overrides
        .output
        .or(project.output.dir)
        .unwrap_or_else(|| ".".to_string())
        .into();

    let graph = read_input(input)?;

    if !quiet {
        println!("{} Decomposing {}", "→".bright_cyan(), input.bright_yellow());
        println!(
            "  {} Input: {} nodes, {} edges (max degree {})",
            "•".dimmed(),
            graph.node_count().to_string().bright_white(),
            graph.edge_count().to_string().bright_white(),
            max_degree(&graph)
        );
        println!(
            "  {} Depth: {}, max components: {}",
            "•".dimmed(),
            config.depth.to_string().bright_yellow(),
            config.max_components.to_string().bright_yellow()
        );
        println!(
            "  {} Output: {}",
            "•".dimmed(),
            output_dir.join(format!("{}*.egr", config.prefix)).display()
        );
        println!();
    }

    // Every round removes at least the seed.
    let rounds = config.max_components.min(graph.node_count());
    let mut sink = ProgressSink::new(DirectorySink::new(output_dir), rounds, quiet);
    let result = decompose(graph, &config, &mut sink);
    sink.finish();
    let summary = result.map_err(CliError::from)?;

    if !quiet {
        println!();
        println!(
            "{} {} component(s), {} node(s) extracted, {} left ({:?})",
            "✓".bright_green().bold(),
            summary.components,
            summary.nodes_emitted,
            summary.nodes_remaining,
            summary.reason
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use egonet_graph::{Graph, GraphBuilder, NodeId};

    fn path(n: u32) -> Graph<Label> {
        let mut builder = GraphBuilder::new(n as usize);
        for i in 0..n {
            builder.set_label(NodeId(i), vec![i as u8]);
        }
        for i in 0..n - 1 {
            builder.add_edge(NodeId(i), NodeId(i + 1));
        }
        builder.build()
    }

    #[test]
    fn test_hidden_bar_still_reports_components() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut sink = ProgressSink::with_output(
            DirectorySink::new(dir.path()),
            Some(ProgressBar::hidden()),
            Vec::new(),
        );

        let config = egonet_graph::DecomposeConfig::new()
            .with_depth(1)
            .with_max_components(10);
        let summary = decompose(path(5), &config, &mut sink).unwrap();
        sink.finish();
        assert_eq!(summary.components, 2);

        let text = String::from_utf8(sink.out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("#0"));
        assert!(lines[0].contains("3 nodes"));
        assert!(lines[0].contains("component_0000.egr"));
        assert!(lines[1].contains("#1"));
        assert!(lines[1].contains("2 nodes"));
        assert!(lines[1].contains("component_0001.egr"));
    }

    #[test]
    fn test_quiet_sink_writes_files_only() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut sink = ProgressSink::with_output(DirectorySink::new(dir.path()), None, Vec::new());

        let config = egonet_graph::DecomposeConfig::new().with_max_components(10);
        decompose(path(5), &config, &mut sink).unwrap();

        assert!(sink.out.is_empty());
        assert!(dir.path().join("component_0000.egr").exists());
        assert!(dir.path().join("component_0001.egr").exists());
    }
}
