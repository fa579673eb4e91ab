use anyhow::Context;
use clap::Parser;
use repair_access::{
    run_queries, sample_positions, write_grammar, write_sequence, Config, Document, TreeBuilder,
};
use std::fs::File;
use std::io::{self, BufWriter};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let config = Config::parse();
    config.validate()?;

    println!("Compressed sequence file location: {}", config.sequence.display());
    println!("Rule file location: {}", config.rules.display());
    println!("Output file prefix: {}", config.output);

    let document = Document::open(&config.rules, &config.sequence, config.family.layout())
        .with_context(|| format!("failed to load {} grammar", config.family))?;

    let mut stdout = io::stdout().lock();
    if config.print_grammar {
        write_grammar(document.grammar(), &mut stdout)?;
    }
    if config.print_sequence {
        write_sequence(document.sequence(), &mut stdout)?;
    }

    if let Some(path) = &config.dot {
        let tree = TreeBuilder::new(document.grammar())
            .expansion(config.tree)
            .node_limit(config.tree_node_limit)
            .build(document.sequence().as_slice())?;
        std::fs::write(path, tree.to_dot())
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Derivation tree with {} nodes written to {}", tree.len(), path.display());
    }

    if config.depth {
        println!("Calculating parse tree depth statistics...");
        let stats = document.depth_stats()?;
        println!("\n--- Depth Statistics ---");
        println!("Maximum parse tree depth: {}", stats.max_depth);
        println!("Average leaf depth: {:.4}", stats.average_leaf_depth());
        println!(
            "The number of leaves (uncompressed file size): {}",
            stats.uncompressed_size
        );
        println!("------------------------\n");
    }

    if !config.no_ra {
        let positions = sample_positions(document.uncompressed_size(), config.iterations, config.seed)?;
        let output_path = config.output_path();
        let file = File::create(&output_path)
            .with_context(|| format!("failed to create {}", output_path.display()))?;
        let report = run_queries(&document, &positions, &mut BufWriter::new(file))?;

        println!("\n--- Benchmark Complete ---");
        println!(
            "It took {:.4} seconds to perform {} random access queries.",
            report.total.as_secs_f64(),
            report.queries
        );
        println!(
            "It took {:.6} seconds on average per random access query.",
            report.mean().as_secs_f64()
        );
        println!("Results saved to {}", output_path.display());
    }

    Ok(())
}
