//! Batches of random-access queries.
//!
//! Positions are drawn uniformly from the text with a seeded generator so a
//! run can be repeated exactly. Each query is timed on its own; only the
//! `locate` call is measured, not the formatting or the write.

use crate::document::Document;
use crate::error::{Error, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Write;
use std::time::{Duration, Instant};
use tracing::info;

const PROGRESS_INTERVAL: usize = 1000;

/// Draws `count` positions uniformly from `[0, uncompressed_size)`.
pub fn sample_positions(uncompressed_size: u64, count: usize, seed: u64) -> Result<Vec<u64>> {
    if uncompressed_size == 0 {
        return Err(Error::EmptyText);
    }
    let mut rng = StdRng::seed_from_u64(seed);
    Ok((0..count)
        .map(|_| rng.gen_range(0..uncompressed_size))
        .collect())
}

/// Timing summary of a query batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryReport {
    pub queries: usize,
    pub total: Duration,
}

impl QueryReport {
    /// Average time per query, zero for an empty batch.
    pub fn mean(&self) -> Duration {
        if self.queries == 0 {
            Duration::ZERO
        } else {
            self.total.div_f64(self.queries as f64)
        }
    }
}

/// Resolves every position and writes one `pos: <p> value: <symbol>` line each.
///
/// Stops at the first failing query; nothing is written for it.
pub fn run_queries<W: Write>(document: &Document, positions: &[u64], out: &mut W) -> Result<QueryReport> {
    let mut report = QueryReport::default();

    for (i, &position) in positions.iter().enumerate() {
        let start = Instant::now();
        let id = document.locate(position)?;
        report.total += start.elapsed();
        report.queries += 1;

        if i % PROGRESS_INTERVAL == 0 {
            info!("completed {}/{} queries", i, positions.len());
        }

        writeln!(
            out,
            "pos: {} value: {}",
            position,
            document.grammar().display(id)
        )
        .map_err(Error::Write)?;
    }

    out.flush().map_err(Error::Write)?;
    Ok(report)
}
