use std::io::{self, Write};
use std::time::Duration;

use common::{error::Error as AltPathsError, types::Route};

const SEPARATOR: &str = "************************";

/// Writes one block per ranked result:
///
/// ```text
/// Distance 1: 2
/// 0->1->2->
/// ************************
/// ```
pub fn write_report<W: Write>(
    out: &mut W,
    ranked: &[Result<Route, AltPathsError>],
) -> io::Result<()> {
    for (i, entry) in ranked.iter().enumerate() {
        let rank = i + 1;
        match entry {
            Ok(Route::Found(path)) => {
                writeln!(out, "Distance {}: {}", rank, path.distance)?;
                writeln!(out, "{}", path.arrow_chain())?;
            }
            Ok(Route::Unreachable) => {
                writeln!(out, "Distance {}: inf", rank)?;
                writeln!(out, "(target unreachable)")?;
            }
            Err(e) => {
                writeln!(out, "Distance {}: unavailable", rank)?;
                writeln!(out, "({})", e)?;
            }
        }
        writeln!(out, "{}", SEPARATOR)?;
    }
    Ok(())
}

pub fn write_timing<W: Write>(
    out: &mut W,
    source: usize,
    target: usize,
    elapsed: Duration,
) -> io::Result<()> {
    writeln!(
        out,
        "Search from {} to {} took {:.3} sec",
        source,
        target,
        elapsed.as_secs_f64()
    )
}
