//! Line-oriented text report.
//!
//! Each record block:
//! ```text
//! <record text>
//! ; total static profile = 12
//! ; sprofile 10 "foo.c:3"
//! ; total dynamic profile = 0
//! ------------------------------------------------------
//! ```

use crate::report::{LocationCount, Report, ReportEntry};
use crate::utils::config::RECORD_SEPARATOR;
use std::io::{self, Write};

/// Write every record of `report` in order
pub fn write_text_report<W: Write>(writer: &mut W, report: &Report) -> io::Result<()> {
    for entry in &report.records {
        write_entry(writer, entry)?;
    }
    writer.flush()
}

/// Render the report into a string
pub fn report_to_string(report: &Report) -> String {
    let mut buffer = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_text_report(&mut buffer, report);
    String::from_utf8_lossy(&buffer).into_owned()
}

fn write_entry<W: Write>(writer: &mut W, entry: &ReportEntry) -> io::Result<()> {
    writer.write_all(entry.identity.as_bytes())?;
    if !entry.identity.ends_with('\n') {
        writeln!(writer)?;
    }

    writeln!(writer, "; total static profile = {}", entry.static_total)?;
    write_locations(writer, "sprofile", &entry.static_locations)?;
    writeln!(writer, "; total dynamic profile = {}", entry.dynamic_total)?;
    write_locations(writer, "dprofile", &entry.dynamic_locations)?;
    writeln!(writer, "{}", RECORD_SEPARATOR)
}

fn write_locations<W: Write>(writer: &mut W, label: &str, locations: &[LocationCount]) -> io::Result<()> {
    for LocationCount { location, count } in locations {
        writeln!(writer, "; {} {} \"{}\"", label, count, location)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::{CounterBundle, ProfileAggregator, ProfileKind};
    use crate::report::SortKey;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_block_layout() {
        let mut bundle = CounterBundle::new();
        bundle.add(ProfileKind::Static, "a.c:1", 2);
        bundle.add(ProfileKind::Static, "b.c:9", 7);
        bundle.add(ProfileKind::Static, "", 1);
        bundle.add(ProfileKind::Dynamic, "a.c:1", 5);

        let mut agg = ProfileAggregator::new();
        agg.register("%0:i1 = var\nresult 0:i1\n", bundle, true);

        let text = report_to_string(&Report::build(&agg, SortKey::Length));

        assert_eq!(
            text,
            "%0:i1 = var\nresult 0:i1\n\
             ; total static profile = 10\n\
             ; sprofile 7 \"b.c:9\"\n\
             ; sprofile 2 \"a.c:1\"\n\
             ; total dynamic profile = 5\n\
             ; dprofile 5 \"a.c:1\"\n\
             ------------------------------------------------------\n"
        );
    }

    #[test]
    fn test_identity_without_trailing_newline() {
        let mut agg = ProfileAggregator::new();
        agg.register("ab", CounterBundle::new(), true);

        let text = report_to_string(&Report::build(&agg, SortKey::Length));

        assert!(text.starts_with("ab\n; total static profile = 0\n"));
    }

    #[test]
    fn test_empty_report() {
        let agg = ProfileAggregator::new();
        assert_eq!(report_to_string(&Report::build(&agg, SortKey::Length)), "");
    }
}
