//! ParaView collection (.pvd) writer
//!
//! A collection lists one dataset per time value so ParaView loads the step
//! files of a conversion as a single time series.

use std::io::{self, Write};
use std::path::Path;

use crate::error::Result;
use crate::output::{escape_attr, write_buffered};

/// One dataset of a collection
#[derive(Debug, Clone, PartialEq)]
pub struct PvdEntry {
    pub time: f64,
    /// Path as it should appear in the collection, usually relative to it
    pub file: String,
}

pub fn write_pvd<P: AsRef<Path>>(path: P, entries: &[PvdEntry]) -> Result<()> {
    write_buffered(path.as_ref(), |w| write_pvd_to(w, entries))
}

pub fn write_pvd_to<W: Write>(w: &mut W, entries: &[PvdEntry]) -> io::Result<()> {
    writeln!(w, r#"<?xml version="1.0"?>"#)?;
    writeln!(
        w,
        r#"<VTKFile type="Collection" version="0.1" byte_order="LittleEndian">"#
    )?;
    writeln!(w, r#"  <Collection>"#)?;
    for entry in entries {
        writeln!(
            w,
            r#"    <DataSet timestep="{:?}" group="" part="0" file="{}"/>"#,
            entry.time,
            escape_attr(&entry.file)
        )?;
    }
    writeln!(w, r#"  </Collection>"#)?;
    writeln!(w, r#"</VTKFile>"#)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_dataset() {
        let entries = [
            PvdEntry {
                time: 0.5,
                file: "job.1.vtu".to_string(),
            },
            PvdEntry {
                time: 1.0,
                file: "job.2.vtu".to_string(),
            },
        ];
        let mut out = Vec::new();
        write_pvd_to(&mut out, &entries).expect("write to memory");
        let text = String::from_utf8(out).expect("utf-8");

        assert!(text.contains(r#"<VTKFile type="Collection""#));
        assert!(text.contains(r#"<DataSet timestep="0.5" group="" part="0" file="job.1.vtu"/>"#));
        assert!(text.contains(r#"<DataSet timestep="1.0" group="" part="0" file="job.2.vtu"/>"#));
        assert_eq!(text.matches("<DataSet").count(), 2);
    }
}
