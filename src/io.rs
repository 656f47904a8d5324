use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use flate2::Compression;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;

use crate::genealogy::Genealogy;

fn is_stdio(p: &Path) -> bool {
    p.as_os_str() == "-"
}

fn is_gz(p: &Path) -> bool {
    p.to_string_lossy().ends_with(".gz")
}

/// Open a population data source for line reading.
/// `-` reads stdin; a path ending in `.gz` is decompressed on the fly.
pub fn open_source<P: AsRef<Path>>(path: P) -> io::Result<Box<dyn BufRead>> {
    let p = path.as_ref();
    if is_stdio(p) {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let f = File::open(p)?;
    if is_gz(p) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(f))))
    } else {
        Ok(Box::new(BufReader::new(f)))
    }
}

/// Open an output sink: `-` is stdout, `.gz` paths are gzip-compressed.
fn create_sink(p: &Path) -> io::Result<Box<dyn Write>> {
    if is_stdio(p) {
        return Ok(Box::new(BufWriter::new(io::stdout().lock())));
    }
    let f = File::create(p)?;
    if is_gz(p) {
        Ok(Box::new(BufWriter::new(GzEncoder::new(f, Compression::default()))))
    } else {
        Ok(Box::new(BufWriter::new(f)))
    }
}

/// Write the parent array, one integer per line in vertex order (`-1` for none).
pub fn write_parents<P: AsRef<Path>>(path: P, genealogy: &Genealogy) -> io::Result<()> {
    let mut out = create_sink(path.as_ref())?;
    write!(&mut out, "{genealogy}")?;
    out.flush()
}

/// Write a single Newick string followed by a newline.
pub fn write_newick<P: AsRef<Path>>(path: P, newick: &str) -> io::Result<()> {
    let mut out = create_sink(path.as_ref())?;
    writeln!(&mut out, "{newick}")?;
    out.flush()
}

/// Write a labeled square matrix as TSV.
/// If `path` ends with `.gz`, the output is gzip-compressed; `-` writes to stdout.
pub fn write_matrix_tsv<P: AsRef<Path>, T: std::fmt::Display>(
    path: P,
    names: &[String],
    mat: &[Vec<T>],
) -> io::Result<()> {
    if names.len() != mat.len() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} names for a {}-row matrix", names.len(), mat.len()),
        ));
    }
    let mut out = create_sink(path.as_ref())?;

    // Header row
    write!(&mut out, "\t")?;
    for (k, name) in names.iter().enumerate() {
        if k > 0 { write!(&mut out, "\t")?; }
        write!(&mut out, "{}", name)?;
    }
    writeln!(&mut out)?;

    // Rows
    for (name, row) in names.iter().zip(mat) {
        write!(&mut out, "{}", name)?;
        for val in row {
            write!(&mut out, "\t{}", val)?;
        }
        writeln!(&mut out)?;
    }

    out.flush()
}
