//! Reader for XYZ geometry files.
//!
//! The expected layout is the plain XYZ format:
//!
//! ```text
//! 3
//! water
//! O  0.000  0.000  0.117
//! H  0.000  0.757 -0.467
//! H  0.000 -0.757 -0.467
//! ```
//!
//! The first line holds the atom count, the second line is a free-form comment,
//! and every following line is `symbol x y z`. Columns after `z` are ignored and
//! so is anything after the declared number of atoms.

use crate::error::{Result, SurfaceError};
use nalgebra::Point3;
use std::path::Path;
use tracing::{debug, trace};

/// One unresolved atom line of an XYZ file.
#[derive(Debug, Clone, PartialEq)]
pub struct XyzRecord {
    /// Element symbol as written in the file
    pub symbol: String,
    /// Cartesian coordinates in Å
    pub position: Point3<f64>,
}

/// Parse the contents of an XYZ file.
///
/// Fails if the count line is not a positive integer, if fewer atom lines than
/// announced are present, or if an atom line is not `symbol x y z`.
pub fn parse_xyz(source: &str) -> Result<Vec<XyzRecord>> {
    let mut lines = source.lines();

    let count_line = lines
        .next()
        .ok_or_else(|| SurfaceError::parse(1, "missing atom count line"))?;
    let n_atoms = match count_line.trim().parse::<usize>() {
        Ok(0) => return Err(SurfaceError::parse(1, "atom count must be positive")),
        Ok(n) => n,
        Err(_) => {
            return Err(SurfaceError::parse(
                1,
                format!("invalid atom count '{}'", count_line.trim()),
            ))
        }
    };

    // Comment line
    if lines.next().is_none() {
        return Err(SurfaceError::parse(
            2,
            format!("expected {n_atoms} atom lines, found 0"),
        ));
    }

    let mut records = Vec::with_capacity(n_atoms);
    for (i, line) in lines.take(n_atoms).enumerate() {
        records.push(parse_atom_line(line, i + 3)?);
    }
    if records.len() < n_atoms {
        return Err(SurfaceError::parse(
            records.len() + 3,
            format!("expected {n_atoms} atom lines, found {}", records.len()),
        ));
    }

    debug!("Parsed {} atoms from XYZ source", records.len());
    Ok(records)
}

/// Read and parse an XYZ file from disk.
pub fn read_xyz_file(path: impl AsRef<Path>) -> Result<Vec<XyzRecord>> {
    let path = path.as_ref();
    trace!("Reading geometry from {}", path.display());
    let source = std::fs::read_to_string(path)?;
    parse_xyz(&source)
}

fn parse_atom_line(line: &str, line_no: usize) -> Result<XyzRecord> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 4 {
        return Err(SurfaceError::parse(
            line_no,
            format!("expected 'symbol x y z', got '{}'", line.trim()),
        ));
    }

    let mut coords = [0.0; 3];
    for (coord, field) in coords.iter_mut().zip(&fields[1..4]) {
        *coord = field.parse::<f64>().map_err(|_| {
            SurfaceError::parse(line_no, format!("invalid coordinate '{field}'"))
        })?;
        if !coord.is_finite() {
            return Err(SurfaceError::parse(
                line_no,
                format!("non-finite coordinate '{field}'"),
            ));
        }
    }

    Ok(XyzRecord {
        symbol: fields[0].to_string(),
        position: Point3::new(coords[0], coords[1], coords[2]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_water() {
        let src = "3\nwater\nO 0.0 0.0 0.117\nH 0.0 0.757 -0.467\nH 0.0 -0.757 -0.467\n";
        let records = parse_xyz(src).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].symbol, "O");
        assert_eq!(records[1].position, Point3::new(0.0, 0.757, -0.467));
        assert_eq!(records[2].symbol, "H");
    }

    #[test]
    fn test_extra_columns_and_trailing_lines_are_ignored() {
        let src = " 1 \n\nAr 1.0 2.0 3.0 0.5\nNe 0.0 0.0 0.0\n";
        let records = parse_xyz(src).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].position, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_bad_count_line() {
        for src in ["", "abc\ncomment\n", "0\ncomment\n", "-2\ncomment\n"] {
            match parse_xyz(src) {
                Err(SurfaceError::Parse { line, .. }) => assert_eq!(line, 1),
                other => panic!("Expected a parse error for {src:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_truncated_atom_list() {
        let src = "3\ncomment\nC 0 0 0\nC 1.5 0 0\n";
        match parse_xyz(src) {
            Err(SurfaceError::Parse { line, details }) => {
                assert_eq!(line, 5);
                assert!(details.contains("found 2"), "{details}");
            }
            other => panic!("Expected a parse error, got {other:?}"),
        }

        assert!(matches!(
            parse_xyz("2\n"),
            Err(SurfaceError::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn test_bad_atom_line() {
        let missing_coord = "1\ncomment\nC 0.0 1.0\n";
        assert!(matches!(
            parse_xyz(missing_coord),
            Err(SurfaceError::Parse { line: 3, .. })
        ));

        let not_a_number = "2\ncomment\nC 0.0 1.0 2.0\nO 0.0 x 2.0\n";
        match parse_xyz(not_a_number) {
            Err(SurfaceError::Parse { line, details }) => {
                assert_eq!(line, 4);
                assert!(details.contains("'x'"));
            }
            other => panic!("Expected a parse error, got {other:?}"),
        }

        for coord in ["nan", "NaN", "inf", "-inf", "infinity", "1e400"] {
            let src = format!("2\ncomment\nC 0.0 0.0 0.0\nC {coord} 0.0 0.0\n");
            match parse_xyz(&src) {
                Err(SurfaceError::Parse { line, details }) => {
                    assert_eq!(line, 4);
                    assert!(details.contains("non-finite"), "{details}");
                }
                other => panic!("Expected a parse error for {coord}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_read_fixture() {
        let root = env!("CARGO_MANIFEST_DIR");
        let path = format!("{}/{}", root, "test-data/benzene.xyz");
        let records = read_xyz_file(&path).unwrap();

        assert_eq!(records.len(), 12);
        assert_eq!(records.iter().filter(|r| r.symbol == "C").count(), 6);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            read_xyz_file("does/not/exist.xyz"),
            Err(SurfaceError::Io { .. })
        ));
    }
}
