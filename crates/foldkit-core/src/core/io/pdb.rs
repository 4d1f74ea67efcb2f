use crate::core::io::traits::StructureFile;
use crate::core::models::structure::{PseudoAtom, StructureModel};
use nalgebra::Point3;
use std::collections::HashSet;
use std::io::{self, BufRead, Write};
use thiserror::Error;

pub const DEFAULT_HEADER: &str = "MOCK PROTEIN";

#[derive(Debug, Clone, PartialEq)]
pub struct PdbMetadata {
    pub header: Option<String>,
    pub remarks: Vec<String>,
}

impl Default for PdbMetadata {
    fn default() -> Self {
        Self {
            header: Some(DEFAULT_HEADER.to_string()),
            remarks: vec!["REMARK   1 GENERATED BY FOLDKIT".to_string()],
        }
    }
}

impl PdbMetadata {
    pub fn with_header(header: impl Into<String>) -> Self {
        Self {
            header: Some(header.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: PdbParseErrorKind,
    },
    #[error("Inconsistent data: {0}")]
    Inconsistency(String),
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Required field in columns {columns} is empty")]
    MissingRequiredField { columns: String },
    #[error("Line is too short for ATOM/HETATM record (must be at least 54 chars)")]
    LineTooShort,
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end)
        .or_else(|| line.get(start..))
        .unwrap_or("")
        .trim()
}

fn parse_int<T: std::str::FromStr>(
    line: &str,
    line_num: usize,
    (start, end): (usize, usize),
) -> Result<T, PdbError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidInt {
            columns: format!("{}-{}", start + 1, end),
            value: value.into(),
        },
    })
}

fn parse_float(
    line: &str,
    line_num: usize,
    (start, end): (usize, usize),
    default: Option<f64>,
) -> Result<f64, PdbError> {
    let value = slice_and_trim(line, start, end);
    if value.is_empty() {
        if let Some(d) = default {
            return Ok(d);
        }
    }
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidFloat {
            columns: format!("{}-{}", start + 1, end),
            value: value.into(),
        },
    })
}

/// Column layout of `name` as written in columns 13-16: names shorter than four
/// characters start in column 14.
fn atom_name_field(name: &str) -> String {
    if name.len() >= 4 {
        name.to_string()
    } else {
        format!(" {:<3}", name)
    }
}

/// Rejects atoms whose serial, residue number or coordinates would overflow their fixed columns.
fn check_fixed_columns(atom: &PseudoAtom) -> Result<(), PdbError> {
    if atom.serial >= 99_999 {
        return Err(PdbError::Inconsistency(format!(
            "Atom serial {} does not fit the five-column serial field",
            atom.serial
        )));
    }
    if !(-999..=9999).contains(&atom.residue_number) {
        return Err(PdbError::Inconsistency(format!(
            "Residue number {} of atom {} does not fit the four-column residue field",
            atom.residue_number, atom.serial
        )));
    }
    let coords = [atom.position.x, atom.position.y, atom.position.z];
    if let Some(value) = coords
        .iter()
        .find(|v| !v.is_finite() || format!("{:.3}", v).len() > 8)
    {
        return Err(PdbError::Inconsistency(format!(
            "Coordinate {:.3} of atom {} does not fit the eight-column coordinate field",
            value, atom.serial
        )));
    }
    Ok(())
}

fn element_from_name(name: &str) -> String {
    name.chars()
        .find(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_string())
        .unwrap_or_default()
}

pub struct PdbFile;

impl StructureFile for PdbFile {
    type Metadata = PdbMetadata;
    type Error = PdbError;

    fn read_from(
        reader: &mut impl BufRead,
    ) -> Result<(StructureModel, Self::Metadata), Self::Error> {
        let mut model = StructureModel::new();
        let mut metadata = PdbMetadata {
            header: None,
            remarks: Vec::new(),
        };
        let mut seen_serials = HashSet::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            let record_type = slice_and_trim(&line, 0, 6);
            match record_type {
                "ATOM" | "HETATM" => {
                    if line.len() < 54 {
                        return Err(PdbError::Parse {
                            line: line_num,
                            kind: PdbParseErrorKind::LineTooShort,
                        });
                    }

                    let serial: usize = parse_int(&line, line_num, (6, 11))?;
                    if !seen_serials.insert(serial) {
                        return Err(PdbError::Inconsistency(format!(
                            "Duplicate atom serial: {}",
                            serial
                        )));
                    }

                    let name = slice_and_trim(&line, 12, 16);
                    if name.is_empty() {
                        return Err(PdbError::Parse {
                            line: line_num,
                            kind: PdbParseErrorKind::MissingRequiredField {
                                columns: "13-16".into(),
                            },
                        });
                    }
                    let residue_name = slice_and_trim(&line, 17, 20);
                    let chain_id = slice_and_trim(&line, 21, 22)
                        .chars()
                        .next()
                        .unwrap_or('A');
                    let residue_number: isize = parse_int(&line, line_num, (22, 26))?;

                    let x = parse_float(&line, line_num, (30, 38), None)?;
                    let y = parse_float(&line, line_num, (38, 46), None)?;
                    let z = parse_float(&line, line_num, (46, 54), None)?;
                    let occupancy = parse_float(&line, line_num, (54, 60), Some(1.0))?;
                    let temp_factor = parse_float(&line, line_num, (60, 66), Some(0.0))?;

                    let element = match slice_and_trim(&line, 76, 78) {
                        "" => element_from_name(name),
                        symbol => symbol.to_string(),
                    };

                    model.add_atom(PseudoAtom {
                        serial,
                        name: name.to_string(),
                        residue_name: residue_name.to_string(),
                        chain_id,
                        residue_number,
                        position: Point3::new(x, y, z),
                        occupancy,
                        temp_factor,
                        element,
                    });
                }
                "HEADER" => {
                    metadata.header = Some(line.get(10..).unwrap_or("").trim().to_string());
                }
                "REMARK" => metadata.remarks.push(line.clone()),
                "END" | "ENDMDL" => break,
                _ => {}
            }
        }

        if seen_serials.is_empty() {
            return Err(PdbError::MissingRecord("ATOM/HETATM records".into()));
        }
        Ok((model, metadata))
    }

    fn write_to(
        model: &StructureModel,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        model.atoms().iter().try_for_each(check_fixed_columns)?;

        if let Some(header) = &metadata.header {
            writeln!(writer, "HEADER    {}", header)?;
        }
        for remark in &metadata.remarks {
            writeln!(writer, "{}", remark)?;
        }

        let atoms = model.atoms();
        for (i, atom) in atoms.iter().enumerate() {
            writeln!(
                writer,
                "{:<6}{:>5} {:<4} {:>3} {:1}{:>4}    {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}",
                "ATOM",
                atom.serial,
                atom_name_field(&atom.name),
                atom.residue_name,
                atom.chain_id,
                atom.residue_number,
                atom.position.x,
                atom.position.y,
                atom.position.z,
                atom.occupancy,
                atom.temp_factor,
                atom.element
            )?;

            let chain_ends = atoms
                .get(i + 1)
                .is_none_or(|next| next.chain_id != atom.chain_id);
            if chain_ends {
                writeln!(
                    writer,
                    "{:<6}{:>5}      {:>3} {:1}{:>4}",
                    "TER",
                    atom.serial + 1,
                    atom.residue_name,
                    atom.chain_id,
                    atom.residue_number
                )?;
            }
        }

        writeln!(writer, "END")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear_model(residues: &[&str], step: f64) -> StructureModel {
        let mut model = StructureModel::new();
        for (i, name) in residues.iter().enumerate() {
            model.push_residue(name, 'A', Point3::new((i + 1) as f64 * step, 0.0, 0.0));
        }
        model
    }

    fn write(model: &StructureModel) -> String {
        PdbFile::write_to_string(model, &PdbMetadata::default()).unwrap()
    }

    #[test]
    fn write_produces_header_atoms_ter_and_end() {
        let text = write(&linear_model(&["ALA", "CYS"], 1.5));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "HEADER    MOCK PROTEIN");
        assert_eq!(lines[1], "REMARK   1 GENERATED BY FOLDKIT");
        assert_eq!(
            lines[2],
            "ATOM      1  CA  ALA A   1       1.500   0.000   0.000  1.00  0.00           C"
        );
        assert_eq!(
            lines[3],
            "ATOM      2  CA  CYS A   2       3.000   0.000   0.000  1.00  0.00           C"
        );
        assert_eq!(lines[4], "TER       3      CYS A   2");
        assert_eq!(lines[5], "END");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn atom_records_use_fixed_columns() {
        let text = write(&linear_model(&["GLY"], 12.345));
        let line = text.lines().find(|l| l.starts_with("ATOM")).unwrap();
        assert_eq!(line.len(), 78);
        assert_eq!(&line[6..11], "    1");
        assert_eq!(&line[12..16], " CA ");
        assert_eq!(&line[17..20], "GLY");
        assert_eq!(&line[21..22], "A");
        assert_eq!(&line[22..26], "   1");
        assert_eq!(&line[30..38], "  12.345");
        assert_eq!(&line[76..78], " C");
    }

    #[test]
    fn empty_model_writes_header_and_end_only() {
        let text = write(&StructureModel::new());
        assert!(!text.contains("ATOM"));
        assert!(!text.contains("TER"));
        assert!(text.ends_with("END\n"));
    }

    #[test]
    fn ter_is_written_after_each_chain() {
        let mut model = StructureModel::new();
        model.add_atom(PseudoAtom::new(1, "ALA", 'A', 1, Point3::origin()));
        model.add_atom(PseudoAtom::new(2, "GLY", 'B', 1, Point3::origin()));
        let text = write(&model);
        assert_eq!(text.lines().filter(|l| l.starts_with("TER")).count(), 2);
    }

    #[test]
    fn written_model_reads_back_with_same_residues_and_coordinates() {
        let mut model = StructureModel::new();
        model.push_residue("MET", 'A', Point3::new(-1.2345, 2.0, 3.5));
        model.push_residue("LYS", 'A', Point3::new(0.0, -10.0, 7.25));
        model.push_residue("UNK", 'A', Point3::new(99.999, 0.001, -0.5));

        let text = write(&model);
        let (read, metadata) = PdbFile::read_from_str(&text).unwrap();

        assert_eq!(metadata.header.as_deref(), Some("MOCK PROTEIN"));
        assert_eq!(metadata.remarks.len(), 1);
        assert_eq!(read.len(), model.len());
        assert_eq!(
            read.residue_numbers().collect::<Vec<_>>(),
            model.residue_numbers().collect::<Vec<_>>()
        );
        assert_eq!(read.one_letter_sequence(), "MKX");
        for (a, b) in read.positions().zip(model.positions()) {
            assert!((a - b).norm() < 1e-3);
        }
        assert_eq!(read.atoms()[0].element, "C");
    }

    #[test]
    fn read_accepts_minimal_records_without_optional_columns() {
        let text = "ATOM      1  CA  ALA A   1       1.000   2.000   3.000\nEND\n";
        let (model, metadata) = PdbFile::read_from_str(text).unwrap();
        assert!(metadata.header.is_none());
        let atom = &model.atoms()[0];
        assert_eq!(atom.occupancy, 1.0);
        assert_eq!(atom.temp_factor, 0.0);
        assert_eq!(atom.element, "C");
    }

    #[test]
    fn read_stops_at_end_record() {
        let text = "ATOM      1  CA  ALA A   1       1.000   2.000   3.000\nEND\nATOM      2  CA  ALA A   2       1.000   2.000   3.000\n";
        let (model, _) = PdbFile::read_from_str(text).unwrap();
        assert_eq!(model.len(), 1);
    }

    #[test]
    fn read_rejects_short_atom_lines() {
        let err = PdbFile::read_from_str("ATOM      1  CA  ALA A   1\n").unwrap_err();
        assert!(matches!(
            err,
            PdbError::Parse {
                line: 1,
                kind: PdbParseErrorKind::LineTooShort
            }
        ));
    }

    #[test]
    fn read_reports_invalid_coordinates_with_columns() {
        let text = "HEADER    X\nATOM      1  CA  ALA A   1       1.000   abc     3.000\n";
        let err = PdbFile::read_from_str(text).unwrap_err();
        match err {
            PdbError::Parse {
                line,
                kind: PdbParseErrorKind::InvalidFloat { columns, value },
            } => {
                assert_eq!(line, 2);
                assert_eq!(columns, "39-46");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn write_rejects_values_wider_than_their_columns() {
        let wide_x = linear_model(&["ALA", "GLY"], 6000.0);
        assert!(matches!(
            PdbFile::write_to_string(&wide_x, &PdbMetadata::default()),
            Err(PdbError::Inconsistency(msg)) if msg.contains("12000.000")
        ));

        let mut deep_negative = StructureModel::new();
        deep_negative.push_residue("ALA", 'A', Point3::new(-1000.0, 0.0, 0.0));
        assert!(PdbFile::write_to_string(&deep_negative, &PdbMetadata::default()).is_err());

        let mut long_chain = StructureModel::new();
        for _ in 0..10_000 {
            long_chain.push_residue("ALA", 'A', Point3::origin());
        }
        assert!(matches!(
            PdbFile::write_to_string(&long_chain, &PdbMetadata::default()),
            Err(PdbError::Inconsistency(msg)) if msg.contains("10000")
        ));
    }

    #[test]
    fn extreme_representable_values_round_trip() {
        let mut model = StructureModel::new();
        model.push_residue("ALA", 'A', Point3::new(9999.999, -999.999, 0.0));
        let text = write(&model);
        assert!(text.lines().all(|l| !l.starts_with("ATOM") || l.len() == 78));
        let (read, _) = PdbFile::read_from_str(&text).unwrap();
        assert!((read.atoms()[0].position.x - 9999.999).abs() < 1e-6);
        assert!((read.atoms()[0].position.y + 999.999).abs() < 1e-6);
    }

    #[test]
    fn read_rejects_duplicate_serials() {
        let text = "ATOM      1  CA  ALA A   1       1.000   2.000   3.000\nATOM      1  CA  GLY A   2       1.000   2.000   3.000\n";
        assert!(matches!(
            PdbFile::read_from_str(text),
            Err(PdbError::Inconsistency(_))
        ));
    }

    #[test]
    fn read_requires_at_least_one_atom() {
        assert!(matches!(
            PdbFile::read_from_str("HEADER    EMPTY\nEND\n"),
            Err(PdbError::MissingRecord(_))
        ));
    }

    #[test]
    fn write_and_read_through_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.pdb");
        let model = linear_model(&["SER", "THR", "TYR"], 3.8);

        PdbFile::write_to_path(&model, &PdbMetadata::with_header("TRACE"), &path).unwrap();
        let (read, metadata) = PdbFile::read_from_path(&path).unwrap();

        assert_eq!(metadata.header.as_deref(), Some("TRACE"));
        assert_eq!(read.one_letter_sequence(), "STY");
    }
}
