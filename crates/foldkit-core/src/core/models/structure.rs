use crate::core::utils::identifiers;
use nalgebra::Point3;

/// Atom name used for the single representative point of each residue.
pub const PSEUDO_ATOM_NAME: &str = "CA";

/// One pseudo-atom of a structure model.
///
/// Each record maps one-to-one onto an `ATOM` line of a structure file, so it carries the
/// bookkeeping fields of that format alongside its position.
#[derive(Debug, Clone, PartialEq)]
pub struct PseudoAtom {
    /// Atom serial number, starting at 1.
    pub serial: usize,
    /// Atom name (e.g., "CA").
    pub name: String,
    /// Three-letter residue name (e.g., "GLY", "UNK").
    pub residue_name: String,
    /// Chain identifier (e.g., 'A').
    pub chain_id: char,
    /// Residue sequence number, starting at 1.
    pub residue_number: isize,
    /// Coordinates in Angstroms.
    pub position: Point3<f64>,
    /// Occupancy, 1.0 for generated models.
    pub occupancy: f64,
    /// Temperature factor, 0.0 for generated models.
    pub temp_factor: f64,
    /// Element symbol (e.g., "C").
    pub element: String,
}

impl PseudoAtom {
    pub fn new(
        serial: usize,
        residue_name: &str,
        chain_id: char,
        residue_number: isize,
        position: Point3<f64>,
    ) -> Self {
        Self {
            serial,
            name: PSEUDO_ATOM_NAME.to_string(),
            residue_name: residue_name.to_string(),
            chain_id,
            residue_number,
            position,
            occupancy: 1.0,
            temp_factor: 0.0,
            element: "C".to_string(),
        }
    }
}

/// An ordered CA trace: one pseudo-atom per residue.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructureModel {
    atoms: Vec<PseudoAtom>,
}

impl StructureModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            atoms: Vec::with_capacity(capacity),
        }
    }

    /// Appends the next residue, numbering serial and residue number consecutively from 1.
    pub fn push_residue(&mut self, residue_name: &str, chain_id: char, position: Point3<f64>) {
        let next = self.atoms.len() + 1;
        self.atoms.push(PseudoAtom::new(
            next,
            residue_name,
            chain_id,
            next as isize,
            position,
        ));
    }

    /// Appends an atom as-is, keeping its own serial and residue numbers.
    pub fn add_atom(&mut self, atom: PseudoAtom) {
        self.atoms.push(atom);
    }

    pub fn atoms(&self) -> &[PseudoAtom] {
        &self.atoms
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn positions(&self) -> impl Iterator<Item = &Point3<f64>> + '_ {
        self.atoms.iter().map(|a| &a.position)
    }

    pub fn residue_numbers(&self) -> impl Iterator<Item = isize> + '_ {
        self.atoms.iter().map(|a| a.residue_number)
    }

    /// Distinct chain identifiers in order of first appearance.
    pub fn chain_ids(&self) -> Vec<char> {
        let mut chains = Vec::new();
        for atom in &self.atoms {
            if !chains.contains(&atom.chain_id) {
                chains.push(atom.chain_id);
            }
        }
        chains
    }

    /// One-letter sequence recovered from the residue names of `CA` atoms.
    pub fn one_letter_sequence(&self) -> String {
        self.atoms
            .iter()
            .filter(|a| a.name == PSEUDO_ATOM_NAME)
            .map(|a| identifiers::three_to_one(&a.residue_name))
            .collect()
    }

    /// Axis-aligned bounding box as `(min, max)`, or `None` for an empty model.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = self.atoms.first()?.position;
        Some(self.positions().fold((first, first), |(lo, hi), p| {
            (
                Point3::new(lo.x.min(p.x), lo.y.min(p.y), lo.z.min(p.z)),
                Point3::new(hi.x.max(p.x), hi.y.max(p.y), hi.z.max(p.z)),
            )
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_residue_numbers_consecutively_from_one() {
        let mut model = StructureModel::new();
        model.push_residue("ALA", 'A', Point3::origin());
        model.push_residue("GLY", 'A', Point3::new(1.0, 0.0, 0.0));
        model.push_residue("SER", 'A', Point3::new(2.0, 0.0, 0.0));

        assert_eq!(model.len(), 3);
        assert_eq!(model.residue_numbers().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(
            model.atoms().iter().map(|a| a.serial).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert!(model.atoms().iter().all(|a| a.name == "CA"));
    }

    #[test]
    fn one_letter_sequence_recovers_codes() {
        let mut model = StructureModel::new();
        for name in ["MET", "LYS", "UNK"] {
            model.push_residue(name, 'A', Point3::origin());
        }
        assert_eq!(model.one_letter_sequence(), "MKX");
    }

    #[test]
    fn chain_ids_are_distinct_and_ordered() {
        let mut model = StructureModel::new();
        model.add_atom(PseudoAtom::new(1, "ALA", 'B', 1, Point3::origin()));
        model.add_atom(PseudoAtom::new(2, "ALA", 'A', 1, Point3::origin()));
        model.add_atom(PseudoAtom::new(3, "ALA", 'B', 2, Point3::origin()));
        assert_eq!(model.chain_ids(), vec!['B', 'A']);
    }

    #[test]
    fn bounding_box_spans_all_positions() {
        let mut model = StructureModel::new();
        assert!(model.bounding_box().is_none());
        model.push_residue("ALA", 'A', Point3::new(-1.0, 2.0, 0.5));
        model.push_residue("ALA", 'A', Point3::new(3.0, -4.0, 0.0));
        let (lo, hi) = model.bounding_box().unwrap();
        assert_eq!(lo, Point3::new(-1.0, -4.0, 0.0));
        assert_eq!(hi, Point3::new(3.0, 2.0, 0.5));
    }
}
