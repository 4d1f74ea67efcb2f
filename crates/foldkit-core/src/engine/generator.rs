use super::config::{CoordinatePolicy, GenerationConfig};
use crate::core::models::sequence::Sequence;
use crate::core::models::structure::StructureModel;
use nalgebra::Point3;
use rand::prelude::*;
use rand::rngs::StdRng;
use tracing::instrument;

/// Builds a synthetic CA trace for `sequence`: one pseudo-atom per residue, numbered from 1.
///
/// With `config.seed` set the output is fully reproducible; without it the generator is
/// seeded from system entropy.
#[instrument(level = "debug", skip_all, fields(residues = sequence.len(), policy = %config.policy, seed = ?config.seed))]
pub fn generate(sequence: &Sequence, config: &GenerationConfig) -> StructureModel {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    generate_with_rng(sequence, &config.policy, config.chain_id, &mut rng)
}

pub fn generate_with_rng(
    sequence: &Sequence,
    policy: &CoordinatePolicy,
    chain_id: char,
    rng: &mut impl Rng,
) -> StructureModel {
    let mut model = StructureModel::with_capacity(sequence.len());
    for (index, residue_name) in sequence.three_letter_codes().enumerate() {
        let position = place(policy, index, rng);
        model.push_residue(residue_name, chain_id, position);
    }
    model
}

fn place(policy: &CoordinatePolicy, index: usize, rng: &mut impl Rng) -> Point3<f64> {
    match *policy {
        CoordinatePolicy::Helical {
            radius,
            jitter,
            pitch,
            degrees_per_residue,
        } => {
            let theta = (index as f64 * degrees_per_residue).to_radians();
            let r = if jitter > 0.0 {
                radius + rng.gen_range(-jitter..=jitter)
            } else {
                radius
            };
            Point3::new(r * theta.cos(), r * theta.sin(), index as f64 * pitch)
        }
        CoordinatePolicy::Linear { step } => Point3::new((index + 1) as f64 * step, 0.0, 0.0),
        CoordinatePolicy::Random { half_extent } => Point3::new(
            rng.gen_range(-half_extent..=half_extent),
            rng.gen_range(-half_extent..=half_extent),
            rng.gen_range(-half_extent..=half_extent),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::GenerationConfigBuilder;

    fn config(policy: CoordinatePolicy, seed: Option<u64>) -> GenerationConfig {
        GenerationConfigBuilder::new()
            .policy(policy)
            .seed(seed)
            .build()
            .unwrap()
    }

    fn all_policies() -> [CoordinatePolicy; 3] {
        [
            CoordinatePolicy::helical(),
            CoordinatePolicy::linear(1.5),
            CoordinatePolicy::random(10.0),
        ]
    }

    #[test]
    fn linear_policy_spaces_residues_along_x() {
        let seq = Sequence::new("ACDEFGH").unwrap();
        let model = generate(&seq, &config(CoordinatePolicy::linear(1.5), None));

        let positions: Vec<_> = model.positions().collect();
        assert_eq!(positions.len(), 7);
        assert_eq!(positions[0].x, 1.5);
        assert_eq!(positions[1].x, 3.0);
        assert!(positions.iter().all(|p| p.y == 0.0 && p.z == 0.0));
    }

    #[test]
    fn every_policy_yields_one_record_per_residue_numbered_from_one() {
        let seq = Sequence::new("MKTAYIAKQRQISFVKSHFSRQ").unwrap();
        for policy in all_policies() {
            let model = generate(&seq, &config(policy, Some(3)));
            assert_eq!(model.len(), seq.len());
            assert_eq!(
                model.residue_numbers().collect::<Vec<_>>(),
                (1..=seq.len() as isize).collect::<Vec<_>>()
            );
            assert_eq!(model.one_letter_sequence(), seq.as_str());
        }
    }

    #[test]
    fn same_seed_gives_identical_coordinates() {
        let seq = Sequence::new("ACDEFGHIKLMNPQRSTVWY").unwrap();
        for policy in all_policies() {
            let first = generate(&seq, &config(policy, Some(42)));
            let second = generate(&seq, &config(policy, Some(42)));
            assert_eq!(first, second, "{policy}");
        }
    }

    #[test]
    fn different_seeds_change_random_coordinates() {
        let seq = Sequence::new("ACDEFGHIKL").unwrap();
        let a = generate(&seq, &config(CoordinatePolicy::random(10.0), Some(1)));
        let b = generate(&seq, &config(CoordinatePolicy::random(10.0), Some(2)));
        assert_ne!(a, b);
    }

    #[test]
    fn random_policy_stays_inside_the_cube() {
        let seq = Sequence::new("A".repeat(200)).unwrap();
        let model = generate(&seq, &config(CoordinatePolicy::random(10.0), Some(9)));
        for p in model.positions() {
            assert!(p.x.abs() <= 10.0 && p.y.abs() <= 10.0 && p.z.abs() <= 10.0);
        }
    }

    #[test]
    fn widest_accepted_random_cube_generates_within_bounds() {
        let seq = Sequence::new("ACDEFGHIKL").unwrap();
        let model = generate(&seq, &config(CoordinatePolicy::random(999.999), Some(3)));
        assert_eq!(model.len(), 10);
        assert!(model.positions().all(|p| p.coords.amax() <= 999.999));
    }

    #[test]
    fn helical_policy_keeps_radius_within_jitter_and_climbs_by_pitch() {
        let seq = Sequence::new("A".repeat(36)).unwrap();
        let model = generate(&seq, &config(CoordinatePolicy::helical(), Some(5)));
        for (i, p) in model.positions().enumerate() {
            let r = (p.x * p.x + p.y * p.y).sqrt();
            assert!((r - 2.3).abs() <= 0.3 + 1e-9, "radius {r} at {i}");
            assert!((p.z - i as f64 * 1.5).abs() < 1e-9);
        }
    }

    #[test]
    fn helical_policy_without_jitter_is_deterministic_even_unseeded() {
        let policy = CoordinatePolicy::Helical {
            radius: 2.3,
            jitter: 0.0,
            pitch: 1.5,
            degrees_per_residue: 100.0,
        };
        let seq = Sequence::new("ACDEFGHIKL").unwrap();
        let a = generate(&seq, &config(policy, None));
        let b = generate(&seq, &config(policy, None));
        assert_eq!(a, b);
        let second = a.atoms()[1].position;
        let theta = 100f64.to_radians();
        assert!((second.x - 2.3 * theta.cos()).abs() < 1e-12);
        assert!((second.y - 2.3 * theta.sin()).abs() < 1e-12);
    }

    #[test]
    fn chain_id_is_applied_to_every_atom() {
        let seq = Sequence::new("ACDE").unwrap();
        let config = GenerationConfigBuilder::new()
            .chain_id('C')
            .seed(Some(1))
            .build()
            .unwrap();
        let model = generate(&seq, &config);
        assert!(model.atoms().iter().all(|a| a.chain_id == 'C'));
    }

    #[test]
    fn empty_sequence_gives_empty_model() {
        let seq = Sequence::new("").unwrap();
        assert!(generate(&seq, &config(CoordinatePolicy::linear(1.5), None)).is_empty());
    }
}
