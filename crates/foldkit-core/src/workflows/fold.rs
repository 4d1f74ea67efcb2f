use crate::core::io::pdb::{PdbFile, PdbMetadata};
use crate::core::io::traits::StructureFile;
use crate::core::models::sequence::Sequence;
use crate::core::models::structure::StructureModel;
use crate::engine::config::{FoldConfig, InputFormat};
use crate::engine::error::EngineError;
use crate::engine::generator;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::validation::{self, ValidationReport};
use tracing::info;

#[derive(Debug, Clone)]
pub struct FoldResult {
    pub sequence: Sequence,
    pub report: ValidationReport,
    pub model: StructureModel,
    /// Structure-file text of `model`, ready to be written out.
    pub pdb: String,
}

/// Validates `raw` input and builds a synthetic structure for it.
///
/// # Errors
///
/// Returns [`EngineError::Validation`] when the sequence fails the configured policy,
/// [`EngineError::Residue`] for an unknown three-letter token under the `Reject` policy,
/// and [`EngineError::Config`] for invalid generation parameters or a layout that would not
/// fit the fixed columns of the structure file.
pub fn run(
    raw: &str,
    config: &FoldConfig,
    reporter: &ProgressReporter,
) -> Result<FoldResult, EngineError> {
    config.generation.policy.validate()?;

    let one_letter = match config.input_format {
        InputFormat::OneLetter => raw.to_string(),
        InputFormat::ThreeLetter => reporter.phase("Converting residue codes", || {
            validation::convert_three_letter_input(raw, config.validation.unknown_residues)
        })?,
    };

    let report = reporter.phase("Validating sequence", || {
        validation::validate(&one_letter, &config.validation)
    });
    reporter.report(Progress::Message(report.message.clone()));
    let sequence = report.clone().into_result()?;
    info!("Validated sequence of {} residues.", sequence.len());
    config.generation.policy.check_extent(sequence.len())?;

    let model = reporter.phase("Generating coordinates", || {
        generator::generate(&sequence, &config.generation)
    });
    info!(
        "Generated {} pseudo-atoms using {} layout.",
        model.len(),
        config.generation.policy
    );

    let metadata = PdbMetadata::with_header(config.generation.header.clone());
    let pdb = reporter.phase("Writing structure file", || {
        PdbFile::write_to_string(&model, &metadata)
    })?;

    Ok(FoldResult {
        sequence,
        report,
        model,
        pdb,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::{
        CoordinatePolicy, GenerationConfigBuilder, ValidationPolicy,
    };
    use std::sync::{Arc, Mutex};

    fn config(input_format: InputFormat, validation: ValidationPolicy) -> FoldConfig {
        FoldConfig {
            input_format,
            validation,
            generation: GenerationConfigBuilder::new()
                .policy(CoordinatePolicy::linear(1.5))
                .seed(Some(11))
                .build()
                .unwrap(),
        }
    }

    #[test]
    fn one_letter_input_produces_model_and_pdb_text() {
        let cfg = config(InputFormat::OneLetter, ValidationPolicy::strict());
        let result = run("mktayiakqr qisfvkshfsrq", &cfg, &ProgressReporter::new()).unwrap();

        assert_eq!(result.sequence.as_str(), "MKTAYIAKQRQISFVKSHFSRQ");
        assert!(result.report.valid);
        assert_eq!(result.model.len(), 22);
        assert!(result.pdb.starts_with("HEADER    MOCK PROTEIN\n"));
        assert_eq!(result.pdb.lines().filter(|l| l.starts_with("ATOM")).count(), 22);
        assert!(result.pdb.contains("ATOM      1  CA  MET A   1       1.500   0.000   0.000"));
        assert!(result.pdb.ends_with("END\n"));
    }

    #[test]
    fn invalid_sequence_is_reported_as_validation_error() {
        let cfg = config(InputFormat::OneLetter, ValidationPolicy::strict());
        let err = run("ACDEFGHIKLB", &cfg, &ProgressReporter::new()).unwrap_err();
        assert!(matches!(err, EngineError::Validation(ref msg) if msg.contains('B')));
    }

    #[test]
    fn three_letter_input_is_converted_before_validation() {
        let cfg = config(InputFormat::ThreeLetter, ValidationPolicy::permissive());
        let result = run("ALA GLY SER", &cfg, &ProgressReporter::new()).unwrap();
        assert_eq!(result.sequence.as_str(), "AGS");
        assert!(result.pdb.contains(" CA  SER A   3 "));
    }

    #[test]
    fn unknown_three_letter_token_becomes_unk_under_replace() {
        let cfg = config(InputFormat::ThreeLetter, ValidationPolicy::permissive());
        let result = run("ALA FOO GLY", &cfg, &ProgressReporter::new()).unwrap();
        assert_eq!(result.sequence.as_str(), "AXG");
        assert!(result.pdb.contains(" CA  UNK A   2 "));
    }

    #[test]
    fn unknown_three_letter_token_is_rejected_under_reject() {
        let cfg = config(InputFormat::ThreeLetter, ValidationPolicy::strict());
        let err = run("ALA FOO GLY", &cfg, &ProgressReporter::new()).unwrap_err();
        assert!(matches!(err, EngineError::Residue { .. }));
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let mut cfg = config(InputFormat::OneLetter, ValidationPolicy::strict());
        cfg.generation.policy = CoordinatePolicy::random(10.0);
        let a = run("ACDEFGHIKLMNPQ", &cfg, &ProgressReporter::new()).unwrap();
        let b = run("ACDEFGHIKLMNPQ", &cfg, &ProgressReporter::new()).unwrap();
        assert_eq!(a.pdb, b.pdb);
    }

    #[test]
    fn invalid_generation_policy_fails_before_validation() {
        let mut cfg = config(InputFormat::OneLetter, ValidationPolicy::strict());
        cfg.generation.policy = CoordinatePolicy::linear(-1.0);
        let err = run("ACDEFGHIKL", &cfg, &ProgressReporter::new()).unwrap_err();
        assert!(matches!(err, EngineError::Config { .. }));
    }

    #[test]
    fn layout_beyond_structure_file_columns_is_a_config_error() {
        let mut cfg = config(InputFormat::OneLetter, ValidationPolicy::strict());
        cfg.generation.policy = CoordinatePolicy::linear(10.0);
        let err = run(&"A".repeat(1200), &cfg, &ProgressReporter::new()).unwrap_err();
        assert!(matches!(err, EngineError::Config { .. }));
    }

    #[test]
    fn longest_strict_chain_reads_back_from_its_own_output() {
        let mut cfg = config(InputFormat::OneLetter, ValidationPolicy::strict());
        cfg.generation.policy = CoordinatePolicy::linear(8.0);
        let result = run(&"A".repeat(1200), &cfg, &ProgressReporter::new()).unwrap();
        let (read, _) = PdbFile::read_from_str(&result.pdb).unwrap();
        assert_eq!(read.len(), 1200);
        assert!((read.atoms()[1199].position.x - 9600.0).abs() < 1e-3);
    }

    #[test]
    fn progress_reports_each_phase() {
        let phases = Arc::new(Mutex::new(Vec::new()));
        let sink = phases.clone();
        let reporter = ProgressReporter::with_callback(Box::new(move |p| {
            if let Progress::PhaseStart { name } = p {
                sink.lock().unwrap().push(name);
            }
        }));
        let cfg = config(InputFormat::ThreeLetter, ValidationPolicy::permissive());
        run("ALA GLY", &cfg, &reporter).unwrap();

        assert_eq!(
            *phases.lock().unwrap(),
            vec![
                "Converting residue codes",
                "Validating sequence",
                "Generating coordinates",
                "Writing structure file",
            ]
        );
    }
}
