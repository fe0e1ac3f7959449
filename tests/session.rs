// Copyright © 2025 Hs293Go
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation
// the rights to use, copy, modify, merge, publish, distribute, sublicense,
// and/or sell copies of the Software, and to permit persons to whom the
// Software is furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included
// in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES
// OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT.
// IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
// DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT,
// TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE
// OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use fixtures::test_data;

use fopdt_tune::config::SimulationConfigBuilder;
use fopdt_tune::error::{FopdtError, MethodKind};
use fopdt_tune::identify::IdentificationMethod;
use fopdt_tune::model::ModelParameters;
use fopdt_tune::session::{Session, SharedSession};
use fopdt_tune::tuning::{tune, TuningMethod};

use approx::assert_relative_eq;

mod test_sequencing {
    use super::test_data::*;
    use super::*;

    #[test]
    fn test_identify_before_load_fails() {
        let mut session = Session::default();
        assert_eq!(
            session.identify(IdentificationMethod::Smith),
            Err(FopdtError::DatasetNotLoaded)
        );
        assert_eq!(
            session.compute_rmse(IdentificationMethod::Smith),
            Err(FopdtError::DatasetNotLoaded)
        );
    }

    #[test]
    fn test_everything_downstream_requires_a_model() {
        let session = loaded_session(small_curve());

        assert_eq!(
            session.tune(TuningMethod::Imc, None),
            Err(FopdtError::ModelNotIdentified)
        );
        assert_eq!(
            session.tune(TuningMethod::Itae, None),
            Err(FopdtError::ModelNotIdentified)
        );
        assert_eq!(
            session.transfer_function_coefficients(),
            Err(FopdtError::ModelNotIdentified)
        );
        assert_eq!(
            session.compare_response(),
            Err(FopdtError::ModelNotIdentified)
        );
        assert_eq!(
            session.simulate_open_loop(),
            Err(FopdtError::ModelNotIdentified)
        );
        assert_eq!(
            session.simulate_closed_loop(),
            Err(FopdtError::ModelNotIdentified)
        );
        assert_eq!(
            session.simulate_custom_pid(1.0, 1.0, 0.0, 1.0),
            Err(FopdtError::ModelNotIdentified)
        );
    }

    #[test]
    fn test_loading_a_dataset_discards_the_model() {
        let mut session = loaded_session(small_curve());
        assert!(session.identify(IdentificationMethod::Smith).is_ok());
        assert!(session.model().is_some());

        let (time, input, output) = fopdt_curve();
        let summary = session.load_dataset(time, input, output).unwrap();
        assert_eq!(summary.time_samples, SAMPLES);
        assert_eq!(summary.output_samples, SAMPLES);
        assert_eq!(session.model(), None);
    }

    #[test]
    fn test_rejected_dataset_leaves_session_untouched() {
        let mut session = loaded_session(small_curve());
        assert!(session.identify(IdentificationMethod::Smith).is_ok());

        assert!(matches!(
            session.load_dataset(vec![0.0, 1.0], vec![1.0], vec![0.0, 1.0]),
            Err(FopdtError::Parse(_))
        ));
        assert_eq!(session.dataset().map(|d| d.len()), Some(6));
        assert!(session.model().is_some());
    }

    #[test]
    fn test_failed_identification_keeps_previous_model() {
        let mut session = loaded_session(slow_tail_curve());
        let smith = session.identify(IdentificationMethod::Smith).unwrap();

        assert!(session.identify(IdentificationMethod::Sundaresan).is_err());
        assert_eq!(session.model(), Some(&smith));
    }

    #[test]
    fn test_each_identification_overwrites_the_model() {
        let mut session = loaded_session(fopdt_curve());
        let smith = session.identify(IdentificationMethod::Smith).unwrap();
        let sundaresan = session.identify(IdentificationMethod::Sundaresan).unwrap();
        assert_ne!(smith, sundaresan);
        assert_eq!(session.model(), Some(&sundaresan));
    }

    #[test]
    fn test_compute_rmse_does_not_change_the_model() {
        let mut session = loaded_session(fopdt_curve());
        let smith = session.identify(IdentificationMethod::Smith).unwrap();
        let rmse = session
            .compute_rmse(IdentificationMethod::Sundaresan)
            .unwrap();
        assert!(rmse >= 0.0);
        assert_eq!(session.model(), Some(&smith));
    }
}

mod test_tuning {
    use super::test_data::*;
    use super::*;

    #[test]
    fn test_documented_scenario_itae_succeeds() {
        let mut session = loaded_session(small_curve());
        let model = session.identify(IdentificationMethod::Smith).unwrap();
        assert_relative_eq!(model.theta(), 0.5);

        let report = session.tune(TuningMethod::Itae, None).unwrap();
        assert_eq!(report.method, TuningMethod::Itae);
        assert!(report.gains.kp.is_finite() && report.gains.kp > 0.0);
        assert!(report.gains.ti.is_finite() && report.gains.ti > 0.0);
        assert!(report.gains.td.is_finite() && report.gains.td > 0.0);
        assert_eq!(report.setpoint, 1.0);
    }

    #[test]
    fn test_itae_fails_when_dead_time_is_zero() {
        let mut session = loaded_session(slow_tail_curve());
        let model = session.identify(IdentificationMethod::Smith).unwrap();
        assert_eq!(model.theta(), 0.0);

        assert!(matches!(
            session.tune(TuningMethod::Itae, None),
            Err(FopdtError::NumericalError { .. })
        ));
        assert!(session.tune(TuningMethod::Imc, None).is_ok());
    }

    #[test]
    fn test_reported_gains_are_rounded() {
        let mut session = loaded_session(fopdt_curve());
        let model = session.identify(IdentificationMethod::Sundaresan).unwrap();
        let report = session.tune(TuningMethod::Imc, Some(2.0)).unwrap();
        let exact = tune(&model, TuningMethod::Imc, Some(2.0)).unwrap();

        for (rounded, exact) in [
            (report.gains.kp, exact.kp),
            (report.gains.ti, exact.ti),
            (report.gains.td, exact.td),
        ] {
            assert_relative_eq!(rounded, (exact * 1e4).round() / 1e4);
            assert!((rounded - exact).abs() <= 0.5e-4 + 1e-12);
        }
        assert_eq!(report.setpoint, STEP_AMPLITUDE);
    }

    #[test]
    fn test_rounding_follows_configuration() {
        let config = SimulationConfigBuilder::default()
            .rounding_digits(1)
            .build()
            .unwrap();
        let (time, input, output) = small_curve();
        let mut session = Session::new(config);
        assert!(session.load_dataset(time, input, output).is_ok());
        assert!(session.identify(IdentificationMethod::Smith).is_ok());

        let report = session.tune(TuningMethod::Imc, None).unwrap();
        // Ti = θ/2 + τ = 1.75
        assert_eq!(report.gains.ti, 1.8);
    }

    #[test]
    fn test_doubling_gain_halves_kp() {
        let base = ModelParameters::new(1.5, 4.0, 1.2).unwrap();
        let doubled = ModelParameters::new(3.0, 4.0, 1.2).unwrap();
        for method in [TuningMethod::Imc, TuningMethod::Itae] {
            let a = tune(&base, method, None).unwrap();
            let b = tune(&doubled, method, None).unwrap();
            assert_relative_eq!(b.kp, a.kp / 2.0, max_relative = 1e-12);
            assert_relative_eq!(b.ti, a.ti);
            assert_relative_eq!(b.td, a.td);
        }
    }

    #[test]
    fn test_imc_and_itae_differ() {
        let params = ModelParameters::new(1.5, 4.0, 1.2).unwrap();
        let imc = tune(&params, TuningMethod::Imc, None).unwrap();
        let itae = tune(&params, TuningMethod::Itae, None).unwrap();
        assert_ne!(imc, itae);
    }

    #[test]
    fn test_unknown_method_names() {
        assert_eq!(
            "ziegler-nichols".parse::<TuningMethod>(),
            Err(FopdtError::InvalidMethod {
                kind: MethodKind::Tuning,
                name: "ziegler-nichols".to_owned()
            })
        );
        assert_eq!("ITAE".parse::<TuningMethod>(), Ok(TuningMethod::Itae));
    }
}

mod test_shared_session {
    use super::test_data::*;
    use super::*;

    #[test]
    fn test_readers_see_complete_models() {
        let shared = SharedSession::default();
        let (time, input, output) = fopdt_curve();
        assert!(shared.load_dataset(time, input, output).is_ok());

        let candidates: Vec<ModelParameters> = IdentificationMethod::ALL
            .iter()
            .map(|&method| shared.identify(method).unwrap())
            .collect();

        std::thread::scope(|scope| {
            let writer = shared.clone();
            scope.spawn(move || {
                for i in 0..200 {
                    let method = IdentificationMethod::ALL[i % 2];
                    assert!(writer.identify(method).is_ok());
                }
            });

            for _ in 0..4 {
                let reader = shared.clone();
                let candidates = &candidates;
                scope.spawn(move || {
                    for _ in 0..200 {
                        let model = reader.model().unwrap();
                        assert!(candidates.contains(&model));
                        assert!(reader.tune(TuningMethod::Imc, None).is_ok());
                    }
                });
            }
        });
    }
}
