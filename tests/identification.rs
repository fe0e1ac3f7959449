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

use fopdt_tune::dataset::Dataset;
use fopdt_tune::error::{FopdtError, ParseError};
use fopdt_tune::evaluate::{compare_methods, evaluate_method, rmse};
use fopdt_tune::identify::{identify, IdentificationMethod};
use fopdt_tune::model::{simulate, ModelParameters};

use approx::assert_relative_eq;

mod test_dataset_validation {
    use super::*;

    #[test]
    fn test_unequal_lengths_are_rejected() {
        assert_eq!(
            Dataset::new(vec![0.0, 1.0, 2.0], vec![1.0; 3], vec![0.0, 1.0]),
            Err(ParseError::UnequalLengths {
                time: 3,
                input: 3,
                output: 2
            })
        );
    }

    #[test]
    fn test_too_few_samples_are_rejected() {
        assert_eq!(
            Dataset::new(vec![0.0], vec![1.0], vec![0.0]),
            Err(ParseError::TooFewSamples(1))
        );
        assert_eq!(
            Dataset::new(vec![], vec![], vec![]),
            Err(ParseError::TooFewSamples(0))
        );
    }

    #[test]
    fn test_non_finite_samples_are_rejected() {
        let result = Dataset::new(vec![0.0, 1.0], vec![1.0, f64::INFINITY], vec![0.0, 1.0]);
        assert!(matches!(
            result,
            Err(ParseError::NonFinite {
                sequence: "input",
                index: 1,
                ..
            })
        ));
    }
}

mod test_identification {
    use super::test_data::*;
    use super::*;

    #[test]
    fn test_documented_smith_scenario() {
        let dataset = dataset(small_curve());
        let params = identify(&dataset, IdentificationMethod::Smith).unwrap();

        // t1 = 1.0 where output first reaches 0.283, t2 = 2.0 where it first reaches 0.632
        let (t1, t2) = (1.0, 2.0);
        let tau = 1.5 * (t2 - t1);
        assert_relative_eq!(params.k(), 1.0);
        assert_relative_eq!(params.tau(), tau);
        assert_relative_eq!(params.theta(), t2 - tau);
    }

    #[test]
    fn test_gain_does_not_depend_on_method() {
        let dataset = dataset(fopdt_curve());
        let smith = identify(&dataset, IdentificationMethod::Smith).unwrap();
        let sundaresan = identify(&dataset, IdentificationMethod::Sundaresan).unwrap();

        assert_eq!(smith.k(), sundaresan.k());
        assert_ne!(smith.tau(), sundaresan.tau());
    }

    #[test]
    fn test_both_methods_recover_an_exact_fopdt_process() {
        let dataset = dataset(fopdt_curve());
        for method in IdentificationMethod::ALL {
            let params = identify(&dataset, method).unwrap();
            assert_relative_eq!(params.k(), TRUE_K, epsilon = 1e-3);
            assert_relative_eq!(params.tau(), TRUE_TAU, epsilon = 0.2);
            assert_relative_eq!(params.theta(), TRUE_THETA, epsilon = 0.2);
        }
    }

    #[test]
    fn test_sundaresan_succeeds_whenever_85_percent_is_reached() {
        let params = identify(&dataset(small_curve()), IdentificationMethod::Sundaresan).unwrap();
        assert!(params.tau() > 0.0);
        assert!(params.theta() >= 0.0);
    }

    #[test]
    fn test_negative_dead_time_is_a_numerical_error() {
        let dataset = dataset(slow_tail_curve());
        assert!(matches!(
            identify(&dataset, IdentificationMethod::Sundaresan),
            Err(FopdtError::NumericalError {
                context: "dead time theta",
                ..
            })
        ));

        // Smith lands exactly on zero dead time, which is valid
        let smith = identify(&dataset, IdentificationMethod::Smith).unwrap();
        assert_relative_eq!(smith.tau(), 3.0);
        assert_eq!(smith.theta(), 0.0);
    }

    #[test]
    fn test_zero_mean_input_is_a_numerical_error() {
        let dataset = Dataset::new(
            vec![0.0, 1.0, 2.0],
            vec![-1.0, 0.0, 1.0],
            vec![0.0, 0.5, 1.0],
        )
        .unwrap();
        assert!(matches!(
            identify(&dataset, IdentificationMethod::Smith),
            Err(FopdtError::NumericalError {
                context: "process gain k",
                ..
            })
        ));
    }
}

mod test_model_simulation {
    use super::test_data::*;
    use super::*;

    #[test]
    fn test_simulation_is_zero_up_to_dead_time() {
        let params = ModelParameters::new(TRUE_K, TRUE_TAU, TRUE_THETA).unwrap();
        let time: Vec<f64> = (0..=60).map(|i| i as f64 / 20.0).collect();
        let response = simulate(&time, STEP_AMPLITUDE, &params);
        assert_eq!(response.len(), time.len());
        // t = 3.0 is exactly the dead time
        assert!(response.iter().all(|&y| y == 0.0));
    }

    #[test]
    fn test_simulation_approaches_gain_times_amplitude() {
        let params = ModelParameters::new(TRUE_K, TRUE_TAU, TRUE_THETA).unwrap();
        let response = simulate(&[1e3], STEP_AMPLITUDE, &params);
        assert_relative_eq!(response[0], TRUE_K * STEP_AMPLITUDE);
    }

    #[test]
    fn test_exact_model_reproduces_the_experiment() {
        let dataset = dataset(fopdt_curve());
        let params = ModelParameters::new(TRUE_K, TRUE_TAU, TRUE_THETA).unwrap();
        let simulated = simulate(dataset.time(), dataset.mean_input(), &params);
        assert_eq!(rmse(&dataset.zero_referenced_output(), &simulated), Ok(0.0));
    }
}

mod test_method_ranking {
    use super::test_data::*;
    use super::*;

    #[test]
    fn test_rmse_of_identified_models_is_small_and_non_negative() {
        let dataset = dataset(fopdt_curve());
        for method in IdentificationMethod::ALL {
            let evaluation = evaluate_method(&dataset, method, 4).unwrap();
            assert!(evaluation.rmse >= 0.0);
            assert!(evaluation.rmse < 0.05, "{method}: {}", evaluation.rmse);
        }
    }

    #[test]
    fn test_preferred_method_has_the_lowest_rmse() {
        let comparison = compare_methods(&dataset(fopdt_curve()), 4).unwrap();
        let preferred = comparison.preferred();
        assert!(preferred.rmse <= comparison.smith.rmse);
        assert!(preferred.rmse <= comparison.sundaresan.rmse);
    }

    #[test]
    fn test_equal_rmse_prefers_smith() {
        let mut comparison = compare_methods(&dataset(fopdt_curve()), 4).unwrap();
        comparison.sundaresan.rmse = comparison.smith.rmse;
        assert_eq!(comparison.preferred().method, IdentificationMethod::Smith);
    }

    #[test]
    fn test_comparison_fails_if_one_method_fails() {
        assert!(matches!(
            compare_methods(&dataset(slow_tail_curve()), 4),
            Err(FopdtError::NumericalError { .. })
        ));
    }
}
