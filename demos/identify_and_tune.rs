//! Identifies a FOPDT model from a noisy reaction curve, tunes PID controllers for it and
//! prints the simulated loops. Run with RUST_LOG=debug to see the library's log output.
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


use fopdt_tune::config::SimulationConfigBuilder;
use fopdt_tune::metrics::StepInfo;
use fopdt_tune::session::{Session, SimulationResult};
use fopdt_tune::tuning::TuningMethod;

/// Reaction curve of a heater: a 1.5 kW step raises the temperature from 20 °C with gain
/// 2 °C/kW, a 5 s lag and 3 s of transport delay. A deterministic ripple stands in for
/// measurement noise.
fn heater_experiment() -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let samples = 601;
    let time: Vec<f64> = (0..samples).map(|i| i as f64 * 0.1).collect();
    let output = time
        .iter()
        .map(|&t| {
            let rise = if t < 3.0 {
                0.0
            } else {
                1.0 - (-(t - 3.0) / 5.0).exp()
            };
            20.0 + 3.0 * rise + 0.01 * (7.0 * t).sin()
        })
        .collect();
    (time, vec![1.5; samples], output)
}

fn print_trajectory(label: &str, result: &SimulationResult, info: &StepInfo) {
    println!("{label}");
    for (t, y) in result.time.iter().zip(&result.response).step_by(50) {
        println!("  t = {t:5.1} s  y = {y:8.4}");
    }
    println!(
        "  rise {:?} s, overshoot {:?} %, settling {:?} s, final {:.4}",
        info.rise_time, info.overshoot_pct, info.settling_time, info.final_value
    );
}

pub fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = SimulationConfigBuilder::default()
        .pade_order(3)
        .build()?;
    let mut session = Session::new(config);

    let (time, input, output) = heater_experiment();
    let summary = session.load_dataset(time, input, output)?;
    println!("Loaded {summary:?}");

    let comparison = session.compare_methods()?;
    for evaluation in [&comparison.smith, &comparison.sundaresan] {
        println!(
            "{:>10}: k = {:.4}, tau = {:.4}, theta = {:.4}, RMSE = {}",
            evaluation.method,
            evaluation.params.k(),
            evaluation.params.tau(),
            evaluation.params.theta(),
            evaluation.rmse
        );
    }
    let preferred = comparison.preferred().method;
    println!("Preferred method: {preferred}");
    session.identify(preferred)?;

    let coefficients = session.transfer_function_coefficients()?;
    println!("{coefficients:?}");

    let band = session.config().settling_band();
    let open = session.simulate_open_loop()?;
    print_trajectory("Open loop", &open, &open.step_info(band));
    let closed = session.simulate_closed_loop()?;
    print_trajectory("Unity feedback", &closed, &closed.step_info(band));

    for method in [TuningMethod::Imc, TuningMethod::Itae] {
        let report = match session.tune(method, None) {
            Ok(report) => report,
            Err(e) => {
                println!("{method} tuning failed: {e}");
                continue;
            }
        };
        let gains = report.gains;
        println!(
            "{method}: Kp = {}, Ti = {}, Td = {} (Ki = {:.4}, Kd = {:.4})",
            gains.kp,
            gains.ti,
            gains.td,
            gains.ki(),
            gains.kd()
        );
        let result = session.simulate_custom_pid(gains.kp, gains.ti, gains.td, report.setpoint)?;
        print_trajectory(
            &format!("{method} PID tracking {}", report.setpoint),
            &result,
            &result.step_info(band),
        );
    }

    Ok(())
}
