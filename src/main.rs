#![allow(non_snake_case)]
use RustedDeriv::Utils::logger::timestamped_log_name;
use RustedDeriv::{
    Differentiator, EngineConfig, compute_derivative, evaluate_at_point, format_step_for_display,
    init_logger,
};
use std::path::Path;

fn main() {
    let example = 0;
    match example {
        0 => {
            // DERIVATIVE WITH STEPS
            init_logger(Some("info"), None);
            let input = "x^3 + 2*x^2 + x + 1";
            match compute_derivative(input, "x", 1) {
                Ok(result) => {
                    for step in result.steps() {
                        println!("{}", step);
                    }
                    println!("d/dx[{}] = {}", input, result.derivative());
                    println!("rules applied: {}", result.rules_summary());
                    let value = evaluate_at_point(result.derivative(), "x", 2.0);
                    println!("f'(2) = {:?}", value);
                }
                Err(e) => println!("error: {}", e),
            }
        }
        1 => {
            // HIGHER ORDER, STEPS FORMATTED FOR A TeX RENDERER
            let input = "x*sin(x)";
            match compute_derivative(input, "x", 2) {
                Ok(result) => {
                    for step in result.steps() {
                        println!("{}", format_step_for_display(step));
                    }
                    let (norm, ok) = result.compare_num1D(-3.0, 3.0, 100, 1e-6);
                    println!("numerical check: norm = {:e}, passed = {}", norm, ok);
                }
                Err(e) => println!("error: {}", e),
            }
        }
        2 => {
            // STRICT ENGINE READ FROM A SETTINGS DOCUMENT, LOGGING TO FILE
            let name = timestamped_log_name();
            init_logger(Some("debug"), Some(Path::new(&name)));
            let config = EngineConfig::from_toml_str("[engine]\nmax_order = 3\nstrict = true")
                .unwrap_or_default();
            let engine = Differentiator::new(config);
            for input in ["tan(x) - ln(x)", "sin(cos(x^2))", "e^x*x^2"] {
                match engine.differentiate(input, "x", 1) {
                    Ok(result) => println!("d/dx[{}] = {}", input, result.derivative()),
                    Err(e) => println!("d/dx[{}]: {}", input, e),
                }
            }
            match engine.differentiate("x^5", "x", 4) {
                Ok(result) => println!("{}", result.derivative()),
                Err(e) => println!("{}", e),
            }
        }
        _ => {
            println!("example not found");
        }
    }
}
