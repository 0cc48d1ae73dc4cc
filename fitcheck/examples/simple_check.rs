//! Simple check example: extract two product texts and check them as a pair.

use fitcheck::prelude::*;

fn main() -> Result<(), FitCheckError> {
    let mut args = std::env::args().skip(1);
    let a = args
        .next()
        .unwrap_or_else(|| "Square D Homeline load center 1Ø 120/240V 100A".to_string());
    let b = args
        .next()
        .unwrap_or_else(|| "Eaton BR 2 pole breaker 30A".to_string());

    let core = FitCheckCore::new(RuleStore::builtin())?;
    let first = core.extract(&a);
    let second = core.extract(&b);

    println!("A: {} {} {}", first.product_type, first.brand, first.series);
    println!("B: {} {} {}", second.product_type, second.brand, second.series);
    println!();

    let Some(report) = core.check_pair(&first, &second) else {
        eprintln!("No compatibility check applies to these product types.");
        eprintln!("Usage: cargo run --example simple_check [\"text A\"] [\"text B\"]");
        std::process::exit(1);
    };

    println!("{}: {}", report.kind.title(), if report.result.compatible {
        "likely compatible"
    } else {
        "likely NOT compatible"
    });
    for reason in &report.result.reasons {
        println!("  - {}", reason);
    }
    for suggestion in &report.result.suggestions {
        println!("  > {}", suggestion);
    }

    println!("\n{}", report.disclaimer);
    Ok(())
}
