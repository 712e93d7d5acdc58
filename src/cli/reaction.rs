use anyhow::{Context, Result};

use exfor::dataset::QuantityClass;
use exfor::reaction::Measurement;

/// Interpret a reaction string and print its readings
pub fn run(text: &str) -> Result<()> {
    let measurement = Measurement::parse(text.trim())
        .with_context(|| format!("Failed to parse reaction {text:?}"))?;

    println!("Reaction:  {measurement}");
    println!("EXFOR:     {}", measurement.exfor_style());
    println!("Equation:  {}", measurement.equation(true).join(" "));
    for (i, reaction) in measurement.reactions().iter().enumerate() {
        println!("  rxn {i}:   {} [{}]", reaction.exfor_style(), reaction.quantity.join(","));
    }
    match QuantityClass::of(&measurement) {
        Ok(class) => println!("Class:     {class}"),
        Err(err) => println!("Class:     {err}"),
    }
    Ok(())
}
