use rodx::{calculate_full, fixed_node, free_node, Rod, StructureInput};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A single steel rod clamped at the left end and pulled at the right
    let structure = StructureInput::new(
        vec![fixed_node(0), free_node(1, -5_000.0)],
        vec![Rod::new(0, 1.0, 0.005, 210.0e9, 250.0e6)],
    );

    let result = calculate_full(&structure)?;

    let rod = &result.result_output[0];
    println!("tip displacement: {:.3e} m", result.displacements[1]);
    println!(
        "rod 0 factor of safety: {:.2}",
        rod.factor_of_safety()
    );

    Ok(())
}
