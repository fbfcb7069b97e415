use rodx::{
    calculate_full, fixed_node, free_node, render_full_result, render_samples, Rod,
    StructureInput,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Three rods clamped at both ends, with self-weight-like load on the middle rod
    let structure = StructureInput::new(
        vec![
            fixed_node(0),
            free_node(1, 2_000.0),
            free_node(2, 0.0),
            fixed_node(3),
        ],
        vec![
            Rod::new(0, 1.0, 0.004, 200.0e9, 160.0e6),
            Rod::new(1, 2.0, 0.002, 200.0e9, 160.0e6).with_distributed_load(-1_500.0),
            Rod::new(2, 1.0, 0.004, 70.0e9, 100.0e6),
        ],
    );

    let result = calculate_full(&structure)?;
    println!("{}", render_full_result(&result));
    println!("{}", render_samples(&result.sample(0.5)?));

    Ok(())
}
