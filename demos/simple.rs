use framex::{point, Beam, End, Structure, StressKind, SupportKind};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut beam = Beam::new(4.0)?;
    beam.attach_support(End::Start, SupportKind::Fixed);
    beam.add_concentrated(10.0, 4.0, 270.0)?;

    let mut structure = Structure::new();
    let cantilever = structure.place(beam, point(0.0, 0.0), 0.0, point(4.0, 0.0));
    let solutions = structure.solve_system()?;

    for (beam, end, reaction) in structure.reactions() {
        println!("reaction at {:?} {end:?}: {reaction:?}", beam.index());
    }
    let root = solutions[cantilever.index()].stress_function(StressKind::Bending, 0.0)?;
    println!("M(0) = {root:.3} kN·m");

    Ok(())
}
