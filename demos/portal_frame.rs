use framex::{point, Beam, End, Polynomial, Structure, StressKind, SupportKind};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut left = Beam::new(4.0)?;
    left.attach_support(End::Start, SupportKind::Pinned);
    left.add_concentrated(3.0, 4.0, 270.0)?;

    let mut top = Beam::new(6.0)?;
    top.add_distributed(6.0, Polynomial::constant(2.0), 0.0, 270.0)?;

    let mut right = Beam::new(4.0)?;
    right.attach_support(End::End, SupportKind::Simple { angle: 90.0 });

    let mut structure = Structure::new();
    let left = structure.place(left, point(0.0, 0.0), 90.0, point(0.0, 4.0));
    let top = structure.place(top, point(0.0, 4.0), 0.0, point(6.0, 4.0));
    let right = structure.place(right, point(6.0, 4.0), 270.0, point(6.0, 0.0));
    structure.connect(left, End::End, top, End::Start)?;
    structure.connect(top, End::End, right, End::Start)?;

    let solutions = structure.solve_system()?;
    for solution in &solutions {
        println!("member {}", solution.beam.index());
        for (x, m) in solution.diagram.sample(StressKind::Bending, 5)? {
            println!("  M({x:.2}) = {m:+.3} kN·m");
        }
    }

    // The model can be saved and solved again later.
    println!("{}", structure.to_json()?);

    Ok(())
}
