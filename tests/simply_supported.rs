#![warn(clippy::pedantic)]

use approx::assert_relative_eq;
use framex::{
    point, Beam, BeamSolution, Distributed, End, Polynomial, StressKind, Structure, SupportKind,
};

/// 10 m beam on a hinge and a vertical roller, loaded as requested by `load_beam`.
fn solve_simply_supported(load_beam: impl FnOnce(&mut Beam)) -> (Structure, BeamSolution) {
    let mut beam = Beam::new(10.0).expect("positive length");
    beam.attach_support(End::Start, SupportKind::Pinned);
    beam.attach_support(End::End, SupportKind::Simple { angle: 90.0 });
    load_beam(&mut beam);

    let mut structure = Structure::new();
    structure.place(beam, point(0.0, 0.0), 0.0, point(10.0, 0.0));
    let mut solutions = structure.solve_system().expect("hinge and roller are isostatic");
    let solution = solutions.remove(0);
    (structure, solution)
}

fn value(solution: &BeamSolution, kind: StressKind, x: f64) -> f64 {
    solution
        .stress_function(kind, x)
        .expect("position on the beam")
}

#[test]
fn symmetric_point_load_is_shared_equally() {
    let (structure, solution) = solve_simply_supported(|beam| {
        beam.add_concentrated(10.0, 5.0, 270.0)
            .expect("load lies on the beam");
    });

    for (_, _, reaction) in structure.reactions() {
        assert_relative_eq!(reaction.x, 0.0, epsilon = 1.0e-12);
        assert_relative_eq!(reaction.y, 5.0, epsilon = 1.0e-12);
        assert_relative_eq!(reaction.z, 0.0, epsilon = 1.0e-12);
    }

    assert_relative_eq!(value(&solution, StressKind::Shear, 2.5), 5.0, epsilon = 1.0e-12);
    assert_relative_eq!(value(&solution, StressKind::Shear, 7.5), -5.0, epsilon = 1.0e-12);
    assert_relative_eq!(value(&solution, StressKind::Bending, 0.0), 0.0, epsilon = 1.0e-12);
    assert_relative_eq!(value(&solution, StressKind::Bending, 5.0), 25.0, epsilon = 1.0e-12);
    assert_relative_eq!(value(&solution, StressKind::Bending, 10.0), 0.0, epsilon = 1.0e-9);

    let peak = solution
        .diagram
        .sample(StressKind::Bending, 101)
        .expect("solved diagram")
        .into_iter()
        .fold(f64::NEG_INFINITY, |max, (_, m)| max.max(m));
    assert_relative_eq!(peak, 25.0, epsilon = 1.0e-9);
}

#[test]
fn triangular_load_matches_its_equivalent_force() {
    let intensity = Polynomial::linear(0.0, 0.6);
    let (structure, solution) = solve_simply_supported(|beam| {
        beam.add_distributed(10.0, intensity.clone(), 0.0, 270.0)
            .expect("span fits on the beam");
    });

    let load = Distributed::new(10.0, intensity.clone()).expect("valid span");
    let (force, offset) = load.equivalent(0.0, 10.0);
    assert_relative_eq!(force.magnitude, intensity.integrate(0.0, 10.0), epsilon = 1.0e-12);
    assert_relative_eq!(offset, 20.0 / 3.0, epsilon = 1.0e-12);

    // The roller carries W·offset/L, the hinge the rest.
    let reactions = structure.reactions();
    assert_relative_eq!(reactions[1].2.y, force.magnitude * offset / 10.0, epsilon = 1.0e-9);
    assert_relative_eq!(
        reactions[0].2.y,
        force.magnitude * (1.0 - offset / 10.0),
        epsilon = 1.0e-9
    );
    assert_relative_eq!(value(&solution, StressKind::Bending, 10.0), 0.0, epsilon = 1.0e-9);
}

#[test]
fn bending_slope_equals_shear_between_loads() {
    let (_, solution) = solve_simply_supported(|beam| {
        beam.add_distributed(6.0, Polynomial::new(vec![1.0, 0.5, -0.05]), 2.0, 250.0)
            .expect("span fits on the beam");
        beam.add_concentrated(4.0, 3.0, 300.0)
            .expect("load lies on the beam");
        beam.set_moment_at(5.0, 9.0).expect("moment lies on the beam");
    });

    let h = 1.0e-5;
    for i in 1..100 {
        let x = f64::from(i) * 0.1 + 0.05;
        if x >= 10.0 - h {
            break;
        }
        let slope = (value(&solution, StressKind::Bending, x + h)
            - value(&solution, StressKind::Bending, x - h))
            / (2.0 * h);
        assert_relative_eq!(slope, value(&solution, StressKind::Shear, x), epsilon = 1.0e-5);
    }
}

#[test]
fn hinge_takes_the_axial_load() {
    let (structure, solution) = solve_simply_supported(|beam| {
        beam.add_concentrated(2.0, 10.0, 180.0)
            .expect("load lies on the beam");
    });

    let reactions = structure.reactions();
    assert_relative_eq!(reactions[0].2.x, 2.0, epsilon = 1.0e-12);
    // Pushed at the far end and held at the start: compression throughout.
    assert_relative_eq!(value(&solution, StressKind::Normal, 5.0), -2.0, epsilon = 1.0e-12);
}

#[test]
fn queries_outside_the_beam_are_rejected() {
    let (_, solution) = solve_simply_supported(|_| {});
    assert!(solution.stress_function(StressKind::Shear, 10.5).is_err());
    assert!(solution.stress_function(StressKind::Shear, -1.0).is_err());
}
