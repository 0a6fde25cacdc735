use framex::{AnalysisError, BeamId, BeamSolution, End, StressKind, Structure, Vector3};

/// Internal forces at one section of a member.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Section {
    /// Distance from the member start in metres.
    pub position: f64,
    /// Axial force in kN, tension positive.
    pub normal: f64,
    /// Shear force in kN.
    pub shear: f64,
    /// Bending moment in kN·m, sagging positive.
    pub bending: f64,
}

/// Internal forces sampled along one member.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberSummary {
    /// Member the samples belong to.
    pub beam: BeamId,
    /// Member length in metres.
    pub length: f64,
    /// Sections at the start, the middle and the end of the member.
    pub sections: Vec<Section>,
}

/// Summary of the results of a frame analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSummary {
    /// Support reactions in the global frame.
    pub reactions: Vec<(BeamId, End, Vector3)>,
    /// Sampled diagrams of every member in placement order.
    pub members: Vec<MemberSummary>,
}

/// Solve the frame and sample the diagrams of every member.
///
/// Reactions come from the three equations of planar equilibrium; the diagrams from
/// the method of sections (<https://en.wikipedia.org/wiki/Shear_and_moment_diagram>).
pub fn run_analysis(structure: &mut Structure) -> Result<AnalysisSummary, AnalysisError> {
    let solutions = structure.solve_system()?;
    let members = solutions
        .iter()
        .map(summarize_member)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AnalysisSummary {
        reactions: structure.reactions(),
        members,
    })
}

/// Sample one member at its ends and midpoint.
fn summarize_member(solution: &BeamSolution) -> Result<MemberSummary, AnalysisError> {
    let length = solution.diagram.length();
    let wrap = |source| AnalysisError::Beam {
        beam: solution.beam,
        source,
    };
    let sections = [0.0, 0.5 * length, length]
        .into_iter()
        .map(|position| {
            Ok(Section {
                position,
                normal: solution
                    .stress_function(StressKind::Normal, position)
                    .map_err(wrap)?,
                shear: solution
                    .stress_function(StressKind::Shear, position)
                    .map_err(wrap)?,
                bending: solution
                    .stress_function(StressKind::Bending, position)
                    .map_err(wrap)?,
            })
        })
        .collect::<Result<Vec<_>, AnalysisError>>()?;

    Ok(MemberSummary {
        beam: solution.beam,
        length,
        sections,
    })
}
