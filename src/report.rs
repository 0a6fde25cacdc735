use crate::analysis::AnalysisSummary;
use std::fmt::Write;

/// Render a textual summary of the frame analysis.
///
/// Reactions are listed first so the reader can check global equilibrium by hand
/// before looking at the diagrams (see <https://en.wikipedia.org/wiki/Statics>).
#[must_use]
pub fn render_summary(summary: &AnalysisSummary) -> String {
    let mut output = String::new();

    writeln!(
        &mut output,
        "Frame analysis ({} members)",
        summary.members.len()
    )
    .expect("writing to string cannot fail");

    // Reactions are global: X right, Y up, moments counter-clockwise.
    output.push_str("Support reactions:\n");
    for (beam, end, reaction) in &summary.reactions {
        writeln!(
            &mut output,
            "  member {} {:?}: Fx = {:+.3} kN, Fy = {:+.3} kN, M = {:+.3} kN·m",
            beam.index(),
            end,
            reaction.x,
            reaction.y,
            reaction.z
        )
        .expect("writing to string cannot fail");
    }

    // Internal forces follow each member's own axis.
    for member in &summary.members {
        writeln!(
            &mut output,
            "Member {} (length {:.3} m):",
            member.beam.index(),
            member.length
        )
        .expect("writing to string cannot fail");
        for section in &member.sections {
            writeln!(
                &mut output,
                "  x = {:.3} m: N = {:+.3} kN, V = {:+.3} kN, M = {:+.3} kN·m",
                section.position, section.normal, section.shear, section.bending
            )
            .expect("writing to string cannot fail");
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{MemberSummary, Section};
    use framex::{load, End};
    use petgraph::graph::NodeIndex;

    #[test]
    fn formats_human_readable_report() {
        let summary = AnalysisSummary {
            reactions: vec![(NodeIndex::new(0), End::Start, load(0.0, 10.0, 40.0))],
            members: vec![MemberSummary {
                beam: NodeIndex::new(0),
                length: 4.0,
                sections: vec![Section {
                    position: 0.0,
                    normal: 0.0,
                    shear: 10.0,
                    bending: -40.0,
                }],
            }],
        };
        let report = render_summary(&summary);
        assert!(report.contains("Frame analysis (1 members)"));
        assert!(report.contains("member 0 Start: Fx = +0.000 kN, Fy = +10.000 kN"));
        assert!(report.contains("M = -40.000 kN·m"));
    }
}
