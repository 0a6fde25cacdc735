use crate::layout::PortalLayout;
use framex::{End, Polynomial, Structure, StructureEditError, SupportKind};

/// Loads applied to the portal frame demonstration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortalLoads {
    /// Uniform gravity load on the beam in kN/m.
    pub roof_load: f64,
    /// Horizontal wind force at the top of the left column in kN.
    pub wind_load: f64,
}

impl Default for PortalLoads {
    fn default() -> Self {
        Self {
            roof_load: 2.0,
            wind_load: 3.0,
        }
    }
}

/// Apply supports and loads to the portal frame.
///
/// A hinge at the left base and a roller at the right base give exactly the three
/// reaction unknowns that static equilibrium can determine
/// (see <https://en.wikipedia.org/wiki/Statically_determinate>).
pub fn apply_portal_conditions(
    structure: &mut Structure,
    layout: &PortalLayout,
) -> Result<PortalLoads, StructureEditError> {
    let loads = PortalLoads::default();
    let span = layout.dimensions.span;
    let height = layout.dimensions.height;

    // Hinge at the left base: two reaction forces, free rotation.
    structure
        .beam_mut(layout.left_column)?
        .attach_support(End::Start, SupportKind::Pinned);

    // Roller at the right base pushing straight up. Its angle is global, unlike load
    // angles which follow the member they sit on.
    structure
        .beam_mut(layout.right_column)?
        .attach_support(End::End, SupportKind::Simple { angle: 90.0 });

    // Gravity on the beam. The beam runs along +X, so 270° from its axis points down.
    structure.beam_mut(layout.beam)?.add_distributed(
        span,
        Polynomial::constant(loads.roof_load),
        0.0,
        270.0,
    )?;

    // Wind at the top of the left column. The column points up, so pushing along
    // global +X is 270° from its axis.
    structure
        .beam_mut(layout.left_column)?
        .add_concentrated(loads.wind_load, height, 270.0)?;

    Ok(loads)
}
