use framex::{point, Beam, BeamId, End, Structure, StructureEditError};

/// Dimensions of the demonstration portal frame in metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortalDimensions {
    /// Height of both columns.
    pub height: f64,
    /// Span of the beam between the column tops.
    pub span: f64,
}

impl Default for PortalDimensions {
    fn default() -> Self {
        Self {
            height: 4.0,
            span: 6.0,
        }
    }
}

/// Identifiers of the three members of the portal frame.
#[derive(Debug, Clone, Copy)]
pub struct PortalLayout {
    /// Column rising from the left base.
    pub left_column: BeamId,
    /// Horizontal beam joining the column tops.
    pub beam: BeamId,
    /// Column descending to the right base.
    pub right_column: BeamId,
    /// Dimensions the frame was built with.
    pub dimensions: PortalDimensions,
}

/// Build the bare portal frame: two columns and a beam, rigidly joined at the corners.
///
/// The right column is drawn from the top down so that each joint connects the end of
/// one member to the start of the next. A frame is a structure whose members carry
/// bending as well as axial force (see <https://en.wikipedia.org/wiki/Portal_frame>).
pub fn build_portal_frame(
    dimensions: PortalDimensions,
) -> Result<(Structure, PortalLayout), StructureEditError> {
    let PortalDimensions { height, span } = dimensions;
    let mut structure = Structure::new();

    let left_column = structure.place(
        Beam::new(height)?,
        point(0.0, 0.0),
        90.0,
        point(0.0, height),
    );
    let beam = structure.place(Beam::new(span)?, point(0.0, height), 0.0, point(span, height));
    let right_column = structure.place(
        Beam::new(height)?,
        point(span, height),
        270.0,
        point(span, 0.0),
    );

    structure.connect(left_column, End::End, beam, End::Start)?;
    structure.connect(beam, End::End, right_column, End::Start)?;

    Ok((
        structure,
        PortalLayout {
            left_column,
            beam,
            right_column,
            dimensions,
        },
    ))
}
