//! Placed beams, their connections and the whole-frame equilibrium solve.

use log::{debug, warn};
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

use crate::algebra::{rotate, solve, Matrix3x3};
use crate::beam::{Beam, End, StressDiagram, StressKind};
use crate::config::AnalysisConfig;
use crate::errors::{AnalysisError, BeamError, ModelError, StructureEditError};
use crate::geometry::{point, Vector3};
use crate::loads::Load;
use crate::support::ReactionComponent;
use crate::trig::{pcos, psin};

/// Identifier of a beam placed in a [`Structure`].
pub type BeamId = NodeIndex;

/// A beam together with where it sits in the frame.
///
/// Coordinates and angle are kept as given at placement, in the units of the
/// structure's [`UnitConfig`](crate::UnitConfig).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlacedBeam {
    /// The beam and its loads.
    beam: Beam,
    /// Start position.
    start: Vector3,
    /// Angle in degrees.
    angle: f64,
    /// End position.
    end: Vector3,
}

impl PlacedBeam {
    /// The beam itself.
    #[must_use]
    pub fn beam(&self) -> &Beam {
        &self.beam
    }

    /// Position of the beam start.
    #[must_use]
    pub fn start(&self) -> Vector3 {
        self.start
    }

    /// Direction from start to end, in degrees.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Position of the beam end.
    #[must_use]
    pub fn end(&self) -> Vector3 {
        self.end
    }
}

/// Which end of each beam meets at a connection, in the order the beams were connected.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
struct Joint {
    /// End of the edge source.
    source_end: End,
    /// End of the edge target.
    target_end: End,
}

/// Placement converted to metres in the analysis frame.
#[derive(Clone, Copy, Debug)]
struct Layout {
    /// Start position in metres.
    start: Vector3,
    /// Angle in degrees, counter-clockwise from +X.
    angle: f64,
    /// End position in metres.
    end: Vector3,
}

impl Layout {
    /// Position of `end`.
    fn position(&self, end: End) -> Vector3 {
        match end {
            End::Start => self.start,
            End::End => self.end,
        }
    }

    /// Point `distance` metres from the start along the beam.
    fn along(&self, distance: f64) -> Vector3 {
        self.start + point(distance * pcos(self.angle), distance * psin(self.angle))
    }
}

/// Result of the analysis of one beam.
#[derive(Clone, Debug, PartialEq)]
pub struct BeamSolution {
    /// Beam the solution belongs to.
    pub beam: BeamId,
    /// Whether the sweep started from [`End::End`].
    pub end_first: bool,
    /// Force and moment applied to the beam at the end the sweep started from, beam frame.
    pub boundary: Vector3,
    /// Force and moment applied to the beam at the other end, beam frame.
    pub far_end: Vector3,
    /// Internal-force diagrams.
    pub diagram: StressDiagram,
}

impl BeamSolution {
    /// Value of the `kind` diagram at position `x`.
    ///
    /// # Errors
    ///
    /// Returns [`BeamError::OutOfRange`] when `x` is outside the beam.
    pub fn stress_function(&self, kind: StressKind, x: f64) -> Result<f64, BeamError> {
        self.diagram.stress_function(kind, x)
    }
}

/// A planar frame made of straight beams joined end to end.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Structure {
    /// Beams as nodes and their connections as edges.
    graph: UnGraph<PlacedBeam, Joint>,
    /// Unit conversion and tolerances.
    #[serde(default)]
    config: AnalysisConfig,
    /// Whether the beams and supports hold a current solution.
    #[serde(skip)]
    analysis_valid: bool,
}

impl Structure {
    /// Create an empty structure with the default configuration.
    ///
    /// # Examples
    /// ```
    /// use framex::Structure;
    ///
    /// let structure = Structure::new();
    /// assert_eq!(structure.beam_count(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(AnalysisConfig::default())
    }

    /// Create an empty structure with `config`.
    #[must_use]
    pub fn with_config(config: AnalysisConfig) -> Self {
        Self {
            graph: UnGraph::default(),
            config,
            analysis_valid: false,
        }
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Replace the configuration.
    pub fn set_config(&mut self, config: AnalysisConfig) {
        self.invalidate();
        self.config = config;
    }

    /// Number of placed beams.
    #[must_use]
    pub fn beam_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of connections between beams.
    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Identifiers of every beam in placement order.
    pub fn beam_ids(&self) -> impl Iterator<Item = BeamId> + '_ {
        self.graph.node_indices()
    }

    /// Whether the last [`Structure::solve_system`] is still current.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.analysis_valid
    }

    /// Place `beam` from `start` to `end`, laid at `angle` degrees.
    ///
    /// # Examples
    /// ```
    /// use framex::{point, Beam, Structure};
    ///
    /// let mut structure = Structure::new();
    /// let beam = Beam::new(3.0).expect("valid length");
    /// let id = structure.place(beam, point(0.0, 0.0), 90.0, point(0.0, 3.0));
    /// assert_eq!(id.index(), 0);
    /// ```
    pub fn place(&mut self, beam: Beam, start: Vector3, angle: f64, end: Vector3) -> BeamId {
        self.invalidate();
        self.graph.add_node(PlacedBeam {
            beam,
            start,
            angle,
            end,
        })
    }

    /// Join end `first_end` of `first` to end `second_end` of `second`.
    ///
    /// # Errors
    ///
    /// Returns [`StructureEditError::UnknownBeam`] when either beam is missing and
    /// [`StructureEditError::SelfConnection`] when both are the same beam.
    pub fn connect(
        &mut self,
        first: BeamId,
        first_end: End,
        second: BeamId,
        second_end: End,
    ) -> Result<EdgeIndex, StructureEditError> {
        self.placement(first)?;
        self.placement(second)?;
        if first == second {
            return Err(StructureEditError::SelfConnection(first));
        }
        self.invalidate();
        Ok(self.graph.add_edge(
            first,
            second,
            Joint {
                source_end: first_end,
                target_end: second_end,
            },
        ))
    }

    /// Remove a connection.
    ///
    /// # Errors
    ///
    /// Returns [`StructureEditError::UnknownConnection`] when `connection` is not part of
    /// this structure.
    pub fn remove_connection(&mut self, connection: EdgeIndex) -> Result<(), StructureEditError> {
        if self.graph.edge_weight(connection).is_none() {
            return Err(StructureEditError::UnknownConnection(connection));
        }
        self.invalidate();
        self.graph
            .remove_edge(connection)
            .map(|_| ())
            .ok_or(StructureEditError::UnknownConnection(connection))
    }

    /// Placement of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StructureEditError::UnknownBeam`] when `id` is not part of this structure.
    pub fn placement(&self, id: BeamId) -> Result<&PlacedBeam, StructureEditError> {
        self.graph
            .node_weight(id)
            .ok_or(StructureEditError::UnknownBeam(id))
    }

    /// Beam `id`, including its diagrams after a solve.
    ///
    /// # Errors
    ///
    /// Returns [`StructureEditError::UnknownBeam`] when `id` is not part of this structure.
    pub fn beam(&self, id: BeamId) -> Result<&Beam, StructureEditError> {
        self.placement(id).map(PlacedBeam::beam)
    }

    /// Mutable access to beam `id`. Any previous solution is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`StructureEditError::UnknownBeam`] when `id` is not part of this structure.
    pub fn beam_mut(&mut self, id: BeamId) -> Result<&mut Beam, StructureEditError> {
        if self.graph.node_weight(id).is_none() {
            return Err(StructureEditError::UnknownBeam(id));
        }
        self.invalidate();
        self.graph
            .node_weight_mut(id)
            .map(|placed| &mut placed.beam)
            .ok_or(StructureEditError::UnknownBeam(id))
    }

    /// Beams connected at end `end` of `id`, with the end of theirs that meets it.
    ///
    /// # Errors
    ///
    /// Returns [`StructureEditError::UnknownBeam`] when `id` is not part of this structure.
    pub fn neighbors(&self, id: BeamId, end: End) -> Result<Vec<(BeamId, End)>, StructureEditError> {
        self.placement(id)?;
        Ok(self
            .joints(id)
            .filter(|&(_, own_end, _, _)| own_end == end)
            .map(|(_, _, other, other_end)| (other, other_end))
            .collect())
    }

    /// Solved support reactions as `(beam, end, reaction)`, global frame, moment about
    /// the supported point. Empty until the structure has been solved.
    #[must_use]
    pub fn reactions(&self) -> Vec<(BeamId, End, Vector3)> {
        if !self.analysis_valid {
            return Vec::new();
        }
        self.graph
            .node_indices()
            .flat_map(|id| {
                let beam = &self.graph[id].beam;
                [End::Start, End::End].into_iter().filter_map(move |end| {
                    beam.support(end)
                        .and_then(|support| support.reaction())
                        .map(|reaction| (id, end, reaction))
                })
            })
            .collect()
    }

    /// Save the model (placements, beams, loads, supports, connections and configuration).
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Json`] when encoding fails.
    pub fn to_json(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a model saved with [`Structure::to_json`]. The result is unsolved.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Json`] for malformed input, [`ModelError::Config`] for an
    /// invalid configuration and [`ModelError::Beam`] for an invalid beam.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let structure: Self = serde_json::from_str(json)?;
        structure.config.validate()?;
        for id in structure.graph.node_indices() {
            structure.graph[id]
                .beam
                .validate()
                .map_err(|source| ModelError::Beam { beam: id, source })?;
        }
        Ok(structure)
    }

    /// Compute the support reactions and the internal-force diagrams of every beam.
    ///
    /// The three global equilibrium equations are solved for the three reaction
    /// unknowns. The connections are then walked depth first from the first supported
    /// beam: the force a beam receives at the joint with its parent balances everything
    /// acting on the part of the frame hanging from that joint.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::PlacementMismatch`] or [`AnalysisError::DisjointJoint`]
    /// for inconsistent geometry, [`AnalysisError::NotIsostatic`] unless there are
    /// exactly three reaction unknowns, [`AnalysisError::Unstable`] when the supports
    /// form a mechanism, [`AnalysisError::NoSupportedBeam`], [`AnalysisError::Cycle`] and
    /// [`AnalysisError::Unreachable`] for unsupported topologies, and
    /// [`AnalysisError::Beam`] when a beam sweep fails.
    ///
    /// # Examples
    /// ```
    /// use framex::{point, Beam, End, Structure, StressKind, SupportKind};
    ///
    /// let mut beam = Beam::new(10.0).expect("valid length");
    /// beam.add_concentrated(10.0, 5.0, 270.0).expect("load on the beam");
    /// beam.attach_support(End::Start, SupportKind::Pinned);
    /// beam.attach_support(End::End, SupportKind::Simple { angle: 90.0 });
    ///
    /// let mut structure = Structure::new();
    /// structure.place(beam, point(0.0, 0.0), 0.0, point(10.0, 0.0));
    /// let solutions = structure.solve_system().expect("isostatic frame");
    ///
    /// let peak = solutions[0].stress_function(StressKind::Bending, 5.0).expect("on the beam");
    /// assert!((peak - 25.0).abs() < 1.0e-9);
    /// ```
    pub fn solve_system(&mut self) -> Result<Vec<BeamSolution>, AnalysisError> {
        self.invalidate();
        let layouts = self.layouts()?;

        // Global equilibrium: one column per reaction unknown, loads on the right.
        let mut load_total = Vector3::zero();
        for id in self.graph.node_indices() {
            load_total += Self::load_resultant(&self.graph[id].beam, &layouts[id.index()]);
        }
        let unknowns = self.reaction_unknowns(&layouts);
        let unknown_count: usize = unknowns.iter().map(|(_, _, components)| components.len()).sum();
        debug!(
            "{} beams, {} reaction unknowns, load resultant {:?}",
            self.graph.node_count(),
            unknown_count,
            load_total
        );
        if unknown_count != 3 {
            return Err(AnalysisError::NotIsostatic {
                unknowns: unknown_count,
            });
        }
        let mut coefficients = Matrix3x3::zeros();
        for (column, component) in unknowns
            .iter()
            .flat_map(|(_, _, components)| components)
            .enumerate()
        {
            coefficients.set_column(column, component.column);
        }
        let magnitudes = solve(&coefficients, -load_total).map_err(AnalysisError::Unstable)?;
        let magnitudes = [magnitudes.x, magnitudes.y, magnitudes.z];

        let mut next = 0;
        for (id, end, components) in &unknowns {
            let slice = &magnitudes[next..next + components.len()];
            next += components.len();
            if let Some(support) = self.graph[*id].beam.support_mut(*end) {
                support.set_reaction(components, slice);
                debug!("reaction at {:?} {:?}: {:?}", id, end, support.reaction());
            }
        }
        if self.config.check_statics {
            self.check_statics(load_total, &layouts);
        }

        let boundaries = self.boundaries(&layouts)?;
        let mut solutions = Vec::with_capacity(self.graph.node_count());
        for id in self.graph.node_indices() {
            let (known_end, boundary) = boundaries[id.index()];
            let end_first = known_end == End::End;
            let beam = &mut self.graph[id].beam;
            let far_end = beam
                .solve(boundary, end_first)
                .map_err(|source| AnalysisError::Beam { beam: id, source })?;
            let diagram = beam
                .diagram()
                .cloned()
                .ok_or(AnalysisError::Beam {
                    beam: id,
                    source: BeamError::Unsolved,
                })?;
            solutions.push(BeamSolution {
                beam: id,
                end_first,
                boundary,
                far_end,
                diagram,
            });
        }
        self.analysis_valid = true;
        Ok(solutions)
    }

    /// Discard any previous solution.
    fn invalidate(&mut self) {
        self.analysis_valid = false;
        for placed in self.graph.node_weights_mut() {
            placed.beam.reset();
        }
    }

    /// Connections of `id` as `(connection, own end, other beam, other end)`.
    fn joints(&self, id: BeamId) -> impl Iterator<Item = (EdgeIndex, End, BeamId, End)> + '_ {
        self.graph.edges(id).filter_map(move |edge| {
            let (source, target) = self.graph.edge_endpoints(edge.id())?;
            let joint = edge.weight();
            Some(if source == id {
                (edge.id(), joint.source_end, target, joint.target_end)
            } else {
                (edge.id(), joint.target_end, source, joint.source_end)
            })
        })
    }

    /// Convert every placement to metres and check that the geometry is consistent.
    fn layouts(&self) -> Result<Vec<Layout>, AnalysisError> {
        let units = &self.config.units;
        let tolerance = self.config.placement_tolerance;
        let mut layouts = Vec::with_capacity(self.graph.node_count());
        for id in self.graph.node_indices() {
            let placed = &self.graph[id];
            let layout = Layout {
                start: units.to_analysis(placed.start),
                angle: units.angle_to_analysis(placed.angle),
                end: units.to_analysis(placed.end),
            };
            let expected = layout.along(placed.beam.length());
            if (expected - layout.end).magnitude() > tolerance {
                return Err(AnalysisError::PlacementMismatch {
                    beam: id,
                    expected_x: expected.x,
                    expected_y: expected.y,
                    found_x: layout.end.x,
                    found_y: layout.end.y,
                });
            }
            layouts.push(layout);
        }
        for edge in self.graph.edge_references() {
            let joint = edge.weight();
            let first = (edge.source(), joint.source_end);
            let second = (edge.target(), joint.target_end);
            let gap = layouts[first.0.index()].position(first.1)
                - layouts[second.0.index()].position(second.1);
            if gap.magnitude() > tolerance {
                return Err(AnalysisError::DisjointJoint { first, second });
            }
        }
        Ok(layouts)
    }

    /// Resultant of the loads on `beam`, global frame, moment about the origin.
    fn load_resultant(beam: &Beam, layout: &Layout) -> Vector3 {
        let mut total = Vector3::zero();
        for applied in beam.loads() {
            let angle = layout.angle + applied.angle;
            let direction = point(pcos(angle), psin(angle));
            let origin = layout.along(applied.position);
            match &applied.load {
                Load::Concentrated(force) => {
                    let vector = force.force_vector(angle);
                    total += Vector3::new(vector.x, vector.y, vector.moment_about_origin(origin));
                }
                Load::Distributed(distributed) => {
                    let (magnitude, first_moment) = distributed.resultant(0.0, distributed.length());
                    total += Vector3::new(
                        magnitude * direction.x,
                        magnitude * direction.y,
                        magnitude * direction.moment_about_origin(origin)
                            + first_moment * psin(applied.angle),
                    );
                }
            }
        }
        if let Some(applied) = beam.moment() {
            total.z += applied.moment.magnitude;
        }
        total
    }

    /// Reaction unknowns of every support in placement order.
    fn reaction_unknowns(&self, layouts: &[Layout]) -> Vec<(BeamId, End, Vec<ReactionComponent>)> {
        self.graph
            .node_indices()
            .flat_map(|id| {
                let beam = &self.graph[id].beam;
                let layout = layouts[id.index()];
                [End::Start, End::End].into_iter().filter_map(move |end| {
                    beam.support(end).map(|support| {
                        (id, end, support.reaction_components(layout.position(end)))
                    })
                })
            })
            .collect()
    }

    /// Solved reactions at the supports of `beam`, global frame, moment about the origin.
    fn support_resultant(beam: &Beam, layout: &Layout, ends: &[End]) -> Vector3 {
        ends.iter()
            .filter_map(|&end| {
                let reaction = beam.support(end)?.reaction()?;
                Some(Vector3::new(
                    reaction.x,
                    reaction.y,
                    reaction.z + reaction.moment_about_origin(layout.position(end)),
                ))
            })
            .fold(Vector3::zero(), |acc, reaction| acc + reaction)
    }

    /// Log a warning when loads and reactions do not balance.
    fn check_statics(&self, load_total: Vector3, layouts: &[Layout]) {
        let residual = self
            .graph
            .node_indices()
            .map(|id| {
                let both = [End::Start, End::End];
                Self::support_resultant(&self.graph[id].beam, &layouts[id.index()], &both)
            })
            .fold(load_total, |acc, reaction| acc + reaction);
        if residual.magnitude() > self.config.statics_tolerance {
            warn!("global equilibrium residual {:?} exceeds tolerance", residual);
        }
    }

    /// Known end and beam-frame boundary condition of every beam, indexed by beam.
    ///
    /// Walks the connections depth first from the first supported beam, then balances
    /// the subtree hanging from each joint.
    fn boundaries(&self, layouts: &[Layout]) -> Result<Vec<(End, Vector3)>, AnalysisError> {
        let count = self.graph.node_count();
        let (root, root_end) = self
            .graph
            .node_indices()
            .find_map(|id| {
                let beam = &self.graph[id].beam;
                if beam.support(End::Start).is_some() {
                    Some((id, End::Start))
                } else if beam.support(End::End).is_some() {
                    Some((id, End::End))
                } else {
                    None
                }
            })
            .ok_or(AnalysisError::NoSupportedBeam)?;
        debug!("propagating from {:?} at its {:?} end", root, root_end);

        // Depth-first walk; `parent[i]` holds the joint through which beam `i` was reached.
        let mut parent: Vec<Option<(EdgeIndex, End, BeamId)>> = vec![None; count];
        let mut visited = vec![false; count];
        let mut order = Vec::with_capacity(count);
        let mut stack = vec![root];
        visited[root.index()] = true;
        while let Some(id) = stack.pop() {
            order.push(id);
            let incoming = parent[id.index()].map(|(edge, _, _)| edge);
            for (edge, _, other, other_end) in self.joints(id) {
                if Some(edge) == incoming {
                    continue;
                }
                if visited[other.index()] {
                    return Err(AnalysisError::Cycle { beam: other });
                }
                visited[other.index()] = true;
                parent[other.index()] = Some((edge, other_end, id));
                stack.push(other);
            }
        }
        if let Some(beam) = self.graph.node_indices().find(|id| !visited[id.index()]) {
            return Err(AnalysisError::Unreachable { beam });
        }

        // Resultant of everything acting on each subtree except the force from its parent.
        let mut subtree: Vec<Vector3> = self
            .graph
            .node_indices()
            .map(|id| {
                let beam = &self.graph[id].beam;
                let layout = &layouts[id.index()];
                Self::load_resultant(beam, layout)
                    + Self::support_resultant(beam, layout, &[End::Start, End::End])
            })
            .collect();
        for id in order.iter().rev() {
            if let Some((_, _, up)) = parent[id.index()] {
                let below = subtree[id.index()];
                subtree[up.index()] += below;
            }
        }

        let mut boundaries = vec![(root_end, Vector3::zero()); count];
        for &id in &order {
            let beam = &self.graph[id].beam;
            let layout = &layouts[id.index()];
            let known_end = parent[id.index()].map_or(root_end, |(_, end, _)| end);
            let mut global = Self::support_resultant(beam, layout, &[known_end]);
            if parent[id.index()].is_some() {
                global -= subtree[id.index()];
            }
            for (_, own_end, child, _) in self.joints(id) {
                let is_child = matches!(parent[child.index()], Some((_, _, up)) if up == id);
                if own_end == known_end && is_child {
                    global += subtree[child.index()];
                }
            }
            let at_joint = global.moved_to(layout.position(known_end));
            boundaries[id.index()] = (known_end, rotate(at_joint, -layout.angle));
        }
        Ok(boundaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::support::SupportKind;
    use approx::assert_relative_eq;

    fn horizontal(length: f64, x: f64) -> (Beam, Vector3, f64, Vector3) {
        (
            Beam::new(length).expect("valid length"),
            point(x, 0.0),
            0.0,
            point(x + length, 0.0),
        )
    }

    fn place(structure: &mut Structure, parts: (Beam, Vector3, f64, Vector3)) -> BeamId {
        structure.place(parts.0, parts.1, parts.2, parts.3)
    }

    #[test]
    fn connections_are_symmetric() {
        let mut structure = Structure::new();
        let a = place(&mut structure, horizontal(2.0, 0.0));
        let b = place(&mut structure, horizontal(3.0, 2.0));
        structure
            .connect(a, End::End, b, End::Start)
            .expect("both beams exist");
        assert_eq!(structure.neighbors(a, End::End), Ok(vec![(b, End::Start)]));
        assert_eq!(structure.neighbors(b, End::Start), Ok(vec![(a, End::End)]));
        assert_eq!(structure.neighbors(a, End::Start), Ok(vec![]));
        assert_eq!(structure.connection_count(), 1);
    }

    #[test]
    fn invalid_edits_are_rejected() {
        let mut structure = Structure::new();
        let a = place(&mut structure, horizontal(2.0, 0.0));
        let missing = NodeIndex::new(5);
        assert_eq!(
            structure.connect(a, End::End, a, End::Start),
            Err(StructureEditError::SelfConnection(a))
        );
        assert_eq!(
            structure.connect(a, End::End, missing, End::Start),
            Err(StructureEditError::UnknownBeam(missing))
        );
        assert_eq!(
            structure.remove_connection(EdgeIndex::new(0)),
            Err(StructureEditError::UnknownConnection(EdgeIndex::new(0)))
        );
        assert!(structure.beam(missing).is_err());
    }

    #[test]
    fn removing_a_connection_disconnects_the_beams() {
        let mut structure = Structure::new();
        let a = place(&mut structure, horizontal(2.0, 0.0));
        let b = place(&mut structure, horizontal(3.0, 2.0));
        let joint = structure
            .connect(a, End::End, b, End::Start)
            .expect("both beams exist");
        structure.remove_connection(joint).expect("joint exists");
        assert_eq!(structure.connection_count(), 0);
        assert_eq!(structure.neighbors(a, End::End), Ok(vec![]));
    }

    #[test]
    fn editing_a_beam_discards_the_solution() {
        let mut structure = Structure::new();
        let (mut beam, start, angle, end) = horizontal(4.0, 0.0);
        beam.attach_support(End::Start, SupportKind::Fixed);
        let id = structure.place(beam, start, angle, end);
        structure.solve_system().expect("cantilever is isostatic");
        assert!(structure.is_solved());
        assert_eq!(structure.reactions().len(), 1);

        structure
            .beam_mut(id)
            .expect("beam exists")
            .add_concentrated(1.0, 2.0, 270.0)
            .expect("load on beam");
        assert!(!structure.is_solved());
        assert!(structure.reactions().is_empty());
        assert!(!structure.beam(id).expect("beam exists").is_solved());
    }

    #[test]
    fn misplaced_end_is_reported() {
        let mut structure = Structure::new();
        let mut beam = Beam::new(4.0).expect("valid length");
        beam.attach_support(End::Start, SupportKind::Fixed);
        let id = structure.place(beam, point(0.0, 0.0), 0.0, point(5.0, 0.0));
        assert_eq!(
            structure.solve_system(),
            Err(AnalysisError::PlacementMismatch {
                beam: id,
                expected_x: 4.0,
                expected_y: 0.0,
                found_x: 5.0,
                found_y: 0.0,
            })
        );
    }

    #[test]
    fn connected_ends_must_meet() {
        let mut structure = Structure::new();
        let (mut beam, start, angle, end) = horizontal(2.0, 0.0);
        beam.attach_support(End::Start, SupportKind::Fixed);
        let a = structure.place(beam, start, angle, end);
        let b = place(&mut structure, horizontal(2.0, 2.0));
        structure
            .connect(a, End::Start, b, End::Start)
            .expect("both beams exist");
        assert_eq!(
            structure.solve_system(),
            Err(AnalysisError::DisjointJoint {
                first: (a, End::Start),
                second: (b, End::Start),
            })
        );
    }

    #[test]
    fn screen_units_are_converted() {
        let config = AnalysisConfig {
            units: crate::config::UnitConfig::screen(),
            ..AnalysisConfig::default()
        };
        let mut structure = Structure::with_config(config);
        let mut beam = Beam::new(3.0).expect("valid length");
        beam.attach_support(End::Start, SupportKind::Fixed);
        beam.add_concentrated(2.0, 3.0, 0.0).expect("load on beam");
        // Drawn upwards on a surface whose Y axis points down.
        structure.place(beam, point(0.0, 0.0), -90.0, point(0.0, -30.0));
        let solutions = structure.solve_system().expect("cantilever is isostatic");
        let reactions = structure.reactions();
        assert_relative_eq!(reactions[0].2.y, -2.0, epsilon = 1.0e-12);
        assert_relative_eq!(
            solutions[0].stress_function(StressKind::Normal, 1.5).expect("on the beam"),
            2.0,
            epsilon = 1.0e-12
        );
    }

    #[test]
    fn model_round_trips_through_json() {
        let mut structure = Structure::new();
        let (mut beam, start, angle, end) = horizontal(4.0, 0.0);
        beam.attach_support(End::Start, SupportKind::Pinned);
        beam.attach_support(End::End, SupportKind::Simple { angle: 90.0 });
        beam.add_distributed(2.0, crate::Polynomial::linear(1.0, 0.5), 1.0, 270.0)
            .expect("span fits");
        beam.set_moment_at(3.0, 2.0).expect("moment on beam");
        structure.place(beam, start, angle, end);
        let b = place(&mut structure, horizontal(1.0, 4.0));
        structure
            .connect(NodeIndex::new(0), End::End, b, End::Start)
            .expect("both beams exist");
        structure.solve_system().expect("isostatic");

        let json = structure.to_json().expect("serializable");
        let mut loaded = Structure::from_json(&json).expect("valid model");
        assert!(!loaded.is_solved());
        assert_eq!(loaded.beam_count(), 2);
        assert_eq!(loaded.connection_count(), 1);
        assert_eq!(
            loaded.beam(NodeIndex::new(0)).expect("beam exists").loads(),
            structure.beam(NodeIndex::new(0)).expect("beam exists").loads()
        );

        let original = structure.solve_system().expect("isostatic");
        let reloaded = loaded.solve_system().expect("isostatic");
        assert_eq!(original, reloaded);
    }

    #[test]
    fn invalid_models_are_rejected() {
        let mut structure = Structure::new();
        place(&mut structure, horizontal(4.0, 0.0));
        let json = structure.to_json().expect("serializable");
        let broken = json.replacen("\"length\": 4.0", "\"length\": -4.0", 1);
        assert!(matches!(
            Structure::from_json(&broken),
            Err(ModelError::Beam { .. })
        ));
        assert!(matches!(
            Structure::from_json("[1, 2"),
            Err(ModelError::Json(_))
        ));
    }

    #[test]
    fn empty_intensity_in_a_model_is_read_as_no_load() {
        fn clear_intensities(value: &mut serde_json::Value) {
            match value {
                serde_json::Value::Object(map) => {
                    for (key, field) in map.iter_mut() {
                        if key == "intensity" {
                            *field = serde_json::Value::Array(Vec::new());
                        } else {
                            clear_intensities(field);
                        }
                    }
                }
                serde_json::Value::Array(items) => items.iter_mut().for_each(clear_intensities),
                _ => {}
            }
        }

        let mut structure = Structure::new();
        let (mut beam, start, angle, end) = horizontal(4.0, 0.0);
        beam.attach_support(End::Start, SupportKind::Fixed);
        beam.add_distributed(4.0, crate::Polynomial::constant(1.0), 0.0, 270.0)
            .expect("span fits");
        let id = structure.place(beam, start, angle, end);

        let mut model: serde_json::Value =
            serde_json::from_str(&structure.to_json().expect("serializable")).expect("valid JSON");
        clear_intensities(&mut model);
        let mut loaded = Structure::from_json(&model.to_string()).expect("valid model");
        let solutions = loaded.solve_system().expect("cantilever is isostatic");

        assert_eq!(solutions.len(), 1);
        assert_relative_eq!(
            solutions[0]
                .stress_function(StressKind::Bending, 0.0)
                .expect("on the beam"),
            0.0
        );
        let reaction = loaded.reactions()[0];
        assert_eq!(reaction.0, id);
        assert_relative_eq!(reaction.2.magnitude(), 0.0);
    }

    #[test]
    fn models_with_vanishing_beams_are_rejected() {
        let mut structure = Structure::new();
        place(&mut structure, horizontal(4.0, 0.0));
        let json = structure.to_json().expect("serializable");
        let broken = json.replacen("\"length\": 4.0", "\"length\": 1e-10", 1);
        assert!(matches!(
            Structure::from_json(&broken),
            Err(ModelError::Beam {
                source: BeamError::TooShort { .. },
                ..
            })
        ));
    }
}
