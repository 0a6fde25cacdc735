//! Straight beams, the loads they carry and their internal-force diagrams.
//!
//! A beam works in its own frame: X runs from [`End::Start`] to [`End::End`], Y is X
//! rotated by +90° and moments are counter-clockwise. Load angles are measured from
//! the beam axis. Internal forces at a section `x` describe the part `[0, x]`: the
//! normal force is positive in tension, the shear is the sum of transverse forces on
//! that part and the bending moment is positive when sagging, so that the derivative
//! of the bending moment is the shear.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::errors::BeamError;
use crate::geometry::Vector3;
use crate::loads::{AppliedLoad, AppliedMoment, Concentrated, Distributed, Load, Moment};
use crate::polynomial::Polynomial;
use crate::support::{Support, SupportKind};
use crate::trig::{pcos, psin};

/// Distance below which two stations along a beam are the same point.
const STATION_TOLERANCE: f64 = 1.0e-9;

/// One of the two ends of a beam.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum End {
    /// The end at position 0.
    Start,
    /// The end at position `length`.
    End,
}

impl End {
    /// The other end.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            End::Start => End::End,
            End::End => End::Start,
        }
    }
}

/// Internal force resultant plotted by a diagram.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressKind {
    /// Axial force, tension positive.
    Normal,
    /// Transverse force.
    Shear,
    /// Bending moment, sagging positive.
    Bending,
}

/// Stretch of a diagram described by one polynomial per internal force.
///
/// The polynomials take the distance from [`StressSegment::offset`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StressSegment {
    /// Axial force.
    normal: Polynomial,
    /// Shear force.
    shear: Polynomial,
    /// Bending moment.
    bending: Polynomial,
    /// Beam position of the local origin.
    offset: f64,
    /// Beam position where the segment stops.
    end: f64,
}

impl StressSegment {
    /// Polynomial of the requested internal force.
    #[must_use]
    pub fn polynomial(&self, kind: StressKind) -> &Polynomial {
        match kind {
            StressKind::Normal => &self.normal,
            StressKind::Shear => &self.shear,
            StressKind::Bending => &self.bending,
        }
    }

    /// Beam position where the segment begins (local coordinate zero).
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Beam position up to which the segment is valid.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.end
    }
}

/// Piecewise-polynomial internal-force diagrams of a solved beam.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StressDiagram {
    /// Beam length.
    length: f64,
    /// Segments in ascending position.
    segments: Vec<StressSegment>,
}

impl StressDiagram {
    /// Length of the beam the diagram belongs to.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Segments ordered by position.
    #[must_use]
    pub fn segments(&self) -> &[StressSegment] {
        &self.segments
    }

    /// Value of the `kind` diagram at position `x`.
    ///
    /// At a discontinuity the value just before `x` is returned.
    ///
    /// # Errors
    ///
    /// Returns [`BeamError::OutOfRange`] when `x` is outside `[0, length]`.
    pub fn stress_function(&self, kind: StressKind, x: f64) -> Result<f64, BeamError> {
        if !(0.0..=self.length).contains(&x) {
            return Err(BeamError::OutOfRange {
                position: x,
                length: self.length,
            });
        }
        self.segments
            .iter()
            .find(|segment| x <= segment.end)
            .or_else(|| self.segments.last())
            .map(|segment| segment.polynomial(kind).evaluate(x - segment.offset))
            .ok_or(BeamError::Unsolved)
    }

    /// `count` evenly spaced `(position, value)` samples, both ends included.
    ///
    /// # Errors
    ///
    /// Returns [`BeamError::Unsolved`] if the diagram holds no segment.
    pub fn sample(&self, kind: StressKind, count: usize) -> Result<Vec<(f64, f64)>, BeamError> {
        let count = count.max(2);
        (0..count)
            .map(|i| {
                let x = self.length * i as f64 / (count - 1) as f64;
                Ok((x, self.stress_function(kind, x)?))
            })
            .collect()
    }
}

/// A straight beam with its loads and end supports.
///
/// A beam does not know where it sits in the frame; the [`Structure`](crate::Structure)
/// owns its placement and its connections to other beams.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Beam {
    /// Length in metres.
    length: f64,
    /// Support at position 0.
    start_support: Option<Support>,
    /// Support at position `length`.
    end_support: Option<Support>,
    /// Loads in insertion order.
    loads: Vec<AppliedLoad>,
    /// Applied moment.
    moment: Option<AppliedMoment>,
    /// Diagrams of the last solve.
    #[serde(skip)]
    diagram: Option<StressDiagram>,
    /// Far-end resultant of the last solve.
    #[serde(skip)]
    far_end: Option<Vector3>,
}

impl Beam {
    /// Create an unloaded beam.
    ///
    /// # Errors
    ///
    /// Returns [`BeamError::NonPositiveLength`] unless `length` is positive and finite,
    /// and [`BeamError::TooShort`] for a length that cannot hold two distinct ends.
    ///
    /// # Examples
    /// ```
    /// use framex::Beam;
    ///
    /// let beam = Beam::new(4.0).expect("valid length");
    /// assert_eq!(beam.length(), 4.0);
    /// assert!(!beam.is_solved());
    /// ```
    pub fn new(length: f64) -> Result<Self, BeamError> {
        check_length(length)?;
        Ok(Self {
            length,
            start_support: None,
            end_support: None,
            loads: Vec::new(),
            moment: None,
            diagram: None,
            far_end: None,
        })
    }

    /// Length in metres.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Loads in the order they were added.
    #[must_use]
    pub fn loads(&self) -> &[AppliedLoad] {
        &self.loads
    }

    /// Applied moment, if any.
    #[must_use]
    pub fn moment(&self) -> Option<&AppliedMoment> {
        self.moment.as_ref()
    }

    /// Support at `end`, if any.
    #[must_use]
    pub fn support(&self, end: End) -> Option<&Support> {
        match end {
            End::Start => self.start_support.as_ref(),
            End::End => self.end_support.as_ref(),
        }
    }

    pub(crate) fn support_mut(&mut self, end: End) -> Option<&mut Support> {
        match end {
            End::Start => self.start_support.as_mut(),
            End::End => self.end_support.as_mut(),
        }
    }

    /// Add a point load of `magnitude` kN at `position`, pointing `angle` degrees from the axis.
    ///
    /// # Errors
    ///
    /// Returns [`BeamError::OutOfRange`] when `position` is not on the beam.
    pub fn add_concentrated(
        &mut self,
        magnitude: f64,
        position: f64,
        angle: f64,
    ) -> Result<(), BeamError> {
        self.check_position(position)?;
        self.reset();
        self.loads.push(AppliedLoad {
            load: Load::Concentrated(Concentrated::new(magnitude)),
            position,
            angle,
        });
        Ok(())
    }

    /// Add a load spread over `length` metres from `position`, with `intensity` expressed
    /// in the span's own coordinate, pointing `angle` degrees from the axis.
    ///
    /// # Errors
    ///
    /// Returns [`BeamError::NonPositiveLength`] for an invalid span length and
    /// [`BeamError::SpanOutOfRange`] when the span does not fit on the beam.
    pub fn add_distributed(
        &mut self,
        length: f64,
        intensity: Polynomial,
        position: f64,
        angle: f64,
    ) -> Result<(), BeamError> {
        let distributed = Distributed::new(length, intensity)?;
        if !(position >= 0.0 && position + length <= self.length + STATION_TOLERANCE) {
            return Err(BeamError::SpanOutOfRange {
                start: position,
                span: length,
                length: self.length,
            });
        }
        self.reset();
        self.loads.push(AppliedLoad {
            load: Load::Distributed(distributed),
            position,
            angle,
        });
        Ok(())
    }

    /// Apply a moment of `magnitude` kN·m at the start of the beam, replacing any previous one.
    pub fn set_moment(&mut self, magnitude: f64) {
        self.reset();
        self.moment = Some(AppliedMoment {
            moment: Moment::new(magnitude),
            position: 0.0,
        });
    }

    /// Apply a moment of `magnitude` kN·m at `position`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`BeamError::OutOfRange`] when `position` is not on the beam.
    pub fn set_moment_at(&mut self, magnitude: f64, position: f64) -> Result<(), BeamError> {
        self.check_position(position)?;
        self.reset();
        self.moment = Some(AppliedMoment {
            moment: Moment::new(magnitude),
            position,
        });
        Ok(())
    }

    /// Attach a support of `kind` to `end`, replacing any previous one.
    pub fn attach_support(&mut self, end: End, kind: SupportKind) {
        self.reset();
        let support = Some(Support::new(kind));
        match end {
            End::Start => self.start_support = support,
            End::End => self.end_support = support,
        }
    }

    /// Remove the support at `end`, returning it.
    pub fn detach_support(&mut self, end: End) -> Option<Support> {
        self.reset();
        match end {
            End::Start => self.start_support.take(),
            End::End => self.end_support.take(),
        }
    }

    /// Global position of the point `point` metres along a beam that starts at `start` and
    /// is laid at `angle` degrees.
    ///
    /// # Errors
    ///
    /// Returns [`BeamError::OutOfRange`] when `point` is not on the beam.
    pub fn point_pos(&self, start: Vector3, point: f64, angle: f64) -> Result<Vector3, BeamError> {
        self.check_position(point)?;
        Ok(start + Vector3::new(point * pcos(angle), point * psin(angle), 0.0))
    }

    /// Whether the internal forces have been computed.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.diagram.is_some()
    }

    /// Diagrams from the last solve.
    #[must_use]
    pub fn diagram(&self) -> Option<&StressDiagram> {
        self.diagram.as_ref()
    }

    /// Force and moment acting on the beam at the end opposite the known one, from the last solve.
    #[must_use]
    pub fn far_end_resultant(&self) -> Option<Vector3> {
        self.far_end
    }

    /// Value of the `kind` diagram at position `x`.
    ///
    /// # Errors
    ///
    /// Returns [`BeamError::Unsolved`] before [`Beam::solve`] and [`BeamError::OutOfRange`]
    /// when `x` is outside `[0, length]`.
    pub fn stress_function(&self, kind: StressKind, x: f64) -> Result<f64, BeamError> {
        self.diagram
            .as_ref()
            .ok_or(BeamError::Unsolved)?
            .stress_function(kind, x)
    }

    /// Compute the internal-force diagrams.
    ///
    /// `boundary` is the force and moment acting on the beam at the known end, in the
    /// beam frame; `end_first` tells whether that end is [`End::End`] (otherwise it is
    /// [`End::Start`]). The sweep starts at the known end and carries the resultant of
    /// every external load already passed, with its moment taken about the current
    /// section. The returned vector is the force and moment acting on the beam at the
    /// other end.
    ///
    /// Solving a beam that is already solved does nothing and returns the stored result.
    ///
    /// # Errors
    ///
    /// Returns [`BeamError::NonFiniteBoundary`] when `boundary` holds a NaN or an infinity.
    ///
    /// # Examples
    /// ```
    /// use framex::{load, Beam, StressKind};
    ///
    /// // Cantilever clamped at its start, 10 kN pulling down at the tip.
    /// let mut beam = Beam::new(4.0).expect("valid length");
    /// beam.add_concentrated(10.0, 4.0, 270.0).expect("load on the beam");
    /// let tip = beam.solve(load(0.0, 10.0, 40.0), false).expect("finite boundary");
    /// assert!(tip.magnitude() < 1.0e-12);
    /// assert_eq!(beam.stress_function(StressKind::Bending, 0.0), Ok(-40.0));
    /// ```
    pub fn solve(&mut self, boundary: Vector3, end_first: bool) -> Result<Vector3, BeamError> {
        if let Some(far_end) = self.far_end {
            return Ok(far_end);
        }
        if !(boundary.x.is_finite() && boundary.y.is_finite() && boundary.z.is_finite()) {
            return Err(BeamError::NonFiniteBoundary([
                boundary.x, boundary.y, boundary.z,
            ]));
        }

        let stations = self.stations();
        let actions = self.station_actions(&stations);
        let last = stations.len() - 1;
        let mut segments = Vec::with_capacity(last);
        let mut running = boundary;
        if end_first {
            running += actions[last];
            for i in (1..=last).rev() {
                let (segment, next) =
                    self.descending_segment(stations[i - 1], stations[i], running);
                segments.push(segment);
                running = next + actions[i - 1];
            }
            segments.reverse();
        } else {
            running += actions[0];
            for i in 1..=last {
                let (segment, next) =
                    self.ascending_segment(stations[i - 1], stations[i], running);
                segments.push(segment);
                running = next + actions[i];
            }
        }

        let far_end = -running;
        trace!(
            "solved beam of length {} from the {} end in {} segments, far-end resultant {:?}",
            self.length,
            if end_first { "end" } else { "start" },
            segments.len(),
            far_end
        );
        self.diagram = Some(StressDiagram {
            length: self.length,
            segments,
        });
        self.far_end = Some(far_end);
        Ok(far_end)
    }

    /// Forget the diagrams and the support reactions of a previous solve.
    pub(crate) fn reset(&mut self) {
        self.diagram = None;
        self.far_end = None;
        for support in [&mut self.start_support, &mut self.end_support]
            .into_iter()
            .flatten()
        {
            support.clear_reaction();
        }
    }

    /// Check a beam that was built without going through the editing methods.
    pub(crate) fn validate(&self) -> Result<(), BeamError> {
        check_length(self.length)?;
        for applied in &self.loads {
            self.check_position(applied.position)?;
            if let Load::Distributed(distributed) = &applied.load {
                Distributed::new(distributed.length(), distributed.intensity().clone())?;
            }
            let span = applied.load.span();
            if applied.position + span > self.length + STATION_TOLERANCE {
                return Err(BeamError::SpanOutOfRange {
                    start: applied.position,
                    span,
                    length: self.length,
                });
            }
        }
        self.moment
            .map_or(Ok(()), |applied| self.check_position(applied.position))
    }

    /// Reject positions off the beam.
    fn check_position(&self, position: f64) -> Result<(), BeamError> {
        if (0.0..=self.length).contains(&position) {
            Ok(())
        } else {
            Err(BeamError::OutOfRange {
                position,
                length: self.length,
            })
        }
    }

    /// Sorted positions where the loading changes: both ends, point loads, moments and
    /// the ends of every distributed span.
    fn stations(&self) -> Vec<f64> {
        let mut stations = vec![0.0, self.length];
        for applied in &self.loads {
            stations.push(applied.position);
            if let Load::Distributed(distributed) = &applied.load {
                stations.push((applied.position + distributed.length()).min(self.length));
            }
        }
        if let Some(moment) = &self.moment {
            stations.push(moment.position);
        }
        stations.sort_by(f64::total_cmp);
        stations.dedup_by(|later, earlier| (*later - *earlier).abs() <= STATION_TOLERANCE);
        // The far end may have merged into a load just before it.
        if let Some(last) = stations.last_mut() {
            *last = self.length;
        }
        stations
    }

    /// Point loads and moments lumped at each station, in the beam frame.
    ///
    /// Every action goes to the single station nearest to it.
    fn station_actions(&self, stations: &[f64]) -> Vec<Vector3> {
        let mut actions = vec![Vector3::zero(); stations.len()];
        for applied in &self.loads {
            if let Load::Concentrated(force) = &applied.load {
                actions[nearest_station(stations, applied.position)] +=
                    force.force_vector(applied.angle);
            }
        }
        if let Some(applied) = &self.moment {
            actions[nearest_station(stations, applied.position)].z += applied.moment.magnitude;
        }
        actions
    }

    /// Axial and transverse intensity over `[lower, upper]` from every span covering it,
    /// expressed in the coordinate `x - lower`.
    fn segment_intensity(&self, lower: f64, upper: f64) -> (Polynomial, Polynomial) {
        self.loads
            .iter()
            .filter_map(|applied| match &applied.load {
                Load::Distributed(distributed)
                    if applied.position <= lower + STATION_TOLERANCE
                        && applied.position + distributed.length() >= upper - STATION_TOLERANCE =>
                {
                    let (axial, transverse) = distributed.resolved(applied.angle);
                    let shift = lower - applied.position;
                    Some((axial.shifted(shift), transverse.shifted(shift)))
                }
                _ => None,
            })
            .fold(
                (Polynomial::zero(), Polynomial::zero()),
                |(axial, transverse), (a, t)| (&axial + &a, &transverse + &t),
            )
    }

    /// Segment swept upwards from `lower`, where the running resultant is `running`.
    ///
    /// Returns the segment and the running resultant arriving at `upper`.
    fn ascending_segment(
        &self,
        lower: f64,
        upper: f64,
        running: Vector3,
    ) -> (StressSegment, Vector3) {
        let span = upper - lower;
        let (axial, transverse) = self.segment_intensity(lower, upper);
        let axial_total = axial.primitive();
        let transverse_total = transverse.primitive();
        let transverse_moment = transverse_total.primitive();

        let segment = StressSegment {
            normal: -(&Polynomial::constant(running.x) + &axial_total),
            shear: &Polynomial::constant(running.y) + &transverse_total,
            bending: &Polynomial::linear(-running.z, running.y) + &transverse_moment,
            offset: lower,
            end: upper,
        };
        let next = Vector3::new(
            running.x + axial_total.evaluate(span),
            running.y + transverse_total.evaluate(span),
            running.z - span * running.y - transverse_moment.evaluate(span),
        );
        (segment, next)
    }

    /// Segment swept downwards from `upper`, where the running resultant is `running`.
    ///
    /// Returns the segment and the running resultant arriving at `lower`.
    fn descending_segment(
        &self,
        lower: f64,
        upper: f64,
        running: Vector3,
    ) -> (StressSegment, Vector3) {
        let span = upper - lower;
        let (axial, transverse) = self.segment_intensity(lower, upper);
        let axial_total = axial.primitive();
        let transverse_total = transverse.primitive();
        let transverse_moment = transverse_total.primitive();

        let axial_at_lower = running.x + axial_total.evaluate(span);
        let shear_at_lower = running.y + transverse_total.evaluate(span);
        let bending = &Polynomial::linear(
            running.z + span * shear_at_lower - transverse_moment.evaluate(span),
            -shear_at_lower,
        ) + &transverse_moment;

        let next = Vector3::new(axial_at_lower, shear_at_lower, bending.evaluate(0.0));
        let segment = StressSegment {
            normal: &Polynomial::constant(axial_at_lower) - &axial_total,
            shear: &transverse_total - &Polynomial::constant(shear_at_lower),
            bending,
            offset: lower,
            end: upper,
        };
        (segment, next)
    }
}

/// Reject lengths that are not finite or too short to separate the two ends.
fn check_length(length: f64) -> Result<(), BeamError> {
    if !(length.is_finite() && length > 0.0) {
        return Err(BeamError::NonPositiveLength(length));
    }
    if length <= STATION_TOLERANCE {
        return Err(BeamError::TooShort {
            length,
            minimum: STATION_TOLERANCE,
        });
    }
    Ok(())
}

/// Index of the station closest to `position` in a sorted, non-empty station list.
fn nearest_station(stations: &[f64], position: f64) -> usize {
    let after = stations.partition_point(|&station| station < position);
    if after == 0 {
        0
    } else if after == stations.len()
        || position - stations[after - 1] <= stations[after] - position
    {
        after - 1
    } else {
        after
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{load, point};
    use approx::assert_relative_eq;

    /// 10 m beam with 10 kN pointing down at mid-span.
    fn symmetric_beam() -> Beam {
        let mut beam = Beam::new(10.0).expect("valid length");
        beam.add_concentrated(10.0, 5.0, 270.0).expect("load on beam");
        beam
    }

    #[test]
    fn simply_supported_from_the_start() {
        let mut beam = symmetric_beam();
        let far = beam.solve(load(0.0, 5.0, 0.0), false).expect("solves");
        assert_relative_eq!(far.y, 5.0, epsilon = 1.0e-12);
        assert_relative_eq!(far.z, 0.0, epsilon = 1.0e-12);

        let value = |kind, x| beam.stress_function(kind, x).expect("in range");
        assert_relative_eq!(value(StressKind::Shear, 2.0), 5.0);
        assert_relative_eq!(value(StressKind::Shear, 7.0), -5.0);
        assert_relative_eq!(value(StressKind::Bending, 0.0), 0.0);
        assert_relative_eq!(value(StressKind::Bending, 5.0), 25.0);
        assert_relative_eq!(value(StressKind::Bending, 10.0), 0.0, epsilon = 1.0e-12);
        assert_relative_eq!(value(StressKind::Normal, 3.0), 0.0);
    }

    #[test]
    fn sweep_direction_does_not_change_the_diagrams() {
        let mut from_start = Beam::new(6.0).expect("valid length");
        from_start
            .add_distributed(4.0, Polynomial::linear(1.0, 0.5), 1.0, 250.0)
            .expect("span fits");
        from_start.add_concentrated(3.0, 2.5, 120.0).expect("load on beam");
        from_start.set_moment_at(2.0, 4.0).expect("moment on beam");
        let mut from_end = from_start.clone();

        let boundary = load(1.5, 4.0, -2.0);
        let far = from_start.solve(boundary, false).expect("solves");
        let back = from_end.solve(far, true).expect("solves");
        assert_relative_eq!(back.x, boundary.x, epsilon = 1.0e-9);
        assert_relative_eq!(back.y, boundary.y, epsilon = 1.0e-9);
        assert_relative_eq!(back.z, boundary.z, epsilon = 1.0e-9);

        for kind in [StressKind::Normal, StressKind::Shear, StressKind::Bending] {
            for i in 0..=60 {
                let x = f64::from(i) * 0.1;
                assert_relative_eq!(
                    from_start.stress_function(kind, x).expect("in range"),
                    from_end.stress_function(kind, x).expect("in range"),
                    epsilon = 1.0e-9
                );
            }
        }
    }

    #[test]
    fn uniform_load_gives_a_parabola() {
        let mut beam = Beam::new(4.0).expect("valid length");
        beam.add_distributed(4.0, Polynomial::constant(2.0), 0.0, 270.0)
            .expect("span fits");
        let far = beam.solve(load(0.0, 4.0, 0.0), false).expect("solves");
        assert_relative_eq!(far.y, 4.0, epsilon = 1.0e-12);
        assert_relative_eq!(far.z, 0.0, epsilon = 1.0e-12);
        assert_relative_eq!(
            beam.stress_function(StressKind::Bending, 2.0).expect("in range"),
            4.0,
            epsilon = 1.0e-12
        );
        assert_relative_eq!(
            beam.stress_function(StressKind::Shear, 3.0).expect("in range"),
            -2.0,
            epsilon = 1.0e-12
        );
    }

    #[test]
    fn bending_slope_is_the_shear() {
        let mut beam = Beam::new(5.0).expect("valid length");
        beam.add_distributed(3.0, Polynomial::new(vec![2.0, -0.5, 0.3]), 0.5, 260.0)
            .expect("span fits");
        beam.add_concentrated(4.0, 4.2, 270.0).expect("load on beam");
        beam.solve(load(0.3, 3.0, 1.0), false).expect("solves");

        let h = 1.0e-5;
        for x in [0.2, 0.9, 1.7, 2.4, 3.1, 3.9, 4.6] {
            let slope = (beam.stress_function(StressKind::Bending, x + h).expect("in range")
                - beam.stress_function(StressKind::Bending, x - h).expect("in range"))
                / (2.0 * h);
            let shear = beam.stress_function(StressKind::Shear, x).expect("in range");
            assert_relative_eq!(slope, shear, epsilon = 1.0e-5);
        }
    }

    #[test]
    fn applied_moment_makes_the_bending_jump() {
        let mut beam = Beam::new(4.0).expect("valid length");
        beam.set_moment_at(8.0, 2.0).expect("moment on beam");
        let far = beam.solve(load(0.0, 2.0, 0.0), false).expect("solves");
        assert_relative_eq!(far.y, -2.0, epsilon = 1.0e-12);
        assert_relative_eq!(far.z, 0.0, epsilon = 1.0e-12);
        assert_relative_eq!(
            beam.stress_function(StressKind::Bending, 2.0).expect("in range"),
            4.0
        );
        assert_relative_eq!(
            beam.stress_function(StressKind::Bending, 2.0 + 1.0e-9).expect("in range"),
            -4.0,
            epsilon = 1.0e-6
        );
    }

    #[test]
    fn axial_load_shows_in_the_normal_diagram() {
        let mut beam = Beam::new(3.0).expect("valid length");
        beam.add_concentrated(6.0, 3.0, 0.0).expect("load on beam");
        beam.solve(load(-6.0, 0.0, 0.0), false).expect("solves");
        assert_relative_eq!(
            beam.stress_function(StressKind::Normal, 1.0).expect("in range"),
            6.0
        );
    }

    #[test]
    fn second_solve_is_a_no_op() {
        let mut beam = symmetric_beam();
        let first = beam.solve(load(0.0, 5.0, 0.0), false).expect("solves");
        let second = beam.solve(load(0.0, 100.0, 0.0), true).expect("no-op");
        assert_eq!(first, second);
        assert_relative_eq!(
            beam.stress_function(StressKind::Shear, 1.0).expect("in range"),
            5.0
        );
    }

    #[test]
    fn queries_are_checked() {
        let mut beam = symmetric_beam();
        assert_eq!(
            beam.stress_function(StressKind::Shear, 1.0),
            Err(BeamError::Unsolved)
        );
        beam.solve(load(0.0, 5.0, 0.0), false).expect("solves");
        assert_eq!(
            beam.stress_function(StressKind::Shear, 10.5),
            Err(BeamError::OutOfRange {
                position: 10.5,
                length: 10.0
            })
        );
        assert!(beam.stress_function(StressKind::Shear, -0.1).is_err());

        let mut fresh = symmetric_beam();
        assert!(matches!(
            fresh.solve(load(f64::NAN, 0.0, 0.0), false),
            Err(BeamError::NonFiniteBoundary(_))
        ));
    }

    #[test]
    fn editing_clears_the_solution() {
        let mut beam = symmetric_beam();
        beam.solve(load(0.0, 5.0, 0.0), false).expect("solves");
        beam.set_moment(1.0);
        assert!(!beam.is_solved());
        assert_eq!(beam.moment().map(|m| m.position), Some(0.0));
        assert!(beam
            .solve(load(f64::INFINITY, 0.0, 0.0), false)
            .is_err());
    }

    #[test]
    fn loads_must_lie_on_the_beam() {
        let mut beam = Beam::new(2.0).expect("valid length");
        assert!(beam.add_concentrated(1.0, 2.5, 90.0).is_err());
        assert!(beam.set_moment_at(1.0, -1.0).is_err());
        assert_eq!(
            beam.add_distributed(1.5, Polynomial::constant(1.0), 1.0, 90.0),
            Err(BeamError::SpanOutOfRange {
                start: 1.0,
                span: 1.5,
                length: 2.0
            })
        );
        assert!(beam.loads().is_empty());
        assert!(Beam::new(0.0).is_err());
    }

    #[test]
    fn loads_are_not_shared_between_beams() {
        let mut first = Beam::new(1.0).expect("valid length");
        let second = Beam::new(1.0).expect("valid length");
        first.add_concentrated(1.0, 0.5, 90.0).expect("load on beam");
        assert_eq!(first.loads().len(), 1);
        assert!(second.loads().is_empty());
    }

    #[test]
    fn point_position_follows_the_beam_angle() {
        let beam = Beam::new(4.0).expect("valid length");
        let position = beam.point_pos(point(1.0, 1.0), 2.0, 90.0).expect("on beam");
        assert_eq!(position, point(1.0, 3.0));
        assert!(beam.point_pos(point(0.0, 0.0), 4.5, 0.0).is_err());
    }

    #[test]
    fn supports_are_owned_by_their_end() {
        let mut beam = Beam::new(1.0).expect("valid length");
        beam.attach_support(End::End, SupportKind::Fixed);
        assert!(beam.support(End::Start).is_none());
        assert_eq!(
            beam.support(End::End).map(Support::kind),
            Some(SupportKind::Fixed)
        );
        assert_eq!(End::Start.opposite(), End::End);
        assert!(beam.detach_support(End::End).is_some());
        assert!(beam.support(End::End).is_none());
    }

    #[test]
    fn samples_cover_both_ends() {
        let mut beam = symmetric_beam();
        beam.solve(load(0.0, 5.0, 0.0), false).expect("solves");
        let samples = beam
            .diagram()
            .expect("solved")
            .sample(StressKind::Bending, 3)
            .expect("solved diagram");
        assert_eq!(samples.len(), 3);
        assert_relative_eq!(samples[1].0, 5.0);
        assert_relative_eq!(samples[1].1, 25.0);
        assert_relative_eq!(samples[2].0, 10.0);
    }

    #[test]
    fn beams_too_short_to_have_two_ends_are_rejected() {
        assert!(matches!(
            Beam::new(1.0e-10),
            Err(BeamError::TooShort { .. })
        ));
        let beam: Beam = serde_json::from_str(
            r#"{"length": 1e-10, "start_support": null, "end_support": null, "loads": [], "moment": null}"#,
        )
        .expect("valid JSON");
        assert!(matches!(beam.validate(), Err(BeamError::TooShort { .. })));

        let mut beam = Beam::new(2.0e-9).expect("long enough");
        beam.solve(load(0.0, 1.0, 0.0), false).expect("solves");
        assert_eq!(beam.diagram().expect("solved").segments().len(), 1);
        assert_relative_eq!(
            beam.stress_function(StressKind::Shear, 0.0).expect("on the beam"),
            1.0
        );
    }

    #[test]
    fn closely_spaced_loads_are_counted_once() {
        let mut beam = Beam::new(1.0).expect("valid length");
        for position in [0.0, 0.6e-9, 1.2e-9] {
            beam.add_concentrated(1.0, position, 90.0).expect("load on the beam");
        }
        let far_end = beam.solve(Vector3::zero(), false).expect("solves");
        assert_relative_eq!(far_end.y, -3.0, epsilon = 1.0e-12);
        assert_relative_eq!(
            beam.stress_function(StressKind::Shear, 0.5).expect("on the beam"),
            3.0,
            epsilon = 1.0e-12
        );

        let mut reversed = beam.clone();
        reversed.reset();
        let start = reversed.solve(Vector3::zero(), true).expect("solves");
        assert_relative_eq!(start.y, -3.0, epsilon = 1.0e-12);
    }

    #[test]
    fn load_just_short_of_the_end_keeps_the_full_length() {
        let mut beam = Beam::new(2.0).expect("valid length");
        beam.add_concentrated(1.0, 2.0 - 0.5e-9, 90.0).expect("load on the beam");
        beam.solve(Vector3::zero(), false).expect("solves");
        let diagram = beam.diagram().expect("solved");
        assert_eq!(diagram.segments().last().map(|s| s.end), Some(2.0));
    }
}
