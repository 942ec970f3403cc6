use crate::core::colour::gradient::{ColourStop, StopId};
use crate::core::data::colour::Colour;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Smallest gap allowed between two interior stops.
pub const MIN_STOP_SEPARATION: f64 = 0.005;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GradientError {
    #[error("a gradient needs at least two stops, got {count}")]
    TooFewStops { count: usize },
    #[error("the first stop must sit at position 0, found {position}")]
    MissingStartStop { position: f64 },
    #[error("the last stop must sit at position 1, found {position}")]
    MissingEndStop { position: f64 },
    #[error("stop {id} has position {position}, expected a finite value in [0, 1]")]
    PositionOutOfRange { id: StopId, position: f64 },
    #[error("stop {id} is out of order")]
    Unsorted { id: StopId },
    #[error("stops {first} and {second} are closer than {}", MIN_STOP_SEPARATION)]
    TooClose { first: StopId, second: StopId },
    #[error("no stop with id {0}")]
    UnknownStop(StopId),
    #[error("boundary stop {0} cannot be moved or removed")]
    BoundaryStop(StopId),
    #[error("stop id {0} is used more than once")]
    DuplicateId(StopId),
}

/// Checks the invariants the gradient engine relies on.
pub fn validate_stops(stops: &[ColourStop]) -> Result<(), GradientError> {
    let count = stops.len();
    if count < 2 {
        return Err(GradientError::TooFewStops { count });
    }

    let mut seen = HashSet::with_capacity(count);
    for stop in stops {
        if !stop.position.is_finite() || !(0.0..=1.0).contains(&stop.position) {
            return Err(GradientError::PositionOutOfRange {
                id: stop.id.clone(),
                position: stop.position,
            });
        }
        if !seen.insert(stop.id.as_str()) {
            return Err(GradientError::DuplicateId(stop.id.clone()));
        }
    }

    let first = &stops[0];
    if first.position != 0.0 {
        return Err(GradientError::MissingStartStop {
            position: first.position,
        });
    }

    let last = &stops[count - 1];
    if last.position != 1.0 {
        return Err(GradientError::MissingEndStop {
            position: last.position,
        });
    }

    // only the boundary stops may sit on 0 or 1
    for stop in &stops[1..count - 1] {
        if stop.position <= 0.0 || stop.position >= 1.0 {
            return Err(GradientError::PositionOutOfRange {
                id: stop.id.clone(),
                position: stop.position,
            });
        }
    }

    for pair in stops.windows(2) {
        if pair[1].position < pair[0].position {
            return Err(GradientError::Unsorted {
                id: pair[1].id.clone(),
            });
        }
    }

    let interior = &stops[1..count - 1];
    for pair in interior.windows(2) {
        if pair[1].position - pair[0].position < MIN_STOP_SEPARATION {
            return Err(GradientError::TooClose {
                first: pair[0].id.clone(),
                second: pair[1].id.clone(),
            });
        }
    }

    Ok(())
}

/// An owned stop list that stays valid across every edit.
///
/// This is the editing-side counterpart of [`crate::core::colour::gradient::resolve`]:
/// whatever collaborator drives the stop editor mutates the list through
/// these operations, so the render side can assume sorted, bounded stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ColourStop>", into = "Vec<ColourStop>")]
pub struct GradientStops {
    stops: Vec<ColourStop>,
    next_id: u64,
}

impl GradientStops {
    pub fn new(stops: Vec<ColourStop>) -> Result<Self, GradientError> {
        validate_stops(&stops)?;

        Ok(Self {
            next_id: stops.len() as u64,
            stops,
        })
    }

    #[must_use]
    pub fn as_slice(&self) -> &[ColourStop] {
        &self.stops
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<ColourStop> {
        self.stops
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &StopId) -> Option<&ColourStop> {
        self.stops.iter().find(|stop| &stop.id == id)
    }

    /// Adds an interior stop and returns its generated id.
    pub fn insert(&mut self, colour: Colour, position: f64) -> Result<StopId, GradientError> {
        let id = self.generate_id();

        if !position.is_finite() || position <= 0.0 || position >= 1.0 {
            return Err(GradientError::PositionOutOfRange { id, position });
        }

        self.check_separation(&id, position)?;

        let index = self
            .stops
            .iter()
            .position(|stop| stop.position > position)
            .unwrap_or(self.stops.len() - 1);

        self.stops.insert(
            index,
            ColourStop {
                id: id.clone(),
                colour,
                position,
            },
        );
        self.next_id += 1;

        Ok(id)
    }

    /// Moves an interior stop, clamping it strictly inside `(0, 1)`.
    pub fn move_stop(&mut self, id: &StopId, position: f64) -> Result<(), GradientError> {
        let index = self.interior_index(id)?;

        if position.is_nan() {
            return Err(GradientError::PositionOutOfRange {
                id: id.clone(),
                position,
            });
        }

        let position = position.clamp(MIN_STOP_SEPARATION, 1.0 - MIN_STOP_SEPARATION);
        self.check_separation(id, position)?;

        self.stops[index].position = position;
        self.stops.sort_by(|a, b| a.position.total_cmp(&b.position));

        Ok(())
    }

    /// Boundary stops can be recoloured, only their position is fixed.
    pub fn recolour(&mut self, id: &StopId, colour: Colour) -> Result<(), GradientError> {
        let stop = self
            .stops
            .iter_mut()
            .find(|stop| &stop.id == id)
            .ok_or_else(|| GradientError::UnknownStop(id.clone()))?;
        stop.colour = colour;

        Ok(())
    }

    pub fn remove(&mut self, id: &StopId) -> Result<ColourStop, GradientError> {
        let index = self.interior_index(id)?;

        Ok(self.stops.remove(index))
    }

    fn interior_index(&self, id: &StopId) -> Result<usize, GradientError> {
        let index = self
            .stops
            .iter()
            .position(|stop| &stop.id == id)
            .ok_or_else(|| GradientError::UnknownStop(id.clone()))?;

        if index == 0 || index == self.stops.len() - 1 {
            return Err(GradientError::BoundaryStop(id.clone()));
        }

        Ok(index)
    }

    fn check_separation(&self, id: &StopId, position: f64) -> Result<(), GradientError> {
        let last = self.stops.len() - 1;
        let crowded = self.stops[1..last]
            .iter()
            .filter(|stop| &stop.id != id)
            .find(|stop| (stop.position - position).abs() < MIN_STOP_SEPARATION);

        match crowded {
            Some(stop) => Err(GradientError::TooClose {
                first: stop.id.clone(),
                second: id.clone(),
            }),
            None => Ok(()),
        }
    }

    fn generate_id(&self) -> StopId {
        let mut n = self.next_id;
        loop {
            let id = StopId::new(format!("stop-{}", n));
            if self.get(&id).is_none() {
                return id;
            }
            n += 1;
        }
    }
}

impl Default for GradientStops {
    /// White to black.
    fn default() -> Self {
        Self {
            stops: vec![
                ColourStop::new("start", Colour::WHITE, 0.0),
                ColourStop::new("end", Colour::BLACK, 1.0),
            ],
            next_id: 2,
        }
    }
}

impl TryFrom<Vec<ColourStop>> for GradientStops {
    type Error = GradientError;

    fn try_from(stops: Vec<ColourStop>) -> Result<Self, Self::Error> {
        Self::new(stops)
    }
}

impl From<GradientStops> for Vec<ColourStop> {
    fn from(stops: GradientStops) -> Self {
        stops.into_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(stops: &GradientStops) -> Vec<&str> {
        stops.as_slice().iter().map(|stop| stop.id.as_str()).collect()
    }

    fn three_stops() -> GradientStops {
        GradientStops::new(vec![
            ColourStop::new("start", Colour::BLACK, 0.0),
            ColourStop::new("mid", Colour::new(255, 0, 0), 0.5),
            ColourStop::new("end", Colour::WHITE, 1.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_default_is_white_to_black() {
        let stops = GradientStops::default();

        assert_eq!(ids(&stops), vec!["start", "end"]);
        assert_eq!(stops.as_slice()[0].colour, Colour::WHITE);
        assert_eq!(stops.as_slice()[1].colour, Colour::BLACK);
        assert!(validate_stops(stops.as_slice()).is_ok());
    }

    #[test]
    fn test_validate_requires_boundaries() {
        assert_eq!(
            validate_stops(&[ColourStop::new("a", Colour::BLACK, 0.0)]),
            Err(GradientError::TooFewStops { count: 1 })
        );
        assert_eq!(
            validate_stops(&[
                ColourStop::new("a", Colour::BLACK, 0.1),
                ColourStop::new("b", Colour::WHITE, 1.0),
            ]),
            Err(GradientError::MissingStartStop { position: 0.1 })
        );
        assert_eq!(
            validate_stops(&[
                ColourStop::new("a", Colour::BLACK, 0.0),
                ColourStop::new("b", Colour::WHITE, 0.9),
            ]),
            Err(GradientError::MissingEndStop { position: 0.9 })
        );
    }

    #[test]
    fn test_validate_rejects_bad_positions_and_ids() {
        assert!(matches!(
            validate_stops(&[
                ColourStop::new("a", Colour::BLACK, 0.0),
                ColourStop::new("b", Colour::BLACK, f64::NAN),
                ColourStop::new("c", Colour::WHITE, 1.0),
            ]),
            Err(GradientError::PositionOutOfRange { .. })
        ));
        assert_eq!(
            validate_stops(&[
                ColourStop::new("a", Colour::BLACK, 0.0),
                ColourStop::new("b", Colour::BLACK, 0.7),
                ColourStop::new("c", Colour::BLACK, 0.3),
                ColourStop::new("d", Colour::WHITE, 1.0),
            ]),
            Err(GradientError::Unsorted { id: StopId::new("c") })
        );
        assert_eq!(
            validate_stops(&[
                ColourStop::new("a", Colour::BLACK, 0.0),
                ColourStop::new("a", Colour::WHITE, 1.0),
            ]),
            Err(GradientError::DuplicateId(StopId::new("a")))
        );
    }

    #[test]
    fn test_validate_keeps_interior_stops_off_the_boundaries() {
        assert_eq!(
            validate_stops(&[
                ColourStop::new("start", Colour::WHITE, 0.0),
                ColourStop::new("x", Colour::new(255, 0, 0), 1.0),
                ColourStop::new("end", Colour::new(0, 0, 255), 1.0),
            ]),
            Err(GradientError::PositionOutOfRange {
                id: StopId::new("x"),
                position: 1.0
            })
        );
        assert_eq!(
            validate_stops(&[
                ColourStop::new("start", Colour::WHITE, 0.0),
                ColourStop::new("x", Colour::new(255, 0, 0), 0.0),
                ColourStop::new("end", Colour::new(0, 0, 255), 1.0),
            ]),
            Err(GradientError::PositionOutOfRange {
                id: StopId::new("x"),
                position: 0.0
            })
        );
        assert!(GradientStops::new(vec![
            ColourStop::new("start", Colour::WHITE, 0.0),
            ColourStop::new("x", Colour::new(255, 0, 0), 1.0),
            ColourStop::new("end", Colour::new(0, 0, 255), 1.0),
        ])
        .is_err());
    }

    #[test]
    fn test_min_separation_applies_to_interior_stops_only() {
        // boundary neighbours may sit closer than the minimum
        assert!(validate_stops(&[
            ColourStop::new("a", Colour::BLACK, 0.0),
            ColourStop::new("b", Colour::BLACK, 0.001),
            ColourStop::new("c", Colour::WHITE, 1.0),
        ])
        .is_ok());

        assert_eq!(
            validate_stops(&[
                ColourStop::new("a", Colour::BLACK, 0.0),
                ColourStop::new("b", Colour::BLACK, 0.5),
                ColourStop::new("c", Colour::BLACK, 0.502),
                ColourStop::new("d", Colour::WHITE, 1.0),
            ]),
            Err(GradientError::TooClose {
                first: StopId::new("b"),
                second: StopId::new("c")
            })
        );
    }

    #[test]
    fn test_insert_keeps_order_and_generates_ids() {
        let mut stops = three_stops();

        let low = stops.insert(Colour::new(0, 0, 255), 0.25).unwrap();
        let high = stops.insert(Colour::new(0, 255, 0), 0.75).unwrap();

        assert_ne!(low, high);
        assert_eq!(ids(&stops), vec!["start", low.as_str(), "mid", high.as_str(), "end"]);
        assert!(validate_stops(stops.as_slice()).is_ok());
    }

    #[test]
    fn test_insert_rejects_boundary_and_crowded_positions() {
        let mut stops = three_stops();

        assert!(matches!(
            stops.insert(Colour::BLACK, 0.0),
            Err(GradientError::PositionOutOfRange { .. })
        ));
        assert!(matches!(
            stops.insert(Colour::BLACK, 1.2),
            Err(GradientError::PositionOutOfRange { .. })
        ));
        assert!(matches!(
            stops.insert(Colour::BLACK, 0.503),
            Err(GradientError::TooClose { .. })
        ));
        assert_eq!(stops.len(), 3);
    }

    #[test]
    fn test_insert_skips_ids_already_taken() {
        let mut stops = GradientStops::new(vec![
            ColourStop::new("start", Colour::BLACK, 0.0),
            ColourStop::new("stop-3", Colour::BLACK, 0.5),
            ColourStop::new("end", Colour::WHITE, 1.0),
        ])
        .unwrap();

        let id = stops.insert(Colour::WHITE, 0.25).unwrap();

        assert_eq!(id, StopId::new("stop-4"));
    }

    #[test]
    fn test_move_stop_resorts_and_clamps() {
        let mut stops = three_stops();
        let added = stops.insert(Colour::new(0, 0, 255), 0.25).unwrap();

        stops.move_stop(&added, 0.9).unwrap();
        assert_eq!(ids(&stops), vec!["start", "mid", added.as_str(), "end"]);

        stops.move_stop(&added, 5.0).unwrap();
        assert_eq!(stops.get(&added).unwrap().position, 1.0 - MIN_STOP_SEPARATION);

        stops.move_stop(&added, -5.0).unwrap();
        assert_eq!(stops.get(&added).unwrap().position, MIN_STOP_SEPARATION);
        assert_eq!(ids(&stops), vec!["start", added.as_str(), "mid", "end"]);
        assert!(validate_stops(stops.as_slice()).is_ok());
    }

    #[test]
    fn test_move_stop_refuses_boundaries_and_crowding() {
        let mut stops = three_stops();
        let added = stops.insert(Colour::new(0, 0, 255), 0.25).unwrap();

        assert_eq!(
            stops.move_stop(&StopId::new("start"), 0.5),
            Err(GradientError::BoundaryStop(StopId::new("start")))
        );
        assert_eq!(
            stops.move_stop(&added, 0.501),
            Err(GradientError::TooClose {
                first: StopId::new("mid"),
                second: added.clone()
            })
        );
        assert_eq!(stops.get(&added).unwrap().position, 0.25);
    }

    #[test]
    fn test_recolour_and_remove() {
        let mut stops = three_stops();

        stops
            .recolour(&StopId::new("start"), Colour::new(1, 2, 3))
            .unwrap();
        assert_eq!(stops.as_slice()[0].colour, Colour::new(1, 2, 3));

        let removed = stops.remove(&StopId::new("mid")).unwrap();
        assert_eq!(removed.id, StopId::new("mid"));
        assert_eq!(ids(&stops), vec!["start", "end"]);

        assert_eq!(
            stops.remove(&StopId::new("end")),
            Err(GradientError::BoundaryStop(StopId::new("end")))
        );
        assert_eq!(
            stops.recolour(&StopId::new("gone"), Colour::BLACK),
            Err(GradientError::UnknownStop(StopId::new("gone")))
        );
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: GradientStops = serde_json::from_str(
            r##"[{"id": "a", "color": "#000000", "position": 0.0},
                 {"id": "b", "color": "#ffffff", "position": 1.0}]"##,
        )
        .unwrap();
        assert_eq!(ok.len(), 2);

        let missing_end = serde_json::from_str::<GradientStops>(
            r##"[{"id": "a", "color": "#000000", "position": 0.0},
                 {"id": "b", "color": "#ffffff", "position": 0.5}]"##,
        );
        assert!(missing_end.is_err());
    }
}
