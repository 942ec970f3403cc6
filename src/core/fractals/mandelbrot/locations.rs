use crate::core::data::viewport::Viewport;

/// A named viewport worth jumping to.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Location {
    pub name: &'static str,
    pub viewport: Viewport,
}

const fn location(name: &'static str, center_x: f64, center_y: f64, zoom: f64) -> Location {
    Location {
        name,
        viewport: Viewport {
            center_x,
            center_y,
            zoom,
        },
    }
}

pub const FULL_SET: &str = "Full Set";

pub static FAVOURITE_LOCATIONS: [Location; 7] = [
    location(FULL_SET, -0.5, 0.0, 1.5),
    location("Seahorse Valley", -0.745, 0.186, 25.0),
    location("Elephant Valley", 0.275, 0.0, 12.0),
    location("Double Spiral", -0.7435669, 0.1314023, 200.0),
    location("Lightning", -0.170337, -1.06506, 50.0),
    location("Starfish", -0.374004139, 0.659792175, 500.0),
    location("Mini Mandelbrot", -1.7490863748, 0.0, 1000.0),
];

/// Read-only view over a set of named locations.
///
/// Callers hold one of these instead of reaching for a global, which keeps
/// tests free to pass a table of their own.
#[derive(Debug, Copy, Clone)]
pub struct LocationTable<'a> {
    locations: &'a [Location],
}

impl<'a> LocationTable<'a> {
    #[must_use]
    pub const fn new(locations: &'a [Location]) -> Self {
        Self { locations }
    }

    /// Case-insensitive lookup by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&'a Location> {
        self.locations
            .iter()
            .find(|location| location.name.eq_ignore_ascii_case(name.trim()))
    }

    #[must_use]
    pub fn viewport(&self, name: &str) -> Option<Viewport> {
        self.find(name).map(|location| location.viewport)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Location> + 'a {
        self.locations.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

impl Default for LocationTable<'static> {
    fn default() -> Self {
        Self::new(&FAVOURITE_LOCATIONS)
    }
}
