use proj_compat_sys::PJ_COORD;
use std::mem;

/// A coordinate of up to four dimensions, `x, y, z, t`.
///
/// Axis order and units are those of the CRS the coordinate belongs to; for
/// EPSG:4326 `x` is the latitude, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[repr(transparent)]
pub struct Coord(pub [f64; 4]);

// `trans_array` hands a `&mut [Coord]` to PROJ as a `PJ_COORD *`.
const _: () = assert!(mem::size_of::<Coord>() == mem::size_of::<PJ_COORD>());
const _: () = assert!(mem::align_of::<Coord>() == mem::align_of::<PJ_COORD>());

impl Coord {
    pub const fn new(x: f64, y: f64, z: f64, t: f64) -> Self {
        Coord([x, y, z, t])
    }

    pub const fn xy(x: f64, y: f64) -> Self {
        Coord([x, y, 0.0, 0.0])
    }

    /// Copy up to four values from `values`; missing ones are zero.
    pub fn from_slice(values: &[f64]) -> Self {
        let mut coord = Coord::default();
        let n = values.len().min(4);
        coord.0[..n].copy_from_slice(&values[..n]);
        coord
    }

    /// Copy as many values as `values` holds, up to four.
    pub fn write_to_slice(&self, values: &mut [f64]) {
        let n = values.len().min(4);
        values[..n].copy_from_slice(&self.0[..n]);
    }

    pub fn x(&self) -> f64 {
        self.0[0]
    }

    pub fn y(&self) -> f64 {
        self.0[1]
    }

    pub fn z(&self) -> f64 {
        self.0[2]
    }

    pub fn t(&self) -> f64 {
        self.0[3]
    }

    /// Convert `x` and `y` from degrees to radians.
    pub fn deg_to_rad(self) -> Self {
        Coord([self.0[0].to_radians(), self.0[1].to_radians(), self.0[2], self.0[3]])
    }

    /// Convert `x` and `y` from radians to degrees.
    pub fn rad_to_deg(self) -> Self {
        Coord([self.0[0].to_degrees(), self.0[1].to_degrees(), self.0[2], self.0[3]])
    }
}

impl From<[f64; 4]> for Coord {
    fn from(v: [f64; 4]) -> Self {
        Coord(v)
    }
}

impl From<Coord> for [f64; 4] {
    fn from(coord: Coord) -> Self {
        coord.0
    }
}

impl From<Coord> for PJ_COORD {
    fn from(coord: Coord) -> Self {
        PJ_COORD { v: coord.0 }
    }
}

impl From<PJ_COORD> for Coord {
    fn from(coord: PJ_COORD) -> Self {
        // Safety: every PJ_COORD variant is four (or fewer) doubles.
        Coord(unsafe { coord.v })
    }
}

/// Copy each slice into a [`Coord`], as [`Coord::from_slice`] does.
pub fn coords_from_slices<S: AsRef<[f64]>>(slices: &[S]) -> Vec<Coord> {
    slices
        .iter()
        .map(|s| Coord::from_slice(s.as_ref()))
        .collect()
}

/// A bounding box in the units and axis order of its CRS.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl Bounds {
    pub const fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Bounds {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Identity,
    Inverse,
}

impl Direction {
    pub(crate) fn as_raw(self) -> proj_compat_sys::PJ_DIRECTION {
        match self {
            Direction::Forward => proj_compat_sys::PJ_DIRECTION_PJ_FWD,
            Direction::Identity => proj_compat_sys::PJ_DIRECTION_PJ_IDENT,
            Direction::Inverse => proj_compat_sys::PJ_DIRECTION_PJ_INV,
        }
    }
}

/// Geodesic between two points: distance in metres, azimuths in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geod {
    pub distance: f64,
    pub forward_azimuth: f64,
    pub reverse_azimuth: f64,
}
